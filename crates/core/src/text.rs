//! Text normalization and field plausibility scoring.
//!
//! Raw text pulled out of arbitrary markup is messy: non-breaking spaces,
//! runs of indentation, blank-line stacks. [`normalize`] flattens all of
//! that into clean text, and [`score_field`] judges how plausible a
//! normalized string is as a value for a given field, returning a 0-100
//! confidence plus human-readable reasons.
//!
//! # Example
//!
//! ```rust
//! use jobsift_core::text::{FieldKind, normalize, score_field};
//!
//! let value = normalize("  Senior\u{00A0}Backend   Engineer ");
//! let score = score_field(&value, FieldKind::Title);
//! assert!(score.confidence > 50);
//! ```

use regex::Regex;

/// The record field a value is being considered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Company,
    Title,
    Location,
    Description,
    /// Scored structurally by the validator, not by text heuristics.
    ApplyUrl,
}

impl FieldKind {
    /// Lowercase label used in logs and extraction metadata.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Company => "company",
            FieldKind::Title => "title",
            FieldKind::Location => "location",
            FieldKind::Description => "description",
            FieldKind::ApplyUrl => "application_url",
        }
    }
}

/// Plausibility verdict for a candidate value.
#[derive(Debug, Clone)]
pub struct FieldScore {
    /// Confidence in the value, 0-100.
    pub confidence: u8,
    /// Human-readable adjustments that produced the confidence.
    pub reasons: Vec<String>,
}

/// Baseline confidence before field-specific adjustments.
const BASELINE: i32 = 50;

/// Normalizes raw extracted text.
///
/// Strips non-breaking and zero-width space characters, collapses runs of
/// spaces and tabs to a single space, collapses blank-line runs, and trims.
/// Structural newlines produced by the block-aware text walker survive.
pub fn normalize(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .map(|c| match c {
            '\u{00A0}' | '\u{2000}'..='\u{200B}' | '\u{FEFF}' => ' ',
            c => c,
        })
        .collect();

    stripped
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Scores a normalized string against field-specific heuristics.
///
/// Starts from a baseline of 50 and applies the adjustments listed per
/// field below; the result clamps to [0, 100].
pub fn score_field(text: &str, kind: FieldKind) -> FieldScore {
    let mut confidence = BASELINE;
    let mut reasons = Vec::new();
    let lower = text.to_lowercase();

    match kind {
        FieldKind::Company => score_company(text, &lower, &mut confidence, &mut reasons),
        FieldKind::Title => score_title(text, &lower, &mut confidence, &mut reasons),
        FieldKind::Location => score_location(text, &lower, &mut confidence, &mut reasons),
        FieldKind::Description => score_description(text, &lower, &mut confidence, &mut reasons),
        FieldKind::ApplyUrl => {}
    }

    FieldScore { confidence: confidence.clamp(0, 100) as u8, reasons }
}

/// Company: +20 legal-entity suffix, +15 length 2-50, -30 job stopwords.
fn score_company(text: &str, lower: &str, confidence: &mut i32, reasons: &mut Vec<String>) {
    let suffix = Regex::new(r"(?i)\b(inc|ltd|llc|corp|corporation|company|group)\b").unwrap();
    if suffix.is_match(text) {
        *confidence += 20;
        reasons.push("Contains legal-entity suffix".to_string());
    }

    if text.len() >= 2 && text.len() <= 50 {
        *confidence += 15;
        reasons.push("Appropriate length".to_string());
    }

    let stopwords = ["job", "career", "position", "apply", "search", "login"];
    if stopwords.iter().any(|w| lower.contains(w)) {
        *confidence -= 30;
        reasons.push("Contains job-related words".to_string());
    }
}

/// Title: +25 recognized title keyword, +15 length 5-100, -20 search label.
fn score_title(text: &str, lower: &str, confidence: &mut i32, reasons: &mut Vec<String>) {
    let keywords = [
        "engineer",
        "developer",
        "manager",
        "analyst",
        "specialist",
        "director",
        "lead",
        "senior",
        "junior",
        "associate",
        "consultant",
    ];
    if keywords.iter().any(|k| lower.contains(k)) {
        *confidence += 25;
        reasons.push("Contains job title keywords".to_string());
    }

    if text.len() >= 5 && text.len() <= 100 {
        *confidence += 15;
        reasons.push("Appropriate length".to_string());
    }

    if lower.contains("job") && lower.contains("search") {
        *confidence -= 20;
        reasons.push("Reads as navigation text".to_string());
    }
}

/// Location: +30 remote phrase, +25 "City, ST" pattern, +15 length 2-50.
fn score_location(text: &str, _lower: &str, confidence: &mut i32, reasons: &mut Vec<String>) {
    let remote = Regex::new(r"(?i)\b(remote|wfh|work from home)\b").unwrap();
    if remote.is_match(text) {
        *confidence += 30;
        reasons.push("Remote work indicator".to_string());
    }

    // Matched against original casing; city names lose this signal when
    // lowercased upstream.
    let city_state = Regex::new(r"\b([A-Z][a-z]+ [A-Z]{2}|[A-Z][a-z]+, [A-Z]{2})\b").unwrap();
    if city_state.is_match(text) {
        *confidence += 25;
        reasons.push("City, State pattern".to_string());
    }

    if text.len() >= 2 && text.len() <= 50 {
        *confidence += 15;
        reasons.push("Appropriate length".to_string());
    }
}

/// Description: +8 per descriptive keyword, +15 length >= 200, +10 when both
/// "responsibilities" and "requirements" appear.
fn score_description(text: &str, lower: &str, confidence: &mut i32, reasons: &mut Vec<String>) {
    let keywords = [
        "responsibilities",
        "requirements",
        "qualifications",
        "experience",
        "skills",
        "bachelor",
        "master",
        "degree",
    ];
    let keyword_count = keywords.iter().filter(|k| lower.contains(*k)).count() as i32;
    *confidence += keyword_count * 8;
    reasons.push(format!("Contains {} description keywords", keyword_count));

    if text.len() >= 200 {
        *confidence += 15;
        reasons.push("Substantial content length".to_string());
    }

    if lower.contains("responsibilities") && lower.contains("requirements") {
        *confidence += 10;
        reasons.push("Contains job description structure".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_normalize_whitespace_runs() {
        assert_eq!(normalize("  Senior   Backend\tEngineer  "), "Senior Backend Engineer");
    }

    #[test]
    fn test_normalize_strips_nbsp_and_zero_width() {
        assert_eq!(normalize("Acme\u{00A0}Corp\u{200B}"), "Acme Corp");
    }

    #[test]
    fn test_normalize_collapses_blank_lines() {
        let raw = "Responsibilities\n\n\n\nBuild things\n";
        assert_eq!(normalize(raw), "Responsibilities\nBuild things");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize("   \n \u{00A0} \n"), "");
    }

    #[rstest]
    #[case("Acme Corp", 85)] // suffix + length
    #[case("Globex", 65)] // length only
    #[case("Search jobs and apply", 35)] // length bonus, stopword penalty
    fn test_score_company(#[case] text: &str, #[case] expected: u8) {
        assert_eq!(score_field(text, FieldKind::Company).confidence, expected);
    }

    #[rstest]
    #[case("Senior Backend Engineer", 90)] // keyword + length
    #[case("Warehouse Operative", 65)] // length only
    #[case("Job search results", 45)] // length bonus, nav penalty
    fn test_score_title(#[case] text: &str, #[case] expected: u8) {
        assert_eq!(score_field(text, FieldKind::Title).confidence, expected);
    }

    #[test]
    fn test_score_location_remote() {
        let score = score_field("Remote", FieldKind::Location);
        assert_eq!(score.confidence, 95); // remote + length
        assert!(score.reasons.iter().any(|r| r.contains("Remote")));
    }

    #[test]
    fn test_score_location_city_state() {
        let score = score_field("Austin, TX", FieldKind::Location);
        assert_eq!(score.confidence, 90); // city-state + length
    }

    #[test]
    fn test_score_description_rich() {
        let text = format!(
            "Responsibilities include building services. Requirements: 5 years experience, strong skills. {}",
            "Additional context about the team and the role. ".repeat(3)
        );
        let score = score_field(&text, FieldKind::Description);

        // 4 keywords (+32), length (+15), structure (+10)
        assert_eq!(score.confidence, 100);
    }

    #[test]
    fn test_score_description_thin() {
        let score = score_field("We are hiring.", FieldKind::Description);
        assert_eq!(score.confidence, 50);
    }

    #[test]
    fn test_confidence_clamped() {
        let score = score_field("job career apply search login", FieldKind::Company);
        assert!(score.confidence <= 100);

        // baseline 50, length +15, stopwords -30
        assert_eq!(score.confidence, 35);
    }
}
