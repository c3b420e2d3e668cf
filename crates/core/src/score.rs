//! Composite quality and confidence scoring.
//!
//! Once every field tournament has resolved, this module folds the five
//! winners into record-level metrics: a 0-100 quality score rewarding
//! completeness, its banded grade, and a confidence score averaging the
//! per-field certainty. The weight ordering (title > company ~ description
//! > location) follows the field importance observed in practice; the exact
//! constants are defaults, not tuned guarantees.

use serde::Serialize;

use crate::extractors::FieldSet;

/// Banded label for a quality score, monotonic in the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum QualityGrade {
    Failed,
    Poor,
    Fair,
    Good,
    #[serde(rename = "Very Good")]
    VeryGood,
    Excellent,
    Outstanding,
}

impl QualityGrade {
    /// Maps a quality score to its band.
    pub fn from_score(score: u8) -> Self {
        match score {
            95.. => QualityGrade::Outstanding,
            90.. => QualityGrade::Excellent,
            80.. => QualityGrade::VeryGood,
            70.. => QualityGrade::Good,
            60.. => QualityGrade::Fair,
            50.. => QualityGrade::Poor,
            _ => QualityGrade::Failed,
        }
    }
}

impl std::fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            QualityGrade::Outstanding => "Outstanding",
            QualityGrade::Excellent => "Excellent",
            QualityGrade::VeryGood => "Very Good",
            QualityGrade::Good => "Good",
            QualityGrade::Fair => "Fair",
            QualityGrade::Poor => "Poor",
            QualityGrade::Failed => "Failed",
        };
        write!(f, "{}", label)
    }
}

/// Record-level metrics computed from resolved fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeScore {
    pub quality_score: u8,
    pub quality_grade: QualityGrade,
    pub confidence_score: u8,
}

/// Scores a resolved field set against the page's content quality.
pub fn score(fields: &FieldSet, page_quality: f64) -> CompositeScore {
    let quality = quality_score(fields, page_quality);

    CompositeScore {
        quality_score: quality,
        quality_grade: QualityGrade::from_score(quality),
        confidence_score: confidence_score(fields),
    }
}

/// Computes the composite quality score, 0-100.
///
/// Fixed weights are awarded when a field resolved to a real value:
/// company 20, title 25, location 20, description 25 (only at 100+ chars).
/// Company and title confidences add up to 5 points each, and a page whose
/// content quality exceeds 70 adds 10 more. Clamped to 100.
pub fn quality_score(fields: &FieldSet, page_quality: f64) -> u8 {
    let mut score = 0.0;

    if !fields.company.is_fallback() && fields.company.value.len() >= 2 {
        score += 20.0;
    }
    if !fields.title.is_fallback() && fields.title.value.len() >= 5 {
        score += 25.0;
    }
    if !fields.location.is_fallback() && fields.location.value.len() >= 2 {
        score += 20.0;
    }
    if !fields.description.is_fallback() && fields.description.value.len() >= 100 {
        score += 25.0;
    }

    score += f64::from(fields.company.confidence) * 0.05;
    score += f64::from(fields.title.confidence) * 0.05;

    if page_quality > 70.0 {
        score += 10.0;
    }

    score.round().min(100.0) as u8
}

/// Computes the mean per-field confidence, 0-100.
pub fn confidence_score(fields: &FieldSet) -> u8 {
    let confidences = fields.confidences();
    let sum: u32 = confidences.iter().map(|c| u32::from(*c)).sum();

    (sum as f64 / confidences.len() as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{
        COMPANY_FALLBACK, DESCRIPTION_FALLBACK, FieldCandidate, LOCATION_FALLBACK, Method, TITLE_FALLBACK,
    };

    fn resolved_fields() -> FieldSet {
        FieldSet {
            company: FieldCandidate::new("Acme Corp", 85, Method::StructuredData),
            title: FieldCandidate::new("Backend Engineer", 90, Method::Selector),
            location: FieldCandidate::new("Remote", 80, Method::RemoteDetection),
            description: FieldCandidate::new(
                "Responsibilities: build the backend platform with the team. ".repeat(3),
                75,
                Method::ContentBlock,
            ),
            apply_url: FieldCandidate::new("https://acme.example/apply", 90, Method::Selector),
        }
    }

    fn empty_fields() -> FieldSet {
        FieldSet {
            company: FieldCandidate::fallback(COMPANY_FALLBACK),
            title: FieldCandidate::fallback(TITLE_FALLBACK),
            location: FieldCandidate::fallback(LOCATION_FALLBACK),
            description: FieldCandidate::fallback(DESCRIPTION_FALLBACK),
            apply_url: FieldCandidate::new("https://x.io/", 60, Method::CurrentLocation),
        }
    }

    #[test]
    fn test_quality_score_full_record() {
        // 20 + 25 + 20 + 25 field weights, 8.75 confidence bonus, +10 page
        let score = quality_score(&resolved_fields(), 80.0);
        assert_eq!(score, 100);
    }

    #[test]
    fn test_quality_score_without_page_bonus() {
        let score = quality_score(&resolved_fields(), 50.0);
        assert_eq!(score, 99); // 90 + 8.75 rounded
    }

    #[test]
    fn test_quality_score_empty_record() {
        assert_eq!(quality_score(&empty_fields(), 0.0), 0);
    }

    #[test]
    fn test_short_description_not_counted() {
        let mut fields = resolved_fields();
        fields.description = FieldCandidate::new("Responsibilities: short.", 75, Method::Selector);

        // loses the 25-point description weight
        assert_eq!(quality_score(&fields, 50.0), 74);
    }

    #[test]
    fn test_confidence_score_mean() {
        assert_eq!(confidence_score(&resolved_fields()), 84); // (85+90+80+75+90)/5
        assert_eq!(confidence_score(&empty_fields()), 12); // only the URL carries confidence
    }

    #[test]
    fn test_grade_bands_monotonic() {
        let grades: Vec<QualityGrade> = (0..=100).map(|s| QualityGrade::from_score(s)).collect();
        assert!(grades.windows(2).all(|w| w[0] <= w[1]));

        assert_eq!(QualityGrade::from_score(0), QualityGrade::Failed);
        assert_eq!(QualityGrade::from_score(49), QualityGrade::Failed);
        assert_eq!(QualityGrade::from_score(50), QualityGrade::Poor);
        assert_eq!(QualityGrade::from_score(72), QualityGrade::Good);
        assert_eq!(QualityGrade::from_score(90), QualityGrade::Excellent);
        assert_eq!(QualityGrade::from_score(100), QualityGrade::Outstanding);
    }

    #[test]
    fn test_grade_display() {
        assert_eq!(QualityGrade::VeryGood.to_string(), "Very Good");
        assert_eq!(QualityGrade::Failed.to_string(), "Failed");
    }
}
