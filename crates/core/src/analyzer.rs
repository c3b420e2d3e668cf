//! Page-level content analysis.
//!
//! The analyzer inspects the whole document exactly once per extraction run
//! and produces a [`PageProfile`]: structured-data presence, a ranked list
//! of candidate content blocks, semantic-structure signals, a 0-100 content
//! quality estimate, and the detected site category. Field extractors share
//! the profile read-only; nothing here mutates the document.

use url::Url;

use crate::parse::{Document, Element};
use crate::structured::has_job_posting;

/// Keywords whose presence marks a text block as job-domain content.
const JOB_KEYWORDS: &[&str] = &[
    "responsibilities",
    "requirements",
    "qualifications",
    "experience",
    "skills",
    "education",
    "bachelor",
    "master",
    "degree",
    "years",
    "candidate",
    "position",
    "role",
    "opportunity",
    "team",
    "company",
    "salary",
    "benefits",
    "remote",
    "office",
    "full-time",
    "part-time",
];

/// Section-header phrases that only appear inside real postings.
const SECTION_HEADERS: &[&str] = &[
    "job description",
    "about the role",
    "what you'll do",
    "requirements",
    "qualifications",
    "responsibilities",
    "about you",
    "what we're looking for",
];

/// Words that mark navigation chrome rather than posting content.
const NAV_WORDS: &[&str] = &["home", "about us", "contact", "privacy policy", "login", "register"];

/// Minimum text length for a container to be considered a content block.
const BLOCK_TEXT_THRESHOLD: usize = 200;

/// Minimum job-content score for a block to be retained.
const BLOCK_SCORE_THRESHOLD: i32 = 30;

/// A region of the document judged likely to contain the job description.
#[derive(Debug, Clone)]
pub struct ContentBlock<'a> {
    /// The underlying container element.
    pub element: Element<'a>,
    /// Job-content score; higher ranks first.
    pub score: i32,
    /// Raw text length of the block.
    pub text_len: usize,
    /// Selector-like locator for extraction metadata.
    pub locator: String,
}

/// Coarse structural signals about the document.
#[derive(Debug, Clone, Default)]
pub struct SemanticStructure {
    pub has_main: bool,
    pub has_article: bool,
    pub heading_count: usize,
    pub form_count: usize,
}

/// Job-specific page signals.
#[derive(Debug, Clone, Default)]
pub struct JobSignals {
    pub has_apply_link: bool,
    pub has_salary_info: bool,
    pub has_requirements: bool,
}

/// Detected category of the hosting site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteCategory {
    JobBoard,
    ApplicantTracking,
    CompanyCareerPage,
    Unknown,
}

impl SiteCategory {
    /// Human-readable name recorded on the job record.
    pub fn display_name(&self) -> &'static str {
        match self {
            SiteCategory::JobBoard => "Job Board",
            SiteCategory::ApplicantTracking => "Applicant Tracking System",
            SiteCategory::CompanyCareerPage => "Company Career Page",
            SiteCategory::Unknown => "Generic Site",
        }
    }
}

/// Immutable snapshot of one analysis pass over a document.
///
/// Lifetime is bounded by the extraction call that produced it.
#[derive(Debug, Clone)]
pub struct PageProfile<'a> {
    /// Whether the page embeds JobPosting structured data.
    pub has_structured_data: bool,
    /// Candidate content blocks, best first.
    pub content_blocks: Vec<ContentBlock<'a>>,
    /// Semantic-structure flags.
    pub structure: SemanticStructure,
    /// Job-specific page signals.
    pub signals: JobSignals,
    /// Whole-page content quality estimate, 0-100.
    pub content_quality: f64,
    /// Detected site category.
    pub site: SiteCategory,
}

/// Analyzes a document and produces its page profile.
pub fn analyze<'a>(doc: &'a Document, url: Option<&Url>) -> PageProfile<'a> {
    analyze_with(doc, url, BLOCK_TEXT_THRESHOLD, BLOCK_SCORE_THRESHOLD)
}

/// Analyzes a document with explicit content-block thresholds.
pub fn analyze_with<'a>(
    doc: &'a Document, url: Option<&Url>, block_text_threshold: usize, min_block_score: i32,
) -> PageProfile<'a> {
    PageProfile {
        has_structured_data: has_job_posting(doc),
        content_blocks: find_content_blocks(doc, block_text_threshold, min_block_score),
        structure: analyze_structure(doc),
        signals: find_job_signals(doc),
        content_quality: assess_content_quality(doc),
        site: detect_site_category(url),
    }
}

/// Scores text for job-domain content.
///
/// +5 per job keyword present, +10 per section-header phrase, -3 per
/// navigation word, clamped to zero.
pub fn job_content_score(text: &str) -> i32 {
    let lower = text.to_lowercase();

    let keyword_count = JOB_KEYWORDS.iter().filter(|k| lower.contains(*k)).count() as i32;
    let header_count = SECTION_HEADERS.iter().filter(|h| lower.contains(*h)).count() as i32;
    let nav_count = NAV_WORDS.iter().filter(|w| lower.contains(*w)).count() as i32;

    (keyword_count * 5 + header_count * 10 - nav_count * 3).max(0)
}

/// Discovers and ranks substantial-text content blocks.
fn find_content_blocks(doc: &Document, text_threshold: usize, score_threshold: i32) -> Vec<ContentBlock<'_>> {
    let candidates = doc
        .select(r#"div, section, article, main, [role="main"]"#)
        .unwrap_or_default();

    let mut blocks = Vec::new();
    for element in candidates {
        let text = element.text();
        let text = text.trim();
        if text.len() <= text_threshold {
            continue;
        }

        let score = job_content_score(text);
        if score > score_threshold {
            let locator = element.locator();
            blocks.push(ContentBlock { element, score, text_len: text.len(), locator });
        }
    }

    blocks.sort_by(|a, b| b.score.cmp(&a.score));
    blocks
}

fn analyze_structure(doc: &Document) -> SemanticStructure {
    SemanticStructure {
        has_main: doc.select_first(r#"main, [role="main"]"#).is_some(),
        has_article: doc.select_first("article").is_some(),
        heading_count: doc.select("h1, h2, h3, h4").map(|els| els.len()).unwrap_or(0),
        form_count: doc
            .select(r#"form, input[type="submit"], button[type="submit"]"#)
            .map(|els| els.len())
            .unwrap_or(0),
    }
}

fn find_job_signals(doc: &Document) -> JobSignals {
    let body_text = doc.body().map(|b| b.text().to_lowercase()).unwrap_or_default();

    JobSignals {
        has_apply_link: doc
            .select_first(r#"a[href*="apply"], .apply-button, .apply-now"#)
            .is_some(),
        has_salary_info: body_text.contains("salary") || body_text.contains("compensation") || body_text.contains('$'),
        has_requirements: body_text.contains("requirements") || body_text.contains("qualifications"),
    }
}

/// Estimates whole-page content quality on a 0-100 scale.
///
/// Weighted sum of the text-to-markup ratio (x50), structural bonuses
/// (main region, top heading, several paragraphs), and capped job-keyword
/// density of the full document text.
fn assess_content_quality(doc: &Document) -> f64 {
    let Some(body) = doc.body() else {
        return 0.0;
    };

    let text = body.text();
    let markup = body.inner_html();
    if markup.is_empty() {
        return 0.0;
    }

    let mut quality = (text.len() as f64 / markup.len() as f64) * 50.0;

    if doc.select_first(r#"main, [role="main"]"#).is_some() {
        quality += 10.0;
    }
    if doc.select_first("h1").is_some() {
        quality += 10.0;
    }
    if doc.select("p").map(|els| els.len()).unwrap_or(0) > 3 {
        quality += 10.0;
    }

    quality += (f64::from(job_content_score(&text)) / 5.0).min(20.0);

    quality.clamp(0.0, 100.0)
}

/// Categorizes the hosting site from its address.
fn detect_site_category(url: Option<&Url>) -> SiteCategory {
    let Some(url) = url else {
        return SiteCategory::Unknown;
    };

    let host = url.host_str().unwrap_or("").to_lowercase();
    let path = url.path().to_lowercase();

    let boards = ["naukri", "indeed", "linkedin", "glassdoor", "monster"];
    if boards.iter().any(|b| host.contains(b)) {
        return SiteCategory::JobBoard;
    }

    let trackers = ["greenhouse", "lever.co", "myworkdayjobs", "workday", "smartrecruiters", "icims"];
    if trackers.iter().any(|t| host.contains(t)) {
        return SiteCategory::ApplicantTracking;
    }

    let career_paths = ["career", "job", "hiring", "work-with-us"];
    if career_paths.iter().any(|p| path.contains(p)) {
        return SiteCategory::CompanyCareerPage;
    }

    SiteCategory::Unknown
}
