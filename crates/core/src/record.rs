//! Extraction data model and the final job record.
//!
//! This module defines [`FieldCandidate`], the unit that strategies compete
//! with, and [`JobRecord`], the immutable output handed to the caller. The
//! record always carries every field: when extraction fails the field holds
//! its documented fallback literal, and the quality score signals the
//! unreliability rather than an error.

use serde::Serialize;

use crate::score::QualityGrade;

/// Fallback literal when no strategy resolves the company.
pub const COMPANY_FALLBACK: &str = "Company Name Not Found";
/// Fallback literal when no strategy resolves the title.
pub const TITLE_FALLBACK: &str = "Job Title Not Found";
/// Fallback literal when no strategy resolves the location.
pub const LOCATION_FALLBACK: &str = "Location Not Specified";
/// Fallback literal when no strategy resolves the description.
pub const DESCRIPTION_FALLBACK: &str = "Job description could not be extracted";

/// The extraction technique that produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Embedded JobPosting structured data.
    StructuredData,
    /// Page-level descriptive meta tags.
    MetaTag,
    /// Field-specific CSS locator lists.
    Selector,
    /// Document headings.
    Heading,
    /// Regular patterns over page or body text.
    Pattern,
    /// Company derived from the hostname.
    DomainFallback,
    /// Remote-work keyword density in body text.
    RemoteDetection,
    /// The page's own address.
    CurrentLocation,
    /// A ranked content block from page analysis.
    ContentBlock,
    /// An auxiliary embedded sub-document.
    Frame,
    /// No strategy produced a candidate; value is the fallback literal.
    Failed,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Method::StructuredData => "structured_data",
            Method::MetaTag => "meta_tag",
            Method::Selector => "selector",
            Method::Heading => "heading",
            Method::Pattern => "pattern",
            Method::DomainFallback => "domain_fallback",
            Method::RemoteDetection => "remote_detection",
            Method::CurrentLocation => "current_location",
            Method::ContentBlock => "content_block",
            Method::Frame => "frame",
            Method::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// A single strategy's proposed value for a field.
///
/// The value is always trimmed, whitespace-normalized text and the
/// confidence always lies in [0, 100]; strategies normalize before
/// constructing a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCandidate {
    pub value: String,
    pub confidence: u8,
    pub method: Method,
}

impl FieldCandidate {
    /// Creates a candidate, clamping confidence into range.
    pub fn new(value: impl Into<String>, confidence: u8, method: Method) -> Self {
        Self { value: value.into(), confidence: confidence.min(100), method }
    }

    /// Creates the zero-confidence fallback for an unresolved field.
    pub fn fallback(literal: impl Into<String>) -> Self {
        Self { value: literal.into(), confidence: 0, method: Method::Failed }
    }

    /// Whether this candidate is an unresolved-field fallback.
    pub fn is_fallback(&self) -> bool {
        self.method == Method::Failed
    }
}

/// The winning method per field, recorded on the job record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldMethods {
    pub company: Method,
    pub title: Method,
    pub location: Method,
    pub description: Method,
    pub application_url: Method,
}

/// Metadata describing how a record was extracted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionMeta {
    /// Winning method per field.
    pub methods: FieldMethods,
    /// Wall-clock time of the extraction run in milliseconds.
    pub elapsed_ms: u64,
    /// Composite completeness score, 0-100.
    pub quality_score: u8,
    /// Banded label for the quality score.
    pub quality_grade: QualityGrade,
    /// Mean per-field confidence, 0-100.
    pub confidence_score: u8,
}

/// The final extracted job posting.
///
/// Created once per extraction call and immutable afterwards; ownership
/// passes to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecord {
    pub company: String,
    pub title: String,
    pub location: String,
    pub description: String,
    pub application_url: String,
    /// The address the document was loaded from.
    pub source_url: String,
    /// Display name of the detected site category.
    pub site: String,
    pub extraction: ExtractionMeta,
}

impl JobRecord {
    /// Serializes the record as compact JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Serializes the record as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
