//! Structural validation of field values.
//!
//! The text heuristics in [`crate::text`] judge how plausible a value is;
//! this module enforces the hard floor: length bounds, forbidden generic
//! values, and URL well-formedness. A tournament winner that fails here is
//! demoted to the field's fallback rather than accepted.

use url::Url;

use crate::text::FieldKind;

/// Site brand names that show up where an employer name belongs.
const SITE_BRANDS: &[&str] = &["careers", "jobs", "naukri", "indeed", "linkedin", "glassdoor", "monster"];

/// Labels too generic to be a real job title.
const GENERIC_TITLES: &[&str] = &["job", "career", "position", "opportunity"];

/// Keywords a description must contain at least one of.
const REQUIRED_DESCRIPTION_KEYWORDS: &[&str] = &["responsibilities", "requirements", "experience", "skills"];

/// Outcome of validating a single value.
#[derive(Debug, Clone)]
pub struct Validation {
    pub valid: bool,
    pub issues: Vec<String>,
}

impl Validation {
    fn ok() -> Self {
        Self { valid: true, issues: Vec::new() }
    }

    fn fail(issue: impl Into<String>) -> Self {
        Self { valid: false, issues: vec![issue.into()] }
    }
}

/// Validates a value for minimum structural validity per field type.
///
/// # Example
///
/// ```rust
/// use jobsift_core::text::FieldKind;
/// use jobsift_core::validate::validate;
///
/// assert!(validate("Acme Corp", FieldKind::Company).valid);
/// assert!(!validate("indeed", FieldKind::Company).valid);
/// ```
pub fn validate(value: &str, kind: FieldKind) -> Validation {
    let value = value.trim();
    if value.is_empty() {
        return Validation::fail("Empty value");
    }

    match kind {
        FieldKind::Company => validate_company(value),
        FieldKind::Title => validate_title(value),
        FieldKind::Location => validate_location(value),
        FieldKind::Description => validate_description(value),
        FieldKind::ApplyUrl => validate_url(value),
    }
}

fn validate_company(company: &str) -> Validation {
    if company.len() < 1 {
        return Validation::fail("Company name too short");
    }
    if company.len() > 100 {
        return Validation::fail("Company name too long");
    }

    if SITE_BRANDS.contains(&company.to_lowercase().as_str()) {
        return Validation::fail("Site brand name, not an employer");
    }

    Validation::ok()
}

fn validate_title(title: &str) -> Validation {
    if title.len() < 3 {
        return Validation::fail("Title too short");
    }
    if title.len() > 200 {
        return Validation::fail("Title too long");
    }

    if GENERIC_TITLES.contains(&title.to_lowercase().as_str()) {
        return Validation::fail("Too generic a title");
    }

    Validation::ok()
}

fn validate_location(location: &str) -> Validation {
    if location.len() < 2 {
        return Validation::fail("Location too short");
    }
    if location.len() > 100 {
        return Validation::fail("Location too long");
    }

    Validation::ok()
}

fn validate_description(description: &str) -> Validation {
    if description.len() < 50 {
        return Validation::fail("Description too short");
    }
    if description.len() > 10_000 {
        return Validation::fail("Description too long");
    }

    let lower = description.to_lowercase();
    if !REQUIRED_DESCRIPTION_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Validation::fail("No job description content");
    }

    Validation::ok()
}

fn validate_url(url: &str) -> Validation {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Validation::ok(),
        Ok(_) => Validation::fail("Not an http(s) URL"),
        Err(_) => Validation::fail("Invalid URL format"),
    }
}
