//! Job extraction engine entry point.
//!
//! This module provides the primary API for turning a loaded page into a
//! [`JobRecord`]. The main entry point is the [`JobExtractor`] struct,
//! along with the convenience function [`extract`].
//!
//! Extraction never fails: whatever the document looks like, a complete
//! record comes back, with low quality and confidence scores standing in
//! for an error. The source document is never mutated, so re-running the
//! engine on the same input yields the same record.
//!
//! # Example
//!
//! ```rust
//! use jobsift_core::engine::extract;
//!
//! let html = r#"
//!     <html><body>
//!         <h1>Backend Engineer</h1>
//!         <div class="job-location">Remote</div>
//!     </body></html>
//! "#;
//!
//! let record = extract(html, "https://acme.example/careers/42");
//! assert!(record.extraction.quality_score <= 100);
//! ```

use std::time::Instant;

use tracing::{debug, warn};
use url::Url;

use crate::analyzer::analyze_with;
use crate::extractors::{FieldContext, extract_fields};
use crate::parse::Document;
use crate::record::{ExtractionMeta, JobRecord};
use crate::registry::SiteRegistry;
use crate::score;
use crate::structured::JobPosting;

#[cfg(feature = "fetch")]
use crate::Result;
#[cfg(feature = "fetch")]
use crate::fetch::{FetchConfig, fetch_frame, fetch_url};

/// Tuning knobs for one extraction engine.
///
/// The defaults hold up across job boards, hosted trackers, and company
/// career pages; they exist as knobs mainly for tests and unusual hosts.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum job-content score for a ranked content block (default: 30).
    pub min_block_score: i32,

    /// Minimum text length for a container to count as a content block
    /// (default: 200).
    pub block_text_threshold: usize,

    /// Hard cap on extracted description length in bytes (default: 5000).
    pub description_cap: usize,

    /// Deadline in seconds for each auxiliary frame fetch (default: 10).
    pub frame_timeout_secs: u64,

    /// Maximum auxiliary frames fetched per page (default: 3).
    pub max_frames: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_block_score: 30,
            block_text_threshold: 200,
            description_cap: 5000,
            frame_timeout_secs: 10,
            max_frames: 3,
        }
    }
}

impl EngineConfig {
    /// Creates a new builder for EngineConfig.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }
}

/// Builder for EngineConfig.
///
/// # Example
///
/// ```rust
/// use jobsift_core::EngineConfig;
///
/// let config = EngineConfig::builder()
///     .min_block_score(40)
///     .description_cap(2000)
///     .build();
/// ```
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: EngineConfig::default() }
    }

    /// Sets the minimum content-block score.
    pub fn min_block_score(mut self, value: i32) -> Self {
        self.config.min_block_score = value;
        self
    }

    /// Sets the content-block text threshold.
    pub fn block_text_threshold(mut self, value: usize) -> Self {
        self.config.block_text_threshold = value;
        self
    }

    /// Sets the description length cap.
    pub fn description_cap(mut self, value: usize) -> Self {
        self.config.description_cap = value;
        self
    }

    /// Sets the per-frame fetch deadline in seconds.
    pub fn frame_timeout_secs(mut self, value: u64) -> Self {
        self.config.frame_timeout_secs = value;
        self
    }

    /// Sets the maximum number of auxiliary frames fetched.
    pub fn max_frames(mut self, value: usize) -> Self {
        self.config.max_frames = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> EngineConfig {
        self.config
    }
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main entry point for job extraction.
///
/// Holds the engine configuration and the site profile registry; one
/// instance can serve any number of extraction runs.
///
/// # Example
///
/// ```rust
/// use jobsift_core::JobExtractor;
///
/// let engine = JobExtractor::new();
/// let record = engine.extract("<html><body><h1>Data Analyst</h1></body></html>");
/// assert_eq!(record.title, "Data Analyst");
/// ```
pub struct JobExtractor {
    config: EngineConfig,
    registry: SiteRegistry,
}

impl JobExtractor {
    /// Creates an extractor with default settings and the built-in site
    /// profiles.
    pub fn new() -> Self {
        Self { config: EngineConfig::default(), registry: SiteRegistry::with_builtin() }
    }

    /// Creates an extractor with a custom configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config, registry: SiteRegistry::with_builtin() }
    }

    /// Creates an extractor with a custom configuration and site registry.
    pub fn with_config_and_registry(config: EngineConfig, registry: SiteRegistry) -> Self {
        Self { config, registry }
    }

    /// Extracts a job record from an HTML string with no known address.
    ///
    /// Without an address the domain-fallback and current-location
    /// strategies yield nothing and relative apply links cannot resolve;
    /// everything else runs normally.
    pub fn extract(&self, html: &str) -> JobRecord {
        self.run(html, None, &[])
    }

    /// Extracts a job record from an HTML string with its resolved address.
    ///
    /// An unparseable address is logged and ignored rather than refused;
    /// the raw string is still recorded as the record's source.
    pub fn extract_with_url(&self, html: &str, url: &str) -> JobRecord {
        self.run(html, Some(url), &[])
    }

    /// Extracts a job record with pre-fetched auxiliary frame documents.
    ///
    /// Hosted postings sometimes keep the description inside an embedded
    /// frame; callers that have already loaded those sub-documents pass
    /// their HTML here and the frame strategy competes like any other.
    pub fn extract_with_aux(&self, html: &str, url: &str, aux: &[String]) -> JobRecord {
        self.run(html, Some(url), aux)
    }

    fn run(&self, html: &str, url: Option<&str>, aux_html: &[String]) -> JobRecord {
        let started = Instant::now();

        let base_url = url.and_then(|u| match Url::parse(u) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(url = u, error = %e, "source address unparseable, proceeding without it");
                None
            }
        });

        let doc = match &base_url {
            Some(parsed) => Document::parse_with_url(html, parsed.clone()),
            None => Document::parse(html),
        };

        let profile = analyze_with(
            &doc,
            doc.base_url(),
            self.config.block_text_threshold,
            self.config.min_block_score,
        );
        let site = self.registry.resolve(doc.host().as_deref());
        let posting = JobPosting::find(&doc);
        let aux: Vec<Document> = aux_html.iter().map(|h| Document::parse(h)).collect();

        debug!(
            site = site.name,
            category = profile.site.display_name(),
            structured_data = profile.has_structured_data,
            blocks = profile.content_blocks.len(),
            frames = aux.len(),
            "page analyzed"
        );

        let ctx = FieldContext {
            doc: &doc,
            profile: &profile,
            site,
            posting: posting.as_ref(),
            aux: &aux,
            description_cap: self.config.description_cap,
        };

        let fields = extract_fields(&ctx);
        let composite = score::score(&fields, profile.content_quality);
        let methods = fields.methods();

        debug!(
            quality = composite.quality_score,
            grade = %composite.quality_grade,
            confidence = composite.confidence_score,
            "extraction complete"
        );

        JobRecord {
            company: fields.company.value,
            title: fields.title.value,
            location: fields.location.value,
            description: fields.description.value,
            application_url: fields.apply_url.value,
            source_url: url.unwrap_or_default().to_string(),
            site: profile.site.display_name().to_string(),
            extraction: ExtractionMeta {
                methods,
                elapsed_ms: started.elapsed().as_millis() as u64,
                quality_score: composite.quality_score,
                quality_grade: composite.quality_grade,
                confidence_score: composite.confidence_score,
            },
        }
    }
}

#[cfg(feature = "fetch")]
impl JobExtractor {
    /// Fetches a page and extracts a job record from it.
    ///
    /// Job-relevant embedded frames are fetched afterwards, each under the
    /// configured deadline; a frame that times out or errors is skipped and
    /// extraction proceeds without it.
    ///
    /// # Errors
    ///
    /// Returns an error only when the page itself cannot be fetched.
    /// Extraction quality never produces an error.
    pub async fn fetch_and_extract(&self, url: &str, config: &FetchConfig) -> Result<JobRecord> {
        let html = fetch_url(url, config).await?;
        let frames = self.fetch_frames(&html, url, config).await;

        Ok(self.extract_with_aux(&html, url, &frames))
    }

    async fn fetch_frames(&self, html: &str, url: &str, config: &FetchConfig) -> Vec<String> {
        if self.config.max_frames == 0 {
            return Vec::new();
        }

        let mut frames = Vec::new();
        for src in frame_sources(html, url, self.config.max_frames) {
            match fetch_frame(&src, config, self.config.frame_timeout_secs).await {
                Ok(content) => frames.push(content),
                Err(e) => {
                    debug!(frame = %src, error = %e, "auxiliary frame skipped");
                }
            }
        }

        frames
    }
}

impl Default for JobExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects job-relevant iframe sources, resolved absolute, best-effort.
#[cfg(feature = "fetch")]
fn frame_sources(html: &str, url: &str, max: usize) -> Vec<String> {
    const FRAME_HINTS: &[&str] = &["job", "career", "greenhouse", "lever", "workday", "icims", "smartrecruiters"];

    let doc = Document::parse(html);
    let base = Url::parse(url).ok();

    let mut sources = Vec::new();
    for frame in doc.select("iframe[src]").unwrap_or_default() {
        let Some(src) = frame.attr("src") else {
            continue;
        };

        let lower = src.to_lowercase();
        if !FRAME_HINTS.iter().any(|hint| lower.contains(hint)) {
            continue;
        }

        if let Some(resolved) = crate::extractors::resolve_href(src, base.as_ref()) {
            sources.push(resolved);
            if sources.len() == max {
                break;
            }
        }
    }

    sources
}

/// Convenience function for one-shot extraction with defaults.
///
/// # Example
///
/// ```rust
/// use jobsift_core::extract;
///
/// let record = extract(
///     "<html><body><h1>Backend Engineer</h1></body></html>",
///     "https://acme.example/careers/42",
/// );
/// assert_eq!(record.source_url, "https://acme.example/careers/42");
/// ```
pub fn extract(html: &str, url: &str) -> JobRecord {
    JobExtractor::new().extract_with_url(html, url)
}

/// Convenience function: fetch a page and extract with defaults.
///
/// # Errors
///
/// Returns an error only when the page itself cannot be fetched.
#[cfg(feature = "fetch")]
pub async fn fetch_and_extract(url: &str) -> Result<JobRecord> {
    JobExtractor::new()
        .fetch_and_extract(url, &FetchConfig::default())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{COMPANY_FALLBACK, DESCRIPTION_FALLBACK, LOCATION_FALLBACK, Method, TITLE_FALLBACK};
    use crate::score::QualityGrade;

    fn career_page() -> String {
        format!(
            r#"
            <!DOCTYPE html>
            <html>
            <head>
                <title>Backend Engineer - Acme Corp Careers</title>
                <meta property="og:site_name" content="Acme Corp">
            </head>
            <body>
                <nav><a href="/">Home</a> <a href="/login">Login</a></nav>
                <main>
                    <div class="job-title">Backend Engineer</div>
                    <div class="job-location">Austin, TX</div>
                    <div class="job-description">
                        <h2>Job Description</h2>
                        <p>Responsibilities: design, build and operate backend services.</p>
                        <p>Requirements: years of experience with distributed systems, strong skills.</p>
                        <p>Qualifications: bachelor degree or equivalent practical experience.</p>
                        <p>{}</p>
                    </div>
                    <a href="/careers/42/apply">Apply Now</a>
                </main>
            </body>
            </html>
            "#,
            "The platform team owns the ingestion pipeline end to end. ".repeat(6)
        )
    }

    #[test]
    fn test_engine_config_default() {
        let config = EngineConfig::default();
        assert_eq!(config.min_block_score, 30);
        assert_eq!(config.block_text_threshold, 200);
        assert_eq!(config.description_cap, 5000);
        assert_eq!(config.frame_timeout_secs, 10);
        assert_eq!(config.max_frames, 3);
    }

    #[test]
    fn test_engine_config_builder() {
        let config = EngineConfig::builder()
            .min_block_score(40)
            .block_text_threshold(100)
            .description_cap(2000)
            .frame_timeout_secs(5)
            .max_frames(1)
            .build();

        assert_eq!(config.min_block_score, 40);
        assert_eq!(config.block_text_threshold, 100);
        assert_eq!(config.description_cap, 2000);
        assert_eq!(config.frame_timeout_secs, 5);
        assert_eq!(config.max_frames, 1);
    }

    #[test]
    fn test_extract_complete_record() {
        let record = extract(&career_page(), "https://acme.example/careers/42");

        assert_eq!(record.company, "Acme Corp");
        assert_eq!(record.title, "Backend Engineer");
        assert_eq!(record.location, "Austin, TX");
        assert!(record.description.len() >= 200);
        assert_eq!(record.application_url, "https://acme.example/careers/42/apply");
        assert_eq!(record.site, "Company Career Page");
        assert!(record.extraction.quality_score >= 70);
    }

    #[test]
    fn test_extract_empty_document() {
        let record = extract("<html><body></body></html>", "");

        assert_eq!(record.company, COMPANY_FALLBACK);
        assert_eq!(record.title, TITLE_FALLBACK);
        assert_eq!(record.location, LOCATION_FALLBACK);
        assert_eq!(record.description, DESCRIPTION_FALLBACK);
        assert_eq!(record.extraction.quality_score, 0);
        assert_eq!(record.extraction.quality_grade, QualityGrade::Failed);
        assert_eq!(record.extraction.confidence_score, 0);
    }

    #[test]
    fn test_extract_invalid_url_tolerated() {
        let record = JobExtractor::new().extract_with_url(&career_page(), "not a url");

        // the raw string is recorded, extraction proceeds address-free
        assert_eq!(record.source_url, "not a url");
        assert_eq!(record.title, "Backend Engineer");
    }

    #[test]
    fn test_extract_idempotent() {
        let html = career_page();
        let url = "https://acme.example/careers/42";

        let mut first = extract(&html, url);
        let mut second = extract(&html, url);

        first.extraction.elapsed_ms = 0;
        second.extraction.elapsed_ms = 0;
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_with_aux_frame() {
        let shell = r#"
            <html>
            <head><title>Opening at Acme</title></head>
            <body><div>This posting is rendered in an embedded frame.</div></body>
            </html>
        "#;
        let frame = format!(
            "<html><body><div>Responsibilities: {} Requirements: deep experience and skills.</div></body></html>",
            "run the billing platform. ".repeat(12)
        );

        let record = JobExtractor::new().extract_with_aux(shell, "https://acme.example/careers/9", &[frame]);

        assert_eq!(record.extraction.methods.description, Method::Frame);
        assert!(record.description.contains("billing platform"));
    }

    #[test]
    fn test_site_profile_dispatch() {
        let html = format!(
            r#"
            <html>
            <head><title>Acme - Jobs</title></head>
            <body>
                <h1 class="app-title">Platform Engineer</h1>
                <div class="location">Denver, CO</div>
                <div id="content">
                    <p>Responsibilities: keep the hiring pipeline healthy.</p>
                    <p>Requirements: solid engineering experience and collaboration skills.</p>
                    <p>{}</p>
                </div>
            </body>
            </html>
            "#,
            "You will pair with recruiters and engineers daily. ".repeat(6)
        );

        let record = extract(&html, "https://boards.greenhouse.io/acme/jobs/42");

        assert_eq!(record.title, "Platform Engineer");
        assert_eq!(record.location, "Denver, CO");
        assert_eq!(record.site, "Applicant Tracking System");
        // hosted tracker domain never leaks in as the employer
        assert_ne!(record.company, "Greenhouse");
    }

    #[test]
    fn test_description_cap_applied() {
        let config = EngineConfig::builder().description_cap(300).build();
        let record = JobExtractor::with_config(config).extract_with_url(&career_page(), "https://acme.example/jobs/1");

        assert!(record.description.len() <= 300);
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_frame_sources_filtered_and_capped() {
        let html = r#"
            <html><body>
                <iframe src="https://player.video.example/clip"></iframe>
                <iframe src="/embed/job-posting"></iframe>
                <iframe src="https://acme.wd5.myworkdayjobs.com/frame/1"></iframe>
                <iframe src="https://boards.greenhouse.io/embed/job_app?for=acme"></iframe>
            </body></html>
        "#;

        let sources = frame_sources(html, "https://acme.example/careers/42", 2);

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0], "https://acme.example/embed/job-posting");
        assert!(sources[1].contains("myworkdayjobs"));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_fetch_and_extract_invalid_url() {
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(fetch_and_extract("not-a-url"))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(crate::SiftError::InvalidUrl(_))));
    }
}
