//! Per-field extraction strategy tournaments.
//!
//! Each record field owns an ordered list of independent strategies. Every
//! strategy runs exactly once; an `Err` is logged and treated as "no
//! candidate". Among the non-empty candidates the strictly highest
//! confidence wins, with ties going to the first-declared strategy. A
//! winner that fails structural validation, or a field with no candidates
//! at all, resolves to the field's fallback literal with confidence 0.
//!
//! The strategies only read: the parsed document, the page profile computed
//! once per run, the resolved site profile, any embedded JobPosting
//! metadata, and pre-fetched auxiliary frame documents.

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::analyzer::PageProfile;
use crate::noise::{clean_text, is_noise};
use crate::parse::Document;
use crate::record::{
    COMPANY_FALLBACK, DESCRIPTION_FALLBACK, FieldCandidate, FieldMethods, LOCATION_FALLBACK, Method, TITLE_FALLBACK,
};
use crate::registry::SiteProfile;
use crate::structured::JobPosting;
use crate::text::{FieldKind, normalize, score_field};
use crate::validate::validate;
use crate::{Result, SiftError};

/// Read-only inputs shared by every strategy in a run.
pub(crate) struct FieldContext<'a> {
    pub doc: &'a Document,
    pub profile: &'a PageProfile<'a>,
    pub site: &'a SiteProfile,
    pub posting: Option<&'a JobPosting>,
    /// Pre-fetched auxiliary sub-documents (embedded frames).
    pub aux: &'a [Document],
    /// Hard cap on description length in bytes.
    pub description_cap: usize,
}

/// The resolved winner for every field of one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    pub company: FieldCandidate,
    pub title: FieldCandidate,
    pub location: FieldCandidate,
    pub description: FieldCandidate,
    pub apply_url: FieldCandidate,
}

impl FieldSet {
    /// Per-field confidences in record order.
    pub fn confidences(&self) -> [u8; 5] {
        [
            self.company.confidence,
            self.title.confidence,
            self.location.confidence,
            self.description.confidence,
            self.apply_url.confidence,
        ]
    }

    /// The winning method per field.
    pub fn methods(&self) -> FieldMethods {
        FieldMethods {
            company: self.company.method,
            title: self.title.method,
            location: self.location.method,
            description: self.description.method,
            application_url: self.apply_url.method,
        }
    }
}

type Strategy = fn(&FieldContext<'_>) -> Result<FieldCandidate>;

/// Minimum cleaned-text length for a description candidate.
const DESCRIPTION_MIN_LEN: usize = 200;

/// Longer floor for whole main/article regions, which are noisier.
const MAIN_REGION_MIN_LEN: usize = 300;

/// Runs every field tournament against the shared context.
pub(crate) fn extract_fields(ctx: &FieldContext<'_>) -> FieldSet {
    FieldSet {
        company: extract_company(ctx),
        title: extract_title(ctx),
        location: extract_location(ctx),
        description: extract_description(ctx),
        apply_url: extract_apply_url(ctx),
    }
}

pub(crate) fn extract_company(ctx: &FieldContext<'_>) -> FieldCandidate {
    const STRATEGIES: &[(&str, Strategy)] = &[
        ("structured_data", company_from_structured),
        ("meta_tags", company_from_meta),
        ("selectors", company_from_selectors),
        ("page_title", company_from_page_title),
        ("domain", company_from_domain),
    ];

    run_tournament(FieldKind::Company, STRATEGIES, ctx, COMPANY_FALLBACK)
}

pub(crate) fn extract_title(ctx: &FieldContext<'_>) -> FieldCandidate {
    const STRATEGIES: &[(&str, Strategy)] = &[
        ("structured_data", title_from_structured),
        ("headings", title_from_headings),
        ("selectors", title_from_selectors),
        ("page_title", title_from_page_title),
    ];

    run_tournament(FieldKind::Title, STRATEGIES, ctx, TITLE_FALLBACK)
}

pub(crate) fn extract_location(ctx: &FieldContext<'_>) -> FieldCandidate {
    const STRATEGIES: &[(&str, Strategy)] = &[
        ("structured_data", location_from_structured),
        ("selectors", location_from_selectors),
        ("remote_signals", location_from_remote_signals),
        ("text_patterns", location_from_text_patterns),
    ];

    run_tournament(FieldKind::Location, STRATEGIES, ctx, LOCATION_FALLBACK)
}

pub(crate) fn extract_description(ctx: &FieldContext<'_>) -> FieldCandidate {
    const STRATEGIES: &[(&str, Strategy)] = &[
        ("structured_data", description_from_structured),
        ("content_blocks", description_from_content_blocks),
        ("selectors", description_from_selectors),
        ("main_region", description_from_main_region),
        ("frames", description_from_frames),
    ];

    run_tournament(FieldKind::Description, STRATEGIES, ctx, DESCRIPTION_FALLBACK)
}

pub(crate) fn extract_apply_url(ctx: &FieldContext<'_>) -> FieldCandidate {
    const STRATEGIES: &[(&str, Strategy)] = &[
        ("apply_links", url_from_apply_links),
        ("structured_data", url_from_structured),
        ("form_actions", url_from_form_actions),
        ("current_url", url_from_current),
    ];

    // The page's own address doubles as the fallback value.
    let fallback = ctx
        .doc
        .base_url()
        .map(|u| u.to_string())
        .unwrap_or_default();

    run_tournament(FieldKind::ApplyUrl, STRATEGIES, ctx, &fallback)
}

/// Runs the strategies of one field as a flat single-round tournament.
///
/// Every strategy runs regardless of prior outcomes. The strictly highest
/// confidence wins; on equal confidence the earlier declaration keeps the
/// slot. The winner must still pass structural validation or the field
/// falls back.
fn run_tournament(
    kind: FieldKind, strategies: &[(&str, Strategy)], ctx: &FieldContext<'_>, fallback: &str,
) -> FieldCandidate {
    let mut best: Option<FieldCandidate> = None;

    for (name, strategy) in strategies {
        match strategy(ctx) {
            Ok(candidate) => {
                if candidate.value.is_empty() {
                    continue;
                }

                debug!(
                    field = kind.label(),
                    strategy = name,
                    confidence = candidate.confidence,
                    "strategy produced a candidate"
                );

                if best.as_ref().is_none_or(|b| candidate.confidence > b.confidence) {
                    best = Some(candidate);
                }
            }
            Err(e) => {
                debug!(field = kind.label(), strategy = name, error = %e, "strategy missed");
            }
        }
    }

    let Some(winner) = best else {
        return FieldCandidate::fallback(fallback);
    };

    let verdict = validate(&winner.value, kind);
    if verdict.valid {
        winner
    } else {
        debug!(field = kind.label(), issues = ?verdict.issues, "winner rejected by validator");
        FieldCandidate::fallback(fallback)
    }
}

fn miss(reason: &str) -> SiftError {
    SiftError::StrategyMiss(reason.to_string())
}

// --- company ---

fn company_from_structured(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    let posting = ctx.posting.ok_or_else(|| miss("no structured data"))?;
    let name = posting.organization().ok_or_else(|| miss("no hiring organization"))?;

    let score = score_field(&name, FieldKind::Company);
    Ok(FieldCandidate::new(name, score.confidence, Method::StructuredData))
}

fn company_from_meta(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    const META_TAGS: &[&str] = &["og:site_name", "application-name", "og:title"];

    for tag in META_TAGS {
        let Some(content) = ctx.doc.meta_content(tag) else {
            continue;
        };

        let value = normalize(&content);
        if value.is_empty() {
            continue;
        }

        let score = score_field(&value, FieldKind::Company);
        if score.confidence > 60 {
            return Ok(FieldCandidate::new(value, score.confidence, Method::MetaTag));
        }
    }

    Err(miss("no plausible company meta tag"))
}

fn company_from_selectors(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    best_selector_match(ctx, &ctx.site.company_selectors, FieldKind::Company, 50)
        .ok_or_else(|| miss("no plausible company under known selectors"))
}

fn company_from_page_title(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    const PATTERNS: &[&str] = &[
        r"(?i)^(.+?)\s*[-|]\s*Jobs?\b",
        r"(?i)^(.+?)\s*[-|]\s*Careers?\b",
        r"(?i)\bJobs?\s+at\s+(.+?)(?:\s*[-|]|$)",
        r"(?i)^(.+?)\s*[-|]\s*Hiring\b",
    ];

    let title = ctx.doc.title().map(|t| normalize(&t)).unwrap_or_default();
    if title.is_empty() {
        return Err(miss("no page title"));
    }

    for pattern in PATTERNS {
        let Some(caps) = Regex::new(pattern).unwrap().captures(&title) else {
            continue;
        };

        let company = normalize(&caps[1]);
        if company.is_empty() {
            continue;
        }

        let score = score_field(&company, FieldKind::Company);
        if score.confidence > 60 {
            return Ok(FieldCandidate::new(company, score.confidence, Method::Pattern));
        }
    }

    Err(miss("page title carries no company pattern"))
}

fn company_from_domain(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    const JOB_BOARD_DOMAINS: &[&str] = &["naukri", "indeed", "linkedin", "glassdoor", "monster"];

    if ctx.site.skip_domain_fallback {
        return Err(miss("hosted board domain, not the employer"));
    }

    let host = ctx.doc.host().ok_or_else(|| miss("no source address"))?;
    let host = host.strip_prefix("www.").unwrap_or(&host);
    let label = host.split('.').next().unwrap_or_default();

    if label.len() <= 2 || JOB_BOARD_DOMAINS.contains(&label) {
        return Err(miss("domain label unusable as an employer name"));
    }

    let mut chars = label.chars();
    let company: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => return Err(miss("empty domain label")),
    };

    Ok(FieldCandidate::new(company, 40, Method::DomainFallback))
}

// --- title ---

fn title_from_structured(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    let posting = ctx.posting.ok_or_else(|| miss("no structured data"))?;
    let title = posting.title().ok_or_else(|| miss("no title in structured data"))?;

    let score = score_field(&title, FieldKind::Title);
    Ok(FieldCandidate::new(title, score.confidence, Method::StructuredData))
}

fn title_from_headings(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    let headings = ctx.doc.select("h1, h2, h3").unwrap_or_default();

    for heading in &headings {
        let text = clean_text(heading);
        if text.is_empty() || is_noise(&text) {
            continue;
        }

        let score = score_field(&text, FieldKind::Title);
        if score.confidence > 60 {
            return Ok(FieldCandidate::new(text, score.confidence, Method::Heading));
        }
    }

    Err(miss("no plausible title heading"))
}

fn title_from_selectors(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    best_selector_match(ctx, &ctx.site.title_selectors, FieldKind::Title, 50)
        .ok_or_else(|| miss("no plausible title under known selectors"))
}

fn title_from_page_title(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    let raw = ctx.doc.title().ok_or_else(|| miss("no page title"))?;

    // Job pages almost always suffix the site name after a separator.
    let prefix = raw.split(" - ").next().unwrap_or(&raw);
    let prefix = prefix.split(" | ").next().unwrap_or(prefix);

    let value = normalize(prefix);
    if value.is_empty() {
        return Err(miss("empty page title"));
    }

    let score = score_field(&value, FieldKind::Title);
    if score.confidence > 40 {
        Ok(FieldCandidate::new(value, score.confidence, Method::Pattern))
    } else {
        Err(miss("page title does not read as a job title"))
    }
}

// --- location ---

fn location_from_structured(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    let posting = ctx.posting.ok_or_else(|| miss("no structured data"))?;
    let location = posting.location().ok_or_else(|| miss("no location in structured data"))?;

    let score = score_field(&location, FieldKind::Location);
    Ok(FieldCandidate::new(location, score.confidence, Method::StructuredData))
}

fn location_from_selectors(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    best_selector_match(ctx, &ctx.site.location_selectors, FieldKind::Location, 50)
        .ok_or_else(|| miss("no plausible location under known selectors"))
}

/// Two or more remote-work mentions in the body resolve to "Remote".
fn location_from_remote_signals(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    let body = ctx
        .doc
        .body()
        .map(|b| b.text().to_lowercase())
        .unwrap_or_default();

    let remote = Regex::new(r"\b(remote|wfh|work from home|distributed|virtual|anywhere)\b").unwrap();
    let hits = remote.find_iter(&body).count();

    if hits >= 2 {
        Ok(FieldCandidate::new("Remote", 80, Method::RemoteDetection))
    } else {
        Err(miss("too few remote-work mentions"))
    }
}

fn location_from_text_patterns(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    const PATTERNS: &[&str] = &[
        r"(?i)Location[:\s]+([^,\n]{3,50})",
        r"(?i)Based in[:\s]+([^,\n]{3,50})",
        r"(?i)Office[:\s]+([^,\n]{3,50})",
        r"([A-Z][a-z]+,\s*[A-Z]{2})\b",
    ];

    let body = ctx
        .doc
        .body()
        .map(|b| normalize(&b.structured_text()))
        .unwrap_or_default();
    if body.is_empty() {
        return Err(miss("empty document body"));
    }

    for pattern in PATTERNS {
        for caps in Regex::new(pattern).unwrap().captures_iter(&body) {
            let value = normalize(&caps[1]);
            if value.is_empty() || is_noise(&value) {
                continue;
            }

            let score = score_field(&value, FieldKind::Location);
            if score.confidence > 60 {
                return Ok(FieldCandidate::new(value, score.confidence, Method::Pattern));
            }
        }
    }

    Err(miss("no location pattern in body text"))
}

// --- description ---

fn description_from_structured(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    let posting = ctx.posting.ok_or_else(|| miss("no structured data"))?;
    let text = posting
        .description_text()
        .ok_or_else(|| miss("no description in structured data"))?;

    let value = scrub_description(&text, ctx.description_cap);
    let score = score_field(&value, FieldKind::Description);
    Ok(FieldCandidate::new(value, score.confidence, Method::StructuredData))
}

/// Ranked content blocks from page analysis, best first.
///
/// The block's own job-content score feeds the confidence so that a block
/// dense with section headers beats a merely long one.
fn description_from_content_blocks(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    for block in &ctx.profile.content_blocks {
        let value = scrub_description(&clean_text(&block.element), ctx.description_cap);
        if value.len() < DESCRIPTION_MIN_LEN {
            continue;
        }

        let score = score_field(&value, FieldKind::Description);
        let confidence = (i32::from(score.confidence) + block.score / 2).clamp(0, 90) as u8;

        return Ok(FieldCandidate::new(value, confidence, Method::ContentBlock));
    }

    Err(miss("no ranked content block long enough"))
}

fn description_from_selectors(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    for selector in &ctx.site.description_selectors {
        let Ok(elements) = ctx.doc.select(selector) else {
            continue;
        };

        for element in &elements {
            let value = scrub_description(&clean_text(element), ctx.description_cap);
            if value.len() < DESCRIPTION_MIN_LEN {
                continue;
            }

            let score = score_field(&value, FieldKind::Description);
            if score.confidence > 60 {
                return Ok(FieldCandidate::new(value, score.confidence, Method::Selector));
            }
        }
    }

    Err(miss("no plausible description under known selectors"))
}

fn description_from_main_region(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    const REGIONS: &[&str] = &["main", "article", r#"[role="main"]"#, ".main-content"];

    for selector in REGIONS {
        let Some(element) = ctx.doc.select_first(selector) else {
            continue;
        };

        let value = scrub_description(&clean_text(&element), ctx.description_cap);
        if value.len() < MAIN_REGION_MIN_LEN {
            continue;
        }

        let score = score_field(&value, FieldKind::Description);
        if score.confidence > 50 {
            return Ok(FieldCandidate::new(value, score.confidence, Method::Selector));
        }
    }

    Err(miss("no plausible main region"))
}

/// Auxiliary frame documents, pre-fetched by the caller.
///
/// Hosted postings sometimes render the description inside an embedded
/// frame the top document never carries. Frame text is capped below
/// same-document strategies since the frame may belong to a different
/// posting entirely.
fn description_from_frames(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    for frame in ctx.aux {
        let Some(body) = frame.body() else {
            continue;
        };

        let value = scrub_description(&clean_text(&body), ctx.description_cap);
        if value.len() < DESCRIPTION_MIN_LEN {
            continue;
        }

        let score = score_field(&value, FieldKind::Description);
        return Ok(FieldCandidate::new(value, score.confidence.min(85), Method::Frame));
    }

    Err(miss("no auxiliary frame content"))
}

/// Strips apply/share/search chrome phrases and caps the length.
fn scrub_description(text: &str, cap: usize) -> String {
    let chrome = Regex::new(
        r"(?i)\b(apply now|apply here|click to apply|share this job|save job|print job|back to search|search jobs)\b",
    )
    .unwrap();

    let mut value = normalize(&chrome.replace_all(text, ""));

    if value.len() > cap {
        let mut end = cap;
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        value.truncate(end);
    }

    value
}

// --- application URL ---

fn url_from_apply_links(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    for selector in &ctx.site.apply_selectors {
        let Ok(elements) = ctx.doc.select(selector) else {
            continue;
        };

        for element in &elements {
            let Some(href) = element.attr("href") else {
                continue;
            };

            if let Some(url) = resolve_href(href, ctx.doc.base_url()) {
                return Ok(FieldCandidate::new(url, 90, Method::Selector));
            }
        }
    }

    Err(miss("no apply link"))
}

/// The posting's own declared URL, when the structured data carries one.
fn url_from_structured(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    let posting = ctx.posting.ok_or_else(|| miss("no structured data"))?;
    let declared = posting.apply_url().ok_or_else(|| miss("no URL in structured data"))?;

    let url = resolve_href(&declared, ctx.doc.base_url()).ok_or_else(|| miss("declared URL not absolute http(s)"))?;
    Ok(FieldCandidate::new(url, 85, Method::StructuredData))
}

fn url_from_form_actions(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    let forms = ctx.doc.select("form[action]").unwrap_or_default();

    for form in &forms {
        let Some(action) = form.attr("action") else {
            continue;
        };

        if !action.to_lowercase().contains("apply") {
            continue;
        }

        if let Some(url) = resolve_href(action, ctx.doc.base_url()) {
            return Ok(FieldCandidate::new(url, 80, Method::Pattern));
        }
    }

    Err(miss("no application form"))
}

fn url_from_current(ctx: &FieldContext<'_>) -> Result<FieldCandidate> {
    let url = ctx.doc.base_url().ok_or_else(|| miss("no source address"))?;
    Ok(FieldCandidate::new(url.to_string(), 60, Method::CurrentLocation))
}

/// Resolves an href to an absolute http(s) URL against the page address.
pub(crate) fn resolve_href(href: &str, base: Option<&Url>) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let resolved = match Url::parse(href) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => base?.join(href).ok()?,
        Err(_) => return None,
    };

    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

/// Shared selector-list walk for the short text fields.
///
/// Returns the first element whose cleaned text clears the noise filter and
/// the confidence gate. Invalid selectors in loaded profiles are skipped,
/// not fatal.
fn best_selector_match(
    ctx: &FieldContext<'_>, selectors: &[String], kind: FieldKind, gate: u8,
) -> Option<FieldCandidate> {
    for selector in selectors {
        let Ok(elements) = ctx.doc.select(selector) else {
            debug!(field = kind.label(), selector, "skipping invalid selector");
            continue;
        };

        for element in &elements {
            let text = clean_text(element);
            if text.is_empty() || is_noise(&text) {
                continue;
            }

            let score = score_field(&text, kind);
            if score.confidence > gate {
                return Some(FieldCandidate::new(text, score.confidence, Method::Selector));
            }
        }
    }

    None
}
