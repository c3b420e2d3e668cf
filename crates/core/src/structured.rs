//! Embedded structured job metadata.
//!
//! Many job pages carry a schema.org `JobPosting` object in a
//! `<script type="application/ld+json">` block. When present and parseable
//! it is the most trustworthy source for every field, so each extractor
//! tries it first. Blocks that fail to parse are skipped individually; a
//! broken block never affects the others.

use serde_json::Value;
use tracing::debug;

use crate::parse::Document;
use crate::text::normalize;

/// A view over a parsed schema.org JobPosting object.
#[derive(Debug, Clone)]
pub struct JobPosting {
    value: Value,
}

impl JobPosting {
    /// Scans every JSON-LD block in the document for a JobPosting entry.
    ///
    /// Handles a bare object, a top-level array, and `@graph` containers.
    /// The first matching entry wins.
    pub fn find(doc: &Document) -> Option<JobPosting> {
        let scripts = doc.select(r#"script[type="application/ld+json"]"#).ok()?;

        for script in &scripts {
            let raw = script.text();
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }

            match serde_json::from_str::<Value>(trimmed) {
                Ok(value) => {
                    if let Some(posting) = find_in_value(&value) {
                        return Some(JobPosting { value: posting.clone() });
                    }
                }
                Err(e) => {
                    debug!(error = %e, "skipping malformed ld+json block");
                }
            }
        }

        None
    }

    /// The posting title, verbatim apart from whitespace normalization.
    pub fn title(&self) -> Option<String> {
        self.value
            .get("title")
            .and_then(Value::as_str)
            .map(normalize)
            .filter(|s| !s.is_empty())
    }

    /// The hiring organization name; accepts both string and object forms.
    pub fn organization(&self) -> Option<String> {
        let org = self.value.get("hiringOrganization")?;

        let name = match org {
            Value::String(s) => Some(s.as_str()),
            Value::Object(obj) => obj.get("name").and_then(Value::as_str),
            _ => None,
        }?;

        let name = normalize(name);
        if name.is_empty() { None } else { Some(name) }
    }

    /// The job location flattened to display text.
    ///
    /// `jobLocation` may be a string, a Place object with a postal address,
    /// or an array of either; arrays use their first entry. Address parts
    /// join as locality, region, country.
    pub fn location(&self) -> Option<String> {
        let mut loc = self.value.get("jobLocation")?;

        if let Value::Array(entries) = loc {
            loc = entries.first()?;
        }

        let text = match loc {
            Value::String(s) => s.clone(),
            Value::Object(_) => {
                let address = loc.get("address")?;
                match address {
                    Value::String(s) => s.clone(),
                    Value::Object(obj) => {
                        let parts: Vec<&str> = ["addressLocality", "addressRegion", "addressCountry"]
                            .iter()
                            .filter_map(|key| obj.get(*key).and_then(Value::as_str))
                            .filter(|s| !s.is_empty())
                            .collect();
                        if parts.is_empty() {
                            return None;
                        }
                        parts.join(", ")
                    }
                    _ => return None,
                }
            }
            _ => return None,
        };

        let text = normalize(&text);
        if text.is_empty() { None } else { Some(text) }
    }

    /// The posting description with embedded markup stripped to text.
    pub fn description_text(&self) -> Option<String> {
        let raw = self.value.get("description").and_then(Value::as_str)?;

        // JSON-LD descriptions are frequently HTML themselves
        let text = if raw.contains('<') {
            let doc = Document::parse(raw);
            match doc.body() {
                Some(body) => body.structured_text(),
                None => doc.text_content(),
            }
        } else {
            raw.to_string()
        };

        let text = normalize(&text);
        if text.is_empty() { None } else { Some(text) }
    }

    /// The posting's own URL when declared.
    pub fn apply_url(&self) -> Option<String> {
        self.value
            .get("url")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Whether the document embeds any JobPosting structured data.
pub fn has_job_posting(doc: &Document) -> bool {
    JobPosting::find(doc).is_some()
}

fn find_in_value(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(obj) => {
            if is_job_posting(value) {
                return Some(value);
            }

            if let Some(Value::Array(graph)) = obj.get("@graph") {
                return graph.iter().find(|entry| is_job_posting(entry));
            }

            None
        }
        Value::Array(entries) => entries.iter().find_map(find_in_value),
        _ => None,
    }
}

fn is_job_posting(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t == "JobPosting",
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some("JobPosting")),
        _ => false,
    }
}
