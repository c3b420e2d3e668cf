//! Boilerplate detection and subtree pruning.
//!
//! Job pages bury the posting in navigation bars, cookie banners, share
//! widgets, and legal footers whose text can look deceptively like content.
//! [`is_noise`] classifies a single string as boilerplate; [`prune_subtree`]
//! produces a copy of a subtree with boilerplate structures removed so that
//! downstream text analysis never sees them. The source document is never
//! mutated.

use regex::Regex;

use crate::parse::{Document, Element};
use crate::text::normalize;

/// Whole-string boilerplate labels: navigation, legal, social, ads.
const NOISE_PATTERNS: &[&str] = &[
    r"(?i)^(home|about|about us|contact|login|register|sign up|sign in)$",
    r"(?i)^(privacy policy|terms of service|cookie policy)$",
    r"(?i)^(follow us|share|like|tweet)$",
    r"(?i)^(advertisement|sponsored|promoted)$",
];

/// Single words that are navigation chrome on nearly every job site.
const NAV_WORDS: &[&str] = &["jobs", "careers", "search", "apply", "login", "home"];

/// Class/id fragments that mark a subtree as chrome rather than content.
const JUNK_ATTR_PATTERN: &str = r"(?i)\b(advertisement|ads|ad-banner|sponsored|social-share|share-buttons|social-media|cookie-notice|cookie-banner|popup|modal|navbar|navigation|sidebar)\b";

/// Tags removed outright before text extraction.
const JUNK_TAGS: &[&str] = &["nav", "header", "footer", "aside", "script", "style", "noscript"];

/// Classifies a string as navigational/legal/advertising boilerplate.
///
/// Returns true for strings under 2 characters, strings matching known
/// boilerplate labels, and lone navigation words under 15 characters.
///
/// # Example
///
/// ```rust
/// use jobsift_core::noise::is_noise;
///
/// assert!(is_noise("Home"));
/// assert!(!is_noise("Senior Backend Engineer"));
/// ```
pub fn is_noise(text: &str) -> bool {
    if text.len() < 2 {
        return true;
    }

    let clean = text.trim().to_lowercase();

    if NOISE_PATTERNS
        .iter()
        .any(|p| Regex::new(p).unwrap().is_match(&clean))
    {
        return true;
    }

    if clean.split(' ').count() == 1 && clean.len() < 15 && NAV_WORDS.contains(&clean.as_str()) {
        return true;
    }

    false
}

/// Removes boilerplate structures from an HTML string.
///
/// Streams the markup through lol_html, dropping navigation and landmark
/// chrome, executable/style content, and any element whose class or id
/// carries an ad/social/cookie indicator. On rewriter failure the input is
/// returned unchanged rather than losing the subtree.
pub fn prune_html(html: &str) -> String {
    let junk_attrs = Regex::new(JUNK_ATTR_PATTERN).unwrap();

    let mut output = String::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: JUNK_TAGS
                .iter()
                .map(|tag| {
                    lol_html::element!(tag, |el| {
                        el.remove();
                        Ok(())
                    })
                })
                .chain(std::iter::once(lol_html::element!("*", move |el| {
                    let class = el.get_attribute("class").unwrap_or_default();
                    let id = el.get_attribute("id").unwrap_or_default();

                    if junk_attrs.is_match(&class) || junk_attrs.is_match(&id) {
                        el.remove();
                    }

                    Ok(())
                })))
                .collect(),
            ..Default::default()
        },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    match rewriter.write(html.as_bytes()) {
        Ok(_) => {}
        Err(_) => return html.to_string(),
    }

    match rewriter.end() {
        Ok(_) => {}
        Err(_) => return html.to_string(),
    }

    output
}

/// Produces a pruned deep copy of a subtree.
///
/// The element's markup is re-parsed after pruning, so the returned
/// document is independent of the source tree.
pub fn prune_subtree(element: &Element<'_>) -> Document {
    Document::parse(&prune_html(&element.outer_html()))
}

/// Extracts normalized, structure-preserving text from a pruned copy of an
/// element.
pub fn clean_text(element: &Element<'_>) -> String {
    let copy = prune_subtree(element);

    match copy.body() {
        Some(body) => normalize(&body.structured_text()),
        None => normalize(&copy.text_content()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Home")]
    #[case("home")]
    #[case("Privacy Policy")]
    #[case("Follow Us")]
    #[case("Advertisement")]
    #[case("x")]
    #[case("jobs")]
    #[case("Apply")]
    fn test_noise_strings(#[case] text: &str) {
        assert!(is_noise(text));
    }

    #[rstest]
    #[case("Senior Backend Engineer")]
    #[case("Acme Corp")]
    #[case("Austin, TX")]
    #[case("Apply for this role today")]
    fn test_content_strings(#[case] text: &str) {
        assert!(!is_noise(text));
    }

    #[test]
    fn test_prune_html_removes_chrome_tags() {
        let html = r#"<div><nav>Jobs Careers</nav><p>Real content</p><footer>Legal</footer></div>"#;
        let pruned = prune_html(html);

        assert!(pruned.contains("Real content"));
        assert!(!pruned.contains("Careers"));
        assert!(!pruned.contains("Legal"));
    }

    #[test]
    fn test_prune_html_removes_junk_classes() {
        let html = r#"<div><div class="cookie-banner">We use cookies</div><p>Job duties here</p></div>"#;
        let pruned = prune_html(html);

        assert!(pruned.contains("Job duties"));
        assert!(!pruned.contains("cookies"));
    }

    #[test]
    fn test_prune_html_keeps_content_classes() {
        let html = r#"<div class="job-description"><p>Responsibilities and requirements.</p></div>"#;
        let pruned = prune_html(html);

        assert!(pruned.contains("Responsibilities"));
    }

    #[test]
    fn test_clean_text_source_untouched() {
        let html = r#"<html><body><div id="root"><nav>Menu</nav><p>Duties</p></div></body></html>"#;
        let doc = Document::parse(html);
        let root = doc.select_first("#root").unwrap();

        let text = clean_text(&root);
        assert_eq!(text, "Duties");

        // the original subtree still carries the nav
        assert!(root.text().contains("Menu"));
    }

    #[test]
    fn test_clean_text_normalizes() {
        let html = "<div><p>First\u{00A0}  line</p><p>Second   line</p></div>";
        let doc = Document::parse(html);
        let div = doc.select_first("div").unwrap();

        assert_eq!(clean_text(&div), "First line\nSecond line");
    }
}
