//! HTML parsing and DOM access.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML and navigating the document tree using CSS selectors. The document
//! is read-only during extraction: strategies only ever inspect it, and the
//! noise filter works on re-parsed copies of subtree markup.
//!
//! # Example
//!
//! ```rust
//! use jobsift_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Backend Engineer</h1>
//!             <div class="job-location">Austin, TX</div>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! let location = doc.select_first(".job-location").unwrap();
//! ```

use scraper::{Html, Selector};
use url::Url;

use crate::{Result, SiftError};

/// Represents a parsed HTML document plus its resolved address.
///
/// A Document wraps an HTML page and provides methods for querying elements
/// using CSS selectors and reading page-level metadata. Parsing never fails;
/// malformed markup is handled by the underlying html5ever recovery.
pub struct Document {
    html: Html,
    base_url: Option<Url>,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jobsift_core::parse::Document;
    ///
    /// let doc = Document::parse("<html><head><title>Jobs</title></head></html>");
    /// assert_eq!(doc.title(), Some("Jobs".to_string()));
    /// ```
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html), base_url: None }
    }

    /// Parses HTML with the resolved address of the page.
    ///
    /// The URL feeds the domain-fallback and current-location strategies and
    /// resolves relative apply-link hrefs.
    pub fn parse_with_url(html: &str, url: Url) -> Self {
        Self { html: Html::parse_document(html), base_url: Some(url) }
    }

    /// Gets the resolved address of the page, if one was provided.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Gets the hostname of the resolved address, lowercased.
    pub fn host(&self) -> Option<String> {
        self.base_url
            .as_ref()
            .and_then(|u| u.host_str())
            .map(|h| h.to_lowercase())
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| SiftError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first element matching a CSS selector.
    ///
    /// Invalid selectors and empty matches both yield `None`; strategies
    /// treat the two identically.
    pub fn select_first(&'_ self, selector: &str) -> Option<Element<'_>> {
        let sel = Selector::parse(selector).ok()?;
        self.html.select(&sel).next().map(|el| Element { element: el })
    }

    /// Gets the content of the `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    /// Gets all text content from the document.
    pub fn text_content(&self) -> String {
        self.html.root_element().text().collect()
    }

    /// Gets the `<body>` element if present.
    pub fn body(&self) -> Option<Element<'_>> {
        self.select_first("body")
    }

    /// Gets meta tag content by `name` or `property` attribute.
    ///
    /// Checks `meta[name=...]` first, then `meta[property=...]`, matching
    /// how Open Graph and plain meta tags coexist in the wild.
    pub fn meta_content(&self, attr: &str) -> Option<String> {
        let selector = format!("meta[name=\"{}\"]", attr);
        if let Some(el) = self.select_first(&selector)
            && let Some(content) = el.attr("content")
        {
            return Some(content.to_string());
        }

        let selector = format!("meta[property=\"{}\"]", attr);
        if let Some(el) = self.select_first(&selector)
            && let Some(content) = el.attr("content")
        {
            return Some(content.to_string());
        }

        None
    }
}

/// A wrapper around scraper's ElementRef for easier tree access.
///
/// Element represents a single node in the HTML document tree and provides
/// methods for accessing its attributes, text content, and children.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

/// Tags whose content reads as its own line when flattening to text.
const BLOCK_TAGS: &[&str] =
    &["div", "p", "br", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "section", "article", "tr", "table"];

impl<'a> Element<'a> {
    /// Gets the inner HTML of this element.
    pub fn inner_html(&self) -> String {
        self.element.inner_html()
    }

    /// Gets the outer HTML of this element, including its own tags.
    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Gets the raw text content of this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text content with structural line breaks preserved.
    ///
    /// Block-level children (paragraphs, list items, headings, divs) end
    /// their accumulated text with a newline so that "Responsibilities" and
    /// the sentence after it do not fuse into one word. Script and style
    /// subtrees contribute nothing.
    pub fn structured_text(&self) -> String {
        let mut out = String::new();
        collect_structured_text(self.element, &mut out);
        out
    }

    /// Gets the value of an attribute, or `None` if not present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Derives a selector-like locator for this element.
    ///
    /// Priority: `#id`, then `.first-class`, then the bare tag name. Used to
    /// label ranked content blocks in extraction metadata.
    pub fn locator(&self) -> String {
        if let Some(id) = self.attr("id")
            && !id.is_empty()
        {
            return format!("#{}", id);
        }

        if let Some(class) = self.attr("class")
            && let Some(first) = class.split_whitespace().next()
        {
            return format!(".{}", first);
        }

        self.tag_name()
    }

    /// Selects child elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| SiftError::HtmlParseError(format!("Invalid selector: {}", e)))?;

        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }
}

fn collect_structured_text(node: scraper::ElementRef<'_>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            scraper::Node::Text(t) => {
                let text = t.text.trim();
                if !text.is_empty() {
                    out.push_str(text);
                    out.push(' ');
                }
            }
            scraper::Node::Element(el) => {
                let tag = el.name();
                if matches!(tag, "script" | "style" | "noscript") {
                    continue;
                }

                if let Some(el_ref) = scraper::ElementRef::wrap(child) {
                    let before = out.len();
                    collect_structured_text(el_ref, out);

                    if out.len() > before && BLOCK_TAGS.contains(&tag) {
                        while out.ends_with(' ') {
                            out.pop();
                        }
                        out.push('\n');
                    }
                }
            }
            _ => {}
        }
    }
}
