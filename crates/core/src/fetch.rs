//! Content fetching from URLs, files, and stdin.
//!
//! This module provides functions for retrieving HTML content from
//! various sources: HTTP/HTTPS URLs, local files, and standard input.
//! [`fetch_frame`] additionally bounds the wait on auxiliary sub-documents
//! so a slow embedded frame can never stall an extraction run.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{Result, SiftError};

/// HTTP client configuration for fetching web pages.
///
/// This struct controls timeout and user agent settings for HTTP requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; JobSift/1.0; +https://github.com/stormlightlabs/jobsift)".to_string(),
        }
    }
}

/// Fetches HTML content from a URL.
///
/// This function performs an HTTP GET request and returns the response body as text.
/// It follows redirects, respects the configured timeout, and uses a browser-like
/// User-Agent for better compatibility.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| SiftError::InvalidUrl(e.to_string()))?;

    if parsed_url.scheme().is_empty() {
        return Err(SiftError::InvalidUrl(
            "URL must include a scheme (http:// or https://)".to_string(),
        ));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(SiftError::HttpError)?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                SiftError::Timeout { timeout: config.timeout }
            } else {
                SiftError::HttpError(e)
            }
        })?;

    let content = response.text().await?;

    Ok(content)
}

/// Fetches an auxiliary frame document under a hard deadline.
///
/// The deadline covers the whole request, independent of the per-request
/// timeout in `config`. Expiry cancels the in-flight request and returns
/// [`SiftError::Timeout`], which the engine treats as a strategy miss.
pub async fn fetch_frame(url: &str, config: &FetchConfig, deadline_secs: u64) -> Result<String> {
    match tokio::time::timeout(Duration::from_secs(deadline_secs), fetch_url(url, config)).await {
        Ok(result) => result,
        Err(_) => Err(SiftError::Timeout { timeout: deadline_secs }),
    }
}

/// Reads HTML content from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(SiftError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(SiftError::from)
    }
}

/// Reads HTML content from standard input.
///
/// This function reads all available input from stdin until EOF.
/// Useful for piping content from other commands.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(SiftError::from)?;

    Ok(buffer)
}
