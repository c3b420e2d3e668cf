mod echo;

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use jobsift_core::{
    EngineConfig, FetchConfig, JobExtractor, JobRecord, SiteRegistry, fetch_file, fetch_stdin,
};
use owo_colors::OwoColorize;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the extracted record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: json, text", s)),
        }
    }
}

/// Extract structured job postings from web pages
#[derive(Parser, Debug)]
#[command(name = "jobsift")]
#[command(author = "JobSift Contributors")]
#[command(version = "1.0.0")]
#[command(about = "Extract structured job postings from web pages", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Address of the page when reading from a file or stdin
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (json, text)
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Directory of extra site profile JSON files
    #[arg(long, value_name = "DIR")]
    profiles: Option<PathBuf>,

    /// Skip fetching auxiliary frame documents
    #[arg(long)]
    no_frames: bool,

    /// Enable step output and debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        echo::print_banner();

        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("jobsift_core=debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let mut registry = SiteRegistry::with_builtin();
    if let Some(dir) = &args.profiles {
        let loaded = registry
            .load_dir(dir)
            .with_context(|| format!("Failed to load site profiles from {}", dir.display()))?;

        if args.verbose {
            echo::print_info(&format!("Loaded {} site profiles", loaded));
        }
    }

    let config = if args.no_frames {
        EngineConfig::builder().max_frames(0).build()
    } else {
        EngineConfig::default()
    };
    let engine = JobExtractor::with_config_and_registry(config, registry);

    let record = if args.input == "-" {
        if args.verbose {
            echo::print_step(1, 2, "Reading from stdin");
        }

        let html = fetch_stdin().context("Failed to read from stdin")?;
        if args.verbose {
            eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
        }

        extract_local(&engine, &html, args.url.as_deref())
    } else if args.input.starts_with("http://") || args.input.starts_with("https://") {
        if args.verbose {
            echo::print_step(
                1,
                2,
                &format!("Fetching {}", args.input.bright_white().underline()),
            );
        }

        let fetch_config = FetchConfig {
            timeout: args.timeout,
            user_agent: args
                .user_agent
                .clone()
                .unwrap_or_else(|| FetchConfig::default().user_agent),
        };

        engine
            .fetch_and_extract(&args.input, &fetch_config)
            .await
            .context("Failed to fetch URL")?
    } else {
        if args.verbose {
            echo::print_step(1, 2, &format!("Reading {}", args.input.bright_white()));
        }

        let html = fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?;
        if args.verbose {
            eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
        }

        extract_local(&engine, &html, args.url.as_deref())
    };

    if args.verbose {
        echo::print_step(2, 2, "Extraction finished");
        echo::print_record_summary(&record);
    }

    let output = match (args.format, args.pretty) {
        (OutputFormat::Json, true) => record.to_json_pretty(),
        (OutputFormat::Json, false) => record.to_json(),
        (OutputFormat::Text, _) => echo::render_text(&record),
    };

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display()));
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}

/// Extraction for file and stdin input, with or without a known address.
fn extract_local(engine: &JobExtractor, html: &str, url: Option<&str>) -> JobRecord {
    match url {
        Some(u) => engine.extract_with_url(html, u),
        None => engine.extract(html),
    }
}
