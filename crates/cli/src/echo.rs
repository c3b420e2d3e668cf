use jobsift_core::JobRecord;
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "JobSift".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Extract structured job postings from web pages\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print the extracted record summary
pub fn print_record_summary(record: &JobRecord) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Extraction Summary".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!("  {} {}", "Company:".dimmed(), record.company.bright_white());
    eprintln!("  {} {}", "Title:".dimmed(), record.title.bright_white());
    eprintln!("  {} {}", "Location:".dimmed(), record.location.bright_white());
    eprintln!("  {} {}", "Site:".dimmed(), record.site.bright_white());
    eprintln!(
        "  {} {}",
        "Quality:".dimmed(),
        format!(
            "{} ({})",
            record.extraction.quality_score, record.extraction.quality_grade
        )
        .bright_white()
    );
    eprintln!(
        "  {} {}%",
        "Confidence:".dimmed(),
        record.extraction.confidence_score.to_string().bright_white()
    );
    eprintln!(
        "  {} {}ms\n",
        "Elapsed:".dimmed(),
        record.extraction.elapsed_ms.to_string().bright_white()
    );
}

/// Render a record as plain text for non-JSON output
pub fn render_text(record: &JobRecord) -> String {
    format!(
        "Company:     {}\n\
         Title:       {}\n\
         Location:    {}\n\
         Apply:       {}\n\
         Site:        {}\n\
         Quality:     {} ({})\n\
         Confidence:  {}%\n\
         \n{}\n",
        record.company,
        record.title,
        record.location,
        record.application_url,
        record.site,
        record.extraction.quality_score,
        record.extraction.quality_grade,
        record.extraction.confidence_score,
        record.description,
    )
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
