//! Markdown run summary
//!
//! A human-readable record of one harvest: when it ran, with which
//! settings, and what each letter produced.

use crate::classify::FilterConfig;
use crate::crawler::HarvestReport;
use crate::output::stats::HarvestStatistics;
use crate::output::{OutputError, OutputResult};
use std::path::Path;

/// Run settings shown alongside the results
#[derive(Debug, Clone)]
pub struct SummaryContext {
    pub base_url: String,
    pub filter: FilterConfig,
    /// SHA-256 of the config file, when one was used
    pub config_hash: Option<String>,
}

/// Writes a markdown summary of `report` to `output_path`
pub fn generate_markdown_summary(
    report: &HarvestReport,
    context: &SummaryContext,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_summary(report, context);

    std::fs::write(output_path, markdown).map_err(|source| OutputError::Write {
        path: output_path.display().to_string(),
        source,
    })
}

/// Formats a harvest report as markdown
pub fn format_markdown_summary(report: &HarvestReport, context: &SummaryContext) -> String {
    let stats = HarvestStatistics::from_report(report);
    let mut md = String::new();

    md.push_str("# Wordhoard Harvest Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Site**: {}\n", context.base_url));
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", report.finished_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {} seconds\n",
        report.duration().num_seconds()
    ));
    md.push_str(&format!(
        "- **Status**: {}\n",
        if report.is_complete() { "complete" } else { "partial" }
    ));
    if let Some(hash) = &context.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    md.push_str("## Filter\n\n");
    md.push_str("| Shape | Included |\n");
    md.push_str("|-------|----------|\n");
    let filter = &context.filter;
    for (name, included) in [
        ("Hyphenated", filter.include_hyphenated),
        ("Proper nouns", filter.include_proper),
        ("Phrases", filter.include_phrases),
        ("Prefixes", filter.include_prefixes),
        ("Suffixes", filter.include_suffixes),
        ("Acronyms", filter.include_acronyms),
    ] {
        md.push_str(&format!("| {} | {} |\n", name, if included { "yes" } else { "no" }));
    }
    md.push('\n');

    md.push_str("## Totals\n\n");
    md.push_str(&format!("- **Pages Fetched**: {}\n", stats.total_pages));
    md.push_str(&format!("- **Tokens Seen**: {}\n", stats.tokens_seen));
    md.push_str(&format!(
        "- **Words Kept**: {} ({:.2}%)\n\n",
        stats.accepted,
        stats.acceptance_rate()
    ));

    if !stats.rejected_by_reason.is_empty() {
        md.push_str("## Rejections\n\n");
        md.push_str("| Reason | Count |\n");
        md.push_str("|--------|-------|\n");
        for (reason, count) in &stats.rejected_by_reason {
            md.push_str(&format!("| {} | {} |\n", reason, count));
        }
        md.push('\n');
    }

    md.push_str("## Letters\n\n");
    md.push_str("| Letter | Pages | Tokens | Kept | Status |\n");
    md.push_str("|--------|-------|--------|------|--------|\n");
    for row in &stats.letters {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            row.letter,
            row.pages,
            row.tokens_seen,
            row.accepted,
            row.failure.as_deref().unwrap_or("ok")
        ));
    }

    md
}
