//! Text rendering of a finished run. Nothing here touches the filesystem.

use std::fmt::Write as FmtWrite;

use colored::*;
use terminal_size::{terminal_size, Width};

use crate::aggregate::{RunOutcome, SkipReason};
use crate::classify::FileStats;
use crate::detect::supported_extensions;
use crate::rules::RuleRegistry;

const LANG_WIDTH: usize = 16;
const COUNT_WIDTH: usize = 14;
const PATH_WIDTH: usize = 40;
const TABLE_WIDTH: usize = LANG_WIDTH + 4 * (COUNT_WIDTH + 1);

/// Width of the horizontal rules: the table width, narrowed to the terminal
/// when stdout is one.
pub fn rule_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| usize::from(w).min(TABLE_WIDTH))
        .unwrap_or(TABLE_WIDTH)
}

/// Fit a path into `width` characters by eliding its front, so the file
/// name stays visible.
fn elide_path(path: &str, width: usize) -> String {
    let len = path.chars().count();
    if len <= width {
        return path.to_string();
    }
    let tail_start = path
        .char_indices()
        .nth(len - width.saturating_sub(3))
        .map_or(path.len(), |(at, _)| at);
    format!("...{}", &path[tail_start..])
}

fn format_stats_row(label: ColoredString, stats: &FileStats) -> String {
    format!(
        "{} {} {} {} {}",
        label,
        format!("{:>COUNT_WIDTH$}", stats.total_lines).green(),
        format!("{:>COUNT_WIDTH$}", stats.code_lines()).blue(),
        format!("{:>COUNT_WIDTH$}", stats.comment_lines).yellow(),
        format!("{:>COUNT_WIDTH$}", stats.blank_lines).magenta(),
    )
}

pub fn build_report(outcome: &RunOutcome, verbose: bool, width: usize) -> String {
    let manifest = &outcome.manifest;
    let mut output = String::new();

    let sources: Vec<String> = manifest
        .inputs
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    let _ = writeln!(output, "Files source: [{}]", sources.join(", "));
    let _ = writeln!(
        output,
        "Total files: {}",
        manifest.total_files().to_string().bright_yellow()
    );
    let _ = writeln!(
        output,
        "Processed files: {}",
        manifest.processed_count().to_string().bright_yellow()
    );
    let _ = writeln!(
        output,
        "Skipped files: {}",
        manifest.skipped_count().to_string().bright_yellow()
    );

    if verbose {
        write_file_breakdown(&mut output, outcome, width);
    }

    let _ = writeln!(output, "{}", "-".repeat(width));
    let _ = writeln!(
        output,
        "{} {} {} {} {}",
        format!("{:<LANG_WIDTH$}", "Language").cyan(),
        format!("{:>COUNT_WIDTH$}", "Total lines").green(),
        format!("{:>COUNT_WIDTH$}", "Code lines").blue(),
        format!("{:>COUNT_WIDTH$}", "Comment lines").yellow(),
        format!("{:>COUNT_WIDTH$}", "Blank lines").magenta(),
    );
    let _ = writeln!(output, "{}", "-".repeat(width));

    for (language, stats) in outcome.stats.iter() {
        let label = format!("{:<LANG_WIDTH$}", language).cyan();
        let _ = writeln!(output, "{}", format_stats_row(label, stats));
    }

    let _ = writeln!(output, "{}", "-".repeat(width));
    let label = format!("{:<LANG_WIDTH$}", "Total").red().bold();
    let _ = writeln!(
        output,
        "{}",
        format_stats_row(label, &outcome.stats.grand_total())
    );

    let failures = manifest.failed_count() + manifest.walk_errors;
    if failures > 0 {
        let _ = writeln!(
            output,
            "\n{}: {} path(s) could not be counted",
            "Warning".red().bold(),
            failures.to_string().bright_yellow()
        );
    }

    output
}

fn write_file_breakdown(output: &mut String, outcome: &RunOutcome, width: usize) {
    let _ = writeln!(output, "\n{}", "Per-file breakdown:".blue().bold());
    let _ = writeln!(output, "{}", "-".repeat(width));
    for record in &outcome.manifest.processed {
        let path = elide_path(&record.path.display().to_string(), PATH_WIDTH);
        match record.stats {
            Some(stats) => {
                let _ = writeln!(
                    output,
                    "{:<PATH_WIDTH$} {:<12} total {:>6}  code {:>6}  comment {:>6}  blank {:>6}",
                    path,
                    record.language,
                    stats.total_lines,
                    stats.code_lines(),
                    stats.comment_lines,
                    stats.blank_lines
                );
            }
            None => {
                let _ = writeln!(
                    output,
                    "{:<PATH_WIDTH$} {:<12} {}",
                    path,
                    record.language,
                    "failed".red()
                );
            }
        }
    }
    for skipped in &outcome.manifest.skipped {
        let reason = match skipped.reason {
            SkipReason::NotFound => "not found",
            SkipReason::UnsupportedLanguage => "unsupported",
        };
        let path = elide_path(&skipped.path.display().to_string(), PATH_WIDTH);
        let _ = writeln!(output, "{:<PATH_WIDTH$} {}", path, reason.dimmed());
    }
    let _ = writeln!(output);
}

/// The extension table and the rules each language is counted with.
pub fn build_language_listing(registry: &RuleRegistry) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", "Supported languages:".blue().bold());
    for language in registry.languages() {
        let extensions: Vec<String> = supported_extensions()
            .iter()
            .filter(|(_, lang)| *lang == language)
            .map(|(ext, _)| format!(".{}", ext))
            .collect();
        let Some(rules) = registry.get_rules(language) else {
            continue;
        };
        let block = match (rules.block_start.as_deref(), rules.block_end.as_deref()) {
            (Some(start), Some(end)) => format!("{} ... {}", start, end),
            (Some(start), None) => format!("{} ...", start),
            _ => "-".to_string(),
        };
        let _ = writeln!(
            output,
            "  {} {:<16} line {:<4} block {}",
            format!("{:<LANG_WIDTH$}", language).cyan(),
            extensions.join(" "),
            rules.single_line.as_deref().unwrap_or("-"),
            block
        );
    }
    output
}
