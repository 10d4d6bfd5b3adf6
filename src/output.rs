//! Console output and styling.
//!
//! All user-facing printing for the binaries goes through here; library
//! modules return data and never print.

use crate::category::Category;
use crate::organizer::OrganizeReport;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

pub struct OutputFormatter;

impl OutputFormatter {
    /// Green checkmark line.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Red cross line, to stderr.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Yellow warning line.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    pub fn plain(message: &str) {
        println!("{}", message);
    }

    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Progress bar for multi-file batches.
    pub fn progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("valid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Per-category summary of an organize run. Categories come out in table
    /// order; empty ones are skipped, the total always shows.
    pub fn organize_summary(report: &OrganizeReport) {
        Self::header("SUMMARY");

        let width = Category::ALL
            .iter()
            .map(|c| c.dir_name().len())
            .max()
            .unwrap_or(0)
            .max("Category".len());

        println!("{:<width$} | {}", "Category".bold(), "Files".bold());
        println!("{}", "-".repeat(width + 10));

        for (category, records) in report.iter() {
            if records.is_empty() {
                continue;
            }
            let word = if records.len() == 1 { "file" } else { "files" };
            println!(
                "{:<width$} | {} {}",
                category.dir_name(),
                records.len().to_string().green(),
                word,
            );
        }

        println!("{}", "-".repeat(width + 10));
        let total = report.total();
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total.to_string().green().bold(),
            if total == 1 { "file" } else { "files" },
        );
    }
}
