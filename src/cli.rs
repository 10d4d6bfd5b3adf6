//! Argument types and entry points for the tidydesk binaries.
//!
//! Each binary is a thin shim over one `run_*` function here. Exit-code
//! policy is two-tier everywhere: construction/validation failures terminate
//! with code 1, per-item failures are logged and the batch continues with
//! code 0.

use crate::config::FilterConfig;
use crate::organizer::FileOrganizer;
use crate::output::OutputFormatter;
use crate::pdf_merge::PdfMerger;
use crate::resizer::{ImageResizer, ResizeSpec};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::process::ExitCode;

/// `organize [DIRECTORY] [--dry-run] [--config FILE]`
#[derive(Debug, Parser)]
#[command(
    name = "organize",
    version,
    about = "Organize a directory's files into category subdirectories"
)]
pub struct OrganizeArgs {
    /// Directory to organize (defaults to the current directory)
    #[arg(default_value = ".")]
    pub directory: String,

    /// Show what would be done without moving anything
    #[arg(long)]
    pub dry_run: bool,

    /// Filter configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn run_organize(args: OrganizeArgs) -> ExitCode {
    let filters = match FilterConfig::load(args.config.as_deref()).and_then(FilterConfig::compile) {
        Ok(filters) => filters,
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    let organizer = match FileOrganizer::with_filters(&args.directory, filters) {
        Ok(organizer) => organizer,
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    if args.dry_run {
        OutputFormatter::dry_run_notice(&format!(
            "Would organize files in: {}",
            organizer.directory().display()
        ));
    } else {
        OutputFormatter::info(&format!(
            "Organizing files in: {}",
            organizer.directory().display()
        ));
    }

    let report = match organizer.organize(args.dry_run) {
        Ok(report) => report,
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    for (category, records) in report.iter() {
        for record in records {
            let line = format!(
                "{} -> {}/{}",
                record.file_name,
                category.dir_name(),
                record.new_name
            );
            if args.dry_run {
                OutputFormatter::plain(&format!("  {}", line));
            } else {
                OutputFormatter::success(&line);
            }
        }
    }

    for failure in report.failures() {
        OutputFormatter::error(&format!("{}: {}", failure.file_name, failure.error));
    }

    OutputFormatter::organize_summary(&report);

    if args.dry_run {
        OutputFormatter::dry_run_notice(&format!(
            "Would move {} files. No changes were made.",
            report.total()
        ));
    } else {
        OutputFormatter::success(&format!(
            "Organization complete. Moved {} files.",
            report.total()
        ));
        if !report.failures().is_empty() {
            OutputFormatter::warning(&format!(
                "{} files could not be moved; see errors above.",
                report.failures().len()
            ));
        }
    }

    ExitCode::SUCCESS
}

/// `imgresize PATHS... (--size W H | --width W | --height H | --scale F)`
#[derive(Debug, Parser)]
#[command(
    name = "imgresize",
    version,
    about = "Resize one or more images into non-destructive copies"
)]
#[command(group(
    ArgGroup::new("geometry")
        .required(true)
        .args(["size", "width", "height", "scale"]),
))]
pub struct ResizeArgs {
    /// Image files or directories to resize
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output directory (defaults to a 'resized' directory beside each input)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format override, e.g. jpeg, png, webp
    #[arg(long, value_name = "FORMAT")]
    pub output_format: Option<String>,

    /// Recurse into subdirectories when a path is a directory
    #[arg(short, long)]
    pub recursive: bool,

    /// Target size as WIDTH HEIGHT in pixels
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    pub size: Option<Vec<u32>>,

    /// Target width; height keeps the aspect ratio
    #[arg(long, value_name = "PIXELS")]
    pub width: Option<u32>,

    /// Target height; width keeps the aspect ratio
    #[arg(long, value_name = "PIXELS")]
    pub height: Option<u32>,

    /// Scale factor, e.g. 0.5 for half size
    #[arg(long, value_name = "FACTOR")]
    pub scale: Option<f32>,

    /// Quality for JPEG output (1-100); other formats are lossless
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,
}

impl ResizeArgs {
    /// The geometry group is required and exclusive, so exactly one arm
    /// applies.
    fn spec(&self) -> Option<ResizeSpec> {
        if let Some(size) = &self.size {
            return Some(ResizeSpec::Exact(size[0], size[1]));
        }
        if let Some(width) = self.width {
            return Some(ResizeSpec::Width(width));
        }
        if let Some(height) = self.height {
            return Some(ResizeSpec::Height(height));
        }
        self.scale.map(ResizeSpec::Scale)
    }
}

pub fn run_resize(args: ResizeArgs) -> ExitCode {
    let Some(spec) = args.spec() else {
        OutputFormatter::error("no size, width, height, or scale provided");
        return ExitCode::FAILURE;
    };

    let format = match &args.output_format {
        Some(name) => match ImageResizer::parse_format(name) {
            Ok(format) => Some(format),
            Err(e) => {
                OutputFormatter::error(&e.to_string());
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let mut resizer = ImageResizer::new(args.output_dir.clone(), format);
    if let Some(quality) = args.quality {
        if format.is_some_and(|f| f != image::ImageFormat::Jpeg) {
            OutputFormatter::warning(
                "--quality only applies to JPEG output; other formats are encoded losslessly",
            );
        }
        resizer = resizer.with_quality(quality);
    }

    // Expand directories up front so the progress bar knows the batch size.
    let mut inputs = Vec::new();
    for path in &args.paths {
        if path.is_file() {
            inputs.push(path.clone());
        } else if path.is_dir() {
            match ImageResizer::collect_images(path, args.recursive) {
                Ok(mut found) => {
                    if found.is_empty() {
                        OutputFormatter::warning(&format!(
                            "no supported image files found in {}",
                            path.display()
                        ));
                    }
                    inputs.append(&mut found);
                }
                Err(e) => {
                    OutputFormatter::error(&e.to_string());
                    return ExitCode::FAILURE;
                }
            }
        } else {
            OutputFormatter::error(&format!("input not found: {}", path.display()));
            return ExitCode::FAILURE;
        }
    }

    if inputs.is_empty() {
        OutputFormatter::warning("no images were resized");
        return ExitCode::SUCCESS;
    }

    let progress = OutputFormatter::progress_bar(inputs.len() as u64);
    let mut resized = Vec::new();
    let mut failed = 0usize;
    for input in &inputs {
        match resizer.resize_file(input, spec) {
            Ok(result) => resized.push(result),
            Err(e) => {
                progress.suspend(|| OutputFormatter::error(&e.to_string()));
                failed += 1;
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    for result in &resized {
        OutputFormatter::success(&format!(
            "{} ({}x{} -> {}x{})",
            result.output_path.display(),
            result.original_dimensions.0,
            result.original_dimensions.1,
            result.new_dimensions.0,
            result.new_dimensions.1
        ));
    }
    OutputFormatter::plain(&format!("Resized {} images.", resized.len()));
    if failed > 0 {
        OutputFormatter::warning(&format!("{} images could not be resized.", failed));
    }

    ExitCode::SUCCESS
}

/// `pdfmerge PATHS... [-o FILE] [-r] [--delete-originals]`
#[derive(Debug, Parser)]
#[command(
    name = "pdfmerge",
    version,
    about = "Merge PDF files and directories of PDFs into one document"
)]
pub struct MergeArgs {
    /// PDF files or directories containing PDFs
    #[arg(required = true)]
    pub input_paths: Vec<PathBuf>,

    /// Output PDF file path
    #[arg(short, long, default_value = "merged.pdf", value_name = "FILE")]
    pub output: PathBuf,

    /// Recurse into subdirectories when a path is a directory
    #[arg(short, long)]
    pub recursive: bool,

    /// Delete original files after merging (accepted but not implemented)
    #[arg(long)]
    pub delete_originals: bool,
}

pub fn run_merge(args: MergeArgs) -> ExitCode {
    let mut merger = PdfMerger::new(&args.output);

    for path in &args.input_paths {
        if path.is_dir() {
            match merger.add_directory(path, args.recursive) {
                Ok(skipped) => {
                    for (file, error) in skipped {
                        OutputFormatter::error(&format!("skipping {}: {}", file.display(), error));
                    }
                }
                Err(e) => {
                    OutputFormatter::error(&e.to_string());
                    return ExitCode::FAILURE;
                }
            }
        } else {
            // Bad explicit file paths are per-item: log and continue.
            if let Err(e) = merger.add_file(path) {
                OutputFormatter::error(&format!("skipping {}: {}", path.display(), e));
            }
        }
    }

    let count = merger.source_count();
    match merger.merge() {
        Ok(written) => {
            OutputFormatter::success(&format!(
                "Merged {} PDFs into {}",
                count,
                written.display()
            ));
            if args.delete_originals {
                OutputFormatter::warning(
                    "deleting originals is not implemented; the input files were kept",
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
