//! tidydesk - desktop automation utilities
//!
//! Three independent tools over the local filesystem: a directory organizer
//! that files everything into category subdirectories by extension, a batch
//! image resizer that writes non-destructive copies, and a PDF concatenator.
//! An optional `gui` feature adds a small window around the organizer.

pub mod category;
pub mod cli;
pub mod config;
#[cfg(feature = "gui")]
pub mod gui;
pub mod organizer;
pub mod output;
pub mod pdf_merge;
pub mod resizer;

pub use category::{Category, category_for};
pub use config::{ConfigError, FileFilters, FilterConfig};
pub use organizer::{FileOrganizer, OrganizeError, OrganizeReport, OrganizeResult};
pub use pdf_merge::{MergeError, PdfMerger};
pub use resizer::{ImageResizer, ResizeError, ResizeSpec};
