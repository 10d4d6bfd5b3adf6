//! Extension-based file categorization.
//!
//! Maps file extensions to a fixed set of category buckets. The mapping is a
//! compile-time constant; lookups walk the table in declaration order, so
//! results are deterministic for any input.
//!
//! # Examples
//!
//! ```
//! use tidydesk::category::{Category, category_for};
//!
//! assert_eq!(category_for(".jpg"), Category::Images);
//! assert_eq!(category_for(".pdf"), Category::Documents);
//! assert_eq!(category_for(""), Category::Other);
//! ```
use std::path::Path;

/// A category bucket used to group files by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Image files (JPG, PNG, GIF, ...)
    Images,
    /// Document files (PDF, DOCX, TXT, ...)
    Documents,
    /// Video files (MP4, MKV, AVI, ...)
    Videos,
    /// Audio files (MP3, WAV, OGG, ...)
    Audio,
    /// Archive files (ZIP, RAR, TAR, ...)
    Archives,
    /// Source code files (Python, JavaScript, C, ...)
    Code,
    /// Installers and executables (EXE, MSI, DEB, ...)
    Executables,
    /// Anything with no matching extension, including extensionless files.
    Other,
}

impl Category {
    /// Every category, in table order, with `Other` last.
    pub const ALL: [Category; 8] = [
        Category::Images,
        Category::Documents,
        Category::Videos,
        Category::Audio,
        Category::Archives,
        Category::Code,
        Category::Executables,
        Category::Other,
    ];

    /// Returns the subdirectory name used for this category.
    ///
    /// ```
    /// use tidydesk::category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "images");
    /// assert_eq!(Category::Other.dir_name(), "other");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "images",
            Category::Documents => "documents",
            Category::Videos => "videos",
            Category::Audio => "audio",
            Category::Archives => "archives",
            Category::Code => "code",
            Category::Executables => "executables",
            Category::Other => "other",
        }
    }
}

/// The extension table. Extensions are lowercase and carry the leading dot;
/// the sets are disjoint, so declaration order does not affect which category
/// wins, only the (deterministic) scan order.
const CATEGORY_TABLE: &[(Category, &[&str])] = &[
    (
        Category::Images,
        &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp"],
    ),
    (
        Category::Documents,
        &[".pdf", ".doc", ".docx", ".txt", ".xlsx", ".pptx"],
    ),
    (Category::Videos, &[".mp4", ".mov", ".avi", ".mkv", ".wmv"]),
    (Category::Audio, &[".mp3", ".wav", ".ogg", ".m4a"]),
    (Category::Archives, &[".zip", ".rar", ".7z", ".tar", ".gz"]),
    (
        Category::Code,
        &[".py", ".js", ".html", ".css", ".java", ".cpp", ".c", ".h"],
    ),
    (
        Category::Executables,
        &[".exe", ".msi", ".dmg", ".pkg", ".deb"],
    ),
];

/// Returns the category owning `extension`, or [`Category::Other`] when no
/// set contains it. Matching is case-insensitive; the expected form is a
/// dotted extension such as `".jpg"` (empty string for extensionless files).
pub fn category_for(extension: &str) -> Category {
    let extension = extension.to_ascii_lowercase();
    for (category, extensions) in CATEGORY_TABLE {
        if extensions.contains(&extension.as_str()) {
            return *category;
        }
    }
    Category::Other
}

/// Extracts the lowercase dotted extension of a path, or an empty string for
/// extensionless files. `"b.JPG"` yields `".jpg"`, `"README"` yields `""`.
pub fn extension_of(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy().to_lowercase()),
        None => String::new(),
    }
}
