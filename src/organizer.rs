//! Directory organization: classify files by extension and move them into
//! category subdirectories.
//!
//! The organizer validates its target directory at construction time, then
//! each `organize` call re-scans the directory's current contents. Moves are
//! per-entry isolated: one failed move is recorded and the batch continues.
use crate::category::{self, Category};
use crate::config::FileFilters;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors surfaced by the organizer.
///
/// The first two variants are construction-time and fatal; the rest occur per
/// entry during a move and are collected into the report instead of aborting.
#[derive(Debug)]
pub enum OrganizeError {
    /// The target path does not exist.
    DirectoryNotFound(PathBuf),
    /// The target path exists but is not a directory.
    NotADirectory(PathBuf),
    /// The target path could not be resolved to an absolute path.
    Resolve {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Reading the directory listing failed.
    Scan {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A category subdirectory could not be created.
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Moving one file to its destination failed.
    Move {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryNotFound(path) => {
                write!(f, "directory not found: {}", path.display())
            }
            Self::NotADirectory(path) => {
                write!(f, "path is not a directory: {}", path.display())
            }
            Self::Resolve { path, source } => {
                write!(f, "cannot resolve {}: {}", path.display(), source)
            }
            Self::Scan { path, source } => {
                write!(f, "cannot read directory {}: {}", path.display(), source)
            }
            Self::CreateDir { path, source } => {
                write!(f, "cannot create directory {}: {}", path.display(), source)
            }
            Self::Move { from, to, source } => {
                write!(
                    f,
                    "cannot move {} to {}: {}",
                    from.display(),
                    to.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for organizer operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// One processed file: its original name and the name it received at the
/// destination (which may carry a collision suffix).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub file_name: String,
    pub new_name: String,
}

/// One file the organizer could not move. The batch continues past these.
#[derive(Debug)]
pub struct MoveFailure {
    pub file_name: String,
    pub error: OrganizeError,
}

/// The outcome of one `organize` call: per category, the files that were (or
/// in preview mode, would be) relocated there, in scan order. Every category
/// is present even when its list is empty.
#[derive(Debug)]
pub struct OrganizeReport {
    moved: BTreeMap<Category, Vec<MoveRecord>>,
    failures: Vec<MoveFailure>,
}

impl OrganizeReport {
    fn new() -> Self {
        let mut moved = BTreeMap::new();
        for category in Category::ALL {
            moved.insert(category, Vec::new());
        }
        Self {
            moved,
            failures: Vec::new(),
        }
    }

    fn record(&mut self, category: Category, record: MoveRecord) {
        self.moved.entry(category).or_default().push(record);
    }

    /// Records for one category, in scan order.
    pub fn records(&self, category: Category) -> &[MoveRecord] {
        self.moved
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Original file names for one category, in scan order.
    pub fn file_names(&self, category: Category) -> Vec<&str> {
        self.records(category)
            .iter()
            .map(|r| r.file_name.as_str())
            .collect()
    }

    /// Iterates categories in table order with their records.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[MoveRecord])> {
        self.moved.iter().map(|(c, v)| (*c, v.as_slice()))
    }

    /// Total number of files processed successfully.
    pub fn total(&self) -> usize {
        self.moved.values().map(Vec::len).sum()
    }

    /// Files that failed to move, with their causes.
    pub fn failures(&self) -> &[MoveFailure] {
        &self.failures
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0 && self.failures.is_empty()
    }
}

/// Organizes the immediate children of one target directory.
pub struct FileOrganizer {
    directory: PathBuf,
    filters: FileFilters,
}

impl FileOrganizer {
    /// Creates an organizer for `directory`, expanding a leading `~` and
    /// resolving to an absolute path. Fails if the path is missing or not a
    /// directory; permissions are only discovered later, per entry.
    pub fn new(directory: &str) -> OrganizeResult<Self> {
        Self::with_filters(directory, FileFilters::default())
    }

    /// Like [`FileOrganizer::new`], with custom filter rules.
    pub fn with_filters(directory: &str, filters: FileFilters) -> OrganizeResult<Self> {
        let expanded = expand_home(directory);
        if !expanded.exists() {
            return Err(OrganizeError::DirectoryNotFound(expanded));
        }
        if !expanded.is_dir() {
            return Err(OrganizeError::NotADirectory(expanded));
        }
        let directory = fs::canonicalize(&expanded).map_err(|e| OrganizeError::Resolve {
            path: expanded,
            source: e,
        })?;
        Ok(Self { directory, filters })
    }

    /// The resolved target directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Classifies every organizable file and moves it into
    /// `<target>/<category>/`, creating category directories on demand. With
    /// `dry_run` the same classification and collision naming run against the
    /// current on-disk state, but nothing is created or moved.
    ///
    /// Name collisions at a destination are resolved by inserting `_1`, `_2`,
    /// ... before the extension until a free name is found. The probe only
    /// consults what is on disk, so a dry run cannot anticipate collisions
    /// between two files of the same pass; its predicted names can differ
    /// from a later real run in that case.
    pub fn organize(&self, dry_run: bool) -> OrganizeResult<OrganizeReport> {
        let mut report = OrganizeReport::new();

        for (file_name, path) in self.scan()? {
            let extension = category::extension_of(&path);
            let category = category::category_for(&extension);
            let category_dir = self.directory.join(category.dir_name());
            let (destination, new_name) = next_free_destination(&category_dir, &file_name);

            let record = MoveRecord {
                file_name: file_name.clone(),
                new_name,
            };

            if dry_run {
                report.record(category, record);
                continue;
            }

            match move_entry(&category_dir, &path, &destination) {
                Ok(()) => report.record(category, record),
                Err(error) => report.failures.push(MoveFailure { file_name, error }),
            }
        }

        Ok(report)
    }

    /// Lists the organizable children of the target directory: regular files
    /// only (directories and symlinks are skipped), filtered through the
    /// configured rules, sorted by name so results are reproducible.
    fn scan(&self) -> OrganizeResult<Vec<(String, PathBuf)>> {
        let entries = fs::read_dir(&self.directory).map_err(|e| OrganizeError::Scan {
            path: self.directory.clone(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in entries.flatten() {
            // file_type() does not follow symlinks; links are skipped along
            // with directories.
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().to_string();
            if self.filters.should_organize(&file_name) {
                files.push((file_name, entry.path()));
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Expands a leading `~` or `~/` using `$HOME`; other paths pass through.
fn expand_home(path: &str) -> PathBuf {
    if path == "~" || path.starts_with("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(path.trim_start_matches("~/").trim_start_matches('~'));
        }
    }
    PathBuf::from(path)
}

/// Picks the first unoccupied destination name for `file_name` inside
/// `category_dir`: the name itself, then `stem_1.ext`, `stem_2.ext`, ...
fn next_free_destination(category_dir: &Path, file_name: &str) -> (PathBuf, String) {
    let candidate = category_dir.join(file_name);
    if !candidate.exists() {
        return (candidate, file_name.to_string());
    }

    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string());
    let suffix = name
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter = 1;
    loop {
        let new_name = format!("{}_{}{}", stem, counter, suffix);
        let candidate = category_dir.join(&new_name);
        if !candidate.exists() {
            return (candidate, new_name);
        }
        counter += 1;
    }
}

/// Creates the category directory if needed (an existing one is reused) and
/// renames the file into it.
fn move_entry(category_dir: &Path, from: &Path, to: &Path) -> OrganizeResult<()> {
    if !category_dir.exists() {
        fs::create_dir_all(category_dir).map_err(|e| OrganizeError::CreateDir {
            path: category_dir.to_path_buf(),
            source: e,
        })?;
    }
    fs::rename(from, to).map_err(|e| OrganizeError::Move {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn construction_rejects_missing_path() {
        let result = FileOrganizer::new("/no/such/directory/anywhere");
        assert!(matches!(result, Err(OrganizeError::DirectoryNotFound(_))));
    }

    #[test]
    fn construction_rejects_plain_file() {
        let temp = TempDir::new().expect("tempdir");
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").expect("write");

        let result = FileOrganizer::new(file.to_str().expect("utf-8 path"));
        assert!(matches!(result, Err(OrganizeError::NotADirectory(_))));
    }

    #[test]
    fn next_free_destination_prefers_original_name() {
        let temp = TempDir::new().expect("tempdir");
        let (dest, name) = next_free_destination(temp.path(), "photo.jpg");
        assert_eq!(name, "photo.jpg");
        assert_eq!(dest, temp.path().join("photo.jpg"));
    }

    #[test]
    fn next_free_destination_counts_past_occupied_names() {
        let temp = TempDir::new().expect("tempdir");
        fs::write(temp.path().join("photo.jpg"), "a").expect("write");
        fs::write(temp.path().join("photo_1.jpg"), "b").expect("write");

        let (_, name) = next_free_destination(temp.path(), "photo.jpg");
        assert_eq!(name, "photo_2.jpg");
    }

    #[test]
    fn next_free_destination_handles_extensionless_names() {
        let temp = TempDir::new().expect("tempdir");
        fs::write(temp.path().join("README"), "a").expect("write");

        let (_, name) = next_free_destination(temp.path(), "README");
        assert_eq!(name, "README_1");
    }

    #[test]
    fn next_free_destination_suffixes_before_last_extension() {
        let temp = TempDir::new().expect("tempdir");
        fs::write(temp.path().join("archive.tar.gz"), "a").expect("write");

        let (_, name) = next_free_destination(temp.path(), "archive.tar.gz");
        assert_eq!(name, "archive.tar_1.gz");
    }

    #[test]
    fn organize_moves_and_reports() {
        let temp = TempDir::new().expect("tempdir");
        fs::write(temp.path().join("photo.jpg"), "img").expect("write");
        fs::write(temp.path().join("notes.txt"), "txt").expect("write");

        let organizer =
            FileOrganizer::new(temp.path().to_str().expect("utf-8 path")).expect("organizer");
        let report = organizer.organize(false).expect("organize");

        assert_eq!(report.total(), 2);
        assert_eq!(report.file_names(Category::Images), vec!["photo.jpg"]);
        assert_eq!(report.file_names(Category::Documents), vec!["notes.txt"]);
        assert!(report.failures().is_empty());
        assert!(temp.path().join("images/photo.jpg").exists());
        assert!(temp.path().join("documents/notes.txt").exists());
        assert!(!temp.path().join("photo.jpg").exists());
    }

    #[test]
    fn dry_run_reports_without_touching_disk() {
        let temp = TempDir::new().expect("tempdir");
        fs::write(temp.path().join("photo.jpg"), "img").expect("write");

        let organizer =
            FileOrganizer::new(temp.path().to_str().expect("utf-8 path")).expect("organizer");
        let report = organizer.organize(true).expect("dry run");

        assert_eq!(report.total(), 1);
        assert!(temp.path().join("photo.jpg").exists());
        assert!(!temp.path().join("images").exists());
    }

    #[test]
    fn report_always_contains_every_category() {
        let temp = TempDir::new().expect("tempdir");
        let organizer =
            FileOrganizer::new(temp.path().to_str().expect("utf-8 path")).expect("organizer");
        let report = organizer.organize(false).expect("organize");

        assert!(report.is_empty());
        let listed: Vec<Category> = report.iter().map(|(c, _)| c).collect();
        assert_eq!(listed.len(), Category::ALL.len());
        for category in Category::ALL {
            assert!(report.records(category).is_empty());
        }
    }

    #[test]
    fn expand_home_passthrough_for_plain_paths() {
        assert_eq!(expand_home("/tmp/x"), PathBuf::from("/tmp/x"));
        assert_eq!(expand_home("relative"), PathBuf::from("relative"));
    }
}
