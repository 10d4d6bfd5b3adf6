//! End-to-end tests for the directory organizer.
//!
//! Each test sets up a temporary directory, runs the organizer through its
//! public API, and checks the resulting tree and report.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use tidydesk::category::Category;
use tidydesk::config::{ExcludeRules, FilterConfig};
use tidydesk::organizer::{FileOrganizer, OrganizeError};

struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        TestFixture {
            temp_dir: TempDir::new().expect("failed to create temp directory"),
        }
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    fn path_str(&self) -> &str {
        self.path().to_str().expect("temp path should be utf-8")
    }

    fn create_file(&self, name: &str, content: &str) {
        let mut file = File::create(self.path().join(name)).expect("failed to create file");
        file.write_all(content.as_bytes())
            .expect("failed to write file");
    }

    fn create_files(&self, names: &[&str]) {
        for name in names {
            self.create_file(name, "content");
        }
    }

    fn create_subdir(&self, name: &str) {
        fs::create_dir(self.path().join(name)).expect("failed to create subdirectory");
    }

    fn organizer(&self) -> FileOrganizer {
        FileOrganizer::new(self.path_str()).expect("organizer construction should succeed")
    }

    fn assert_file_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(
            path.exists() && path.is_file(),
            "file should exist: {}",
            path.display()
        );
    }

    fn assert_file_not_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(!path.exists(), "file should not exist: {}", path.display());
    }

    fn assert_dir_exists(&self, rel_path: &str) {
        let path = self.path().join(rel_path);
        assert!(
            path.exists() && path.is_dir(),
            "directory should exist: {}",
            path.display()
        );
    }

    /// Regular files directly in the root (subdirectories not counted).
    fn count_root_files(&self) -> usize {
        fs::read_dir(self.path())
            .expect("failed to read directory")
            .flatten()
            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
            .count()
    }

    fn count_root_dirs(&self) -> usize {
        fs::read_dir(self.path())
            .expect("failed to read directory")
            .flatten()
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .count()
    }
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn missing_directory_fails_construction() {
    let result = FileOrganizer::new("/definitely/not/a/real/path");
    assert!(matches!(result, Err(OrganizeError::DirectoryNotFound(_))));
}

#[test]
fn file_path_fails_construction() {
    let fixture = TestFixture::new();
    fixture.create_file("plain.txt", "x");
    let file = fixture.path().join("plain.txt");

    let result = FileOrganizer::new(file.to_str().expect("utf-8"));
    assert!(matches!(result, Err(OrganizeError::NotADirectory(_))));
}

// ============================================================================
// Classification scenarios
// ============================================================================

#[test]
fn mixed_directory_lands_in_expected_categories() {
    let fixture = TestFixture::new();
    fixture.create_files(&[
        "a.jpg",
        "b.JPG",
        "report.pdf",
        "notes.txt",
        "archive.zip",
        "script.py",
        "README",
    ]);

    let report = fixture.organizer().organize(false).expect("organize");

    assert_eq!(
        report.file_names(Category::Images),
        vec!["a.jpg", "b.JPG"]
    );
    assert_eq!(
        report.file_names(Category::Documents),
        vec!["notes.txt", "report.pdf"]
    );
    assert_eq!(report.file_names(Category::Archives), vec!["archive.zip"]);
    assert_eq!(report.file_names(Category::Code), vec!["script.py"]);
    assert_eq!(report.file_names(Category::Other), vec!["README"]);
    assert_eq!(report.total(), 7);

    fixture.assert_file_exists("images/a.jpg");
    fixture.assert_file_exists("images/b.JPG");
    fixture.assert_file_exists("documents/report.pdf");
    fixture.assert_file_exists("documents/notes.txt");
    fixture.assert_file_exists("archives/archive.zip");
    fixture.assert_file_exists("code/script.py");
    fixture.assert_file_exists("other/README");

    // Root keeps only the five new category subdirectories.
    assert_eq!(fixture.count_root_files(), 0);
    assert_eq!(fixture.count_root_dirs(), 5);
}

#[test]
fn every_category_gets_used() {
    let fixture = TestFixture::new();
    fixture.create_files(&[
        "photo.png",
        "paper.docx",
        "clip.mp4",
        "song.mp3",
        "bundle.tar",
        "page.html",
        "setup.exe",
        "mystery.xyz",
    ]);

    let report = fixture.organizer().organize(false).expect("organize");

    assert_eq!(report.file_names(Category::Images), vec!["photo.png"]);
    assert_eq!(report.file_names(Category::Documents), vec!["paper.docx"]);
    assert_eq!(report.file_names(Category::Videos), vec!["clip.mp4"]);
    assert_eq!(report.file_names(Category::Audio), vec!["song.mp3"]);
    assert_eq!(report.file_names(Category::Archives), vec!["bundle.tar"]);
    assert_eq!(report.file_names(Category::Code), vec!["page.html"]);
    assert_eq!(report.file_names(Category::Executables), vec!["setup.exe"]);
    assert_eq!(report.file_names(Category::Other), vec!["mystery.xyz"]);
}

#[test]
fn multi_dot_names_classify_by_last_extension() {
    let fixture = TestFixture::new();
    fixture.create_files(&["photo.backup.png", "release.tar.gz", "report.final.pdf"]);

    fixture.organizer().organize(false).expect("organize");

    fixture.assert_file_exists("images/photo.backup.png");
    fixture.assert_file_exists("archives/release.tar.gz");
    fixture.assert_file_exists("documents/report.final.pdf");
}

// ============================================================================
// Skipping rules
// ============================================================================

#[test]
fn hidden_files_and_subdirectories_stay_put() {
    let fixture = TestFixture::new();
    fixture.create_file("photo.jpg", "img");
    fixture.create_file(".hidden.jpg", "img");
    fixture.create_subdir("existing_dir");
    fixture.create_file("existing_dir/inner.jpg", "img");

    let report = fixture.organizer().organize(false).expect("organize");

    assert_eq!(report.total(), 1);
    fixture.assert_file_exists("images/photo.jpg");
    fixture.assert_file_exists(".hidden.jpg");
    fixture.assert_file_exists("existing_dir/inner.jpg");
}

#[cfg(unix)]
#[test]
fn symlinks_are_skipped() {
    let fixture = TestFixture::new();
    fixture.create_file("real.jpg", "img");
    std::os::unix::fs::symlink(
        fixture.path().join("real.jpg"),
        fixture.path().join("link.jpg"),
    )
    .expect("symlink");

    let report = fixture.organizer().organize(false).expect("organize");

    assert_eq!(report.total(), 1);
    fixture.assert_file_exists("images/real.jpg");
    // The link stays in the root, now dangling.
    assert!(fixture.path().join("link.jpg").symlink_metadata().is_ok());
}

#[test]
fn filter_config_excludes_are_honored() {
    let fixture = TestFixture::new();
    fixture.create_files(&["photo.jpg", "download.part", "Thumbs.db"]);

    let filters = FilterConfig {
        exclude: ExcludeRules {
            filenames: vec!["Thumbs.db".to_string()],
            extensions: vec!["part".to_string()],
            ..Default::default()
        },
        ..Default::default()
    }
    .compile()
    .expect("filters");

    let organizer = FileOrganizer::with_filters(fixture.path_str(), filters).expect("organizer");
    let report = organizer.organize(false).expect("organize");

    assert_eq!(report.total(), 1);
    fixture.assert_file_exists("images/photo.jpg");
    fixture.assert_file_exists("download.part");
    fixture.assert_file_exists("Thumbs.db");
}

// ============================================================================
// Collision handling
// ============================================================================

#[test]
fn collision_renames_with_counter_suffix() {
    let fixture = TestFixture::new();
    fixture.create_subdir("images");
    fixture.create_file("images/photo.jpg", "already there");
    fixture.create_file("photo.jpg", "incoming");

    let report = fixture.organizer().organize(false).expect("organize");

    fixture.assert_file_exists("images/photo.jpg");
    fixture.assert_file_exists("images/photo_1.jpg");
    fixture.assert_file_not_exists("photo.jpg");

    let records = report.records(Category::Images);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].file_name, "photo.jpg");
    assert_eq!(records[0].new_name, "photo_1.jpg");
}

#[test]
fn repeated_collisions_use_strictly_increasing_suffixes() {
    let fixture = TestFixture::new();

    for expected in ["photo.jpg", "photo_1.jpg", "photo_2.jpg"] {
        fixture.create_file("photo.jpg", "round");
        let report = fixture.organizer().organize(false).expect("organize");
        assert_eq!(report.records(Category::Images)[0].new_name, expected);
    }

    fixture.assert_file_exists("images/photo.jpg");
    fixture.assert_file_exists("images/photo_1.jpg");
    fixture.assert_file_exists("images/photo_2.jpg");
}

#[test]
fn collision_suffix_for_extensionless_file() {
    let fixture = TestFixture::new();
    fixture.create_subdir("other");
    fixture.create_file("other/README", "old");
    fixture.create_file("README", "new");

    let report = fixture.organizer().organize(false).expect("organize");

    assert_eq!(report.records(Category::Other)[0].new_name, "README_1");
    fixture.assert_file_exists("other/README_1");
}

// ============================================================================
// Preview mode
// ============================================================================

#[test]
fn dry_run_mutates_nothing() {
    let fixture = TestFixture::new();
    fixture.create_files(&["photo.jpg", "notes.txt"]);

    let report = fixture.organizer().organize(true).expect("dry run");

    assert_eq!(report.total(), 2);
    fixture.assert_file_exists("photo.jpg");
    fixture.assert_file_exists("notes.txt");
    assert_eq!(fixture.count_root_dirs(), 0, "dry run must not create dirs");
}

#[test]
fn dry_run_predicts_the_real_run() {
    let fixture = TestFixture::new();
    fixture.create_files(&["photo.jpg", "notes.txt", "song.mp3", "README"]);

    let organizer = fixture.organizer();
    let preview = organizer.organize(true).expect("dry run");
    let actual = organizer.organize(false).expect("organize");

    for category in Category::ALL {
        assert_eq!(
            preview.file_names(category),
            actual.file_names(category),
            "preview and apply disagree for {:?}",
            category
        );
    }
}

#[test]
fn dry_run_sees_existing_on_disk_collisions() {
    let fixture = TestFixture::new();
    fixture.create_subdir("images");
    fixture.create_file("images/photo.jpg", "already there");
    fixture.create_file("photo.jpg", "incoming");

    let report = fixture.organizer().organize(true).expect("dry run");

    assert_eq!(report.records(Category::Images)[0].new_name, "photo_1.jpg");
    // Still a preview: nothing moved.
    fixture.assert_file_exists("photo.jpg");
    fixture.assert_file_exists("images/photo.jpg");
}

// ============================================================================
// Edge cases and failure isolation
// ============================================================================

#[test]
fn empty_directory_yields_empty_report_and_no_side_effects() {
    let fixture = TestFixture::new();

    let report = fixture.organizer().organize(false).expect("organize");

    assert!(report.is_empty());
    for category in Category::ALL {
        assert!(report.records(category).is_empty());
    }
    assert_eq!(fixture.count_root_dirs(), 0);
    assert_eq!(fixture.count_root_files(), 0);
}

#[test]
fn organize_twice_is_idempotent() {
    let fixture = TestFixture::new();
    fixture.create_files(&["photo.jpg", "report.pdf"]);

    let first = fixture.organizer().organize(false).expect("first run");
    assert_eq!(first.total(), 2);

    let second = fixture.organizer().organize(false).expect("second run");
    assert_eq!(second.total(), 0);
    for category in Category::ALL {
        assert!(second.records(category).is_empty());
    }

    fixture.assert_file_exists("images/photo.jpg");
    fixture.assert_file_exists("documents/report.pdf");
}

#[test]
fn one_failed_move_does_not_abort_the_batch() {
    let fixture = TestFixture::new();
    // A plain file squatting on the category directory name makes every
    // move into "images" fail. An exclude rule keeps the squatter itself
    // out of the batch.
    fixture.create_file("images", "not a directory");
    fixture.create_files(&["photo.jpg", "notes.txt"]);

    let filters = FilterConfig {
        exclude: ExcludeRules {
            filenames: vec!["images".to_string()],
            ..Default::default()
        },
        ..Default::default()
    }
    .compile()
    .expect("filters");

    let organizer = FileOrganizer::with_filters(fixture.path_str(), filters).expect("organizer");
    let report = organizer.organize(false).expect("organize");

    assert_eq!(report.failures().len(), 1);
    assert_eq!(report.failures()[0].file_name, "photo.jpg");
    assert!(report.records(Category::Images).is_empty());

    // The unrelated file still moved.
    assert_eq!(report.file_names(Category::Documents), vec!["notes.txt"]);
    fixture.assert_file_exists("documents/notes.txt");
    fixture.assert_file_exists("photo.jpg");
}

#[test]
fn file_content_survives_the_move() {
    let fixture = TestFixture::new();
    fixture.create_file("report.pdf", "important bytes");

    fixture.organizer().organize(false).expect("organize");

    let content =
        fs::read_to_string(fixture.path().join("documents/report.pdf")).expect("read moved file");
    assert_eq!(content, "important bytes");
}

#[test]
fn special_characters_in_names_are_preserved() {
    let fixture = TestFixture::new();
    fixture.create_files(&["photo (1).jpg", "document - final.pdf", "song [remix].mp3"]);

    fixture.organizer().organize(false).expect("organize");

    fixture.assert_file_exists("images/photo (1).jpg");
    fixture.assert_file_exists("documents/document - final.pdf");
    fixture.assert_file_exists("audio/song [remix].mp3");
}
