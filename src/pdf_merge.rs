//! PDF concatenation.
//!
//! Collects input documents from files and directories, then merges them at
//! the object level into a single output document. Each source contributes a
//! bookmark at its first page, titled with the source file stem.
use lopdf::{Bookmark, Document, Object, ObjectId};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors surfaced while merging.
#[derive(Debug)]
pub enum MergeError {
    /// An input file or directory does not exist.
    InputNotFound(PathBuf),
    /// No PDF was collected before `merge` was called.
    NoInputs,
    /// Parsing or writing a document failed.
    Pdf {
        path: PathBuf,
        source: lopdf::Error,
    },
    /// Filesystem access failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The collected inputs lack a page tree or catalog.
    Malformed(String),
}

impl std::fmt::Display for MergeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputNotFound(path) => write!(f, "input not found: {}", path.display()),
            Self::NoInputs => write!(f, "no PDF files to merge"),
            Self::Pdf { path, source } => {
                write!(f, "cannot process {}: {}", path.display(), source)
            }
            Self::Io { path, source } => {
                write!(f, "cannot access {}: {}", path.display(), source)
            }
            Self::Malformed(reason) => write!(f, "malformed input set: {}", reason),
        }
    }
}

impl std::error::Error for MergeError {}

/// Accumulates source documents and writes the concatenated result.
pub struct PdfMerger {
    output_path: PathBuf,
    sources: Vec<(String, Document)>,
}

impl PdfMerger {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            sources: Vec::new(),
        }
    }

    /// Parses one PDF and queues it for merging. Invalid files fail here,
    /// before anything is written.
    pub fn add_file(&mut self, path: &Path) -> Result<(), MergeError> {
        if !path.exists() {
            return Err(MergeError::InputNotFound(path.to_path_buf()));
        }
        let document = Document::load(path).map_err(|e| MergeError::Pdf {
            path: path.to_path_buf(),
            source: e,
        })?;
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());
        self.sources.push((title, document));
        Ok(())
    }

    /// Queues every `.pdf` under `directory`, in sorted-by-name order.
    /// Files that fail to parse are skipped; they are returned with their
    /// causes so the caller can report them.
    pub fn add_directory(
        &mut self,
        directory: &Path,
        recursive: bool,
    ) -> Result<Vec<(PathBuf, MergeError)>, MergeError> {
        let files = collect_pdfs(directory, recursive)?;
        let mut skipped = Vec::new();
        for file in files {
            if let Err(error) = self.add_file(&file) {
                skipped.push((file, error));
            }
        }
        Ok(skipped)
    }

    /// Number of documents queued so far.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Merges the queued documents and writes the output, creating its parent
    /// directory as needed. Fails with [`MergeError::NoInputs`] when nothing
    /// was collected.
    pub fn merge(mut self) -> Result<PathBuf, MergeError> {
        if self.sources.is_empty() {
            return Err(MergeError::NoInputs);
        }

        if let Some(parent) = self.output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| MergeError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut merged = Document::with_version("1.5");
        let mut max_id = 1;
        let mut pages: BTreeMap<ObjectId, Object> = BTreeMap::new();
        let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

        // Renumber each source into a disjoint id range, then pool pages and
        // the remaining objects.
        for (title, mut document) in self.sources.drain(..) {
            document.renumber_objects_with(max_id);
            max_id = document.max_id + 1;

            let mut first = true;
            for (_, object_id) in document.get_pages() {
                if first {
                    let bookmark = Bookmark::new(title.clone(), [0.0, 0.0, 1.0], 0, object_id);
                    merged.add_bookmark(bookmark, None);
                    first = false;
                }
                if let Ok(object) = document.get_object(object_id) {
                    pages.insert(object_id, object.to_owned());
                }
            }
            objects.extend(document.objects);
        }

        // Fold every Pages node into one root and keep a single Catalog;
        // Page, Outline and Outlines objects are rebuilt below.
        let mut catalog_object: Option<(ObjectId, Object)> = None;
        let mut pages_object: Option<(ObjectId, Object)> = None;

        for (object_id, object) in objects.iter() {
            match object.type_name().unwrap_or("") {
                "Catalog" => {
                    let id = catalog_object
                        .as_ref()
                        .map(|(id, _)| *id)
                        .unwrap_or(*object_id);
                    catalog_object = Some((id, object.clone()));
                }
                "Pages" => {
                    if let Ok(dictionary) = object.as_dict() {
                        let mut dictionary = dictionary.clone();
                        if let Some((_, ref existing)) = pages_object
                            && let Ok(existing) = existing.as_dict()
                        {
                            dictionary.extend(existing);
                        }
                        let id = pages_object
                            .as_ref()
                            .map(|(id, _)| *id)
                            .unwrap_or(*object_id);
                        pages_object = Some((id, Object::Dictionary(dictionary)));
                    }
                }
                "Page" | "Outlines" | "Outline" => {}
                _ => {
                    merged.objects.insert(*object_id, object.clone());
                }
            }
        }

        let Some((pages_id, pages_root)) = pages_object else {
            return Err(MergeError::Malformed("no page tree found".to_string()));
        };
        let Some((catalog_id, catalog_root)) = catalog_object else {
            return Err(MergeError::Malformed("no document catalog found".to_string()));
        };

        // Reparent every page onto the single root.
        for (object_id, object) in pages.iter() {
            if let Ok(dictionary) = object.as_dict() {
                let mut dictionary = dictionary.clone();
                dictionary.set("Parent", pages_id);
                merged
                    .objects
                    .insert(*object_id, Object::Dictionary(dictionary));
            }
        }

        if let Ok(dictionary) = pages_root.as_dict() {
            let mut dictionary = dictionary.clone();
            dictionary.set("Count", pages.len() as u32);
            dictionary.set(
                "Kids",
                pages
                    .keys()
                    .map(|id| Object::Reference(*id))
                    .collect::<Vec<_>>(),
            );
            merged
                .objects
                .insert(pages_id, Object::Dictionary(dictionary));
        }

        if let Ok(dictionary) = catalog_root.as_dict() {
            let mut dictionary = dictionary.clone();
            dictionary.set("Pages", pages_id);
            dictionary.remove(b"Outlines");
            merged
                .objects
                .insert(catalog_id, Object::Dictionary(dictionary));
        }

        merged.trailer.set("Root", catalog_id);
        merged.max_id = merged.objects.len() as u32;
        merged.renumber_objects();
        merged.adjust_zero_pages();

        if let Some(outline_id) = merged.build_outline()
            && let Ok(Object::Dictionary(dictionary)) = merged.get_object_mut(catalog_id)
        {
            dictionary.set("Outlines", Object::Reference(outline_id));
        }

        merged.compress();
        merged.save(&self.output_path).map_err(|e| MergeError::Io {
            path: self.output_path.clone(),
            source: e,
        })?;

        Ok(self.output_path)
    }
}

/// Lists `.pdf` files under `directory`, sorted by path.
pub fn collect_pdfs(directory: &Path, recursive: bool) -> Result<Vec<PathBuf>, MergeError> {
    if !directory.exists() {
        return Err(MergeError::InputNotFound(directory.to_path_buf()));
    }
    let mut found = Vec::new();
    collect_into(directory, recursive, &mut found)?;
    found.sort();
    Ok(found)
}

fn collect_into(dir: &Path, recursive: bool, found: &mut Vec<PathBuf>) -> Result<(), MergeError> {
    let entries = fs::read_dir(dir).map_err(|e| MergeError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if recursive {
                collect_into(&path, recursive, found)?;
            }
        } else if path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .is_some_and(|ext| ext == "pdf")
        {
            found.push(path);
        }
    }
    Ok(())
}
