use crate::structs::{FailureReason, FailureRecord};
use chrono::{DateTime, Utc};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, FilterEntry, WalkDir};

/// File extensions treated as photos when nothing else is configured.
pub const DEFAULT_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "tif", "tiff", "png", "webp"];

/// A file the walker found, with the file-system attributes every record carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEvent {
    File(CandidateFile),
    /// A candidate file whose attributes could not be read.
    FileFailure(FailureRecord),
    /// A directory that could not be entered, or a symbolic link cycle.
    DirectoryFailure(FailureRecord),
}

/// Lazily enumerates candidate photos under a root directory.
///
/// Every call to [`PhotoWalker::iter`] starts a fresh traversal, and nothing is
/// read until the iterator is pulled, so a caller can stop after the first few
/// files without paying for the rest of the tree. Traversal order follows the file
/// system and is not stable.
#[derive(Debug, Clone)]
pub struct PhotoWalker {
    root: PathBuf,
    recursive: bool,
    extensions: Vec<String>,
    include_hidden: bool,
}

/// Checks if a directory entry is hidden (starts with '.').
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

fn keep_all(_: &DirEntry) -> bool {
    true
}

/// The root is always kept, even when its own name starts with a dot.
fn keep_visible(entry: &DirEntry) -> bool {
    entry.depth() == 0 || !is_hidden(entry)
}

impl PhotoWalker {
    pub fn new(root: impl Into<PathBuf>, recursive: bool) -> Self {
        Self {
            root: root.into(),
            recursive,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            include_hidden: false,
        }
    }

    /// Replaces the extension allow-list. Leading dots are ignored and matching is
    /// case-insensitive.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    pub fn include_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Whether the path carries one of the allowed extensions.
    pub fn is_candidate(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    pub fn iter(&self) -> WalkIter<'_> {
        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let predicate: fn(&DirEntry) -> bool = if self.include_hidden {
            keep_all
        } else {
            keep_visible
        };
        let inner = WalkDir::new(&self.root)
            .follow_links(true)
            .max_depth(max_depth)
            .into_iter()
            .filter_entry(predicate);
        WalkIter {
            walker: self,
            inner,
        }
    }

    fn candidate(&self, entry: &DirEntry) -> WalkEvent {
        let path = entry.path().to_path_buf();
        let stat = entry
            .metadata()
            .map_err(|e| e.to_string())
            .and_then(|md| {
                let modified = md.modified().map_err(|e| e.to_string())?;
                Ok((md.len(), DateTime::<Utc>::from(modified)))
            });
        match stat {
            Ok((size_bytes, modified_at)) => WalkEvent::File(CandidateFile {
                path,
                size_bytes,
                modified_at,
            }),
            Err(detail) => WalkEvent::FileFailure(FailureRecord::new(
                path,
                FailureReason::FileUnreadable,
                detail,
            )),
        }
    }

    /// Turns a traversal error into a failure event, or `None` for errors on
    /// entries that are neither directories nor candidates.
    fn classify_error(&self, err: &walkdir::Error) -> Option<WalkEvent> {
        let path = err.path().unwrap_or(&self.root).to_path_buf();
        if let Some(ancestor) = err.loop_ancestor() {
            return Some(WalkEvent::DirectoryFailure(FailureRecord::new(
                path,
                FailureReason::DirectoryUnreadable,
                format!("symbolic link cycle back to {}", ancestor.display()),
            )));
        }
        if path.is_dir() {
            return Some(WalkEvent::DirectoryFailure(FailureRecord::new(
                path,
                FailureReason::DirectoryUnreadable,
                err,
            )));
        }
        if self.is_candidate(&path) {
            return Some(WalkEvent::FileFailure(FailureRecord::new(
                path,
                FailureReason::FileUnreadable,
                err,
            )));
        }
        debug!(path = %path.display(), error = %err, "ignoring unreadable non-photo entry");
        None
    }
}

impl<'a> IntoIterator for &'a PhotoWalker {
    type Item = WalkEvent;
    type IntoIter = WalkIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct WalkIter<'a> {
    walker: &'a PhotoWalker,
    inner: FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>,
}

impl Iterator for WalkIter<'_> {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<WalkEvent> {
        loop {
            match self.inner.next()? {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.walker.is_candidate(entry.path()) {
                        return Some(self.walker.candidate(&entry));
                    }
                }
                Err(err) => {
                    if let Some(event) = self.walker.classify_error(&err) {
                        return Some(event);
                    }
                }
            }
        }
    }
}
