use crate::error::Error;
use crate::result::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directory-component names skipped by every run: version control,
/// dependency trees, build output, and interpreter caches.
pub const STANDARD_EXCLUDE_DIRS: &[&str] =
    &[".git", "node_modules", "dist", "target", "__pycache__"];

/// Exact file names skipped by every run (OS metadata droppings).
pub const STANDARD_EXCLUDE_FILES: &[&str] = &[".DS_Store"];

/// Literal-name exclusion rules applied during collection.
///
/// Matching is exact string equality per path segment; no globs, no
/// prefixes. Directory names disqualify a path when they appear as any
/// component of its root-relative path; file names only match the final
/// component.
#[derive(Debug, Clone)]
pub struct ExcludeRules {
    dirs: HashSet<String>,
    files: HashSet<String>,
}

impl ExcludeRules {
    /// Rules with the standard directory and file names pre-loaded
    pub fn standard() -> Self {
        Self {
            dirs: STANDARD_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            files: STANDARD_EXCLUDE_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Rules that exclude nothing
    #[allow(dead_code)]
    pub fn empty() -> Self {
        Self {
            dirs: HashSet::new(),
            files: HashSet::new(),
        }
    }

    /// Add a directory-component name to exclude
    pub fn exclude_dir<T: Into<String>>(&mut self, name: T) {
        self.dirs.insert(name.into());
    }

    /// Add an exact file name to exclude
    pub fn exclude_file<T: Into<String>>(&mut self, name: T) {
        self.files.insert(name.into());
    }

    pub fn is_dir_excluded(&self, name: &str) -> bool {
        self.dirs.contains(name)
    }

    pub fn is_file_excluded(&self, name: &str) -> bool {
        self.files.contains(name)
    }
}

/// Collect the regular files under `root` that pass the exclusion rules,
/// sorted lexicographically ascending by full path.
///
/// The walk never follows symlinks, so link cycles cannot recurse and a
/// symlink is never treated as a regular file. Pure with respect to the
/// filesystem: an unchanged tree yields identical output on every call.
pub fn collect_files(root: &Path, rules: &ExcludeRules) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::RootNotFound(root.display().to_string()));
    }

    let mut files = Vec::new();

    let walker = WalkDir::new(root).follow_links(false).into_iter();
    for entry in walker.filter_entry(|e| !has_excluded_name(e, rules)) {
        let entry = entry?;

        if !entry.file_type().is_file() {
            continue;
        }

        if entry
            .file_name()
            .to_str()
            .is_some_and(|name| rules.is_file_excluded(name))
        {
            continue;
        }

        files.push(entry.into_path());
    }

    // Ordering is over the full path string, not per path component.
    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(files)
}

// Pruning on the entry name covers both directories (the whole subtree is
// skipped) and plain files that carry an excluded directory name. Depth 0
// keeps the root itself out of the match.
fn has_excluded_name(entry: &DirEntry, rules: &ExcludeRules) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| rules.is_dir_excluded(name))
}
