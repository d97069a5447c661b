//! Corpus loading: walk an application tree, classify and read files.
//!
//! Loading never fails because of scanned content. A missing root yields an
//! empty corpus, and files that cannot be read are recorded in
//! [`Corpus::unreadable`] for the structural check to report.

use std::{
    fs,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::Pattern;
use rayon::prelude::*;
use walkdir::{DirEntry, WalkDir};

use super::source::{FileRole, SourceFile, classify, is_shared_dir, platform_of_dir};
use crate::config::DEFAULT_IGNORED_DIRS;

/// A file that was selected for loading but could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableFile {
    pub relative_path: String,
    pub error: String,
}

/// Directory facts about the application root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    pub app_root_exists: bool,
    /// Name of the shared top-level directory, if present.
    pub shared_root: Option<String>,
    /// Platform heads found at the top level, sorted.
    pub platforms: Vec<String>,
}

impl Layout {
    /// Derive the layout from top-level directory names.
    pub fn from_dirs<'a>(dirs: impl IntoIterator<Item = &'a str>) -> Self {
        let mut layout = Layout {
            app_root_exists: true,
            ..Default::default()
        };
        for dir in dirs {
            if is_shared_dir(dir) {
                if layout.shared_root.is_none() {
                    layout.shared_root = Some(dir.to_string());
                }
            } else if let Some(platform) = platform_of_dir(dir)
                && !layout.platforms.contains(&platform)
            {
                layout.platforms.push(platform);
            }
        }
        layout.platforms.sort();
        layout
    }

    pub fn has_platform(&self, platform: &str) -> bool {
        self.platforms.iter().any(|p| p == platform)
    }
}

/// Everything loaded from one application tree, sorted by relative path.
#[derive(Debug, Default)]
pub struct Corpus {
    pub layout: Layout,
    pub files: Vec<(FileRole, SourceFile)>,
    pub unreadable: Vec<UnreadableFile>,
    /// Paths the walker could not access.
    pub skipped_count: usize,
}

/// Convert `path` under `root` to a `/`-separated relative path.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| DEFAULT_IGNORED_DIRS.contains(&name))
}

pub(crate) fn compile_ignores(ignores: &[String], verbose: bool) -> Vec<Pattern> {
    ignores
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                if verbose {
                    eprintln!(
                        "{} Invalid ignore pattern '{}': {}",
                        "warning:".bold().yellow(),
                        p,
                        e
                    );
                }
                None
            }
        })
        .collect()
}

/// Walk `root` and return the classified candidate paths, sorted.
///
/// `select` decides which relative paths are kept and with which role.
pub(crate) fn walk<T, F>(
    root: &Path,
    ignores: &[Pattern],
    verbose: bool,
    select: F,
) -> (Vec<(T, String, PathBuf)>, usize)
where
    F: Fn(&str) -> Option<T>,
{
    let mut selected = Vec::new();
    let mut skipped_count = 0;

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(rel) = relative_path(root, entry.path()) else {
            continue;
        };
        if ignores.iter().any(|p| p.matches(&rel)) {
            continue;
        }
        if let Some(tag) = select(&rel) {
            selected.push((tag, rel, entry.into_path()));
        }
    }

    selected.sort_by(|a, b| a.1.cmp(&b.1));
    (selected, skipped_count)
}

/// Read the selected files in parallel, keeping their order.
pub(crate) fn read_all<T: Send>(
    selected: Vec<(T, String, PathBuf)>,
    verbose: bool,
) -> (Vec<(T, SourceFile)>, Vec<UnreadableFile>) {
    let results: Vec<_> = selected
        .into_par_iter()
        .map(|(tag, rel, path)| {
            let read = fs::read(&path)
                .map_err(|e| e.to_string())
                .and_then(|bytes| {
                    String::from_utf8(bytes).map_err(|_| "not valid UTF-8".to_string())
                });
            (tag, rel, path, read)
        })
        .collect();

    let mut files = Vec::new();
    let mut unreadable = Vec::new();
    for (tag, rel, path, read) in results {
        match read {
            Ok(text) => files.push((tag, SourceFile::new(path, rel, text))),
            Err(error) => {
                if verbose {
                    eprintln!(
                        "{} Cannot read {}: {}",
                        "warning:".bold().yellow(),
                        rel,
                        error
                    );
                }
                unreadable.push(UnreadableFile {
                    relative_path: rel,
                    error,
                });
            }
        }
    }
    (files, unreadable)
}

fn top_level_dirs(root: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };
    let mut dirs: Vec<String> = entries
        .flatten()
        .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect();
    dirs.sort();
    dirs
}

/// Load the corpus for one application rooted at `app_root`.
pub fn load(app_root: &Path, ignores: &[String], verbose: bool) -> Corpus {
    if !app_root.is_dir() {
        if verbose {
            eprintln!(
                "{} App root does not exist: {}",
                "note:".bold().cyan(),
                app_root.display()
            );
        }
        return Corpus::default();
    }

    let layout = Layout::from_dirs(top_level_dirs(app_root).iter().map(String::as_str));
    let ignores = compile_ignores(ignores, verbose);
    let (selected, skipped_count) = walk(app_root, &ignores, verbose, classify);
    let (files, unreadable) = read_all(selected, verbose);

    if skipped_count > 0 {
        eprintln!(
            "{} {} path(s) skipped due to access errors{}",
            "warning:".bold().yellow(),
            skipped_count,
            if verbose { "" } else { " (use -v for details)" }
        );
    }

    Corpus {
        layout,
        files,
        unreadable,
        skipped_count,
    }
}
