//! Source files and their role classification.

use std::path::{Path, PathBuf};

use super::suppression::comment_mask;

/// Role of a file inside one application tree.
///
/// Decided purely from the relative path, see [`classify`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileRole {
    /// Cross-platform C# source under the shared project.
    Shared,
    /// C# source under a platform head (`android`, `ios`, `desktop`, `browser`).
    Platform(String),
    /// Declarative view markup (`.axaml` / `.xaml`).
    View,
    /// Project and manifest files (`.csproj`, `.props`, `AndroidManifest.xml`, ...).
    Project,
    /// Localization resource tables (`.resx`).
    Resource,
}

const PLATFORM_HEADS: &[&str] = &["android", "ios", "desktop", "browser"];

const PROJECT_FILE_NAMES: &[&str] = &["AndroidManifest.xml", "Info.plist", "Entitlements.plist"];

/// An immutable file loaded from the scanned tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub absolute_path: PathBuf,
    /// Path relative to the application root, always `/`-separated.
    pub relative_path: String,
    pub raw_text: String,
    pub lines: Vec<String>,
    /// Per line: whether it lies entirely in a comment.
    comments: Vec<bool>,
}

impl SourceFile {
    /// Build a file from its text. A leading byte order mark is dropped.
    pub fn new(absolute_path: PathBuf, relative_path: impl Into<String>, raw_text: String) -> Self {
        let raw_text = match raw_text.strip_prefix('\u{feff}') {
            Some(text) => text.to_string(),
            None => raw_text,
        };
        let relative_path = relative_path.into();
        let lines: Vec<String> = raw_text.lines().map(str::to_string).collect();
        let comments = comment_mask(&relative_path, &lines);
        Self {
            absolute_path,
            relative_path,
            raw_text,
            lines,
            comments,
        }
    }

    /// Build a file from in-memory text. The absolute path mirrors the relative one.
    pub fn from_text(relative_path: &str, raw_text: &str) -> Self {
        Self::new(
            PathBuf::from(relative_path),
            relative_path,
            raw_text.to_string(),
        )
    }

    /// Final path component, e.g. `MainView.axaml`.
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }

    /// File name up to the first dot, e.g. `MainView` for `MainView.axaml.cs`.
    pub fn stem(&self) -> &str {
        let name = self.file_name();
        name.split('.').next().unwrap_or(name)
    }

    pub fn extension(&self) -> Option<&str> {
        Path::new(self.file_name()).extension().and_then(|e| e.to_str())
    }

    /// Whether line `index` is a comment line, including the inner lines of
    /// a multi-line block comment.
    pub fn is_comment_line(&self, index: usize) -> bool {
        self.comments.get(index).copied().unwrap_or(false)
    }

    /// `(index, line)` over the lines that are not comments.
    pub fn code_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.is_comment_line(*index))
            .map(|(index, line)| (index, line.as_str()))
    }
}

/// Name of the platform head a top-level directory represents, if any.
///
/// Accepts both `Android` and `LoanCalc.Android`.
pub fn platform_of_dir(dir: &str) -> Option<String> {
    let last = dir.rsplit('.').next().unwrap_or(dir).to_ascii_lowercase();
    PLATFORM_HEADS
        .iter()
        .find(|head| **head == last)
        .map(|head| head.to_string())
}

/// Whether a top-level directory is the shared project (`Shared` or `*.Shared`).
pub fn is_shared_dir(dir: &str) -> bool {
    dir.rsplit('.')
        .next()
        .is_some_and(|last| last.eq_ignore_ascii_case("shared"))
}

/// Classify a `/`-separated path relative to the application root.
///
/// Returns `None` for files the engine does not load.
pub fn classify(relative_path: &str) -> Option<FileRole> {
    let file_name = relative_path.rsplit('/').next()?;
    if PROJECT_FILE_NAMES.contains(&file_name) {
        return Some(FileRole::Project);
    }

    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())?
        .to_ascii_lowercase();

    match extension.as_str() {
        "resx" => Some(FileRole::Resource),
        "axaml" | "xaml" => Some(FileRole::View),
        "csproj" | "props" | "targets" => Some(FileRole::Project),
        "cs" => {
            let (top, _) = relative_path.split_once('/')?;
            if is_shared_dir(top) {
                Some(FileRole::Shared)
            } else {
                platform_of_dir(top).map(FileRole::Platform)
            }
        }
        _ => None,
    }
}
