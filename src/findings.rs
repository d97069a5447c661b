//! Finding types produced by rule modules.
//!
//! A finding is a value object: severity + category + message, plus an
//! optional source location for findings that point at a specific line.
//! Every rule module emits its findings through a [`Findings`] sink that is
//! stamped with the module's [`Category`], so a finding's category always
//! equals the name of the module that produced it.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

// ============================================================
// Severity
// ============================================================

/// Severity of a finding. Ordered `Pass < Info < Warn < Fail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Pass,
    Info,
    Warn,
    Fail,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Pass => write!(f, "pass"),
            Severity::Info => write!(f, "info"),
            Severity::Warn => write!(f, "warn"),
            Severity::Fail => write!(f, "fail"),
        }
    }
}

// ============================================================
// Category
// ============================================================

/// Identifier of a rule module.
///
/// Declaration order here is the registration order of the modules; the
/// kebab-case rendering is the category string attached to findings and the
/// name accepted by suppression markers, `disabledRules` and the CLI.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    // Global
    BuildConfig,
    PackageVersions,
    // Per application
    ProjectStructure,
    ProjectFile,
    AndroidManifest,
    PlatformIsolation,
    DebugOutput,
    AsyncVoid,
    BlockingCalls,
    ExceptionHandling,
    Persistence,
    HttpClient,
    DiRegistration,
    ServiceLocator,
    ViewPairing,
    TabConsistency,
    CompiledBindings,
    MvvmToolkit,
    LocalizationParity,
    LocalizationKeys,
    HardcodedText,
    Ads,
    Namespaces,
    TodoMarkers,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::BuildConfig,
        Category::PackageVersions,
        Category::ProjectStructure,
        Category::ProjectFile,
        Category::AndroidManifest,
        Category::PlatformIsolation,
        Category::DebugOutput,
        Category::AsyncVoid,
        Category::BlockingCalls,
        Category::ExceptionHandling,
        Category::Persistence,
        Category::HttpClient,
        Category::DiRegistration,
        Category::ServiceLocator,
        Category::ViewPairing,
        Category::TabConsistency,
        Category::CompiledBindings,
        Category::MvvmToolkit,
        Category::LocalizationParity,
        Category::LocalizationKeys,
        Category::HardcodedText,
        Category::Ads,
        Category::Namespaces,
        Category::TodoMarkers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::BuildConfig => "build-config",
            Category::PackageVersions => "package-versions",
            Category::ProjectStructure => "project-structure",
            Category::ProjectFile => "project-file",
            Category::AndroidManifest => "android-manifest",
            Category::PlatformIsolation => "platform-isolation",
            Category::DebugOutput => "debug-output",
            Category::AsyncVoid => "async-void",
            Category::BlockingCalls => "blocking-calls",
            Category::ExceptionHandling => "exception-handling",
            Category::Persistence => "persistence",
            Category::HttpClient => "http-client",
            Category::DiRegistration => "di-registration",
            Category::ServiceLocator => "service-locator",
            Category::ViewPairing => "view-pairing",
            Category::TabConsistency => "tab-consistency",
            Category::CompiledBindings => "compiled-bindings",
            Category::MvvmToolkit => "mvvm-toolkit",
            Category::LocalizationParity => "localization-parity",
            Category::LocalizationKeys => "localization-keys",
            Category::HardcodedText => "hardcoded-text",
            Category::Ads => "ads",
            Category::Namespaces => "namespaces",
            Category::TodoMarkers => "todo-markers",
        }
    }

    /// Parse a category name (case insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }

    /// Whether this category belongs to a workspace-wide module.
    pub fn is_global(&self) -> bool {
        matches!(self, Category::BuildConfig | Category::PackageVersions)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================
// Finding
// ============================================================

/// File and 1-based line a finding points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    pub line: usize,
}

impl Location {
    pub fn new(path: impl Into<String>, line: usize) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}:{}", self.path, self.line)
        }
    }
}

/// One reported observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Ordered finding sink owned by one rule module for one run.
#[derive(Debug)]
pub struct Findings {
    category: Category,
    items: Vec<Finding>,
}

impl Findings {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            items: Vec::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn push(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        location: Option<Location>,
    ) {
        self.items.push(Finding {
            severity,
            category: self.category,
            message: message.into(),
            location,
        });
    }

    pub fn pass(&mut self, message: impl Into<String>) {
        self.push(Severity::Pass, message, None);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message, None);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Severity::Warn, message, None);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.push(Severity::Fail, message, None);
    }

    /// Push a finding pointing at `path:line`.
    pub fn at(&mut self, severity: Severity, location: Location, message: impl Into<String>) {
        self.push(severity, message, Some(location));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of findings at `severity` or above.
    pub fn count_at_least(&self, severity: Severity) -> usize {
        self.items.iter().filter(|f| f.severity >= severity).count()
    }

    pub fn into_vec(self) -> Vec<Finding> {
        self.items
    }
}
