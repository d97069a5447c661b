use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::findings::Category;

pub const CONFIG_FILE_NAME: &str = "convcheck.json";

/// Directories that are never walked.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &["bin", "obj", ".git", ".vs", ".idea", "node_modules"];

/// Declared metadata for one application in the workspace.
///
/// Supplied by the caller through the config file; rules compare code
/// against these declarations rather than discovering them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDescriptor {
    pub name: String,
    /// Application root relative to the workspace root. Defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub expected_identifier: String,
    #[serde(default)]
    pub is_ad_supported: bool,
    /// Namespace prefix every source file must use. Defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_namespace: Option<String>,
    #[serde(default = "default_root_component")]
    pub root_component: String,
    #[serde(default = "default_service_configuration")]
    pub service_configuration: String,
}

fn default_root_component() -> String {
    "MainViewModel".to_string()
}

fn default_service_configuration() -> String {
    "ConfigureServices".to_string()
}

impl AppDescriptor {
    pub fn new(name: impl Into<String>, expected_identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            expected_identifier: expected_identifier.into(),
            is_ad_supported: false,
            root_namespace: None,
            root_component: default_root_component(),
            service_configuration: default_service_configuration(),
        }
    }

    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.name)
    }

    pub fn root_namespace(&self) -> &str {
        self.root_namespace.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub apps: Vec<AppDescriptor>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub disabled_rules: Vec<Category>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            apps: vec![AppDescriptor::new("MyApp", "com.example.myapp")],
            ignores: vec!["**/Generated/**".to_string()],
            disabled_rules: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores`, and for app
    /// declarations with empty or duplicate names or empty identifiers.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        let mut seen = HashSet::new();
        for app in &self.apps {
            if app.name.trim().is_empty() {
                bail!("App declared with an empty 'name'");
            }
            if !seen.insert(app.name.as_str()) {
                bail!("App '{}' is declared more than once", app.name);
            }
            if app.expected_identifier.trim().is_empty() {
                bail!("App '{}' has an empty 'expectedIdentifier'", app.name);
            }
        }

        Ok(())
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        !self.disabled_rules.contains(&category)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Workspace root: the directory holding the config file.
    pub workspace_root: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    let Some(path) = find_config_file(start_dir) else {
        bail!(
            "No {} found in {} or its parents (run `convcheck init` to create one)",
            CONFIG_FILE_NAME,
            start_dir.display()
        );
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    config.validate()?;

    let workspace_root = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(ConfigLoadResult {
        config,
        workspace_root,
    })
}
