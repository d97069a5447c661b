//! Resource table facts.
//!
//! `Strings.resx` is the baseline of table `Strings`; `Strings.de.resx` and
//! `Strings.pt-BR.resx` are its `de` and `pt-BR` variants.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;

use crate::core::source::SourceFile;

static DATA_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<data\s+name\s*=\s*"([^"]+)""#).unwrap());

static LANGUAGE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}(?:-[A-Za-z0-9]{2,8})*$").unwrap());

/// Identity of one resource file within its table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceName {
    /// Directory plus table name, e.g. `App.Shared/Resources/Strings`.
    pub table_path: String,
    /// Table name, e.g. `Strings`.
    pub table: String,
    /// `None` for the baseline file.
    pub language: Option<String>,
}

/// Split a `.resx` path into table identity and language.
pub fn resource_name(relative_path: &str) -> Option<ResourceName> {
    let without_ext = relative_path.strip_suffix(".resx")?;
    let (dir, file) = match without_ext.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, without_ext),
    };

    let (table, language) = match file.rsplit_once('.') {
        Some((table, lang)) if LANGUAGE_TAG.is_match(lang) => (table, Some(lang.to_string())),
        _ => (file, None),
    };

    let table_path = match dir {
        Some(dir) => format!("{}/{}", dir, table),
        None => table.to_string(),
    };

    Some(ResourceName {
        table_path,
        table: table.to_string(),
        language,
    })
}

/// Keys declared by `<data name="...">` entries, in document order.
///
/// Designer metadata entries (`$this.*`, `>>*`) are not translatable keys.
pub fn resource_keys(file: &SourceFile) -> Vec<String> {
    file.code_lines()
        .flat_map(|(_, line)| DATA_NAME.captures_iter(line))
        .map(|caps| caps[1].to_string())
        .filter(|key| !key.starts_with('$') && !key.starts_with(">>"))
        .collect()
}

/// One resource table: its baseline and language variants.
#[derive(Debug, Default)]
pub struct ResourceTable<'a> {
    pub table: String,
    pub baseline: Option<&'a SourceFile>,
    /// Language code to file, sorted by language.
    pub languages: BTreeMap<String, &'a SourceFile>,
}

/// Group resource files into tables keyed by table path.
pub fn group_tables<'a>(
    files: impl IntoIterator<Item = &'a SourceFile>,
) -> BTreeMap<String, ResourceTable<'a>> {
    let mut tables: BTreeMap<String, ResourceTable<'a>> = BTreeMap::new();
    for file in files {
        let Some(name) = resource_name(&file.relative_path) else {
            continue;
        };
        let entry = tables.entry(name.table_path).or_default();
        entry.table = name.table;
        match name.language {
            Some(language) => {
                entry.languages.insert(language, file);
            }
            None => entry.baseline = Some(file),
        }
    }
    tables
}
