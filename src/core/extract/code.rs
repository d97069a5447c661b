//! Declarations in C# source: classes, records and namespaces.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::source::SourceFile;

static CLASS_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:class|record)\s+([A-Za-z_]\w*)").unwrap());

static NAMESPACE_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*namespace\s+([A-Za-z_][\w.]*)").unwrap());

/// Names of classes and records declared in `file`, in order of appearance.
pub fn declared_classes(file: &SourceFile) -> Vec<String> {
    file.code_lines()
        .flat_map(|(_, line)| CLASS_DECL.captures_iter(line))
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Whether `file` declares a class named `name`.
pub fn declares_class(file: &SourceFile, name: &str) -> bool {
    declared_classes(file).iter().any(|c| c == name)
}

/// `(line index, namespace)` for every namespace declaration,
/// block-scoped or file-scoped.
pub fn declared_namespaces(file: &SourceFile) -> Vec<(usize, String)> {
    file.code_lines()
        .filter_map(|(i, line)| {
            NAMESPACE_DECL
                .captures(line)
                .map(|caps| (i, caps[1].to_string()))
        })
        .collect()
}
