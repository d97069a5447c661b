//! View and logic-component facts.
//!
//! Views are named `<Name>View` and their logic components `<Name>ViewModel`.

use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;

use super::code::declared_classes;
use crate::{
    core::source::SourceFile,
    utils::fold_name,
};

pub const VIEW_SUFFIX: &str = "View";
pub const LOGIC_SUFFIX: &str = "ViewModel";

static ACTIVE_TAB_FLAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bbool\s+_?([iI]s\w*Active)\b").unwrap());

static NAVIGATION_TRIGGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"Command\s*=\s*"\{(?:Binding|CompiledBinding)\s+(?:Path=)?Navigate\w*Command"#)
        .unwrap()
});

/// Component name of a view file: `MainView` for `Views/MainView.axaml`.
///
/// Code-behind files (`MainView.axaml.cs`) are not views.
pub fn view_component_name(file: &SourceFile) -> Option<&str> {
    matches!(file.extension(), Some("axaml") | Some("xaml")).then(|| file.stem())
}

/// Expected logic component of a view: `FooView` pairs with `FooViewModel`.
///
/// `None` for views outside the naming convention (`App`, `MainWindow`).
pub fn paired_logic_name(view: &str) -> Option<String> {
    (view.len() > VIEW_SUFFIX.len() && view.ends_with(VIEW_SUFFIX))
        .then(|| format!("{}{}", view, &LOGIC_SUFFIX[VIEW_SUFFIX.len()..]))
}

/// Expected view of a logic component: `FooViewModel` pairs with `FooView`.
pub fn paired_view_name(logic: &str) -> Option<String> {
    let base = logic.strip_suffix(LOGIC_SUFFIX)?;
    (!base.is_empty()).then(|| format!("{}{}", base, VIEW_SUFFIX))
}

/// Logic components declared in `file`: classes named `*ViewModel`.
///
/// The shared base class `ViewModelBase` does not end in the suffix and is
/// never a candidate; abstract classes are skipped.
pub fn declared_logic_components(file: &SourceFile) -> Vec<String> {
    let abstract_names: BTreeSet<String> = file
        .code_lines()
        .filter(|(_, line)| line.contains("abstract "))
        .flat_map(|(_, line)| {
            declared_classes(&SourceFile::from_text(&file.relative_path, line))
        })
        .collect();

    declared_classes(file)
        .into_iter()
        .filter(|name| paired_view_name(name).is_some() && !abstract_names.contains(name))
        .collect()
}

/// Active-tab flags declared in `file`, folded so that the backing field
/// `_isHomeActive` and the property `IsHomeActive` count once.
pub fn active_tab_flags(file: &SourceFile) -> BTreeSet<String> {
    file.code_lines()
        .flat_map(|(_, line)| ACTIVE_TAB_FLAG.captures_iter(line))
        .map(|caps| fold_name(&caps[1]))
        .collect()
}

/// Line indices of navigation-command bindings in a view, one entry per binding.
pub fn navigation_triggers(file: &SourceFile) -> Vec<usize> {
    file.code_lines()
        .flat_map(|(index, line)| NAVIGATION_TRIGGER.find_iter(line).map(move |_| index))
        .collect()
}
