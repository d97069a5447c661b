//! Dependency-injection facts: what a component asks for in its constructor
//! and what a service-configuration function registers.

use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;

use super::{block_range, split_top_level};
use crate::core::source::SourceFile;

/// Parameter lists longer than this are not followed.
const MAX_SIGNATURE_LINES: usize = 30;

static REGISTRATION_GENERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(?:Try)?Add(?:Singleton|Transient|Scoped)\s*<\s*([A-Za-z_][\w.]*)").unwrap()
});

static REGISTRATION_TYPEOF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(?:Try)?Add(?:Singleton|Transient|Scoped)\s*\(\s*typeof\s*\(\s*([A-Za-z_][\w.]*)")
        .unwrap()
});

const PARAMETER_MODIFIERS: &[&str] = &["this", "params", "in", "ref", "out", "scoped"];

/// Reduce a type to the name registrations use: no namespace, no generic
/// arguments, no nullable marker. `Foo.Bar.IRepo<T>?` becomes `IRepo`.
pub fn normalize_type(raw: &str) -> String {
    let without_generics = raw.split('<').next().unwrap_or(raw);
    let base = without_generics.trim().trim_end_matches('?');
    base.rsplit('.').next().unwrap_or(base).to_string()
}

fn constructor_regex(class: &str) -> Option<Regex> {
    Regex::new(&format!(
        r"\b(?:public|internal|protected|private)\s+{}\s*\(",
        regex::escape(class)
    ))
    .ok()
}

/// Text between the `(` that opens a constructor signature on line `start`
/// and its matching `)`.
fn parameter_text(lines: &[String], start: usize, open_at: usize) -> String {
    let mut text = String::new();
    let mut depth = 0usize;

    for (offset, line) in lines.iter().skip(start).take(MAX_SIGNATURE_LINES).enumerate() {
        let from = if offset == 0 { open_at } else { 0 };
        for c in line[from..].chars() {
            match c {
                '(' => {
                    depth += 1;
                    if depth == 1 {
                        continue;
                    }
                }
                ')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return text;
                    }
                }
                _ => {}
            }
            text.push(c);
        }
        text.push(' ');
    }
    text
}

/// Parameter type of one `Type name = default` parameter declaration.
fn parameter_type(param: &str) -> Option<String> {
    let mut decl = param.trim();
    // Leading attributes: `[FromKeyedServices("x")] IFoo foo`
    while decl.starts_with('[') {
        let close = decl.find(']')?;
        decl = decl[close + 1..].trim_start();
    }
    let decl = decl.split('=').next().unwrap_or(decl).trim();

    let tokens: Vec<&str> = decl
        .split_whitespace()
        .filter(|t| !PARAMETER_MODIFIERS.contains(t))
        .collect();
    if tokens.len() < 2 {
        return None;
    }
    Some(normalize_type(&tokens[..tokens.len() - 1].join(" ")))
}

/// Dependency types declared by the widest constructor of `class` in `file`.
///
/// Design-time parameterless constructors are common next to the real one,
/// so the constructor with the most parameters wins.
pub fn constructor_dependencies(file: &SourceFile, class: &str) -> BTreeSet<String> {
    let Some(ctor) = constructor_regex(class) else {
        return BTreeSet::new();
    };

    let mut widest = BTreeSet::new();
    let mut widest_len = 0;
    for (index, line) in file.code_lines() {
        let Some(m) = ctor.find(line) else {
            continue;
        };
        let params = split_top_level(&parameter_text(&file.lines, index, m.end() - 1));
        if params.len() > widest_len {
            widest_len = params.len();
            widest = params.iter().filter_map(|p| parameter_type(p)).collect();
        }
    }
    widest
}

fn function_definition_regex(function: &str) -> Option<Regex> {
    // A definition has a return type or modifier before the name; a call does not.
    Regex::new(&format!(
        r"\b(?:void|static|public|private|internal|protected|IServiceCollection|IServiceProvider|ServiceProvider)\b[^=;(]*\b{}\s*\(",
        regex::escape(function)
    ))
    .ok()
}

/// Whether `file` defines the service-configuration `function`.
pub fn defines_function(file: &SourceFile, function: &str) -> bool {
    let Some(definition) = function_definition_regex(function) else {
        return false;
    };
    file.code_lines().any(|(_, line)| definition.is_match(line))
}

/// Service types registered inside the body of `function` in `file`.
///
/// Only the first generic argument counts: `AddSingleton<IFoo, Foo>()`
/// registers `IFoo`.
pub fn registrations(file: &SourceFile, function: &str) -> BTreeSet<String> {
    let Some(definition) = function_definition_regex(function) else {
        return BTreeSet::new();
    };

    let mut registered = BTreeSet::new();
    for (index, line) in file.code_lines() {
        if !definition.is_match(line) {
            continue;
        }
        for body_index in block_range(&file.lines, index) {
            if file.is_comment_line(body_index) {
                continue;
            }
            let body_line = &file.lines[body_index];
            for caps in REGISTRATION_GENERIC
                .captures_iter(body_line)
                .chain(REGISTRATION_TYPEOF.captures_iter(body_line))
            {
                registered.insert(normalize_type(&caps[1]));
            }
        }
    }
    registered
}
