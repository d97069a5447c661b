//! Line suppression shared by every line-oriented rule module.
//!
//! A line is skipped when it is a comment, when it carries an ignore marker,
//! or when the comment line directly above is a marker:
//! - `// convcheck-ignore` - ignore all categories
//! - `// convcheck-ignore debug-output` - ignore only `debug-output`
//! - `<!-- convcheck-ignore hardcoded-text compiled-bindings -->` - ignore both

use std::collections::HashSet;

use super::source::SourceFile;
use crate::findings::Category;

pub const IGNORE_MARKER: &str = "convcheck-ignore";

/// Categories named by an ignore marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    All,
    Only(HashSet<Category>),
}

impl Marker {
    /// Parse the marker carried by `line`, if any.
    ///
    /// Unknown names after the marker are ignored; a marker naming no
    /// known category covers all categories.
    pub fn parse(line: &str) -> Option<Self> {
        let (_, rest) = line.split_once(IGNORE_MARKER)?;
        let rest = rest
            .trim_start_matches([':', ' ', '\t'])
            .trim_end()
            .trim_end_matches("-->")
            .trim_end_matches("*/");

        let named: HashSet<Category> = rest
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter_map(Category::parse)
            .collect();

        if named.is_empty() {
            Some(Self::All)
        } else {
            Some(Self::Only(named))
        }
    }

    pub fn covers(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(named) => named.contains(&category),
        }
    }
}

/// Whether `line` is a comment line in C# or XML markup.
pub fn is_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    if trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with("<!--") {
        return true;
    }
    // Continuation lines of a block comment: `* text`, `*/`, `*`
    match trimmed.strip_prefix('*') {
        Some(rest) => rest.is_empty() || rest.starts_with(' ') || rest.starts_with('/'),
        None => false,
    }
}

/// Comment delimiters of a block comment in the file's language.
fn block_delimiters(relative_path: &str) -> (&'static str, &'static str) {
    if relative_path.ends_with(".cs") {
        ("/*", "*/")
    } else {
        ("<!--", "-->")
    }
}

/// Whether `text` opens a block comment that it does not close.
fn leaves_block_open(text: &str, open: &str, close: &str) -> bool {
    let Some(start) = text.rfind(open) else {
        return false;
    };
    // `// see /*` is a line comment, not an opener.
    if open == "/*" && text[..start].contains("//") {
        return false;
    }
    !text[start + open.len()..].contains(close)
}

/// Per line of a file: whether the line is a comment.
///
/// Tracks multi-line block comments (`/* ... */` in C#, `<!-- ... -->` in
/// markup and project files), so their inner lines count as comments even
/// when they do not start with a comment token.
pub fn comment_mask(relative_path: &str, lines: &[String]) -> Vec<bool> {
    let (open, close) = block_delimiters(relative_path);
    let mut in_block = false;
    lines
        .iter()
        .map(|line| {
            let (comment, rest) = if in_block {
                match line.find(close) {
                    Some(end) => (true, &line[end + close.len()..]),
                    None => return true,
                }
            } else {
                (is_comment(line), line.as_str())
            };
            in_block = leaves_block_open(rest, open, close);
            comment
        })
        .collect()
}

fn marker_covers(line: &str, category: Category) -> bool {
    Marker::parse(line).is_some_and(|marker| marker.covers(category))
}

/// Whether line `index` of `file` must be skipped by `category`.
///
/// True for comment lines, for lines carrying a marker that covers
/// `category`, and for lines directly below a standalone marker comment.
/// A trailing marker on a code line covers only that line.
pub fn is_suppressed(file: &SourceFile, index: usize, category: Category) -> bool {
    let Some(line) = file.lines.get(index) else {
        return false;
    };
    if file.is_comment_line(index) || marker_covers(line, category) {
        return true;
    }
    index > 0 && file.is_comment_line(index - 1) && marker_covers(&file.lines[index - 1], category)
}

/// Iterate `(index, line)` over the lines of `file` that `category` must check.
pub fn active_lines(file: &SourceFile, category: Category) -> impl Iterator<Item = (usize, &str)> {
    file.lines
        .iter()
        .enumerate()
        .filter(move |(i, _)| !is_suppressed(file, *i, category))
        .map(|(i, line)| (i, line.as_str()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn file(text: &str) -> SourceFile {
        SourceFile::from_text("Shared/A.cs", text)
    }

    #[test]
    fn test_is_comment() {
        assert!(is_comment("    // Console.WriteLine(x);"));
        assert!(is_comment("/* block"));
        assert!(is_comment("   * continued"));
        assert!(is_comment("   */"));
        assert!(is_comment("   *"));
        assert!(is_comment("<!-- <TextBlock Text=\"Hi\"/> -->"));
        assert!(!is_comment("var x = a * b;"));
        assert!(!is_comment("*ptr = 1;"));
        assert!(!is_comment("Console.WriteLine(x); // trailing"));
    }

    #[test]
    fn test_marker_parse() {
        assert_eq!(Marker::parse("x(); // convcheck-ignore"), Some(Marker::All));
        assert_eq!(
            Marker::parse("// convcheck-ignore debug-output"),
            Some(Marker::Only([Category::DebugOutput].into_iter().collect()))
        );
        assert_eq!(
            Marker::parse("<!-- convcheck-ignore: hardcoded-text, compiled-bindings -->"),
            Some(Marker::Only(
                [Category::HardcodedText, Category::CompiledBindings]
                    .into_iter()
                    .collect()
            ))
        );
        assert_eq!(Marker::parse("// convcheck-ignore because reasons"), Some(Marker::All));
        assert_eq!(Marker::parse("Console.WriteLine(x);"), None);
    }

    #[test]
    fn test_same_line_marker_covers_only_its_line() {
        let file = file("Console.WriteLine(a); // convcheck-ignore\nConsole.WriteLine(b);");
        assert!(is_suppressed(&file, 0, Category::DebugOutput));
        assert!(!is_suppressed(&file, 1, Category::DebugOutput));
    }

    #[test]
    fn test_preceding_line_marker() {
        let file = file(
            "// convcheck-ignore debug-output\nConsole.WriteLine(a);\nConsole.WriteLine(b);",
        );
        assert!(is_suppressed(&file, 1, Category::DebugOutput));
        assert!(!is_suppressed(&file, 1, Category::BlockingCalls));
        assert!(!is_suppressed(&file, 2, Category::DebugOutput));
    }

    #[test]
    fn test_out_of_range_index() {
        assert!(!is_suppressed(&file("a"), 5, Category::DebugOutput));
    }

    #[test]
    fn test_multiline_markup_comment() {
        let view = SourceFile::from_text(
            "Shared/Views/MainView.axaml",
            "<StackPanel>\n<!--\n<TextBlock Text=\"Old label\" />\n--> <Button />\n<TextBlock Text=\"New\" />\n</StackPanel>",
        );
        let active: Vec<_> = active_lines(&view, Category::HardcodedText)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(active, vec![0, 4, 5]);
    }

    #[test]
    fn test_comment_mask_block_comments_in_code() {
        let lines: Vec<String> = [
            "var a = 1; /* start",
            "Console.WriteLine(x);",
            "end */ var b = 2;",
            "// see /* not an opener",
            "var c = 3;",
        ]
        .iter()
        .map(|l| l.to_string())
        .collect();
        assert_eq!(
            comment_mask("Shared/A.cs", &lines),
            vec![false, true, true, true, false]
        );
    }

    #[test]
    fn test_comment_mask_ignores_globs_in_project_files() {
        let lines: Vec<String> = ["<Compile Include=\"Platforms/**/*.cs\" />", "<Foo>1</Foo>"]
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(comment_mask("A/A.csproj", &lines), vec![false, false]);
    }

    #[test]
    fn test_active_lines_skips_comments_and_markers() {
        let file = SourceFile::from_text(
            "Shared/A.cs",
            "// header\nvar a = 1;\n// convcheck-ignore\nvar b = 2;\nvar c = 3;",
        );
        let active: Vec<_> = active_lines(&file, Category::DebugOutput)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(active, vec![1, 4]);
    }
}
