//! Check contexts: the per-app and workspace-wide inputs of rule modules.

use std::{collections::BTreeMap, path::Path};

use super::{
    corpus::{self, Corpus, Layout, UnreadableFile},
    source::{FileRole, SourceFile},
};
use crate::config::AppDescriptor;

/// Per-application input handed to every rule module.
///
/// Files are partitioned by role: every loaded file lives in exactly one
/// of the role subsets, and [`CheckContext::all_files`] is their union.
/// Rules pick the subset they apply to, so a rule meant for shared source
/// never sees platform-specific files.
#[derive(Debug)]
pub struct CheckContext {
    pub app: AppDescriptor,
    pub layout: Layout,
    pub shared_files: Vec<SourceFile>,
    /// Platform name (`android`, `desktop`, ...) to its files.
    pub platform_files: BTreeMap<String, Vec<SourceFile>>,
    pub view_files: Vec<SourceFile>,
    pub project_files: Vec<SourceFile>,
    pub resource_files: Vec<SourceFile>,
    pub unreadable: Vec<UnreadableFile>,
}

impl CheckContext {
    /// Load and partition the corpus for `app` under `workspace_root`.
    pub fn load(
        workspace_root: &Path,
        app: AppDescriptor,
        ignores: &[String],
        verbose: bool,
    ) -> Self {
        let app_root = workspace_root.join(app.path());
        let corpus = corpus::load(&app_root, ignores, verbose);
        Self::new(app, corpus)
    }

    /// Partition an already loaded corpus.
    pub fn new(app: AppDescriptor, corpus: Corpus) -> Self {
        let Corpus {
            layout,
            files,
            unreadable,
            ..
        } = corpus;

        let mut ctx = Self {
            app,
            layout,
            shared_files: Vec::new(),
            platform_files: BTreeMap::new(),
            view_files: Vec::new(),
            project_files: Vec::new(),
            resource_files: Vec::new(),
            unreadable,
        };

        for (role, file) in files {
            match role {
                FileRole::Shared => ctx.shared_files.push(file),
                FileRole::Platform(name) => ctx.platform_files.entry(name).or_default().push(file),
                FileRole::View => ctx.view_files.push(file),
                FileRole::Project => ctx.project_files.push(file),
                FileRole::Resource => ctx.resource_files.push(file),
            }
        }

        ctx
    }

    /// Build a context from in-memory files, classifying them by path.
    ///
    /// Files the classifier does not recognize are dropped, exactly as the
    /// loader would skip them. The layout is inferred from the paths.
    pub fn from_files(app: AppDescriptor, files: Vec<SourceFile>) -> Self {
        let mut top_dirs: Vec<&str> = files
            .iter()
            .filter_map(|f| f.relative_path.split_once('/').map(|(top, _)| top))
            .collect();
        top_dirs.sort();
        top_dirs.dedup();
        let layout = Layout::from_dirs(top_dirs);

        let mut classified: Vec<(FileRole, SourceFile)> = files
            .into_iter()
            .filter_map(|f| super::source::classify(&f.relative_path).map(|role| (role, f)))
            .collect();
        classified.sort_by(|a, b| a.1.relative_path.cmp(&b.1.relative_path));

        Self::new(
            app,
            Corpus {
                layout,
                files: classified,
                ..Default::default()
            },
        )
    }

    /// Union of every role subset.
    pub fn all_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.shared_files
            .iter()
            .chain(self.platform_files.values().flatten())
            .chain(self.view_files.iter())
            .chain(self.project_files.iter())
            .chain(self.resource_files.iter())
    }

    /// Every platform-specific source file, platforms in name order.
    pub fn all_platform_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.platform_files.values().flatten()
    }

    /// Shared and platform-specific C# source.
    pub fn code_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.shared_files.iter().chain(self.all_platform_files())
    }

    pub fn file_count(&self) -> usize {
        self.all_files().count()
    }
}

/// Workspace-wide input for global rule modules.
#[derive(Debug)]
pub struct WorkspaceContext {
    /// `Directory.Build.props` at the workspace root.
    pub build_props: Option<SourceFile>,
    /// `Directory.Packages.props` at the workspace root.
    pub packages_props: Option<SourceFile>,
    /// Every `.csproj` in the workspace, sorted by path.
    pub projects: Vec<SourceFile>,
    pub unreadable: Vec<UnreadableFile>,
}

pub const BUILD_PROPS: &str = "Directory.Build.props";
pub const PACKAGES_PROPS: &str = "Directory.Packages.props";

impl WorkspaceContext {
    pub fn load(root: &Path, ignores: &[String], verbose: bool) -> Self {
        let ignores = corpus::compile_ignores(ignores, verbose);
        let (selected, _) = corpus::walk(root, &ignores, verbose, |rel| {
            (rel == BUILD_PROPS || rel == PACKAGES_PROPS || rel.ends_with(".csproj")).then_some(())
        });
        let (files, unreadable) = corpus::read_all(selected, verbose);
        Self::from_files(files.into_iter().map(|(_, f)| f).collect(), unreadable)
    }

    pub fn from_files(files: Vec<SourceFile>, unreadable: Vec<UnreadableFile>) -> Self {
        let mut ctx = Self {
            build_props: None,
            packages_props: None,
            projects: Vec::new(),
            unreadable,
        };
        for file in files {
            match file.relative_path.as_str() {
                BUILD_PROPS => ctx.build_props = Some(file),
                PACKAGES_PROPS => ctx.packages_props = Some(file),
                _ => ctx.projects.push(file),
            }
        }
        ctx.projects.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        ctx
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn app() -> AppDescriptor {
        AppDescriptor::new("Timer", "com.example.timer")
    }

    #[test]
    fn test_partition_is_exact() {
        let files = vec![
            SourceFile::from_text("Timer.Shared/App.axaml.cs", "class App {}"),
            SourceFile::from_text("Timer.Shared/App.axaml", "<Application/>"),
            SourceFile::from_text("Timer.Shared/Resources/Strings.resx", "<root/>"),
            SourceFile::from_text("Timer.Android/MainActivity.cs", "class MainActivity {}"),
            SourceFile::from_text("Timer.Android/Timer.Android.csproj", "<Project/>"),
            SourceFile::from_text("Timer.Desktop/Program.cs", "class Program {}"),
            SourceFile::from_text("notes.txt", "ignored"),
        ];
        let ctx = CheckContext::from_files(app(), files);

        let all: Vec<_> = ctx.all_files().map(|f| f.relative_path.as_str()).collect();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), 6);
        assert_eq!(unique.len(), all.len());

        let subset_total = ctx.shared_files.len()
            + ctx.platform_files.values().map(Vec::len).sum::<usize>()
            + ctx.view_files.len()
            + ctx.project_files.len()
            + ctx.resource_files.len();
        assert_eq!(subset_total, ctx.file_count());

        assert_eq!(ctx.shared_files.len(), 1);
        assert_eq!(ctx.view_files.len(), 1);
        assert_eq!(ctx.platform_files["android"].len(), 1);
        assert_eq!(ctx.platform_files["desktop"].len(), 1);
        assert_eq!(ctx.code_files().count(), 3);
        assert_eq!(ctx.layout.platforms, vec!["android", "desktop"]);
        assert_eq!(ctx.layout.shared_root.as_deref(), Some("Timer.Shared"));
    }

    #[test]
    fn test_loaded_partition_matches_corpus() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        for rel in [
            "Timer/Timer.Shared/A.cs",
            "Timer/Timer.Shared/Views/AView.axaml",
            "Timer/Timer.iOS/AppDelegate.cs",
            "Timer/Timer.iOS/Info.plist",
        ] {
            let path = root.join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, "x").unwrap();
        }

        let ctx = CheckContext::load(root, app(), &[], false);
        assert_eq!(ctx.file_count(), 4);
        assert_eq!(ctx.platform_files["ios"].len(), 1);
        assert_eq!(ctx.project_files.len(), 1);
    }

    #[test]
    fn test_workspace_context_load() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        for rel in [
            "Directory.Build.props",
            "Directory.Packages.props",
            "Timer/Timer.Shared/Timer.Shared.csproj",
            "Timer/Timer.Shared/obj/Timer.Shared.csproj",
            "Calc/Calc.Android/Calc.Android.csproj",
        ] {
            let path = root.join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, "<Project/>").unwrap();
        }

        let ws = WorkspaceContext::load(root, &[], false);
        assert!(ws.build_props.is_some());
        assert!(ws.packages_props.is_some());
        let projects: Vec<_> = ws.projects.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(
            projects,
            vec![
                "Calc/Calc.Android/Calc.Android.csproj",
                "Timer/Timer.Shared/Timer.Shared.csproj",
            ]
        );
    }
}
