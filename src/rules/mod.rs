//! Rule modules.
//!
//! Each rule is a stateless unit struct owning one [`Category`]. Per-app rules
//! implement [`Checker`] and read a [`CheckContext`]; workspace-wide rules
//! implement [`GlobalChecker`] and read a [`WorkspaceContext`]. The registries
//! below fix the execution order, which is also the order of the output.
//!
//! ## Module Structure
//!
//! Global:
//! - `build_config`: AOT/interpreter/packaging flags in `Directory.Build.props`
//! - `package_versions`: package version drift and central management
//!
//! Per application:
//! - `project_structure`: shared/platform layout and unreadable files
//! - `project_file`: application id and version metadata in `.csproj`
//! - `android_manifest`: package id, ad metadata, cleartext traffic
//! - `platform_isolation`: platform APIs leaking into shared code
//! - `debug_output`: console/debug output left in shared code
//! - `async_void`: `async void` without exception handling
//! - `blocking_calls`: sync-over-async in shared code
//! - `exception_handling`: empty catch blocks
//! - `persistence`: storage names and unsafe writes/reads
//! - `http_client`: per-call `HttpClient` construction
//! - `di_registration`: root dependencies vs. registrations
//! - `service_locator`: runtime service lookups
//! - `view_pairing`: views vs. logic components
//! - `tab_consistency`: active-tab flags vs. navigation triggers
//! - `compiled_bindings`: views without compiled bindings
//! - `mvvm_toolkit`: source-generator prerequisites
//! - `localization_parity`: resource keys per language vs. baseline
//! - `localization_keys`: referenced keys vs. baseline
//! - `hardcoded_text`: literal user-facing text in views
//! - `ads`: ad wiring vs. the declared ad flag
//! - `namespaces`: namespaces outside the app root namespace
//! - `todo_markers`: TODO/FIXME/HACK count

pub mod ads;
pub mod android_manifest;
pub mod async_void;
pub mod blocking_calls;
pub mod build_config;
pub mod compiled_bindings;
pub mod debug_output;
pub mod di_registration;
pub mod exception_handling;
pub mod hardcoded_text;
pub mod http_client;
pub mod localization_keys;
pub mod localization_parity;
pub mod mvvm_toolkit;
pub mod namespaces;
pub mod package_versions;
pub mod persistence;
pub mod platform_isolation;
pub mod project_file;
pub mod project_structure;
pub mod service_locator;
pub mod tab_consistency;
pub mod todo_markers;
pub mod view_pairing;

use enum_dispatch::enum_dispatch;

use self::{
    ads::Ads, android_manifest::AndroidManifest, async_void::AsyncVoid,
    blocking_calls::BlockingCalls, build_config::BuildConfig, compiled_bindings::CompiledBindings,
    debug_output::DebugOutput, di_registration::DiRegistration,
    exception_handling::ExceptionHandling, hardcoded_text::HardcodedText, http_client::HttpClient,
    localization_keys::LocalizationKeys, localization_parity::LocalizationParity,
    mvvm_toolkit::MvvmToolkit, namespaces::Namespaces, package_versions::PackageVersions,
    persistence::Persistence, platform_isolation::PlatformIsolation, project_file::ProjectFile,
    project_structure::ProjectStructure, service_locator::ServiceLocator,
    tab_consistency::TabConsistency, todo_markers::TodoMarkers, view_pairing::ViewPairing,
};
use crate::{
    core::{CheckContext, WorkspaceContext},
    findings::{Category, Finding},
};

/// A rule that runs once per application.
#[enum_dispatch]
pub trait Checker {
    /// The category stamped on every finding this rule emits.
    fn category(&self) -> Category;

    fn check(&self, ctx: &CheckContext) -> Vec<Finding>;
}

/// A rule that runs once per workspace.
#[enum_dispatch]
pub trait GlobalChecker {
    fn category(&self) -> Category;

    fn check(&self, workspace: &WorkspaceContext) -> Vec<Finding>;
}

#[enum_dispatch(Checker)]
#[derive(Debug, Clone, Copy)]
pub enum AppRule {
    ProjectStructure(ProjectStructure),
    ProjectFile(ProjectFile),
    AndroidManifest(AndroidManifest),
    PlatformIsolation(PlatformIsolation),
    DebugOutput(DebugOutput),
    AsyncVoid(AsyncVoid),
    BlockingCalls(BlockingCalls),
    ExceptionHandling(ExceptionHandling),
    Persistence(Persistence),
    HttpClient(HttpClient),
    DiRegistration(DiRegistration),
    ServiceLocator(ServiceLocator),
    ViewPairing(ViewPairing),
    TabConsistency(TabConsistency),
    CompiledBindings(CompiledBindings),
    MvvmToolkit(MvvmToolkit),
    LocalizationParity(LocalizationParity),
    LocalizationKeys(LocalizationKeys),
    HardcodedText(HardcodedText),
    Ads(Ads),
    Namespaces(Namespaces),
    TodoMarkers(TodoMarkers),
}

#[enum_dispatch(GlobalChecker)]
#[derive(Debug, Clone, Copy)]
pub enum GlobalRule {
    BuildConfig(BuildConfig),
    PackageVersions(PackageVersions),
}

/// Per-application rules in execution order.
pub fn app_rules() -> Vec<AppRule> {
    vec![
        ProjectStructure.into(),
        ProjectFile.into(),
        AndroidManifest.into(),
        PlatformIsolation.into(),
        DebugOutput.into(),
        AsyncVoid.into(),
        BlockingCalls.into(),
        ExceptionHandling.into(),
        Persistence.into(),
        HttpClient.into(),
        DiRegistration.into(),
        ServiceLocator.into(),
        ViewPairing.into(),
        TabConsistency.into(),
        CompiledBindings.into(),
        MvvmToolkit.into(),
        LocalizationParity.into(),
        LocalizationKeys.into(),
        HardcodedText.into(),
        Ads.into(),
        Namespaces.into(),
        TodoMarkers.into(),
    ]
}

/// Workspace rules in execution order.
pub fn global_rules() -> Vec<GlobalRule> {
    vec![BuildConfig.into(), PackageVersions.into()]
}
