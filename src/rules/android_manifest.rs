//! Android manifest correctness.

use super::Checker;
use crate::{
    core::{
        CheckContext, SourceFile,
        extract::project::{is_true, xml_attribute},
        suppression::active_lines,
    },
    findings::{Category, Finding, Findings, Location, Severity},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct AndroidManifest;

const MANIFEST_FILE: &str = "AndroidManifest.xml";
const INTERNET_PERMISSION: &str = "android.permission.INTERNET";
const AD_APPLICATION_ID: &str = "com.google.android.gms.ads.APPLICATION_ID";

/// First active line index containing `needle`.
fn find_line(file: &SourceFile, needle: &str) -> Option<usize> {
    active_lines(file, Category::AndroidManifest)
        .find(|(_, line)| line.contains(needle))
        .map(|(index, _)| index)
}

impl Checker for AndroidManifest {
    fn category(&self) -> Category {
        Category::AndroidManifest
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());

        if !ctx.layout.has_platform("android") {
            sink.info("No Android head; manifest not checked");
            return sink.into_vec();
        }

        let Some(manifest) = ctx
            .project_files
            .iter()
            .find(|f| f.file_name() == MANIFEST_FILE)
        else {
            sink.fail(format!("Android head has no {}", MANIFEST_FILE));
            return sink.into_vec();
        };
        let at = |index: usize| Location::new(&manifest.relative_path, index + 1);
        let expected = &ctx.app.expected_identifier;

        if let Some((index, package)) = xml_attribute(manifest, "package")
            && package != *expected
            && find_line(manifest, "package=") == Some(index)
        {
            sink.at(
                Severity::Fail,
                at(index),
                format!("Manifest package '{}' does not match expected '{}'", package, expected),
            );
        }

        let ad_metadata = find_line(manifest, AD_APPLICATION_ID);
        if ctx.app.is_ad_supported {
            if find_line(manifest, INTERNET_PERMISSION).is_none() {
                sink.fail(format!(
                    "Ad-supported app does not request {} in {}",
                    INTERNET_PERMISSION, MANIFEST_FILE
                ));
            }
            if ad_metadata.is_none() {
                sink.fail(format!(
                    "Ad-supported app has no {} meta-data in {}",
                    AD_APPLICATION_ID, MANIFEST_FILE
                ));
            }
        } else if let Some(index) = ad_metadata {
            sink.at(
                Severity::Warn,
                at(index),
                "Ad meta-data declared, but the app is not ad-supported",
            );
        }

        if let Some((index, value)) = xml_attribute(manifest, "android:usesCleartextTraffic")
            && is_true(&value)
            && find_line(manifest, "usesCleartextTraffic") == Some(index)
        {
            sink.at(Severity::Warn, at(index), "Cleartext HTTP traffic is enabled");
        }

        if sink.count_at_least(Severity::Warn) == 0 {
            sink.pass(format!("{} is consistent with '{}'", MANIFEST_FILE, expected));
        }

        sink.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::rules::test_support::{app, context, context_for, locations, severities};

    const MANIFEST_PATH: &str = "LoanCalc.Android/Properties/AndroidManifest.xml";
    const ACTIVITY: (&str, &str) = ("LoanCalc.Android/MainActivity.cs", "class MainActivity {}");

    fn manifest(package: &str, body: &str) -> String {
        format!(
            "<manifest xmlns:android=\"http://schemas.android.com/apk/res/android\" package=\"{}\">\n{}\n</manifest>",
            package, body
        )
    }

    #[test]
    fn test_no_android_head() {
        let ctx = context(&[("LoanCalc.Shared/App.axaml.cs", "class App {}")]);
        assert_eq!(severities(&AndroidManifest.check(&ctx)), vec![Severity::Info]);
    }

    #[test]
    fn test_missing_manifest() {
        let ctx = context(&[ACTIVITY]);
        assert_eq!(severities(&AndroidManifest.check(&ctx)), vec![Severity::Fail]);
    }

    #[test]
    fn test_matching_manifest_passes() {
        let text = manifest("com.example.loancalc", "<application android:label=\"Loan\" />");
        let ctx = context(&[ACTIVITY, (MANIFEST_PATH, &text)]);
        assert_eq!(severities(&AndroidManifest.check(&ctx)), vec![Severity::Pass]);
    }

    #[test]
    fn test_package_mismatch_and_cleartext() {
        let text = manifest(
            "com.example.other",
            "<application android:usesCleartextTraffic=\"true\" />",
        );
        let ctx = context(&[ACTIVITY, (MANIFEST_PATH, &text)]);
        let findings = AndroidManifest.check(&ctx);
        assert_eq!(severities(&findings), vec![Severity::Fail, Severity::Warn]);
        assert_eq!(
            locations(&findings),
            vec![format!("{}:1", MANIFEST_PATH), format!("{}:2", MANIFEST_PATH)]
        );
    }

    #[test]
    fn test_ad_supported_requirements() {
        let mut ads = app();
        ads.is_ad_supported = true;
        let text = manifest("com.example.loancalc", "<application />");
        let ctx = context_for(ads.clone(), &[ACTIVITY, (MANIFEST_PATH, &text)]);
        assert_eq!(
            severities(&AndroidManifest.check(&ctx)),
            vec![Severity::Fail, Severity::Fail]
        );

        let text = manifest(
            "com.example.loancalc",
            r#"<uses-permission android:name="android.permission.INTERNET" />
<application>
  <meta-data android:name="com.google.android.gms.ads.APPLICATION_ID" android:value="ca-app-pub-1~2" />
</application>"#,
        );
        let ctx = context_for(ads, &[ACTIVITY, (MANIFEST_PATH, &text)]);
        assert_eq!(severities(&AndroidManifest.check(&ctx)), vec![Severity::Pass]);
    }

    #[test]
    fn test_ad_metadata_in_non_ad_app() {
        let text = manifest(
            "com.example.loancalc",
            "<meta-data android:name=\"com.google.android.gms.ads.APPLICATION_ID\" android:value=\"x\" />",
        );
        let ctx = context(&[ACTIVITY, (MANIFEST_PATH, &text)]);
        assert_eq!(severities(&AndroidManifest.check(&ctx)), vec![Severity::Warn]);
    }
}
