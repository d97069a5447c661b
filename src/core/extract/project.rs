//! Facts from MSBuild project files and platform manifests.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::source::SourceFile;

static PACKAGE_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<(PackageReference|PackageVersion)\s[^>]*?\b(?:Include|Update)\s*=\s*"([^"]+)""#)
        .unwrap()
});

static VERSION_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bVersion\s*=\s*"([^"]*)""#).unwrap());

/// First `<name>value</name>` element, as `(line index, trimmed value)`.
///
/// Attributes on the opening tag (`Condition="..."`) are allowed. Only
/// single-line elements are recognized, which is how project files write
/// scalar properties.
pub fn xml_property(file: &SourceFile, name: &str) -> Option<(usize, String)> {
    let name = regex::escape(name);
    let element = Regex::new(&format!(r"<{}(?:\s[^>]*)?>([^<]*)</{}>", name, name)).ok()?;
    file.code_lines().find_map(|(index, line)| {
        element
            .captures(line)
            .map(|caps| (index, caps[1].trim().to_string()))
    })
}

/// First value of attribute `attribute` (e.g. `package` or
/// `android:usesCleartextTraffic`), as `(line index, value)`.
pub fn xml_attribute(file: &SourceFile, attribute: &str) -> Option<(usize, String)> {
    let pattern = format!(r#"(?:^|[\s<]){}\s*=\s*"([^"]*)""#, regex::escape(attribute));
    let regex = Regex::new(&pattern).ok()?;
    file.code_lines().find_map(|(index, line)| {
        regex.captures(line).map(|caps| (index, caps[1].to_string()))
    })
}

/// MSBuild boolean: `true` in any casing.
pub fn is_true(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

/// Whether property `name` is present and true.
pub fn property_is_true(file: &SourceFile, name: &str) -> bool {
    xml_property(file, name).is_some_and(|(_, value)| is_true(&value))
}

/// Whether property `name` is present and explicitly false.
pub fn property_is_false(file: &SourceFile, name: &str) -> bool {
    xml_property(file, name).is_some_and(|(_, value)| value.trim().eq_ignore_ascii_case("false"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageItemKind {
    /// `<PackageReference>` in a project.
    Reference,
    /// `<PackageVersion>` in `Directory.Packages.props`.
    Version,
}

/// One package item with its optional inline version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageItem {
    pub kind: PackageItemKind,
    pub name: String,
    pub version: Option<String>,
    /// Zero-based line index.
    pub line: usize,
}

/// Every `PackageReference`/`PackageVersion` item in `file`.
///
/// A `Version` attribute counts only when it sits on the same line as the
/// item's `Include`; child `<Version>` elements are not followed.
pub fn package_items(file: &SourceFile) -> Vec<PackageItem> {
    let mut items = Vec::new();
    for (index, line) in file.code_lines() {
        for caps in PACKAGE_ITEM.captures_iter(line) {
            let kind = match &caps[1] {
                "PackageVersion" => PackageItemKind::Version,
                _ => PackageItemKind::Reference,
            };
            let rest = caps.get(0).map_or("", |m| &line[m.start()..]);
            let tag_end = rest.find('>').unwrap_or(rest.len());
            let version = VERSION_ATTRIBUTE
                .captures(&rest[..tag_end])
                .map(|v| v[1].to_string());
            items.push(PackageItem {
                kind,
                name: caps[2].to_string(),
                version,
                line: index,
            });
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const CSPROJ: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <!-- <ApplicationId>com.example.old</ApplicationId> -->
    <ApplicationId> com.example.loancalc </ApplicationId>
    <ApplicationVersion>3</ApplicationVersion>
    <PublishAot Condition="'$(Configuration)' == 'Release'">True</PublishAot>
    <PublishTrimmed>false</PublishTrimmed>
  </PropertyGroup>
  <ItemGroup>
    <PackageReference Include="Avalonia" Version="11.1.0" />
    <PackageReference Include="CommunityToolkit.Mvvm" />
  </ItemGroup>
</Project>"#;

    #[test]
    fn test_xml_property() {
        let file = SourceFile::from_text("A/A.csproj", CSPROJ);
        assert_eq!(
            xml_property(&file, "ApplicationId"),
            Some((3, "com.example.loancalc".to_string()))
        );
        assert_eq!(xml_property(&file, "TargetFramework"), None);
        assert!(property_is_true(&file, "PublishAot"));
        assert!(property_is_false(&file, "PublishTrimmed"));
        assert!(!property_is_true(&file, "PublishTrimmed"));
    }

    #[test]
    fn test_xml_attribute() {
        let file = SourceFile::from_text(
            "A.Android/Properties/AndroidManifest.xml",
            r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android" package="com.example.timer">
  <application android:label="Timer" android:usesCleartextTraffic="true" />
</manifest>"#,
        );
        assert_eq!(
            xml_attribute(&file, "package"),
            Some((0, "com.example.timer".to_string()))
        );
        assert_eq!(
            xml_attribute(&file, "android:usesCleartextTraffic"),
            Some((1, "true".to_string()))
        );
        assert_eq!(xml_attribute(&file, "label"), None);
    }

    #[test]
    fn test_package_items() {
        let file = SourceFile::from_text("A/A.csproj", CSPROJ);
        assert_eq!(
            package_items(&file),
            vec![
                PackageItem {
                    kind: PackageItemKind::Reference,
                    name: "Avalonia".to_string(),
                    version: Some("11.1.0".to_string()),
                    line: 9,
                },
                PackageItem {
                    kind: PackageItemKind::Reference,
                    name: "CommunityToolkit.Mvvm".to_string(),
                    version: None,
                    line: 10,
                },
            ]
        );
    }

    #[test]
    fn test_package_versions() {
        let file = SourceFile::from_text(
            "Directory.Packages.props",
            "<ItemGroup>\n  <PackageVersion Include=\"Avalonia\" Version=\"11.1.0\" />\n</ItemGroup>",
        );
        let items = package_items(&file);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, PackageItemKind::Version);
        assert_eq!(items[0].version.as_deref(), Some("11.1.0"));
    }
}
