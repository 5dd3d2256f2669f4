use dash_vfs::{FileSystem, VfsPath};

/// Facts derived from a `pubspec.yaml`.
///
/// Parsing is lenient: a missing or malformed manifest yields the all-absent
/// default rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PubspecInfo {
    /// The declared package name.
    pub name: Option<String>,
    /// Whether the package declares Flutter: a `flutter` entry under
    /// `dependencies` or `dev_dependencies`, or a top-level `flutter:`
    /// section.
    pub flutter: bool,
}

impl PubspecInfo {
    pub fn parse(text: &str) -> Self {
        let doc: serde_yaml::Value = match serde_yaml::from_str(text) {
            Ok(doc) => doc,
            Err(err) => {
                tracing::debug!(target: "dash.pub", error = %err, "unparseable pubspec");
                return Self::default();
            }
        };

        let name = doc
            .get("name")
            .and_then(serde_yaml::Value::as_str)
            .map(str::to_owned);
        let flutter = ["dependencies", "dev_dependencies"]
            .iter()
            .any(|section| {
                doc.get(section)
                    .is_some_and(|deps| deps.get("flutter").is_some())
            })
            || doc.get("flutter").is_some();

        Self { name, flutter }
    }

    pub(crate) fn read(fs: &dyn FileSystem, pubspec: &VfsPath) -> Self {
        match fs.read_to_string(pubspec) {
            Ok(text) => Self::parse(&text),
            Err(err) => {
                tracing::debug!(target: "dash.pub", path = %pubspec, error = %err, "unreadable pubspec");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn flutter_dependency_is_detected() {
        let info = PubspecInfo::parse(
            "name: demo\ndependencies:\n  flutter:\n    sdk: flutter\n  path: any\n",
        );
        assert_eq!(info.name.as_deref(), Some("demo"));
        assert!(info.flutter);
    }

    #[test]
    fn dev_dependency_and_top_level_section_count() {
        assert!(PubspecInfo::parse("dev_dependencies:\n  flutter:\n    sdk: flutter\n").flutter);
        assert!(PubspecInfo::parse("name: x\nflutter:\n  uses-material-design: true\n").flutter);
    }

    #[test]
    fn plain_dart_package_does_not_declare_flutter() {
        let info = PubspecInfo::parse("name: cli_tool\ndependencies:\n  args: ^2.0.0\n");
        assert_eq!(info.name.as_deref(), Some("cli_tool"));
        assert!(!info.flutter);
    }

    #[test]
    fn malformed_yaml_degrades_to_absent() {
        let info = PubspecInfo::parse(": : :\n\t???");
        assert_eq!(info, PubspecInfo::default());
    }

    #[test]
    fn empty_manifest_degrades_to_absent() {
        assert_eq!(PubspecInfo::parse(""), PubspecInfo::default());
    }
}
