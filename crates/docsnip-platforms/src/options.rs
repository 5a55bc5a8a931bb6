//! CI options grouping.

use std::fmt;

use serde_json::Value;

/// Accessor extracting one dimension from a CI options entry.
type Accessor = Box<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// A tested dimension: column title plus how to read it from an entry.
pub struct ConfigKey {
    title: String,
    accessor: Accessor,
}

impl fmt::Debug for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigKey")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

impl ConfigKey {
    /// Key read with a caller-supplied accessor.
    pub fn new(
        title: impl Into<String>,
        accessor: impl Fn(&Value) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            accessor: Box::new(accessor),
        }
    }

    /// Key read from a top-level field of the entry.
    pub fn field(title: impl Into<String>, field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(title, move |entry| entry.get(&field).and_then(display_value))
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Value of this dimension in `entry`, if present.
    #[must_use]
    pub fn value(&self, entry: &Value) -> Option<String> {
        (self.accessor)(entry)
    }
}

/// Render a JSON scalar the way it reads in a table.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Configurations tested on one runner image.
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    /// Runner image label from the `Image` field.
    pub image: String,
    /// Distinct configurations, in first-seen order.
    pub configs: Vec<Value>,
}

/// Whether every key reads the same value from `first` and `second`.
#[must_use]
pub fn configs_are_equal(first: &Value, second: &Value, keys: &[ConfigKey]) -> bool {
    keys.iter().all(|key| key.value(first) == key.value(second))
}

/// Whether any entry of `configs` equals `config` under `keys`.
#[must_use]
pub fn has_config(configs: &[Value], config: &Value, keys: &[ConfigKey]) -> bool {
    configs
        .iter()
        .any(|existing| configs_are_equal(existing, config, keys))
}

/// Group options by `Image`, dropping configurations already present.
///
/// Platforms keep the order in which their image first appears. Entries
/// without an `Image` are grouped under [`UNKNOWN`](crate::UNKNOWN).
#[must_use]
pub fn group_by_platform(options: &[Value], keys: &[ConfigKey]) -> Vec<Platform> {
    let mut platforms: Vec<Platform> = Vec::new();
    for option in options {
        let image = option
            .get("Image")
            .and_then(display_value)
            .unwrap_or_else(|| crate::UNKNOWN.to_owned());

        let index = match platforms.iter().position(|p| p.image == image) {
            Some(index) => index,
            None => {
                platforms.push(Platform {
                    image,
                    configs: Vec::new(),
                });
                platforms.len() - 1
            }
        };

        let platform = &mut platforms[index];
        if !has_config(&platform.configs, option, keys) {
            platform.configs.push(option.clone());
        }
    }
    platforms
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn keys() -> Vec<ConfigKey> {
        vec![
            ConfigKey::field("Architecture", "Arch"),
            ConfigKey::field("Language", "Language"),
        ]
    }

    #[test]
    fn test_configs_are_equal_on_keys_only() {
        let a = json!({"Image": "ubuntu-latest", "Arch": "x64", "Language": "3.8", "Name": "a"});
        let b = json!({"Image": "windows-latest", "Arch": "x64", "Language": "3.8", "Name": "b"});
        let c = json!({"Arch": "x86", "Language": "3.8"});
        assert!(configs_are_equal(&a, &b, &keys()));
        assert!(!configs_are_equal(&a, &c, &keys()));
    }

    #[test]
    fn test_configs_are_equal_without_keys() {
        assert!(configs_are_equal(&json!({"a": 1}), &json!({"a": 2}), &[]));
    }

    #[test]
    fn test_missing_value_equals_missing_value() {
        let a = json!({"Arch": "x64"});
        let b = json!({"Arch": "x64", "Language": null});
        assert!(configs_are_equal(&a, &b, &keys()));
    }

    #[test]
    fn test_has_config() {
        let existing = vec![json!({"Arch": "x64", "Language": "3.8"})];
        assert!(has_config(&existing, &json!({"Arch": "x64", "Language": "3.8"}), &keys()));
        assert!(!has_config(&existing, &json!({"Arch": "x64", "Language": "3.9"}), &keys()));
        assert!(!has_config(&[], &json!({}), &keys()));
    }

    #[test]
    fn test_group_by_platform_dedups() {
        let options = vec![
            json!({"Image": "ubuntu-latest", "Arch": "x64", "Language": "3.8", "Config": "Debug"}),
            json!({"Image": "windows-latest", "Arch": "x64", "Language": "3.8"}),
            json!({"Image": "ubuntu-latest", "Arch": "x64", "Language": "3.8", "Config": "Release"}),
            json!({"Image": "ubuntu-latest", "Arch": "arm64", "Language": "3.8"}),
        ];

        let platforms = group_by_platform(&options, &keys());

        assert_eq!(platforms.len(), 2);
        assert_eq!(platforms[0].image, "ubuntu-latest");
        assert_eq!(platforms[0].configs.len(), 2);
        assert_eq!(platforms[0].configs[0]["Config"], "Debug");
        assert_eq!(platforms[1].image, "windows-latest");
    }

    #[test]
    fn test_field_renders_numbers() {
        let key = ConfigKey::field("Version", "Version");
        assert_eq!(key.value(&json!({"Version": 8})), Some("8".to_owned()));
        assert_eq!(key.value(&json!({"Version": true})), Some("true".to_owned()));
        assert_eq!(key.value(&json!({})), None);
    }

    #[test]
    fn test_custom_accessor() {
        let key = ConfigKey::new("Runtime", |entry: &Value| {
            entry
                .pointer("/Runtime/Name")
                .and_then(Value::as_str)
                .map(str::to_owned)
        });
        assert_eq!(
            key.value(&json!({"Runtime": {"Name": "net8"}})),
            Some("net8".to_owned())
        );
    }
}
