//! Per-family CSS settings loaded from `fonts.config.json`.
//!
//! ```json
//! {
//!   "defaults": { "display": "swap", "varWght": "300 700" },
//!   "families": {
//!     "Inter": {
//!       "cssFamily": "Inter Var",
//!       "normal": { "varWght": "100 900" },
//!       "italic": { "varWght": "200 800" }
//!     }
//!   }
//! }
//! ```
//!
//! Every key is optional. A missing file means built-in defaults.

use std::{collections::HashMap, fs::read_to_string, io::ErrorKind, path::Path, result};

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

use crate::config::{DEFAULT_DISPLAY, DEFAULT_VAR_WGHT};

/// Top-level document. A `null` or wrongly typed section counts as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    #[serde(deserialize_with = "lenient")]
    defaults: Option<RawDefaults>,
    #[serde(deserialize_with = "lenient_entries")]
    families: HashMap<String, FamilyEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawDefaults {
    #[serde(deserialize_with = "css_value")]
    display: Option<String>,
    #[serde(deserialize_with = "css_value")]
    var_wght: Option<String>,
}

/// Overrides for one source folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FamilyEntry {
    #[serde(deserialize_with = "lenient")]
    pub css_family: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub normal: Option<AxisEntry>,
    #[serde(deserialize_with = "lenient")]
    pub italic: Option<AxisEntry>,
}

/// Variable axis settings for one style of a family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisEntry {
    #[serde(deserialize_with = "css_value")]
    pub var_wght: Option<String>,
}

impl AxisEntry {
    fn range(entry: Option<&Self>) -> Option<&str> {
        entry.and_then(|e| e.var_wght.as_deref()).filter(|s| !s.is_empty())
    }
}

/// Any value that does not deserialize as `T` (including `null`) becomes `None`.
fn lenient<'de, D, T>(deserializer: D) -> result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Family map where an unusable entry drops only itself.
fn lenient_entries<'de, D>(deserializer: D) -> result::Result<HashMap<String, FamilyEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(HashMap::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|(folder, entry)| Some((folder, FamilyEntry::deserialize(entry).ok()?)))
        .collect())
}

/// A CSS value written as a string or a bare number; anything else is unset.
fn css_value<'de, D>(deserializer: D) -> result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Resolved family configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyConfig {
    /// `font-display` for every emitted face.
    pub display: String,
    /// Weight range used when a family has none configured.
    pub var_wght: String,
    families: HashMap<String, FamilyEntry>,
}

impl Default for FamilyConfig {
    fn default() -> Self {
        Self {
            display: DEFAULT_DISPLAY.to_string(),
            var_wght: DEFAULT_VAR_WGHT.to_string(),
            families: HashMap::new(),
        }
    }
}

impl FamilyConfig {
    /// Parse a config document, filling unset defaults.
    ///
    /// Only invalid JSON is an error. Unusable values are treated as unset,
    /// each affecting nothing but its own key.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).context("Invalid font config")?;
        let raw = match value {
            Value::Object(_) => RawConfig::deserialize(value).context("Invalid font config")?,
            _ => RawConfig::default(),
        };
        let defaults = raw.defaults.unwrap_or_default();
        Ok(Self {
            display: defaults.display.unwrap_or_else(|| DEFAULT_DISPLAY.to_string()),
            var_wght: defaults.var_wght.unwrap_or_else(|| DEFAULT_VAR_WGHT.to_string()),
            families: raw.families,
        })
    }

    /// Load from `path`, falling back to defaults.
    ///
    /// A missing file is expected and logged at debug level only; any other
    /// read or parse failure is logged as a warning.
    pub fn load(path: &Path) -> Self {
        let json = match read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No font config at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Failed to read {}: {e}; using defaults", path.display());
                return Self::default();
            }
        };

        Self::from_json(&json).unwrap_or_else(|e| {
            log::warn!("{}: {e:#}; using defaults", path.display());
            Self::default()
        })
    }

    pub fn family(&self, folder: &str) -> Option<&FamilyEntry> {
        self.families.get(folder)
    }

    /// CSS family name for a source folder.
    pub fn css_family<'a>(&'a self, folder: &'a str) -> &'a str {
        self.family(folder)
            .and_then(|f| f.css_family.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or(folder)
    }

    /// Variable weight range for a folder and style.
    ///
    /// Falls back to the other style's range, then to the global default.
    pub fn var_wght(&self, folder: &str, italic: bool) -> &str {
        let Some(family) = self.family(folder) else {
            return &self.var_wght;
        };
        let (own, other) = if italic {
            (family.italic.as_ref(), family.normal.as_ref())
        } else {
            (family.normal.as_ref(), family.italic.as_ref())
        };
        AxisEntry::range(own).or_else(|| AxisEntry::range(other)).unwrap_or(self.var_wght.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;

    const SAMPLE: &str = r#"{
        "defaults": { "display": "optional", "varWght": "100 900" },
        "families": {
            "Inter": {
                "cssFamily": "Inter Display",
                "normal": { "varWght": "200 800" },
                "italic": { "varWght": "300 600" }
            },
            "Roboto": { "italic": { "varWght": "400 700" } },
            "Mono": { "normal": { "varWght": "350 650" } },
            "Blank": { "cssFamily": "" }
        }
    }"#;

    #[test]
    fn test_defaults() {
        let cfg = FamilyConfig::default();
        assert_eq!(cfg.display, "swap");
        assert_eq!(cfg.css_family("Inter"), "Inter");
        assert_eq!(cfg.var_wght("Inter", false), "300 700");
        assert_eq!(cfg.var_wght("Inter", true), "300 700");
    }

    #[test]
    fn test_css_family() {
        let cfg = FamilyConfig::from_json(SAMPLE).unwrap();
        assert_eq!(cfg.css_family("Inter"), "Inter Display");
        assert_eq!(cfg.css_family("Roboto"), "Roboto");
        assert_eq!(cfg.css_family("Blank"), "Blank");
        assert_eq!(cfg.css_family("Unknown"), "Unknown");
    }

    #[test]
    fn test_var_wght_resolution() {
        let cfg = FamilyConfig::from_json(SAMPLE).unwrap();
        assert_eq!(cfg.var_wght("Inter", false), "200 800");
        assert_eq!(cfg.var_wght("Inter", true), "300 600");
        // normal falls back to italic and vice versa
        assert_eq!(cfg.var_wght("Roboto", false), "400 700");
        assert_eq!(cfg.var_wght("Mono", true), "350 650");
        // configured family without ranges, and unknown family
        assert_eq!(cfg.var_wght("Blank", false), "100 900");
        assert_eq!(cfg.var_wght("Unknown", true), "100 900");
    }

    #[test]
    fn test_partial_defaults() {
        let cfg = FamilyConfig::from_json(r#"{ "defaults": { "display": "block" } }"#).unwrap();
        assert_eq!(cfg.display, "block");
        assert_eq!(cfg.var_wght, "300 700");

        let cfg = FamilyConfig::from_json("{}").unwrap();
        assert_eq!(cfg, FamilyConfig::default());
    }

    #[test]
    fn test_bad_entry_only_affects_itself() {
        let cfg = FamilyConfig::from_json(
            r#"{
                "defaults": null,
                "families": {
                    "Inter": { "cssFamily": "Inter Display" },
                    "Broken": null,
                    "Odd": [1, 2],
                    "Mono": { "cssFamily": 7, "normal": { "varWght": 300 }, "italic": "bold" }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.display, "swap");
        assert_eq!(cfg.css_family("Inter"), "Inter Display");
        assert_eq!(cfg.css_family("Broken"), "Broken");
        assert_eq!(cfg.css_family("Odd"), "Odd");
        assert_eq!(cfg.css_family("Mono"), "Mono");
        // numeric range accepted, bad italic section ignored
        assert_eq!(cfg.var_wght("Mono", false), "300");
        assert_eq!(cfg.var_wght("Mono", true), "300");
    }

    #[test]
    fn test_wrongly_typed_sections_are_unset() {
        let cfg = FamilyConfig::from_json(
            r#"{ "defaults": { "display": false, "varWght": "200 800" }, "families": [] }"#,
        )
        .unwrap();
        assert_eq!(cfg.display, "swap");
        assert_eq!(cfg.var_wght("Inter", false), "200 800");

        assert_eq!(FamilyConfig::from_json("null").unwrap(), FamilyConfig::default());
        assert!(FamilyConfig::from_json("{ nope").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = FamilyConfig::load(&dir.path().join("fonts.config.json"));
        assert_eq!(cfg, FamilyConfig::default());
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fonts.config.json");
        write(&path, "{ not json").unwrap();
        assert_eq!(FamilyConfig::load(&path), FamilyConfig::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fonts.config.json");
        write(&path, SAMPLE).unwrap();
        let cfg = FamilyConfig::load(&path);
        assert_eq!(cfg.display, "optional");
        assert_eq!(cfg.css_family("Inter"), "Inter Display");
    }
}
