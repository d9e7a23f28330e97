//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. The file is
//! optional: stock defaults are used as-is when it is absent, and a present
//! file only needs the keys it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_title = "LEB Online Bible"
//! base_url = "https://leb.example.org"   # Used for canonical and share URLs
//! translation = "LEB"                     # Fallback when the dataset has none
//! # cname = "leb.example.org"             # Writes /CNAME when set
//!
//! [guard]
//! expected_verses = 31102   # Verse total of the full canon
//! minimum_verses = 31000    # Fewer than this fails the build
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"    # Reference line, footer, controls
//! border = "#e3e3e3"
//! link = "#333333"
//! link_hover = "#000000"
//!
//! [colors.dark]
//! background = "#111111"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! border = "#333333"
//! link = "#cccccc"
//! link_hover = "#ffffff"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::canon::CANON_VERSE_COUNT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site name shown in the page header and titles.
    pub site_title: String,
    /// Absolute origin of the published site, without trailing slash.
    pub base_url: String,
    /// Translation label used when the dataset does not carry one.
    pub translation: String,
    /// Custom domain for GitHub Pages style hosting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cname: Option<String>,
    /// Completeness threshold for the build guard.
    pub guard: GuardConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "LEB Online Bible".to_string(),
            base_url: "https://leb.example.org".to_string(),
            translation: "LEB".to_string(),
            cname: None,
            guard: GuardConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_title must not be empty".into(),
            ));
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ConfigError::Validation(
                "base_url must start with http:// or https://".into(),
            ));
        }
        if self.translation.trim().is_empty() {
            return Err(ConfigError::Validation(
                "translation must not be empty".into(),
            ));
        }
        if let Some(cname) = &self.cname
            && (cname.is_empty() || cname.contains('/') || cname.contains(char::is_whitespace))
        {
            return Err(ConfigError::Validation(
                "cname must be a bare domain name".into(),
            ));
        }
        if self.guard.minimum_verses == 0 {
            return Err(ConfigError::Validation(
                "guard.minimum_verses must be non-zero".into(),
            ));
        }
        if self.guard.minimum_verses > self.guard.expected_verses {
            return Err(ConfigError::Validation(
                "guard.minimum_verses must not exceed guard.expected_verses".into(),
            ));
        }
        Ok(())
    }

    /// `base_url` with any trailing slash removed.
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Build guard thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardConfig {
    /// Verse total of the complete canon, reported on the health page.
    pub expected_verses: usize,
    /// Builds indexing fewer verses than this fail.
    pub minimum_verses: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            expected_verses: CANON_VERSE_COUNT,
            minimum_verses: 31_000,
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Muted/secondary text color (reference line, footer, controls).
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e3e3e3".to_string(),
            link: "#333333".to_string(),
            link_hover: "#000000".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#111111".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            link: "#cccccc".to_string(),
            link_hover: "#ffffff".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the site config at `path`, falling back to stock defaults.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# LEB Verses Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Site name shown in the page header and in every page title.
site_title = "LEB Online Bible"

# Absolute origin of the published site. Canonical links and share
# buttons are built from it, e.g. https://leb.example.org/john/3/16/
base_url = "https://leb.example.org"

# Translation label, used when the dataset does not name one.
translation = "LEB"

# Custom domain. When set, the build writes it to /CNAME.
# cname = "leb.example.org"

# ---------------------------------------------------------------------------
# Build guard
# ---------------------------------------------------------------------------
[guard]
# Verse total of the complete canon, reported on the health page.
expected_verses = 31102

# A build indexing fewer verses than this writes /health.html and fails.
minimum_verses = 31000

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"    # Reference line, footer, controls
border = "#e3e3e3"
link = "#333333"
link_hover = "#000000"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#111111"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
link = "#cccccc"
link_hover = "#ffffff"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-link: {light_link};
    --color-link-hover: {light_link_hover};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-link: {dark_link};
        --color-link-hover: {dark_link_hover};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_link = colors.light.link,
        light_link_hover = colors.light.link_hover,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_link = colors.dark.link,
        dark_link_hover = colors.dark.link_hover,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_colors() {
        let config = SiteConfig::default();
        assert_eq!(config.colors.light.background, "#ffffff");
        assert_eq!(config.colors.dark.background, "#111111");
    }

    #[test]
    fn default_guard_thresholds() {
        let config = SiteConfig::default();
        assert_eq!(config.guard.expected_verses, 31_102);
        assert_eq!(config.guard.minimum_verses, 31_000);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors.light]
background = "#fafafa"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.light.background, "#fafafa");
        assert_eq!(config.colors.light.text, "#111111");
        assert_eq!(config.site_title, "LEB Online Bible");
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.background = "#1a1a1a".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-bg: #1a1a1a"));
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
    }

    #[test]
    fn origin_strips_trailing_slash() {
        let config = SiteConfig {
            base_url: "https://bible.example.com/".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(config.origin(), "https://bible.example.com");
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("site.toml")).unwrap();
        assert_eq!(config.translation, "LEB");
        assert!(config.cname.is_none());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        fs::write(
            &path,
            r#"
site_title = "Living Word Bibles"
cname = "leb.livingwordbibles.com"

[guard]
minimum_verses = 500
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.site_title, "Living Word Bibles");
        assert_eq!(config.cname.as_deref(), Some("leb.livingwordbibles.com"));
        assert_eq!(config.guard.minimum_verses, 500);
        assert_eq!(config.guard.expected_verses, 31_102);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("site_titel = \"x\"");
        assert!(result.unwrap_err().to_string().contains("unknown field"));
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[guard]\nminimum = 3\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[guard]
expected_verses = 31102
minimum_verses = 31000
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str("[guard]\nminimum_verses = 10\n").unwrap();
        let merged = merge_toml(base, overlay);
        let guard = merged.get("guard").unwrap();
        assert_eq!(guard.get("minimum_verses").unwrap().as_integer(), Some(10));
        assert_eq!(guard.get("expected_verses").unwrap().as_integer(), Some(31102));
    }

    #[test]
    fn merge_toml_scalar_replaces_table() {
        let base: toml::Value = toml::from_str("[a]\nb = 1\n").unwrap();
        let overlay: toml::Value = toml::from_str("a = 2").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(2));
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_base_url_scheme() {
        let config = SiteConfig {
            base_url: "leb.example.org".to_string(),
            ..SiteConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn validate_cname_is_bare_domain() {
        let config = SiteConfig {
            cname: Some("https://leb.example.org/".to_string()),
            ..SiteConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_minimum_not_above_expected() {
        let mut config = SiteConfig::default();
        config.guard.minimum_verses = 40_000;
        assert!(config.validate().is_err());
        config.guard.minimum_verses = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("site.toml");
        fs::write(&path, "site_title = \"  \"\n").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site_title, defaults.site_title);
        assert_eq!(config.base_url, defaults.base_url);
        assert_eq!(config.guard.minimum_verses, defaults.guard.minimum_verses);
        assert_eq!(config.colors.dark.text_muted, defaults.colors.dark.text_muted);
        assert!(config.cname.is_none());
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        assert!(val.get("guard").is_some());
        assert!(val.get("colors").is_some());
        assert!(val.get("cname").is_none());
    }
}
