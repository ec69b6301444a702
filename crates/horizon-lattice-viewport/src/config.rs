//! Converter configuration.
//!
//! [`Config`] is built once, either with the builder methods or from a JSON
//! or TOML document, and is read-only afterwards.
//!
//! # Example
//!
//! ```
//! use horizon_lattice_viewport::config::{Config, FileFilter};
//!
//! let config = Config::new()
//!     .base_width(375.0)
//!     .precision(3)
//!     .prop_list(["*", "!border*"])
//!     .exclude_filter(FileFilter::single("/node_modules/").unwrap());
//!
//! assert_eq!(config.base_width, 375.0);
//! assert_eq!(config.target_unit, "vw");
//! ```
//!
//! The same settings as a TOML file:
//!
//! ```toml
//! baseWidth = 375
//! precision = 3
//! propList = ["*", "!border*"]
//! excludeFilter = "/node_modules/"
//! ```

use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

/// Largest accepted `precision`; `f64` carries no more significant digits.
pub const MAX_PRECISION: u32 = 15;

/// File path filter: one pattern or a list of patterns, any of which may
/// match.
#[derive(Debug, Clone)]
pub enum FileFilter {
    /// A single regular expression.
    Single(Regex),
    /// Several regular expressions, OR-ed together.
    List(Vec<Regex>),
}

impl FileFilter {
    /// Compile a single-pattern filter.
    pub fn single(pattern: &str) -> Result<Self> {
        compile(pattern).map(Self::Single)
    }

    /// Compile a list filter.
    pub fn list<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns
            .into_iter()
            .map(|pattern| compile(pattern.as_ref()))
            .collect::<Result<Vec<_>>>()
            .map(Self::List)
    }

    /// Check a file path against the filter.
    pub fn matches(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        match self {
            FileFilter::Single(regex) => regex.is_match(&path),
            FileFilter::List(regexes) => regexes.iter().any(|regex| regex.is_match(&path)),
        }
    }

    /// Build a filter from a loosely typed option value.
    ///
    /// Accepts a string or an array of strings; `null` means no filter.
    pub fn from_value(option: &str, value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::String(pattern) => Self::single(pattern).map(Some),
            Value::Array(items) => {
                let patterns = items
                    .iter()
                    .map(|item| {
                        item.as_str().ok_or_else(|| {
                            Error::invalid_filter(option, format!("array contains {}", item))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Self::list(patterns).map(Some)
            }
            other => Err(Error::invalid_filter(option, format!("got {}", other))),
        }
    }
}

/// Selector blacklist entry.
#[derive(Debug, Clone)]
pub enum SelectorFilter {
    /// Skip selectors containing this text.
    Literal(String),
    /// Skip selectors matching this regular expression.
    Pattern(Regex),
}

impl SelectorFilter {
    /// Create a literal substring entry.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Compile a pattern entry.
    pub fn pattern(pattern: &str) -> Result<Self> {
        compile(pattern).map(Self::Pattern)
    }

    /// Parse a config file entry: `/pattern/` compiles a regex, anything
    /// else is a literal substring.
    pub fn parse(entry: &str) -> Result<Self> {
        match entry
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
        {
            Some(pattern) if entry.len() >= 2 => Self::pattern(pattern),
            _ => Ok(Self::literal(entry)),
        }
    }

    /// Check a selector against the entry.
    pub fn matches(&self, selector: &str) -> bool {
        match self {
            SelectorFilter::Literal(text) => selector.contains(text.as_str()),
            SelectorFilter::Pattern(regex) => regex.is_match(selector),
        }
    }
}

impl From<&str> for SelectorFilter {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::invalid_pattern(pattern, e))
}

/// Converter settings. Every field has a default; see [`Config::default`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Unit to convert from.
    pub source_unit: String,
    /// Reference viewport width in pixels.
    pub base_width: f64,
    /// Reference viewport height in pixels.
    pub base_height: f64,
    /// Fractional digits kept in converted values, at most [`MAX_PRECISION`].
    pub precision: u32,
    /// Unit emitted for converted values.
    pub target_unit: String,
    /// Unit emitted for properties whose name contains `font`.
    pub font_target_unit: String,
    /// Rules whose selector matches any entry are left alone.
    pub selector_blacklist: Vec<SelectorFilter>,
    /// Property filter tokens.
    pub prop_list: Vec<String>,
    /// Values at or below this many pixels are not converted.
    pub min_pixel_value: f64,
    /// Convert rules nested in at-rules with params.
    pub convert_in_media_query: bool,
    /// Overwrite values instead of adding a converted copy after them.
    pub replace_in_place: bool,
    /// Emit an `@media (orientation: landscape)` block.
    pub landscape_enabled: bool,
    /// Unit emitted in landscape output.
    pub landscape_unit: String,
    /// Reference width for landscape output.
    pub landscape_width: f64,
    /// Only convert rules from files matching this filter.
    pub include_filter: Option<FileFilter>,
    /// Never convert rules from files matching this filter.
    pub exclude_filter: Option<FileFilter>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_unit: "px".to_string(),
            base_width: 320.0,
            base_height: 568.0,
            precision: 5,
            target_unit: "vw".to_string(),
            font_target_unit: "vw".to_string(),
            selector_blacklist: vec![],
            prop_list: vec!["*".to_string()],
            min_pixel_value: 1.0,
            convert_in_media_query: false,
            replace_in_place: true,
            landscape_enabled: false,
            landscape_unit: "vw".to_string(),
            landscape_width: 568.0,
            include_filter: None,
            exclude_filter: None,
        }
    }
}

impl Config {
    /// Create a configuration with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unit to convert from.
    pub fn source_unit(mut self, unit: impl Into<String>) -> Self {
        self.source_unit = unit.into();
        self
    }

    /// Set the reference viewport width.
    pub fn base_width(mut self, width: f64) -> Self {
        self.base_width = width;
        self
    }

    /// Set the reference viewport height.
    pub fn base_height(mut self, height: f64) -> Self {
        self.base_height = height;
        self
    }

    /// Set the number of fractional digits.
    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Set the output unit.
    pub fn target_unit(mut self, unit: impl Into<String>) -> Self {
        self.target_unit = unit.into();
        self
    }

    /// Set the output unit for font properties.
    pub fn font_target_unit(mut self, unit: impl Into<String>) -> Self {
        self.font_target_unit = unit.into();
        self
    }

    /// Add a selector blacklist entry.
    pub fn blacklist(mut self, entry: impl Into<SelectorFilter>) -> Self {
        self.selector_blacklist.push(entry.into());
        self
    }

    /// Replace the property filter tokens.
    pub fn prop_list<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prop_list = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Set the conversion threshold.
    pub fn min_pixel_value(mut self, value: f64) -> Self {
        self.min_pixel_value = value;
        self
    }

    /// Enable or disable conversion inside media queries.
    pub fn convert_in_media_query(mut self, enabled: bool) -> Self {
        self.convert_in_media_query = enabled;
        self
    }

    /// Choose between overwriting values and inserting converted copies.
    pub fn replace_in_place(mut self, enabled: bool) -> Self {
        self.replace_in_place = enabled;
        self
    }

    /// Enable or disable the landscape block.
    pub fn landscape(mut self, enabled: bool) -> Self {
        self.landscape_enabled = enabled;
        self
    }

    /// Set the landscape output unit.
    pub fn landscape_unit(mut self, unit: impl Into<String>) -> Self {
        self.landscape_unit = unit.into();
        self
    }

    /// Set the landscape reference width.
    pub fn landscape_width(mut self, width: f64) -> Self {
        self.landscape_width = width;
        self
    }

    /// Set the include filter.
    pub fn include_filter(mut self, filter: FileFilter) -> Self {
        self.include_filter = Some(filter);
        self
    }

    /// Set the exclude filter.
    pub fn exclude_filter(mut self, filter: FileFilter) -> Self {
        self.exclude_filter = Some(filter);
        self
    }

    /// Check values the type system cannot.
    pub fn validate(&self) -> Result<()> {
        if self.source_unit.is_empty() {
            return Err(Error::config("sourceUnit must not be empty"));
        }
        if self.precision > MAX_PRECISION {
            return Err(Error::config(format!(
                "precision must be at most {}, got {}",
                MAX_PRECISION, self.precision
            )));
        }
        if !(self.base_width.is_finite() && self.base_width > 0.0) {
            return Err(Error::config(format!(
                "baseWidth must be a positive number, got {}",
                self.base_width
            )));
        }
        if self.landscape_enabled && !(self.landscape_width.is_finite() && self.landscape_width > 0.0) {
            return Err(Error::config(format!(
                "landscapeWidth must be a positive number, got {}",
                self.landscape_width
            )));
        }
        Ok(())
    }

    /// Parse a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(json).map_err(|e| Error::config(e.to_string()))?;
        file.into_config()
    }

    /// Parse a TOML configuration document.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(toml).map_err(|e| Error::config(e.to_string()))?;
        file.into_config()
    }

    /// Load a `.json` or `.toml` configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            _ => Err(Error::config(format!(
                "unsupported configuration format: {}",
                path.display()
            ))),
        }
    }
}

/// On-disk form of [`Config`]. Older option names are accepted as aliases.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ConfigFile {
    #[serde(alias = "unitToConvert")]
    source_unit: Option<String>,
    #[serde(alias = "viewportWidth")]
    base_width: Option<f64>,
    #[serde(alias = "viewportHeight")]
    base_height: Option<f64>,
    #[serde(alias = "unitPrecision")]
    precision: Option<u32>,
    #[serde(alias = "viewportUnit")]
    target_unit: Option<String>,
    #[serde(alias = "fontViewportUnit")]
    font_target_unit: Option<String>,
    #[serde(alias = "selectorBlackList")]
    selector_blacklist: Option<Vec<String>>,
    prop_list: Option<Vec<String>>,
    min_pixel_value: Option<f64>,
    #[serde(alias = "mediaQuery")]
    convert_in_media_query: Option<bool>,
    #[serde(alias = "replace")]
    replace_in_place: Option<bool>,
    #[serde(alias = "landscape")]
    landscape_enabled: Option<bool>,
    landscape_unit: Option<String>,
    landscape_width: Option<f64>,
    #[serde(alias = "include")]
    include_filter: Option<Value>,
    #[serde(alias = "exclude")]
    exclude_filter: Option<Value>,
}

impl ConfigFile {
    fn into_config(self) -> Result<Config> {
        let defaults = Config::default();

        let selector_blacklist = self
            .selector_blacklist
            .unwrap_or_default()
            .iter()
            .map(|entry| SelectorFilter::parse(entry))
            .collect::<Result<Vec<_>>>()?;

        let include_filter = match &self.include_filter {
            Some(value) => FileFilter::from_value("include", value)?,
            None => None,
        };
        let exclude_filter = match &self.exclude_filter {
            Some(value) => FileFilter::from_value("exclude", value)?,
            None => None,
        };

        Ok(Config {
            source_unit: self.source_unit.unwrap_or(defaults.source_unit),
            base_width: self.base_width.unwrap_or(defaults.base_width),
            base_height: self.base_height.unwrap_or(defaults.base_height),
            precision: self.precision.unwrap_or(defaults.precision),
            target_unit: self.target_unit.unwrap_or(defaults.target_unit),
            font_target_unit: self.font_target_unit.unwrap_or(defaults.font_target_unit),
            selector_blacklist,
            prop_list: self.prop_list.unwrap_or(defaults.prop_list),
            min_pixel_value: self.min_pixel_value.unwrap_or(defaults.min_pixel_value),
            convert_in_media_query: self
                .convert_in_media_query
                .unwrap_or(defaults.convert_in_media_query),
            replace_in_place: self.replace_in_place.unwrap_or(defaults.replace_in_place),
            landscape_enabled: self.landscape_enabled.unwrap_or(defaults.landscape_enabled),
            landscape_unit: self.landscape_unit.unwrap_or(defaults.landscape_unit),
            landscape_width: self.landscape_width.unwrap_or(defaults.landscape_width),
            include_filter,
            exclude_filter,
        })
    }
}
