//! Dashboard configuration: YAML normalization into a fully-defaulted model
//!
//! Loading is two-staged. The raw text is parsed into a generic
//! [`serde_yaml::Value`] tree first, and [`normalize`] then walks that tree
//! field by field, coercing what it can and substituting defaults for the
//! rest. A malformed entry is repaired, never rejected.

use std::path::Path;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::theme::DEFAULT_THEME;
use crate::HostmonkError;

pub const DEFAULT_VERSION: &str = "1.0";
pub const DEFAULT_SERVICE_NAME: &str = "Unnamed Service";
pub const DEFAULT_ICON: &str = "default";
pub const DEFAULT_URL: &str = "#";
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 30_000;

/// A monitored self-hosted application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub name: String,
    pub icon: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub ping: bool,
    pub tags: Vec<String>,
}

/// Display and polling settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub show_categories: bool,
    pub compact_mode: bool,
    #[serde(rename = "refreshInterval")]
    pub refresh_interval_ms: u64,
    pub enable_ping: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_categories: true,
            compact_mode: false,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            enable_ping: true,
        }
    }
}

/// Normalized dashboard configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardConfig {
    pub version: String,
    /// Theme name. Unrecognized names are kept and resolved by
    /// [`crate::theme::get_theme`].
    pub theme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub categories: Vec<String>,
    pub services: Vec<Service>,
    pub settings: Settings,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        default_config()
    }
}

/// Built-in configuration used when the config file cannot be loaded
pub fn default_config() -> DashboardConfig {
    DashboardConfig {
        version: DEFAULT_VERSION.to_string(),
        theme: DEFAULT_THEME.to_string(),
        title: Some("HostMonk Dashboard".to_string()),
        categories: Vec::new(),
        services: vec![Service {
            name: "Example Service".to_string(),
            icon: DEFAULT_ICON.to_string(),
            url: DEFAULT_URL.to_string(),
            description: Some("Add your services in config/services.yaml".to_string()),
            category: Some("Getting Started".to_string()),
            ping: false,
            tags: Vec::new(),
        }],
        settings: Settings::default(),
    }
}

/// Parse raw YAML text into a [`DashboardConfig`].
///
/// Fails with [`HostmonkError::ConfigParse`] only when the text is not YAML
/// or its root is not a mapping. Missing and wrong-typed fields fall back to
/// their defaults.
pub fn normalize(raw: &str) -> crate::Result<DashboardConfig> {
    let document: Value =
        serde_yaml::from_str(raw).map_err(|e| HostmonkError::ConfigParse(e.to_string()))?;

    match document {
        Value::Mapping(root) => Ok(normalize_document(&root)),
        other => Err(HostmonkError::ConfigParse(format!(
            "expected a mapping at the document root, found {}",
            value_kind(&other)
        ))),
    }
}

fn normalize_document(root: &Mapping) -> DashboardConfig {
    let services = match root.get("services") {
        Some(Value::Sequence(entries)) => entries.iter().map(normalize_service).collect(),
        Some(other) if !other.is_null() => {
            tracing::warn!(
                "Ignoring 'services': expected a sequence, found {}",
                value_kind(other)
            );
            Vec::new()
        }
        _ => Vec::new(),
    };

    DashboardConfig {
        version: non_empty_or(root.get("version"), DEFAULT_VERSION),
        theme: non_empty_or(root.get("theme"), DEFAULT_THEME),
        title: scalar_string(root.get("title")),
        categories: string_list(root.get("categories")),
        services,
        settings: normalize_settings(root.get("settings")),
    }
}

fn normalize_service(entry: &Value) -> Service {
    let empty = Mapping::new();
    let fields = match entry {
        Value::Mapping(m) => m,
        other => {
            tracing::warn!(
                "Service entry is {} rather than a mapping, using defaults",
                value_kind(other)
            );
            &empty
        }
    };

    Service {
        name: non_empty_or(fields.get("name"), DEFAULT_SERVICE_NAME),
        icon: non_empty_or(fields.get("icon"), DEFAULT_ICON),
        url: non_empty_or(fields.get("url"), DEFAULT_URL),
        description: scalar_string(fields.get("description")),
        category: scalar_string(fields.get("category")),
        ping: unless_false(fields.get("ping")),
        tags: string_list(fields.get("tags")),
    }
}

fn normalize_settings(value: Option<&Value>) -> Settings {
    let empty = Mapping::new();
    let fields = match value {
        Some(Value::Mapping(m)) => m,
        _ => &empty,
    };

    Settings {
        show_categories: unless_false(fields.get("showCategories")),
        compact_mode: matches!(fields.get("compactMode"), Some(Value::Bool(true))),
        refresh_interval_ms: fields
            .get("refreshInterval")
            .and_then(Value::as_u64)
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_REFRESH_INTERVAL_MS),
        enable_ping: unless_false(fields.get("enablePing")),
    }
}

/// True unless the value is explicitly `false`; a missing key counts as true
fn unless_false(value: Option<&Value>) -> bool {
    !matches!(value, Some(Value::Bool(false)))
}

/// Numbers come back in canonical form: `1.10` reads as `"1.1"`
fn scalar_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(Some(&tagged.value)),
        _ => None,
    }
}

fn non_empty_or(value: Option<&Value>, default: &str) -> String {
    scalar_string(value)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(|v| scalar_string(Some(v)))
            .collect(),
        _ => Vec::new(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Whether a service has the fields needed to render a usable card.
///
/// Informational only: [`normalize`] already substitutes defaults, this is
/// for callers that want a stricter pass afterwards.
pub fn is_valid(service: &Service) -> bool {
    !service.name.is_empty() && !service.icon.is_empty() && !service.url.is_empty()
}

/// Render a config back into its YAML document form
pub fn to_yaml(config: &DashboardConfig) -> crate::Result<String> {
    Ok(serde_yaml::to_string(config)?)
}

/// Load and normalize configuration from a YAML file
pub fn load_config(path: &Path) -> crate::Result<DashboardConfig> {
    let content = std::fs::read_to_string(path)?;
    normalize(&content)
}

/// Load configuration, falling back to [`default_config`] on any failure
pub fn load_config_or_default(path: &Path) -> DashboardConfig {
    match load_config(path) {
        Ok(config) => {
            tracing::debug!(
                "Loaded {} services from {:?}",
                config.services.len(),
                path
            );
            config
        }
        Err(e) => {
            tracing::warn!(
                "Failed to load config {:?}: {}. Using default configuration.",
                path,
                e
            );
            default_config()
        }
    }
}
