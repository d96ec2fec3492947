//! Topic items (topics.json).
//!
//! JSON shape:
//! {
//!   "topics": [
//!     {
//!       "name": "orders",
//!       "config_type": "Custom",                  // or "Default" (the default)
//!       "partitions": 6,                          // Custom only; defaults to 3
//!       "config_params": { "retention.ms": "60000" },
//!       "extra_config": [ { "key": "min.insync.replicas", "value": "2" } ],
//!       "seed_defaults": true                     // start from the default config lines
//!     },
//!     ...
//!   ]
//! }
//!
//! In Custom mode the config map is built in three layers: the seed entries
//! (editable copies of the default config lines), then `config_params`, then
//! complete `extra_config` rows. Later layers replace earlier values by key.

use crate::Result;
use crate::diagnostics;
use crate::error::InputError;
use crate::items::null_as_default;

use anyhow::{Context, bail};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::str::FromStr;

/// Partition count used for Default-mode topics and as the Custom-mode default.
pub const DEFAULT_PARTITIONS: u32 = 3;

/// Config lines used when a topic has no custom config, and the seed entries
/// of a Custom-mode topic. These reference settings defined elsewhere in the
/// Terraform module and are emitted as-is.
pub const DEFAULT_CONFIG: [(&str, &str); 3] = [
    ("segment.ms", "local.segment_ms"),
    ("cleanup.policy", r#"local.cleanup.policy["delete"]"#),
    ("compression.type", r#"local.compression.type["gzip"]"#),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum ConfigMode {
    #[default]
    Default,
    Custom,
}

impl FromStr for ConfigMode {
    type Err = InputError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(ConfigMode::Default),
            "custom" => Ok(ConfigMode::Custom),
            _ => Err(InputError::UnknownConfigMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for ConfigMode {
    type Error = InputError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// A pending key/value row, merged into a topic's config only when complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
}

impl ConfigEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.key.is_empty() && !self.value.is_empty()
    }
}

/// Parses `key=value`; the value may itself contain `=`.
impl FromStr for ConfigEntry {
    type Err = InputError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((key, value)) => Ok(ConfigEntry::new(key.trim(), value.trim())),
            None => Err(InputError::MalformedConfigEntry(s.to_string())),
        }
    }
}

/// Ordered key -> value map for a topic's config block.
///
/// Keys are unique; re-inserting a key replaces the value in place so the
/// rendered line order stays stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigParams(Vec<(String, String)>);

impl ConfigParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Returns the previous value for `key`, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    /// Merge a row if both key and value are present. Returns whether it was merged.
    pub fn merge_entry(&mut self, entry: &ConfigEntry) -> bool {
        if !entry.is_complete() {
            log::debug!(
                "skipping incomplete config entry (key={:?}, value={:?})",
                entry.key,
                entry.value
            );
            return false;
        }
        self.insert(entry.key.clone(), entry.value.clone());
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = ConfigParams::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Build a Custom-mode config map: optional seed entries, then explicit
/// params, then complete extra rows.
pub fn build_custom_params<K, V>(
    seed_defaults: bool,
    params: impl IntoIterator<Item = (K, V)>,
    extra: &[ConfigEntry],
) -> ConfigParams
where
    K: Into<String>,
    V: Into<String>,
{
    let mut out: ConfigParams = if seed_defaults {
        DEFAULT_CONFIG.iter().copied().collect()
    } else {
        ConfigParams::new()
    };
    for (k, v) in params {
        out.insert(k, v);
    }
    for entry in extra {
        out.merge_entry(entry);
    }
    out
}

/// One topic request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSpec {
    pub name: String,
    pub partitions: u32,
    pub config_mode: ConfigMode,
    /// Consulted only in Custom mode.
    pub config_params: ConfigParams,
}

impl TopicSpec {
    /// Default-mode topic: fixed partitions and default config lines.
    pub fn with_defaults(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            partitions: DEFAULT_PARTITIONS,
            config_mode: ConfigMode::Default,
            config_params: ConfigParams::new(),
        }
    }

    pub fn custom(name: impl Into<String>, partitions: u32, config_params: ConfigParams) -> Self {
        Self {
            name: name.into(),
            partitions,
            config_mode: ConfigMode::Custom,
            config_params,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.config_mode == ConfigMode::Custom
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        if self.name.is_empty() {
            vec!["name"]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopicFile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<RawTopic>,
}

/// Raw topic shape as it appears in topics.json.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTopic {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default", alias = "config_mode")]
    pub config_type: ConfigMode,

    #[serde(default = "default_partitions")]
    pub partitions: u32,

    // Key order is kept (serde_json "preserve_order").
    #[serde(default, deserialize_with = "null_as_default")]
    pub config_params: serde_json::Map<String, Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub extra_config: Vec<ConfigEntry>,

    #[serde(default = "default_seed")]
    pub seed_defaults: bool,
}

fn default_partitions() -> u32 {
    DEFAULT_PARTITIONS
}

fn default_seed() -> bool {
    true
}

impl RawTopic {
    /// Validate and flatten into a `TopicSpec`. `index` is 1-based, for messages.
    pub fn into_spec(self, index: usize) -> Result<TopicSpec> {
        match self.config_type {
            ConfigMode::Default => {
                if self.partitions != DEFAULT_PARTITIONS {
                    log::debug!(
                        "topic {} uses Default config; ignoring partitions = {}",
                        index,
                        self.partitions
                    );
                }
                Ok(TopicSpec::with_defaults(self.name))
            }
            ConfigMode::Custom => {
                if self.partitions < 1 {
                    bail!(
                        "{}",
                        diagnostics::error_message(format!(
                            "topic {} has partitions = {}; must be at least 1",
                            index, self.partitions
                        ))
                    );
                }
                let params = self
                    .config_params
                    .into_iter()
                    .map(|(k, v)| (k, config_value_text(v)));
                let config_params = build_custom_params(self.seed_defaults, params, &self.extra_config);
                Ok(TopicSpec::custom(self.name, self.partitions, config_params))
            }
        }
    }
}

/// Config values are embedded verbatim; JSON strings keep their text, other
/// scalars use their JSON spelling (60000, true).
fn config_value_text(v: Value) -> String {
    match v {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Read topics.json into topic specs, preserving file order.
pub fn load_topic_file(path: &str) -> Result<Vec<TopicSpec>> {
    let text = fs::read_to_string(path)
        .with_context(|| diagnostics::error_message(format!("read topic file {}", path)))?;
    let file: TopicFile = serde_json::from_str(&text)
        .with_context(|| diagnostics::error_message(format!("parse topic file {}", path)))?;

    if file.topics.is_empty() {
        diagnostics::warn(format!("{} contains no topics", path));
    }
    log::info!("loaded {} topic item(s) from {}", file.topics.len(), path);

    file.topics
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            raw.into_spec(i + 1)
                .with_context(|| format!("invalid topic in {}", path))
        })
        .collect()
}
