//! Input layer: JSON schemas + validated in-memory item specs.
//!
//! This module is intentionally separate from rendering and batch assembly.
//! It owns:
//! - ACL items (acls.json, single-item CLI flags)
//! - Topic items (topics.json, config entries and custom-mode seeding)

pub mod acl;
pub mod topic;

pub use acl::{AclSpec, ResourceType, load_acl_file, parse_operations};
pub use topic::{
    ConfigEntry, ConfigParams, DEFAULT_CONFIG, DEFAULT_PARTITIONS, TopicSpec, build_custom_params,
    load_topic_file,
};

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
