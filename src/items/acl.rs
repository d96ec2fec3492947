//! ACL items (acls.json).
//!
//! JSON shape:
//! {
//!   "acls": [
//!     {
//!       "resource_name": "orders",
//!       "resource_type": "Topic",          // or "Group"; defaults to Topic
//!       "user": "svc-app",
//!       "operations": ["Read", "Write"]     // or "Read, Write"
//!     },
//!     ...
//!   ]
//! }
//!
//! Missing or `null` fields load as empty values; the batch assembler reports them.

use crate::Result;
use crate::diagnostics;
use crate::error::InputError;
use crate::items::null_as_default;

use anyhow::Context;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::str::FromStr;

/// Kafka resource an ACL applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum ResourceType {
    #[default]
    Topic,
    Group,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Topic => "Topic",
            ResourceType::Group => "Group",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = InputError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "topic" => Ok(ResourceType::Topic),
            "group" => Ok(ResourceType::Group),
            _ => Err(InputError::UnknownResourceType(s.to_string())),
        }
    }
}

impl TryFrom<String> for ResourceType {
    type Error = InputError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AclFile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub acls: Vec<RawAcl>,
}

/// Raw ACL shape as it appears in acls.json.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAcl {
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub resource_type: ResourceType,

    #[serde(default, deserialize_with = "null_as_default")]
    pub user: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub operations: OperationsSpec,
}

/// Operations in acls.json.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OperationsSpec {
    // operations: ["Read", "Write"]
    List(Vec<String>),
    // operations: "Read, Write" (as typed into a single text field)
    Joined(String),
}

impl Default for OperationsSpec {
    fn default() -> Self {
        OperationsSpec::List(Vec::new())
    }
}

impl OperationsSpec {
    pub fn into_operations(self) -> Vec<String> {
        match self {
            OperationsSpec::List(ops) => ops
                .into_iter()
                .map(|op| op.trim().to_string())
                .filter(|op| !op.is_empty())
                .collect(),
            OperationsSpec::Joined(s) => parse_operations(&s),
        }
    }
}

/// One ACL request: a principal, a resource and the operations to allow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclSpec {
    pub resource_name: String,
    pub resource_type: ResourceType,
    pub user: String,
    pub operations: Vec<String>,
}

impl AclSpec {
    pub fn new(
        resource_name: impl Into<String>,
        resource_type: ResourceType,
        user: impl Into<String>,
        operations: Vec<String>,
    ) -> Self {
        Self {
            resource_name: resource_name.into(),
            resource_type,
            user: user.into(),
            operations,
        }
    }

    /// Names of required fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.resource_name.is_empty() {
            missing.push("resource_name");
        }
        if self.user.is_empty() {
            missing.push("user");
        }
        if self.operations.is_empty() {
            missing.push("operations");
        }
        missing
    }
}

impl From<RawAcl> for AclSpec {
    fn from(raw: RawAcl) -> Self {
        Self {
            resource_name: raw.resource_name,
            resource_type: raw.resource_type,
            user: raw.user,
            operations: raw.operations.into_operations(),
        }
    }
}

/// Split a comma-separated operation list, trimming each entry.
///
/// "Read, Write ,Describe" => ["Read", "Write", "Describe"]
/// Empty pieces ("Read,,Write", trailing comma) are dropped.
pub fn parse_operations(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|op| !op.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read acls.json into ACL specs, preserving file order.
pub fn load_acl_file(path: &str) -> Result<Vec<AclSpec>> {
    let text = fs::read_to_string(path)
        .with_context(|| diagnostics::error_message(format!("read ACL file {}", path)))?;
    let file: AclFile = serde_json::from_str(&text)
        .with_context(|| diagnostics::error_message(format!("parse ACL file {}", path)))?;

    if file.acls.is_empty() {
        diagnostics::warn(format!("{} contains no ACLs", path));
    }
    log::info!("loaded {} ACL item(s) from {}", file.acls.len(), path);

    Ok(file.acls.into_iter().map(AclSpec::from).collect())
}
