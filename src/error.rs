//! Error types shared by the input layer and the batch assembler.

use std::fmt;
use thiserror::Error;

/// Which kind of item a notice refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Acl,
    Topic,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Acl => f.write_str("ACL"),
            ItemKind::Topic => f.write_str("Topic"),
        }
    }
}

/// Non-fatal, per-item problem found while assembling a batch.
///
/// `index` is 1-based, matching how items are numbered for the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("{}", missing_message(.kind, .index))]
    MissingRequiredField {
        kind: ItemKind,
        index: usize,
        fields: Vec<&'static str>,
    },
}

fn missing_message(kind: &ItemKind, index: &usize) -> String {
    match kind {
        ItemKind::Acl => format!("Please fill all the fields for ACL {}.", index),
        ItemKind::Topic => format!("Please enter a topic name for Topic {}.", index),
    }
}

/// Problems with raw input values that cannot be turned into item specs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown resource type {0:?} (expected Topic or Group)")]
    UnknownResourceType(String),

    #[error("unknown config type {0:?} (expected Default or Custom)")]
    UnknownConfigMode(String),

    #[error("config entry {0:?} must be written as key=value")]
    MalformedConfigEntry(String),
}
