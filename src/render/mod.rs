//! Terraform (HCL) rendering for Kafka resources.
//!
//! Every block starts with a newline and ends with `}` plus a newline, so
//! concatenated blocks are separated by one blank line.

pub mod acl;
pub mod template;
pub mod topic;

pub use acl::render_acl_blocks;
pub use topic::render_topic;
