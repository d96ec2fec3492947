//! Batch assembly: validate each item, render the complete ones, and collect
//! per-item notices for the rest.

use crate::error::{ItemError, ItemKind};
use crate::items::{AclSpec, TopicSpec};
use crate::render::{render_acl_blocks, render_topic};

/// An item the assembler can turn into Terraform text.
pub trait BlockSource {
    const KIND: ItemKind;

    /// Required fields that are empty; an empty list means the item is complete.
    fn missing_fields(&self) -> Vec<&'static str>;

    /// Number of blocks `render` will produce.
    fn block_count(&self) -> usize;

    fn render(&self) -> String;
}

impl BlockSource for AclSpec {
    const KIND: ItemKind = ItemKind::Acl;

    fn missing_fields(&self) -> Vec<&'static str> {
        AclSpec::missing_fields(self)
    }

    fn block_count(&self) -> usize {
        self.operations.len()
    }

    fn render(&self) -> String {
        render_acl_blocks(self)
    }
}

impl BlockSource for TopicSpec {
    const KIND: ItemKind = ItemKind::Topic;

    fn missing_fields(&self) -> Vec<&'static str> {
        TopicSpec::missing_fields(self)
    }

    fn block_count(&self) -> usize {
        1
    }

    fn render(&self) -> String {
        render_topic(self)
    }
}

/// Result of one generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    /// Concatenated blocks of all complete items, in input order.
    pub text: String,
    /// One notice per incomplete item.
    pub notices: Vec<ItemError>,
    /// Number of blocks in `text`.
    pub blocks: usize,
}

impl Batch {
    pub fn is_clean(&self) -> bool {
        self.notices.is_empty()
    }
}

/// Assemble every item in order. Incomplete items are reported and skipped;
/// assembly never stops early.
pub fn assemble<T: BlockSource>(items: &[T]) -> Batch {
    let mut batch = Batch::default();

    for (i, item) in items.iter().enumerate() {
        let index = i + 1;
        let missing = item.missing_fields();
        if !missing.is_empty() {
            log::debug!("{} {} skipped: missing {}", T::KIND, index, missing.join(", "));
            batch.notices.push(ItemError::MissingRequiredField {
                kind: T::KIND,
                index,
                fields: missing,
            });
            continue;
        }

        let count = item.block_count();
        log::debug!("{} {} rendered {} block(s)", T::KIND, index, count);
        batch.text.push_str(&item.render());
        batch.blocks += count;
    }

    log::info!(
        "assembled {} {} block(s) from {} item(s), {} skipped",
        batch.blocks,
        T::KIND,
        items.len(),
        batch.notices.len()
    );
    batch
}

pub fn assemble_acls(items: &[AclSpec]) -> Batch {
    assemble(items)
}

pub fn assemble_topics(items: &[TopicSpec]) -> Batch {
    assemble(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ConfigParams, ResourceType};
    use crate::render::acl::render_acl_block;
    use crate::render::topic::render_topic_block;
    use pretty_assertions::assert_eq;

    fn acl(resource: &str, user: &str, ops: &[&str]) -> AclSpec {
        AclSpec::new(
            resource,
            ResourceType::Topic,
            user,
            ops.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn skips_incomplete_acl_and_keeps_order() {
        let items = vec![
            acl("orders", "svc-app", &["Read"]),
            acl("payments", "", &["Write"]),
            acl("invoices", "billing", &["Describe"]),
        ];
        let batch = assemble_acls(&items);

        let expected = format!(
            "{}{}",
            render_acl_block("orders", ResourceType::Topic, "svc-app", "Read"),
            render_acl_block("invoices", ResourceType::Topic, "billing", "Describe"),
        );
        assert_eq!(batch.text, expected);
        assert_eq!(batch.blocks, 2);
        assert_eq!(
            batch.notices,
            vec![ItemError::MissingRequiredField {
                kind: ItemKind::Acl,
                index: 2,
                fields: vec!["user"],
            }]
        );
        assert_eq!(batch.notices[0].to_string(), "Please fill all the fields for ACL 2.");
    }

    #[test]
    fn acl_operations_expand_per_item() {
        let items = vec![acl("orders", "svc-app", &["Read", "Write"]), acl("x", "y", &["All"])];
        let batch = assemble_acls(&items);

        assert!(batch.is_clean());
        assert_eq!(batch.blocks, 3);
        let ids: Vec<usize> = ["orders_Read_svc_app", "orders_Write_svc_app", "x_All_y"]
            .iter()
            .map(|id| batch.text.find(id).unwrap())
            .collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn acl_without_operations_is_incomplete() {
        let batch = assemble_acls(&[acl("", "svc", &[])]);
        assert_eq!(batch.text, "");
        assert_eq!(
            batch.notices,
            vec![ItemError::MissingRequiredField {
                kind: ItemKind::Acl,
                index: 1,
                fields: vec!["resource_name", "operations"],
            }]
        );
    }

    #[test]
    fn topics_mix_default_and_custom() {
        let params: ConfigParams = [("retention.ms", "60000")].into_iter().collect();
        let items = vec![
            TopicSpec::with_defaults("orders"),
            TopicSpec::with_defaults(""),
            TopicSpec::custom("payments", 6, params.clone()),
        ];
        let batch = assemble_topics(&items);

        let expected = format!(
            "{}{}",
            render_topic_block("orders", 3, false, &ConfigParams::new()),
            render_topic_block("payments", 6, true, &params),
        );
        assert_eq!(batch.text, expected);
        assert_eq!(batch.blocks, 2);
        assert_eq!(
            batch.notices,
            vec![ItemError::MissingRequiredField {
                kind: ItemKind::Topic,
                index: 2,
                fields: vec!["name"],
            }]
        );
        assert_eq!(
            batch.notices[0].to_string(),
            "Please enter a topic name for Topic 2."
        );
    }

    #[test]
    fn empty_input_gives_empty_batch() {
        let batch = assemble_topics(&[]);
        assert_eq!(batch, Batch::default());
    }
}
