use crate::ident::sanitize;
use crate::items::{ConfigParams, DEFAULT_CONFIG, DEFAULT_PARTITIONS, TopicSpec};
use crate::render::template::fill;

const TOPIC_TEMPLATE: &str = r#"
resource "kafka_topic" "__ID__" {
    name = "__NAME__"
    replication_factor = local.replication_factor
    partitions = __PARTITIONS__
    config = {
__CONFIG__    }
    lifecycle {
        prevent_destroy = true
    }
}
"#;

/// Render one `kafka_topic` block.
///
/// Without `custom` the partition count is always 3 and the config block holds
/// the default lines. With `custom`, each param becomes `"<key>" = <value>`
/// with the value unquoted; an empty map falls back to the default lines.
pub fn render_topic_block(
    topic_name: &str,
    partitions: u32,
    custom: bool,
    config_params: &ConfigParams,
) -> String {
    let partitions = if custom { partitions } else { DEFAULT_PARTITIONS };

    let config = if custom && !config_params.is_empty() {
        config_lines(config_params.iter())
    } else {
        config_lines(DEFAULT_CONFIG.iter().copied())
    };

    fill(
        TOPIC_TEMPLATE,
        &[
            ("ID", sanitize(topic_name).as_str()),
            ("NAME", topic_name),
            ("PARTITIONS", partitions.to_string().as_str()),
            ("CONFIG", config.as_str()),
        ],
    )
}

pub fn render_topic(spec: &TopicSpec) -> String {
    render_topic_block(
        &spec.name,
        spec.partitions,
        spec.is_custom(),
        &spec.config_params,
    )
}

fn config_lines<'a>(entries: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    entries
        .map(|(k, v)| format!("        \"{}\" = {}\n", k, v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_form() {
        let out = render_topic_block("orders.v1", 12, false, &ConfigParams::new());
        let expected = r#"
resource "kafka_topic" "orders_v1" {
    name = "orders.v1"
    replication_factor = local.replication_factor
    partitions = 3
    config = {
        "segment.ms" = local.segment_ms
        "cleanup.policy" = local.cleanup.policy["delete"]
        "compression.type" = local.compression.type["gzip"]
    }
    lifecycle {
        prevent_destroy = true
    }
}
"#;
        assert_eq!(out, expected);
    }

    #[test]
    fn default_form_ignores_params() {
        let params: ConfigParams = [("retention.ms", "60000")].into_iter().collect();
        let out = render_topic_block("orders", 8, false, &params);
        assert!(out.contains("partitions = 3\n"));
        assert!(!out.contains("retention.ms"));
    }

    #[test]
    fn custom_form() {
        let params: ConfigParams = [("retention.ms", "60000")].into_iter().collect();
        let out = render_topic_block("orders", 6, true, &params);
        let expected = r#"
resource "kafka_topic" "orders" {
    name = "orders"
    replication_factor = local.replication_factor
    partitions = 6
    config = {
        "retention.ms" = 60000
    }
    lifecycle {
        prevent_destroy = true
    }
}
"#;
        assert_eq!(out, expected);
        assert!(!out.contains("segment.ms"));
    }

    #[test]
    fn custom_lines_follow_map_order() {
        let params: ConfigParams = [("z", "\"zz\""), ("a", "local.a")].into_iter().collect();
        let out = render_topic_block("t", 1, true, &params);
        assert!(out.contains("        \"z\" = \"zz\"\n        \"a\" = local.a\n    }"));
    }

    #[test]
    fn custom_with_empty_params_uses_default_lines() {
        let out = render_topic_block("orders", 6, true, &ConfigParams::new());
        assert!(out.contains("partitions = 6\n"));
        assert!(out.contains(r#""segment.ms" = local.segment_ms"#));
    }

    #[test]
    fn renders_from_topic_spec() {
        let spec = TopicSpec::with_defaults("payments");
        assert_eq!(
            render_topic(&spec),
            render_topic_block("payments", 3, false, &ConfigParams::new())
        );
    }
}
