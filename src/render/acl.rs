use crate::ident::block_id;
use crate::items::{AclSpec, ResourceType};
use crate::render::template::fill;

const ACL_TEMPLATE: &str = r#"
resource "kafka_acl" "__ID__" {
    resource_name = "__NAME__"
    resource_type = "__TYPE__"
    acl_principal = "User:__USER__"
    acl_host = "*"
    acl_operation = "__OP__"
    acl_permission = "Allow"
}
"#;

/// Render one `kafka_acl` block allowing `user` to perform `operation`.
///
/// The block label is `<resource>_<operation>_<user>`, each part sanitized;
/// the body embeds the raw values.
pub fn render_acl_block(
    resource_name: &str,
    resource_type: ResourceType,
    user: &str,
    operation: &str,
) -> String {
    let id = block_id(&[resource_name, operation, user]);
    fill(
        ACL_TEMPLATE,
        &[
            ("ID", id.as_str()),
            ("NAME", resource_name),
            ("TYPE", resource_type.as_str()),
            ("USER", user),
            ("OP", operation),
        ],
    )
}

/// One block per operation, in the order the operations were given.
pub fn render_acl_blocks(spec: &AclSpec) -> String {
    spec.operations
        .iter()
        .map(|op| render_acl_block(&spec.resource_name, spec.resource_type, &spec.user, op))
        .collect()
}
