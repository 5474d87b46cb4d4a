use workspace_uri::WorkspaceUriResolver;

/// Resolver for files of `tests/examples/servers/workspace`.
pub fn uri_for() -> WorkspaceUriResolver {
    WorkspaceUriResolver::from_anchor(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/common/mod.rs"
    ))
    .unwrap()
}
