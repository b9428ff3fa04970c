use vcon_core::VconId;

/// Render a record identifier into a Redis key with the given prefix.
///
/// The format is `prefix:uuid`.
pub fn render_key(prefix: &str, id: &VconId) -> String {
    format!("{prefix}:{id}")
}
