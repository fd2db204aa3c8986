//! On-disk record formats for mount definitions.
//!
//! The configuration tree itself deserializes straight into
//! [`item_core::StowageConfig`]; only mount files need an intermediate
//! representation, because kind identifiers arrive escaped.

use serde::Deserialize;

/// One mount record as written in a mount definition file.
///
/// Kind identifiers use `_` as an escape for the reserved `.` character and
/// are un-escaped by the loader.
///
/// Example:
/// ```ron
/// [
///     (attach_node: "top", allowed_kinds: ["cargo_small"]),
///     (attach_node: "bottom", allowed_kinds: ["cargo_large", "cargo_small"]),
/// ]
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct MountRecord {
    pub attach_node: String,
    pub allowed_kinds: Vec<String>,
}
