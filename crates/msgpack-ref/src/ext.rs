//! Extension payloads and the reserved extension type registry.

/// Extension type reserved by the format for timestamps.
pub const TIMESTAMP_EXT_TYPE: i8 = -1;

/// Application-defined extension: a signed 8-bit type tag and an opaque
/// payload.
///
/// Tag [`TIMESTAMP_EXT_TYPE`] belongs to [`crate::Timestamp`]; building an
/// `Extension` with it is a caller error. The encoder writes such a value
/// verbatim and never reinterprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Extension {
    pub tag: i8,
    pub data: Vec<u8>,
}

impl Extension {
    pub fn new(tag: i8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            tag,
            data: data.into(),
        }
    }

    /// `true` when the tag collides with a format-reserved type.
    pub fn is_reserved(&self) -> bool {
        self.tag == TIMESTAMP_EXT_TYPE
    }
}
