use serde::Serialize;

/// DB-API column description: `(name, type_code, display_size, internal_size,
/// precision, scale, null_ok)`.
///
/// Only the name is known; the server response carries no type metadata, so
/// the remaining six fields are always `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescription {
    pub name: String,
    pub type_code: Option<String>,
    pub display_size: Option<u64>,
    pub internal_size: Option<u64>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub null_ok: Option<bool>,
}

impl ColumnDescription {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_code: None,
            display_size: None,
            internal_size: None,
            precision: None,
            scale: None,
            null_ok: None,
        }
    }
}
