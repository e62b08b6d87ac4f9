//! Stock-keeping unit codes for tiles.

use uuid::Uuid;

/// Prefix shared by every generated SKU.
pub const SKU_PREFIX: &str = "TL";

/// Generate a new SKU of the form `TL-XXXXXXXX` (uppercase hex).
///
/// Uniqueness is ultimately enforced by `uq_tiles_sku`.
pub fn generate_sku() -> String {
    let simple = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{SKU_PREFIX}-{}", &simple[..8])
}
