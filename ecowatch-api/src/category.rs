use uuid::Uuid;

use crate::STUB_UUID;

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
    pub fn stub() -> CategoryId {
        CategoryId(STUB_UUID)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,

    /// Hex color used for map pins and dashboard charts.
    pub color: String,
}
