use crate::domain::common::OptionItem;
use crate::numeric_id;
use serde::{Deserialize, Serialize};

numeric_id!(
    /// Country identifier
    CountryId
);

/// Country, the root of the location hierarchy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
    /// ISO 3166-1 alpha-2 code
    #[serde(default)]
    pub code: Option<String>,
}

impl From<Country> for OptionItem {
    fn from(c: Country) -> Self {
        OptionItem::new(c.id.0, c.name)
    }
}
