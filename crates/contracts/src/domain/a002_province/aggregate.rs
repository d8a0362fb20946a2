use crate::domain::a001_country::aggregate::CountryId;
use crate::domain::common::OptionItem;
use crate::numeric_id;
use serde::{Deserialize, Serialize};

numeric_id!(
    /// Province identifier
    ProvinceId
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Province {
    pub id: ProvinceId,
    #[serde(rename = "countryId")]
    pub country_id: CountryId,
    pub name: String,
}

impl From<Province> for OptionItem {
    fn from(p: Province) -> Self {
        OptionItem::new(p.id.0, p.name)
    }
}
