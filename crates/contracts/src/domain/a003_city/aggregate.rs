use crate::domain::a002_province::aggregate::ProvinceId;
use crate::domain::common::OptionItem;
use crate::numeric_id;
use serde::{Deserialize, Serialize};

numeric_id!(
    /// City identifier
    CityId
);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    #[serde(rename = "provinceId")]
    pub province_id: ProvinceId,
    pub name: String,
}

impl From<City> for OptionItem {
    fn from(c: City) -> Self {
        OptionItem::new(c.id.0, c.name)
    }
}
