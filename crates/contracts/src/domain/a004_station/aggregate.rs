use crate::domain::a003_city::aggregate::CityId;
use crate::domain::common::{Identifier, OptionItem};
use crate::numeric_id;
use serde::{Deserialize, Serialize};

numeric_id!(
    /// Station identifier
    StationId
);

// ============================================================================
// Read model
// ============================================================================

/// Bus station. The list endpoint returns the resolved location path so
/// that the edit form can be hydrated without extra lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub country: OptionItem,
    pub province: OptionItem,
    pub city: OptionItem,
}

impl Station {
    pub fn city_id(&self) -> CityId {
        CityId(self.city.id)
    }

    /// Country → province → city, in chain order
    pub fn location_path(&self) -> Vec<OptionItem> {
        vec![
            self.country.clone(),
            self.province.clone(),
            self.city.clone(),
        ]
    }
}

impl From<Station> for OptionItem {
    fn from(s: Station) -> Self {
        OptionItem::new(s.id.0, s.name)
    }
}

// ============================================================================
// Form payload
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationDto {
    pub id: Option<Identifier>,
    pub name: String,
    pub address: Option<String>,
    #[serde(rename = "countryId")]
    pub country_id: Option<Identifier>,
    #[serde(rename = "provinceId")]
    pub province_id: Option<Identifier>,
    #[serde(rename = "cityId")]
    pub city_id: Option<Identifier>,
}

impl StationDto {
    /// Copy the ids of a (possibly partial) country → province → city path.
    pub fn apply_location_path(&mut self, path: &[OptionItem]) {
        self.country_id = path.first().map(|i| i.id);
        self.province_id = path.get(1).map(|i| i.id);
        self.city_id = path.get(2).map(|i| i.id);
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Station name is required".into());
        }
        if self.country_id.is_none() {
            return Err("Country is required".into());
        }
        if self.province_id.is_none() {
            return Err("Province is required".into());
        }
        if self.city_id.is_none() {
            return Err("City is required".into());
        }
        Ok(())
    }
}

impl From<&Station> for StationDto {
    fn from(s: &Station) -> Self {
        Self {
            id: Some(s.id.0),
            name: s.name.clone(),
            address: s.address.clone(),
            country_id: Some(s.country.id),
            province_id: Some(s.province.id),
            city_id: Some(s.city.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_path_fails_validation() {
        let mut dto = StationDto {
            name: "Central".into(),
            ..Default::default()
        };
        dto.apply_location_path(&[OptionItem::new(1, "Afghanistan"), OptionItem::new(10, "Kabul")]);

        assert_eq!(dto.country_id, Some(1));
        assert_eq!(dto.province_id, Some(10));
        assert_eq!(dto.city_id, None);
        assert_eq!(dto.validate(), Err("City is required".to_string()));
    }

    #[test]
    fn test_shorter_path_clears_deeper_ids() {
        let mut dto = StationDto {
            name: "Central".into(),
            country_id: Some(1),
            province_id: Some(10),
            city_id: Some(100),
            ..Default::default()
        };
        dto.apply_location_path(&[OptionItem::new(2, "Pakistan")]);

        assert_eq!(dto.country_id, Some(2));
        assert_eq!(dto.province_id, None);
        assert_eq!(dto.city_id, None);
    }

    #[test]
    fn test_station_deserializes_from_api_shape() {
        let json = r#"{
            "id": 7,
            "name": "Kabul Central",
            "country": {"id": 1, "label": "Afghanistan"},
            "province": {"id": 10, "label": "Kabul"},
            "city": {"id": 100, "label": "Kabul City"}
        }"#;
        let station: Station = serde_json::from_str(json).unwrap();
        assert_eq!(station.id, StationId(7));
        assert_eq!(station.address, None);
        assert_eq!(station.location_path().len(), 3);
        assert_eq!(StationDto::from(&station).validate(), Ok(()));
    }
}
