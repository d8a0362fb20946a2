use crate::domain::common::{Identifier, OptionItem};
use crate::numeric_id;
use serde::{Deserialize, Serialize};

numeric_id!(
    /// Route identifier
    RouteId
);

// ============================================================================
// Read model
// ============================================================================

/// Fully resolved country → province → city → station path of one route end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEndpoint {
    pub country: OptionItem,
    pub province: OptionItem,
    pub city: OptionItem,
    pub station: OptionItem,
}

impl RouteEndpoint {
    pub fn path(&self) -> Vec<OptionItem> {
        vec![
            self.country.clone(),
            self.province.clone(),
            self.city.clone(),
            self.station.clone(),
        ]
    }

    pub fn display(&self) -> String {
        format!("{}, {}", self.station.label, self.city.label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub origin: RouteEndpoint,
    pub destination: RouteEndpoint,
    /// Base ticket price
    pub price: f64,
    #[serde(rename = "distanceKm", default)]
    pub distance_km: Option<f64>,
}

// ============================================================================
// Form payload
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointDto {
    #[serde(rename = "countryId")]
    pub country_id: Option<Identifier>,
    #[serde(rename = "provinceId")]
    pub province_id: Option<Identifier>,
    #[serde(rename = "cityId")]
    pub city_id: Option<Identifier>,
    #[serde(rename = "stationId")]
    pub station_id: Option<Identifier>,
}

impl EndpointDto {
    pub fn from_path(path: &[OptionItem]) -> Self {
        Self {
            country_id: path.first().map(|i| i.id),
            province_id: path.get(1).map(|i| i.id),
            city_id: path.get(2).map(|i| i.id),
            station_id: path.get(3).map(|i| i.id),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.country_id.is_some()
            && self.province_id.is_some()
            && self.city_id.is_some()
            && self.station_id.is_some()
    }
}

impl From<&RouteEndpoint> for EndpointDto {
    fn from(e: &RouteEndpoint) -> Self {
        Self::from_path(&e.path())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteDto {
    pub id: Option<Identifier>,
    pub origin: EndpointDto,
    pub destination: EndpointDto,
    pub price: f64,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

impl RouteDto {
    pub fn validate(&self) -> Result<(), String> {
        if !self.origin.is_complete() {
            return Err("Origin station is required".into());
        }
        if !self.destination.is_complete() {
            return Err("Destination station is required".into());
        }
        if self.origin.station_id == self.destination.station_id {
            return Err("Origin and destination must differ".into());
        }
        if self.price.is_nan() || self.price <= 0.0 {
            return Err("Price must be greater than zero".into());
        }
        Ok(())
    }
}

impl From<&Route> for RouteDto {
    fn from(r: &Route) -> Self {
        Self {
            id: Some(r.id.0),
            origin: (&r.origin).into(),
            destination: (&r.destination).into(),
            price: r.price,
            distance_km: r.distance_km,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(ids: &[i64]) -> Vec<OptionItem> {
        ids.iter().map(|id| OptionItem::new(*id, id.to_string())).collect()
    }

    #[test]
    fn test_route_requires_complete_endpoints() {
        let dto = RouteDto {
            origin: EndpointDto::from_path(&path(&[1, 10, 100])),
            destination: EndpointDto::from_path(&path(&[1, 10, 100, 1001])),
            price: 500.0,
            ..Default::default()
        };
        assert_eq!(dto.validate(), Err("Origin station is required".to_string()));
    }

    #[test]
    fn test_route_rejects_same_station() {
        let dto = RouteDto {
            origin: EndpointDto::from_path(&path(&[1, 10, 100, 1001])),
            destination: EndpointDto::from_path(&path(&[1, 10, 100, 1001])),
            price: 500.0,
            ..Default::default()
        };
        assert_eq!(
            dto.validate(),
            Err("Origin and destination must differ".to_string())
        );
    }

    #[test]
    fn test_route_valid() {
        let dto = RouteDto {
            origin: EndpointDto::from_path(&path(&[1, 10, 100, 1001])),
            destination: EndpointDto::from_path(&path(&[1, 11, 110, 1101])),
            price: 750.0,
            ..Default::default()
        };
        assert_eq!(dto.validate(), Ok(()));
    }
}
