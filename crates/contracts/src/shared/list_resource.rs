//! Generic list-resource contract shared by every paginated, searchable
//! list endpoint of the REST API.

use crate::domain::common::{Identifier, OptionItem};
use serde::{Deserialize, Serialize};

/// List endpoints the console reads options from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListResource {
    Countries,
    Provinces,
    Cities,
    Stations,
    Routes,
    Trips,
    Seats,
    Branches,
}

impl ListResource {
    pub fn path(&self) -> &'static str {
        match self {
            ListResource::Countries => "/api/countries",
            ListResource::Provinces => "/api/provinces",
            ListResource::Cities => "/api/cities",
            ListResource::Stations => "/api/stations",
            ListResource::Routes => "/api/routes",
            ListResource::Trips => "/api/trips",
            ListResource::Seats => "/api/seats",
            ListResource::Branches => "/api/branches",
        }
    }

    /// Name of the query parameter that carries the parent id, if the
    /// resource is filtered by a parent level.
    pub fn parent_param(&self) -> Option<&'static str> {
        match self {
            ListResource::Provinces => Some("country_id"),
            ListResource::Cities => Some("province_id"),
            ListResource::Stations => Some("city_id"),
            ListResource::Seats => Some("trip_id"),
            ListResource::Countries
            | ListResource::Routes
            | ListResource::Trips
            | ListResource::Branches => None,
        }
    }
}

/// Query of one page of a list resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub parent_id: Option<Identifier>,
    /// Zero-based page index
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            parent_id: None,
            page: 0,
            page_size: 50,
        }
    }
}

impl ListQuery {
    pub fn new(parent_id: Option<Identifier>, search: &str, page_size: usize) -> Self {
        let search = search.trim();
        Self {
            search: (!search.is_empty()).then(|| search.to_string()),
            parent_id,
            page: 0,
            page_size,
        }
    }

    /// Flat key/value pairs as sent on the wire for `resource`.
    ///
    /// The parent id is dropped for resources without a parent filter.
    pub fn params(&self, resource: ListResource) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
        ];
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let (Some(key), Some(parent_id)) = (resource.parent_param(), self.parent_id) {
            params.push((key, parent_id.to_string()));
        }
        params
    }
}

/// Table filter built from a (possibly partial) location path. Every
/// resolved level is sent as its own parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFilter {
    pub country_id: Option<Identifier>,
    pub province_id: Option<Identifier>,
    pub city_id: Option<Identifier>,
    pub station_id: Option<Identifier>,
}

impl LocationFilter {
    pub fn from_path(path: &[OptionItem]) -> Self {
        Self {
            country_id: path.first().map(|i| i.id),
            province_id: path.get(1).map(|i| i.id),
            city_id: path.get(2).map(|i| i.id),
            station_id: path.get(3).map(|i| i.id),
        }
    }

    pub fn active_count(&self) -> usize {
        [
            self.country_id,
            self.province_id,
            self.city_id,
            self.station_id,
        ]
        .iter()
        .filter(|id| id.is_some())
        .count()
    }

    /// Wire parameters; `prefix` distinguishes e.g. `origin_city_id`.
    pub fn params(&self, prefix: &str) -> Vec<(String, String)> {
        [
            ("country_id", self.country_id),
            ("province_id", self.province_id),
            ("city_id", self.city_id),
            ("station_id", self.station_id),
        ]
        .into_iter()
        .filter_map(|(key, id)| id.map(|id| (format!("{}{}", prefix, key), id.to_string())))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
}

impl Pagination {
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> ListResponse<T> {
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> ListResponse<U> {
        ListResponse {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
