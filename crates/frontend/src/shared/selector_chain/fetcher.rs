use async_trait::async_trait;
use contracts::domain::a001_country::aggregate::Country;
use contracts::domain::a002_province::aggregate::Province;
use contracts::domain::a003_city::aggregate::City;
use contracts::domain::a004_station::aggregate::Station;
use contracts::domain::a006_trip::aggregate::{Seat, Trip};
use contracts::domain::common::OptionItem;
use contracts::shared::list_resource::{ListQuery, ListResource, ListResponse};
use serde::de::DeserializeOwned;

use super::error::FetchError;
use crate::shared::api_client::ApiClient;

/// List-resource fetch capability consumed by the chain binding
#[async_trait(?Send)]
pub trait OptionFetcher {
    async fn fetch(
        &self,
        resource: ListResource,
        query: ListQuery,
    ) -> Result<ListResponse<OptionItem>, FetchError>;
}

/// Fetches options from the REST API, converting each resource's read
/// model into `OptionItem`s.
#[derive(Clone, Debug)]
pub struct ApiOptionFetcher {
    client: ApiClient,
}

impl ApiOptionFetcher {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn page<T>(
        &self,
        resource: ListResource,
        query: &ListQuery,
    ) -> Result<ListResponse<OptionItem>, FetchError>
    where
        T: DeserializeOwned + Into<OptionItem>,
    {
        let page = self.client.list::<T>(resource, query, &[]).await?;
        Ok(page.map_items(Into::into))
    }
}

#[async_trait(?Send)]
impl OptionFetcher for ApiOptionFetcher {
    async fn fetch(
        &self,
        resource: ListResource,
        query: ListQuery,
    ) -> Result<ListResponse<OptionItem>, FetchError> {
        match resource {
            ListResource::Countries => self.page::<Country>(resource, &query).await,
            ListResource::Provinces => self.page::<Province>(resource, &query).await,
            ListResource::Cities => self.page::<City>(resource, &query).await,
            ListResource::Stations => self.page::<Station>(resource, &query).await,
            ListResource::Trips => self.page::<Trip>(resource, &query).await,
            ListResource::Seats => self.page::<Seat>(resource, &query).await,
            // Served as plain id/label rows
            ListResource::Routes | ListResource::Branches => {
                self.page::<OptionItem>(resource, &query).await
            }
        }
    }
}
