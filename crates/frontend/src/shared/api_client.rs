//! Authenticated JSON client for the REST API.
//!
//! The bearer token is passed in explicitly; nothing here reads storage.

use contracts::shared::list_resource::{ListQuery, ListResource, ListResponse};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

use super::api_utils::join_url;
use super::config::AppConfig;
use super::selector_chain::FetchError;

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base: String,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, access_token: Option<String>) -> Self {
        Self {
            base: config.api_base.clone(),
            access_token,
        }
    }

    /// `extra` carries table filters beyond the parent id
    pub fn list_url(
        &self,
        resource: ListResource,
        query: &ListQuery,
        extra: &[(String, String)],
    ) -> Result<String, FetchError> {
        let mut params: BTreeMap<String, String> = query
            .params(resource)
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        params.extend(extra.iter().cloned());
        let qs = serde_qs::to_string(&params).map_err(|e| FetchError::Request(e.to_string()))?;
        Ok(join_url(&self.base, resource.path(), &qs))
    }

    /// GET one page of a list resource
    pub async fn list<T: DeserializeOwned>(
        &self,
        resource: ListResource,
        query: &ListQuery,
        extra: &[(String, String)],
    ) -> Result<ListResponse<T>, FetchError> {
        let url = self.list_url(resource, query, extra)?;
        let response = self
            .authorize(Request::get(&url))
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Self::decode(response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = join_url(&self.base, path, "");
        let response = self
            .authorize(Request::get(&url))
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Self::decode(response).await
    }

    /// POST when `id` is None, PUT to `{path}/{id}` otherwise
    pub async fn save<B: Serialize>(
        &self,
        path: &str,
        id: Option<i64>,
        body: &B,
    ) -> Result<(), FetchError> {
        let builder = match id {
            Some(id) => Request::put(&join_url(&self.base, &format!("{}/{}", path, id), "")),
            None => Request::post(&join_url(&self.base, path, "")),
        };
        let response = self
            .authorize(builder)
            .json(body)
            .map_err(|e| FetchError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }
        Ok(())
    }

    pub async fn delete(&self, path: &str, id: i64) -> Result<(), FetchError> {
        let url = join_url(&self.base, &format!("{}/{}", path, id), "");
        let response = self
            .authorize(Request::delete(&url))
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }
        Ok(())
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Accept", "application/json");
        match &self.access_token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
