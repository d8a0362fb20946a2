use contracts::domain::a005_route::aggregate::{Route, RouteDto};

use crate::shared::api_client::ApiClient;

const ROUTES_PATH: &str = "/api/routes";

pub async fn fetch_by_id(client: &ApiClient, id: i64) -> Result<Route, String> {
    client
        .get(&format!("{}/{}", ROUTES_PATH, id))
        .await
        .map_err(|e| e.to_string())
}

pub async fn save_form(client: &ApiClient, dto: &RouteDto) -> Result<(), String> {
    client
        .save(ROUTES_PATH, dto.id, dto)
        .await
        .map_err(|e| e.to_string())
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<(), String> {
    client
        .delete(ROUTES_PATH, id)
        .await
        .map_err(|e| e.to_string())
}
