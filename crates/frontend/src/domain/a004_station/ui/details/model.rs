use contracts::domain::a004_station::aggregate::{Station, StationDto};

use crate::shared::api_client::ApiClient;

const STATIONS_PATH: &str = "/api/stations";

pub async fn fetch_by_id(client: &ApiClient, id: i64) -> Result<Station, String> {
    client
        .get(&format!("{}/{}", STATIONS_PATH, id))
        .await
        .map_err(|e| e.to_string())
}

pub async fn save_form(client: &ApiClient, dto: &StationDto) -> Result<(), String> {
    client
        .save(STATIONS_PATH, dto.id, dto)
        .await
        .map_err(|e| e.to_string())
}
