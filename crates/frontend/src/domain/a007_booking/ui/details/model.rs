use contracts::domain::a006_trip::aggregate::Trip;
use contracts::domain::a007_booking::aggregate::BookingDto;

use crate::shared::api_client::ApiClient;

pub async fn fetch_trip(client: &ApiClient, id: i64) -> Result<Trip, String> {
    client
        .get(&format!("/api/trips/{}", id))
        .await
        .map_err(|e| e.to_string())
}

pub async fn create_booking(client: &ApiClient, dto: &BookingDto) -> Result<(), String> {
    client
        .save("/api/bookings", None, dto)
        .await
        .map_err(|e| e.to_string())
}
