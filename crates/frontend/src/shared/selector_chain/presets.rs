//! Level configurations shared by the console screens.

use contracts::shared::list_resource::ListResource;

use super::level::LevelSpec;

/// Country → province → city → station, truncated to `depth` levels
/// (stations use three, routes and their filters use four).
pub fn location_levels(depth: usize) -> Vec<LevelSpec> {
    let all = [
        LevelSpec::root("country", "Country", ListResource::Countries),
        LevelSpec::child("province", "Province", ListResource::Provinces, "country"),
        LevelSpec::child("city", "City", ListResource::Cities, "province"),
        LevelSpec::child("station", "Station", ListResource::Stations, "city"),
    ];
    all.into_iter().take(depth.clamp(1, 4)).collect()
}

/// Trip → seat. The booking screen toggles seats picked here or on the seat map.
pub fn trip_seat_levels() -> Vec<LevelSpec> {
    vec![
        LevelSpec::root("trip", "Trip", ListResource::Trips),
        LevelSpec::child("seat", "Seat", ListResource::Seats, "trip"),
    ]
}
