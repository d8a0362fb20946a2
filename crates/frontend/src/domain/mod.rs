pub mod a004_station;
pub mod a005_route;
pub mod a007_booking;
