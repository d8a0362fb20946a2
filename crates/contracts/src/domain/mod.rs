pub mod common;

pub mod a001_country;
pub mod a002_province;
pub mod a003_city;
pub mod a004_station;
pub mod a005_route;
pub mod a006_trip;
pub mod a007_booking;
