pub mod draft;
pub mod model;
pub mod seat_map;
pub mod view;
pub mod view_model;

pub use view::BookingDetails;
