use crate::domain::common::OptionItem;
use crate::numeric_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

numeric_id!(
    /// Trip identifier
    TripId
);

numeric_id!(
    /// Seat identifier, unique within the whole system
    SeatId
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    Available,
    Reserved,
    Booked,
}

impl SeatStatus {
    pub fn is_free(&self) -> bool {
        matches!(self, SeatStatus::Available)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    pub number: u32,
    /// Zero-based row in the bus layout
    pub row: u32,
    /// Zero-based column in the bus layout
    pub column: u32,
    pub status: SeatStatus,
}

impl From<Seat> for OptionItem {
    fn from(s: Seat) -> Self {
        OptionItem::new(s.id.0, format!("Seat {}", s.number))
    }
}

/// Seat grid of the bus serving a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusLayout {
    pub rows: u32,
    pub columns: u32,
    /// Aisle is rendered after this column (zero-based)
    #[serde(rename = "aisleAfter", default)]
    pub aisle_after: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    /// "Kabul → Herat" style route caption
    #[serde(rename = "routeLabel")]
    pub route_label: String,
    pub departure: DateTime<Utc>,
    /// Price per seat
    pub price: f64,
    pub layout: BusLayout,
    #[serde(default)]
    pub seats: Vec<Seat>,
}

impl Trip {
    pub fn label(&self) -> String {
        format!(
            "{} ({})",
            self.route_label,
            self.departure.format("%Y-%m-%d %H:%M")
        )
    }

    pub fn seat_at(&self, row: u32, column: u32) -> Option<&Seat> {
        self.seats.iter().find(|s| s.row == row && s.column == column)
    }

    pub fn free_seats(&self) -> usize {
        self.seats.iter().filter(|s| s.status.is_free()).count()
    }
}

impl From<Trip> for OptionItem {
    fn from(t: Trip) -> Self {
        let label = t.label();
        OptionItem::new(t.id.0, label)
    }
}
