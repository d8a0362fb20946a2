use crate::domain::a006_trip::aggregate::{SeatId, TripId};
use serde::{Deserialize, Serialize};

/// Passenger travelling on one seat
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassengerDto {
    #[serde(rename = "seatId")]
    pub seat_id: SeatId,
    #[serde(rename = "seatNumber")]
    pub seat_number: u32,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub phone: String,
    /// National id / passport number
    #[serde(rename = "documentNumber")]
    pub document_number: Option<String>,
}

impl PassengerDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.full_name.trim().is_empty() {
            return Err(format!("Seat {}: passenger name is required", self.seat_number));
        }
        let digits = self.phone.chars().filter(|c| c.is_ascii_digit()).count();
        if digits < 9 {
            return Err(format!("Seat {}: phone number is invalid", self.seat_number));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingDto {
    #[serde(rename = "tripId")]
    pub trip_id: TripId,
    pub passengers: Vec<PassengerDto>,
    /// Total as shown to the operator; the server recomputes it
    pub total: f64,
}

impl BookingDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.passengers.is_empty() {
            return Err("Select at least one seat".into());
        }
        self.passengers.iter().try_for_each(PassengerDto::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger(seat: u32, name: &str, phone: &str) -> PassengerDto {
        PassengerDto {
            seat_id: SeatId(seat as i64),
            seat_number: seat,
            full_name: name.into(),
            phone: phone.into(),
            document_number: None,
        }
    }

    #[test]
    fn test_booking_requires_passengers() {
        let dto = BookingDto {
            trip_id: TripId(1),
            passengers: vec![],
            total: 0.0,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_booking_reports_first_invalid_passenger() {
        let dto = BookingDto {
            trip_id: TripId(1),
            passengers: vec![
                passenger(1, "Ahmad", "+93 700 123 456"),
                passenger(2, "", "+93 700 123 457"),
            ],
            total: 2400.0,
        };
        assert_eq!(
            dto.validate(),
            Err("Seat 2: passenger name is required".to_string())
        );
    }
}
