//! Seat selection and passenger entry for one trip, independent of the UI.

use contracts::domain::a006_trip::aggregate::{Seat, SeatId, SeatStatus, Trip};
use contracts::domain::a007_booking::aggregate::{BookingDto, PassengerDto};

/// Upper bound on seats in a single booking
pub const MAX_SEATS_PER_BOOKING: usize = 10;

/// One cell of the rendered bus grid
#[derive(Debug, Clone, PartialEq)]
pub enum SeatCell {
    Seat {
        id: SeatId,
        number: u32,
        status: SeatStatus,
        selected: bool,
    },
    Aisle,
    /// Grid position with no seat (door, driver, stairs)
    Empty,
}

#[derive(Debug, Clone)]
pub struct BookingDraft {
    trip: Trip,
    /// Kept ordered by seat number
    passengers: Vec<PassengerDto>,
}

impl BookingDraft {
    pub fn new(trip: Trip) -> Self {
        Self {
            trip,
            passengers: Vec::new(),
        }
    }

    pub fn trip(&self) -> &Trip {
        &self.trip
    }

    pub fn passengers(&self) -> &[PassengerDto] {
        &self.passengers
    }

    pub fn seat_count(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_selected(&self, seat_id: SeatId) -> bool {
        self.passengers.iter().any(|p| p.seat_id == seat_id)
    }

    pub fn total(&self) -> f64 {
        self.trip.price * self.passengers.len() as f64
    }

    /// Select a free seat or release a selected one.
    ///
    /// Returns whether the seat is selected afterwards.
    pub fn toggle_seat(&mut self, seat_id: SeatId) -> Result<bool, String> {
        if let Some(pos) = self.passengers.iter().position(|p| p.seat_id == seat_id) {
            self.passengers.remove(pos);
            return Ok(false);
        }

        let seat = self
            .find_seat(seat_id)
            .ok_or_else(|| format!("Seat {} is not on this trip", seat_id.0))?;
        if !seat.status.is_free() {
            return Err(format!("Seat {} is not available", seat.number));
        }
        if self.passengers.len() >= MAX_SEATS_PER_BOOKING {
            return Err(format!(
                "At most {} seats per booking",
                MAX_SEATS_PER_BOOKING
            ));
        }

        let passenger = PassengerDto {
            seat_id: seat.id,
            seat_number: seat.number,
            ..Default::default()
        };
        let at = self
            .passengers
            .partition_point(|p| p.seat_number < passenger.seat_number);
        self.passengers.insert(at, passenger);
        Ok(true)
    }

    /// Edit the passenger sitting on `seat_id`; false when the seat is not selected
    pub fn update_passenger(
        &mut self,
        seat_id: SeatId,
        edit: impl FnOnce(&mut PassengerDto),
    ) -> bool {
        match self.passengers.iter_mut().find(|p| p.seat_id == seat_id) {
            Some(passenger) => {
                edit(passenger);
                true
            }
            None => false,
        }
    }

    /// Bus grid row by row, with an aisle cell inserted after `aisle_after`
    pub fn rows(&self) -> Vec<Vec<SeatCell>> {
        let layout = &self.trip.layout;
        (0..layout.rows)
            .map(|row| {
                let mut cells = Vec::with_capacity(layout.columns as usize + 1);
                for column in 0..layout.columns {
                    cells.push(match self.trip.seat_at(row, column) {
                        Some(seat) => SeatCell::Seat {
                            id: seat.id,
                            number: seat.number,
                            status: seat.status,
                            selected: self.is_selected(seat.id),
                        },
                        None => SeatCell::Empty,
                    });
                    if layout.aisle_after == Some(column) && column + 1 < layout.columns {
                        cells.push(SeatCell::Aisle);
                    }
                }
                cells
            })
            .collect()
    }

    /// Validated submission payload
    pub fn to_dto(&self) -> Result<BookingDto, String> {
        let dto = BookingDto {
            trip_id: self.trip.id,
            passengers: self
                .passengers
                .iter()
                .map(|p| PassengerDto {
                    full_name: p.full_name.trim().to_string(),
                    phone: p.phone.trim().to_string(),
                    document_number: p
                        .document_number
                        .as_deref()
                        .map(str::trim)
                        .filter(|d| !d.is_empty())
                        .map(str::to_string),
                    ..p.clone()
                })
                .collect(),
            total: self.total(),
        };
        dto.validate()?;
        Ok(dto)
    }

    fn find_seat(&self, seat_id: SeatId) -> Option<&Seat> {
        self.trip.seats.iter().find(|s| s.id == seat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use contracts::domain::a006_trip::aggregate::{BusLayout, TripId};

    fn seat(id: i64, number: u32, row: u32, column: u32, status: SeatStatus) -> Seat {
        Seat {
            id: SeatId(id),
            number,
            row,
            column,
            status,
        }
    }

    /// 2 rows × 3 columns, aisle after column 0, seat 6 missing
    fn trip() -> Trip {
        Trip {
            id: TripId(7),
            route_label: "Kabul → Mazar-i-Sharif".into(),
            departure: Utc.with_ymd_and_hms(2026, 10, 20, 6, 30, 0).unwrap(),
            price: 1500.0,
            layout: BusLayout {
                rows: 2,
                columns: 3,
                aisle_after: Some(0),
            },
            seats: vec![
                seat(71, 1, 0, 0, SeatStatus::Available),
                seat(72, 2, 0, 1, SeatStatus::Booked),
                seat(73, 3, 0, 2, SeatStatus::Available),
                seat(74, 4, 1, 0, SeatStatus::Reserved),
                seat(75, 5, 1, 1, SeatStatus::Available),
            ],
        }
    }

    #[test]
    fn test_toggle_free_seat() {
        let mut draft = BookingDraft::new(trip());
        assert_eq!(draft.toggle_seat(SeatId(73)), Ok(true));
        assert!(draft.is_selected(SeatId(73)));
        assert_eq!(draft.toggle_seat(SeatId(73)), Ok(false));
        assert_eq!(draft.seat_count(), 0);
    }

    #[test]
    fn test_taken_seats_cannot_be_selected() {
        let mut draft = BookingDraft::new(trip());
        assert_eq!(
            draft.toggle_seat(SeatId(72)),
            Err("Seat 2 is not available".to_string())
        );
        assert!(draft.toggle_seat(SeatId(74)).is_err());
        assert!(draft.toggle_seat(SeatId(999)).is_err());
        assert_eq!(draft.seat_count(), 0);
    }

    #[test]
    fn test_passengers_ordered_by_seat_and_total() {
        let mut draft = BookingDraft::new(trip());
        draft.toggle_seat(SeatId(75)).unwrap();
        draft.toggle_seat(SeatId(71)).unwrap();
        draft.toggle_seat(SeatId(73)).unwrap();

        let numbers: Vec<u32> = draft.passengers().iter().map(|p| p.seat_number).collect();
        assert_eq!(numbers, vec![1, 3, 5]);
        assert_eq!(draft.total(), 4500.0);
    }

    #[test]
    fn test_grid_has_aisle_and_gaps() {
        let mut draft = BookingDraft::new(trip());
        draft.toggle_seat(SeatId(71)).unwrap();
        let rows = draft.rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 4);
        assert_eq!(rows[0][1], SeatCell::Aisle);
        assert!(matches!(
            rows[0][0],
            SeatCell::Seat { number: 1, selected: true, .. }
        ));
        assert!(matches!(
            rows[0][2],
            SeatCell::Seat { number: 2, status: SeatStatus::Booked, selected: false, .. }
        ));
        assert_eq!(rows[1][3], SeatCell::Empty);
    }

    #[test]
    fn test_to_dto_validates_every_passenger() {
        let mut draft = BookingDraft::new(trip());
        assert!(draft.to_dto().is_err());

        draft.toggle_seat(SeatId(71)).unwrap();
        draft.toggle_seat(SeatId(73)).unwrap();
        draft.update_passenger(SeatId(71), |p| {
            p.full_name = "  Ahmad Shah ".into();
            p.phone = "0700123456".into();
            p.document_number = Some("   ".into());
        });
        assert_eq!(
            draft.to_dto(),
            Err("Seat 3: passenger name is required".to_string())
        );

        draft.update_passenger(SeatId(73), |p| {
            p.full_name = "Mariam".into();
            p.phone = "+93 799 000 111".into();
        });
        let dto = draft.to_dto().unwrap();
        assert_eq!(dto.trip_id, TripId(7));
        assert_eq!(dto.total, 3000.0);
        assert_eq!(dto.passengers[0].full_name, "Ahmad Shah");
        assert_eq!(dto.passengers[0].document_number, None);
    }

    #[test]
    fn test_update_unselected_passenger_is_ignored() {
        let mut draft = BookingDraft::new(trip());
        assert!(!draft.update_passenger(SeatId(71), |p| p.full_name = "x".into()));
    }

    #[test]
    fn test_seat_limit() {
        let mut t = trip();
        t.layout = BusLayout {
            rows: 4,
            columns: 4,
            aisle_after: None,
        };
        t.seats = (0..16)
            .map(|i| seat(100 + i as i64, i + 1, i / 4, i % 4, SeatStatus::Available))
            .collect();
        let mut draft = BookingDraft::new(t);
        for i in 0..MAX_SEATS_PER_BOOKING as i64 {
            draft.toggle_seat(SeatId(100 + i)).unwrap();
        }
        assert!(draft.toggle_seat(SeatId(115)).is_err());
        assert_eq!(draft.seat_count(), MAX_SEATS_PER_BOOKING);
    }
}
