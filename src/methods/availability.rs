use chrono::{Days, NaiveDate};
use serde_derive::{Deserialize, Serialize};

use crate::model::{Reservation, ReservationStatus};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Availability {
    pub available: bool,
    pub next_available_date: Option<NaiveDate>,
}

impl Availability {
    fn free() -> Availability {
        Availability { available: true, next_available_date: None }
    }

    fn blocked_until(last_return: NaiveDate) -> Availability {
        Availability {
            available: false,
            next_available_date: last_return.checked_add_days(Days::new(1)),
        }
    }
}

fn confirmed_for<'a>(
    vehicle_id: i32,
    reservations: &'a [Reservation],
) -> impl Iterator<Item = &'a Reservation> {
    reservations
        .iter()
        .filter(move |r| r.vehicle_id == vehicle_id && r.status == ReservationStatus::Confirmed)
}

/// "Is this vehicle free right now" — the catalog-listing question.
///
/// Only confirmed reservations currently in effect (`pickup <= today <=
/// return`) block; confirmed reservations entirely in the future do NOT.
/// This cannot prevent conflicting future bookings; booking-time checks go
/// through [`window_availability`] instead.
pub fn current_availability(
    vehicle_id: i32,
    today: NaiveDate,
    reservations: &[Reservation],
) -> Availability {
    let last_return = confirmed_for(vehicle_id, reservations)
        .filter(|r| r.pickup_date <= today && today <= r.return_date)
        .map(|r| r.return_date)
        .max();
    match last_return {
        Some(date) => Availability::blocked_until(date),
        None => Availability::free(),
    }
}

/// Interval-overlap check for a specific requested window. A confirmed
/// reservation conflicts when the two intervals intersect:
/// `reservation.pickup <= requested.return && reservation.return >=
/// requested.pickup`. This is the mode the submission flow uses.
pub fn window_availability(
    vehicle_id: i32,
    pickup: NaiveDate,
    ret: NaiveDate,
    reservations: &[Reservation],
) -> Availability {
    let last_conflicting_return = confirmed_for(vehicle_id, reservations)
        .filter(|r| r.pickup_date <= ret && r.return_date >= pickup)
        .map(|r| r.return_date)
        .max();
    match last_conflicting_return {
        Some(date) => Availability::blocked_until(date),
        None => Availability::free(),
    }
}
