use crate::model;
use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};

/// Structured rejection body the collaborators return on business-rule
/// failures: `{"error": "..."}`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ApiRejection {
    pub error: String,
}

/// Response of `GET /vehicles/{id}/availability?pickup&return`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AvailabilityResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_available_date: Option<NaiveDate>,
}

/// Response of both `/coupons/validate` variants. `discount_rate` is a
/// fraction (0.10 for 10%) and only present when `valid` is true.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CouponValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<f64>,
}

/// Body of `POST /bookings`: the assembled request plus the breakdown the
/// customer saw, frozen at submission time.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BookingPayload {
    pub request: model::RentalRequest,
    pub price: model::PriceBreakdown,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BookingCreated {
    pub booking_id: i64,
}
