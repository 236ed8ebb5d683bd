use chrono::NaiveDate;
use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

/// Closed classification of coupon rejection reasons. Server messages are
/// free text; `methods::coupon_class` maps them onto this enum.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponErrorKind {
    Invalid,
    Expired,
    Used,
    LimitReached,
    PhoneNotAuthorized,
    Generic,
}

/// Every way a submission attempt can fail. Each orchestrator stage fails
/// closed; nothing past the first failing stage runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    /// Local field validation, raised before any network call.
    #[error("{0}")]
    FieldValidation(String),

    /// The coordinator's settled outcome rejected the discount code.
    #[error("discount code rejected: {message}")]
    Coupon {
        kind: CouponErrorKind,
        message: String,
    },

    /// The requested window overlaps a confirmed reservation.
    #[error("vehicle is not available for the requested window")]
    AvailabilityConflict { next_available: Option<NaiveDate> },

    /// Network or transport failure. Retry is user-initiated, never
    /// automatic.
    #[error("network failure: {0}")]
    Transient(String),

    /// Server-side business rule failure; the message passes through
    /// verbatim.
    #[error("{0}")]
    SubmissionRejected(String),
}

impl BookingError {
    /// Only transient failures are worth re-submitting unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::Transient(_))
    }
}
