use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info};

use crate::coordinator::{CouponCoordinator, CouponOutcome};
use crate::error::{BookingError, CouponErrorKind};
use crate::helper_model::{BookingCreated, BookingPayload};
use crate::integration::rental_api::{ApiError, CouponApi, RentalApi};
use crate::model::{PriceBreakdown, RentalRequest};

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9-](?:[a-z0-9-]{0,61}[a-z0-9])+(?:\.[a-z0-9-](?:[a-z0-9-]{0,61}[a-z0-9])+)+$"
    ).expect("Invalid regex");
    static ref PHONE_REGEX: Regex = Regex::new(
        r"^\d{10}$"  // Exactly 10 digits
    ).expect("Invalid phone number regex");
}

/// Local field validation, first failing rule wins. Runs before anything
/// touches the network.
pub fn local_validation(request: &RentalRequest, today: NaiveDate) -> Result<(), BookingError> {
    let fail = |msg: &str| Err(BookingError::FieldValidation(msg.to_string()));

    if request.pickup_location.trim().is_empty() {
        return fail("Pickup location is required.");
    }
    if request.dropoff_location.trim().is_empty() {
        return fail("Drop-off location is required.");
    }
    if !PHONE_REGEX.is_match(request.customer_phone.trim()) {
        return fail("Phone number must be exactly 10 digits.");
    }
    if let Some(email) = &request.customer_email
        && !EMAIL_REGEX.is_match(email.trim())
    {
        return fail("Email address is not valid.");
    }
    if !(18..=100).contains(&request.customer_age) {
        return fail("Driver age must be between 18 and 100.");
    }
    if request.pickup_date < today {
        return fail("Pickup date cannot be in the past.");
    }
    if request.return_date == request.pickup_date {
        if request.return_time <= request.pickup_time {
            return fail("For a same-day rental the return time must be after the pickup time.");
        }
    } else if request.return_date < request.pickup_date {
        return fail("Return date must be after the pickup date.");
    }
    Ok(())
}

/// Sequences a submission attempt: local validation → coupon verdict →
/// availability → booking creation. Every stage fails closed and nothing
/// is ever retried automatically; re-submission starts over from scratch.
pub struct BookingOrchestrator<A: RentalApi> {
    api: A,
}

impl<A: RentalApi> BookingOrchestrator<A> {
    pub fn new(api: A) -> BookingOrchestrator<A> {
        BookingOrchestrator { api }
    }

    /// Submit a fully assembled request with the breakdown the customer
    /// saw (price is frozen here, not recomputed).
    ///
    /// If a discount code is present, the coordinator's already-settled
    /// verdict is awaited and reused; submission never triggers a fresh
    /// validation call.
    pub async fn submit<C: CouponApi + 'static>(
        &self,
        request: &RentalRequest,
        price: &PriceBreakdown,
        coordinator: &CouponCoordinator<C>,
        today: NaiveDate,
    ) -> Result<BookingCreated, BookingError> {
        local_validation(request, today)?;

        if let Some(code) = &request.discount_code
            && !code.trim().is_empty()
        {
            debug!(%code, "checking settled coupon verdict");
            match coordinator.settled_outcome().await {
                // The verdict must be for the code on this request, not a
                // leftover win for something typed earlier.
                Some(CouponOutcome::Valid(discount)) if discount.code == code.trim() => {}
                Some(CouponOutcome::Invalid { kind, message }) => {
                    return Err(BookingError::Coupon { kind, message });
                }
                Some(CouponOutcome::Transient { message }) => {
                    return Err(BookingError::Coupon {
                        kind: CouponErrorKind::Generic,
                        message,
                    });
                }
                Some(CouponOutcome::Valid(_)) | None => {
                    return Err(BookingError::Coupon {
                        kind: CouponErrorKind::Generic,
                        message: "Discount code has not been validated.".to_string(),
                    });
                }
            }
        }

        let availability = self
            .api
            .check_availability(request.vehicle_id, request.pickup_date, request.return_date)
            .await
            .map_err(|err| BookingError::Transient(err.to_string()))?;
        if !availability.available {
            return Err(BookingError::AvailabilityConflict {
                next_available: availability.next_available_date,
            });
        }

        let payload = BookingPayload {
            request: request.clone(),
            price: price.clone(),
        };
        match self.api.create_booking(&payload).await {
            Ok(created) => {
                info!(booking_id = created.booking_id, "booking created");
                coordinator.consume();
                Ok(created)
            }
            Err(ApiError::Rejected(message)) => Err(BookingError::SubmissionRejected(message)),
            Err(ApiError::Transport(message)) => Err(BookingError::Transient(message)),
        }
    }
}
