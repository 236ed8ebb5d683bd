use chrono::NaiveDate;
use dotenv::dotenv;
use serde::de::DeserializeOwned;
use std::env;
use std::future::Future;
use thiserror::Error;
use tracing::debug;

use crate::helper_model::{
    ApiRejection, AvailabilityResponse, BookingCreated, BookingPayload, CouponValidateResponse,
};

const DEFAULT_BASE_URL: &str = "https://api.autorent.example";

#[derive(Error, Debug)]
pub enum ApiError {
    /// Network/transport level failure; the caller may retry on user
    /// request.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The collaborator answered with a structured `{"error": ...}` body.
    #[error("{0}")]
    Rejected(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// The remote discount-code validation contract. The coordinator drives
/// this; implementations must not retry internally.
pub trait CouponApi: Send + Sync {
    fn validate(
        &self,
        code: &str,
        phone: &str,
    ) -> impl Future<Output = Result<CouponValidateResponse, ApiError>> + Send;
}

/// The availability and booking-creation contracts consumed at submission
/// time.
pub trait RentalApi: Send + Sync {
    fn check_availability(
        &self,
        vehicle_id: i32,
        pickup: NaiveDate,
        ret: NaiveDate,
    ) -> impl Future<Output = Result<AvailabilityResponse, ApiError>> + Send;

    fn create_booking(
        &self,
        payload: &BookingPayload,
    ) -> impl Future<Output = Result<BookingCreated, ApiError>> + Send;
}

/// reqwest-backed client for all three collaborator endpoints.
#[derive(Debug, Clone)]
pub struct HttpRentalApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRentalApi {
    pub fn new(base_url: impl Into<String>) -> HttpRentalApi {
        HttpRentalApi {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Base URL from `RENTAL_API_BASE_URL`, falling back to the production
    /// default.
    pub fn from_env() -> HttpRentalApi {
        dotenv().ok();
        let base_url =
            env::var("RENTAL_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        HttpRentalApi::new(base_url)
    }

    async fn read_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        match response.json::<ApiRejection>().await {
            Ok(rejection) => Err(ApiError::Rejected(rejection.error)),
            Err(_) => Err(ApiError::Transport(format!("unexpected status {}", status))),
        }
    }

    /// The plain upstream variant: code-only validation, no phone binding.
    /// The booking form itself uses the phone-bound [`CouponApi::validate`].
    pub async fn validate_code(&self, code: &str) -> Result<CouponValidateResponse, ApiError> {
        debug!(code, "validating plain discount code");
        let response = self
            .client
            .get(format!("{}/coupons/validate", self.base_url))
            .query(&[("code", code)])
            .send()
            .await?;
        Self::read_body(response).await
    }
}

impl CouponApi for HttpRentalApi {
    fn validate(
        &self,
        code: &str,
        phone: &str,
    ) -> impl Future<Output = Result<CouponValidateResponse, ApiError>> + Send {
        let body = serde_json::json!({ "code": code, "phone": phone });
        async move {
            debug!(code, "validating phone-bound discount code");
            let response = self
                .client
                .post(format!("{}/coupons/validate", self.base_url))
                .json(&body)
                .send()
                .await?;
            Self::read_body(response).await
        }
    }
}

impl RentalApi for HttpRentalApi {
    fn check_availability(
        &self,
        vehicle_id: i32,
        pickup: NaiveDate,
        ret: NaiveDate,
    ) -> impl Future<Output = Result<AvailabilityResponse, ApiError>> + Send {
        async move {
            debug!(vehicle_id, %pickup, %ret, "checking vehicle availability");
            let response = self
                .client
                .get(format!(
                    "{}/vehicles/{}/availability",
                    self.base_url, vehicle_id
                ))
                .query(&[
                    ("pickup", pickup.to_string()),
                    ("return", ret.to_string()),
                ])
                .send()
                .await?;
            Self::read_body(response).await
        }
    }

    fn create_booking(
        &self,
        payload: &BookingPayload,
    ) -> impl Future<Output = Result<BookingCreated, ApiError>> + Send {
        async move {
            debug!(vehicle_id = payload.request.vehicle_id, "submitting booking");
            let response = self
                .client
                .post(format!("{}/bookings", self.base_url))
                .json(payload)
                .send()
                .await?;
            Self::read_body(response).await
        }
    }
}
