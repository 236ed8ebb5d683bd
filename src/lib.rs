pub mod config;
pub mod coordinator;
pub mod error;
pub mod helper_model;
pub mod integration;
pub mod methods;
pub mod model;
pub mod orchestrator;

pub use config::EngineConfig;
pub use coordinator::{CouponCoordinator, CouponOutcome, CouponStore, NoticeSink, ValidationPhase};
pub use error::{BookingError, CouponErrorKind};
pub use integration::rental_api::{CouponApi, HttpRentalApi, RentalApi};
pub use orchestrator::BookingOrchestrator;
