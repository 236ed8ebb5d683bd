use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsuranceKind {
    #[serde(rename = "RCA")]
    Rca,
    Casco,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// One day-count range with its per-day base rate. Bands are parsed from
/// labels like `"1-2"`, `"3-7"` or the open-ended `"46+"`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PriceBand {
    pub label: String,
    pub min_days: i64,
    pub max_days: Option<i64>,
    pub daily_rate: f64,
}

impl PriceBand {
    pub fn from_label(label: &str, daily_rate: f64) -> anyhow::Result<PriceBand> {
        let label = label.trim();
        if let Some(min) = label.strip_suffix('+') {
            let min_days = min.trim().parse::<i64>()?;
            return Ok(PriceBand {
                label: label.to_string(),
                min_days,
                max_days: None,
                daily_rate,
            });
        }
        let Some((min, max)) = label.split_once('-') else {
            anyhow::bail!("band label '{}' is neither 'a-b' nor 'n+'", label);
        };
        let min_days = min.trim().parse::<i64>()?;
        let max_days = max.trim().parse::<i64>()?;
        if max_days < min_days {
            anyhow::bail!("band label '{}' has an inverted range", label);
        }
        Ok(PriceBand {
            label: label.to_string(),
            min_days,
            max_days: Some(max_days),
            daily_rate,
        })
    }

    pub fn contains(&self, days: i64) -> bool {
        match self.max_days {
            Some(max) => days >= self.min_days && days <= max,
            None => days >= self.min_days,
        }
    }
}

/// Tariff attached to a vehicle record. Bands are kept in ascending label
/// order; `insurance_rates` maps insurance kind to a per-day rate.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct VehicleTariff {
    pub price_bands: Vec<PriceBand>,
    pub insurance_rates: HashMap<InsuranceKind, f64>,
}

impl VehicleTariff {
    /// Missing rate for the chosen kind costs nothing rather than failing.
    pub fn insurance_rate(&self, kind: InsuranceKind) -> f64 {
        self.insurance_rates.get(&kind).copied().unwrap_or(0.0)
    }
}

/// Flat fee per pickup location. Drop-off location is NOT fee-bearing in
/// current policy; only the pickup side of the pair is ever looked up.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct LocationFeeTable {
    pub fees: HashMap<String, f64>,
}

impl LocationFeeTable {
    pub fn from_pairs(pairs: &[(&str, f64)]) -> LocationFeeTable {
        LocationFeeTable {
            fees: pairs
                .iter()
                .map(|(name, fee)| (name.to_string(), *fee))
                .collect(),
        }
    }

    /// Unknown locations carry no fee.
    pub fn fee_for(&self, location: &str) -> f64 {
        self.fees.get(location).copied().unwrap_or(0.0)
    }
}

/// Live form state while the customer is still filling fields in. The price
/// panel recomputes from this on every change, so everything is optional.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct QuoteDraft {
    pub vehicle_id: Option<i32>,
    pub pickup_date: Option<NaiveDate>,
    pub pickup_time: Option<NaiveTime>,
    pub return_date: Option<NaiveDate>,
    pub return_time: Option<NaiveTime>,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub insurance: Option<InsuranceKind>,
}

/// A complete submission form. Immutable once handed to the orchestrator
/// for a given attempt.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RentalRequest {
    pub vehicle_id: i32,
    pub pickup_date: NaiveDate,
    pub pickup_time: NaiveTime,
    pub return_date: NaiveDate,
    pub return_time: NaiveTime,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub insurance: InsuranceKind,
    pub discount_code: Option<String>,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub customer_age: i32,
}

impl RentalRequest {
    pub fn pickup_datetime(&self) -> NaiveDateTime {
        self.pickup_date.and_time(self.pickup_time)
    }

    pub fn return_datetime(&self) -> NaiveDateTime {
        self.return_date.and_time(self.return_time)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LineItem {
    pub label: String,
    pub amount: f64,
}

/// Itemized quote shown to the customer and frozen into the submission.
/// Derived data; recomputed on every input change, never persisted.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub days: i64,
    pub base_price: f64,
    pub location_fee: f64,
    pub insurance_cost: f64,
    pub outside_hours_fee: f64,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub final_price: f64,
    pub line_items: Vec<LineItem>,
}

/// Reservation rows as handed over by the booking store. Only `Confirmed`
/// rows constrain availability.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Reservation {
    pub vehicle_id: i32,
    pub pickup_date: NaiveDate,
    pub return_date: NaiveDate,
    pub status: ReservationStatus,
}

/// The winning coupon cached after a successful validation, applied by the
/// pricing calculator until the booking consumes it.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CouponDiscount {
    pub code: String,
    pub rate: f64,
}
