use crate::config::EngineConfig;
use chrono::{NaiveDateTime, NaiveTime};

use crate::model::{
    CouponDiscount, InsuranceKind, LineItem, LocationFeeTable, PriceBreakdown, QuoteDraft,
    VehicleTariff,
};

/// Billable day count for a rental window.
/// - Duration is measured on a 24-hour basis, then rounded up.
/// - Same-day rentals (return later the same date) floor to one day.
/// - A window that is not positive still bills one day; ordering errors
///   are the orchestrator's job, not the calculator's.
pub fn rental_days(pickup: NaiveDateTime, ret: NaiveDateTime) -> i64 {
    let minutes = (ret - pickup).num_minutes();
    let days = (minutes + 24 * 60 - 1).div_euclid(24 * 60);
    days.max(1)
}

/// Per-day base rate for a given day count. Bands are inclusive integer
/// ranges with a final open-ended one; the first (lowest-bound) band
/// containing `days` wins. An empty tariff falls back to the configured
/// rate rather than quoting zero.
pub fn daily_rate(tariff: &VehicleTariff, days: i64, fallback: f64) -> f64 {
    tariff
        .price_bands
        .iter()
        .find(|band| band.contains(days))
        .map(|band| band.daily_rate)
        .unwrap_or(fallback)
}

/// Number of surcharge units for pickup/return falling outside working
/// hours. Each side counts independently, so the result is 0, 1 or 2.
pub fn outside_hours_units(
    pickup_time: NaiveTime,
    return_time: NaiveTime,
    cfg: &EngineConfig,
) -> u32 {
    let mut units = 0;
    if !cfg.working_hours.contains(pickup_time) {
        units += 1;
    }
    if !cfg.working_hours.contains(return_time) {
        units += 1;
    }
    units
}

/// Turn the live form state into an itemized breakdown.
///
/// Returns `None` while any field the price depends on is still empty;
/// the caller re-runs this on every input change, so partial input is the
/// normal case, not an error. Pure and idempotent: same inputs, same
/// breakdown.
///
/// Note the asymmetry: only the pickup location is fee-bearing. That
/// mirrors current business policy and must not be "fixed" here.
pub fn compute_price(
    draft: &QuoteDraft,
    tariff: &VehicleTariff,
    fees: &LocationFeeTable,
    cfg: &EngineConfig,
    discount: Option<&CouponDiscount>,
) -> Option<PriceBreakdown> {
    let pickup_date = draft.pickup_date?;
    let pickup_time = draft.pickup_time?;
    let return_date = draft.return_date?;
    let return_time = draft.return_time?;
    let pickup_location = draft.pickup_location.as_deref()?;
    let insurance = draft.insurance?;

    let pickup = pickup_date.and_time(pickup_time);
    let ret = return_date.and_time(return_time);

    let days = rental_days(pickup, ret);
    let rate = daily_rate(tariff, days, cfg.fallback_daily_rate);
    let base_price = rate * days as f64;

    let location_fee = fees.fee_for(pickup_location);
    let insurance_cost = tariff.insurance_rate(insurance) * days as f64;
    let outside_hours_fee =
        outside_hours_units(pickup_time, return_time, cfg) as f64 * cfg.outside_hours_surcharge;

    let subtotal = base_price + location_fee + insurance_cost + outside_hours_fee;
    let discount_amount = discount.map(|d| subtotal * d.rate).unwrap_or(0.0);
    let final_price = (subtotal - discount_amount).max(0.0);

    let mut line_items = vec![LineItem {
        label: format!("Rental, {} day(s) x {:.2}/day", days, rate),
        amount: base_price,
    }];
    if location_fee > 0.0 {
        line_items.push(LineItem {
            label: format!("Pickup location fee ({})", pickup_location),
            amount: location_fee,
        });
    }
    if insurance_cost > 0.0 {
        let kind = match insurance {
            InsuranceKind::Rca => "RCA",
            InsuranceKind::Casco => "Casco",
        };
        line_items.push(LineItem {
            label: format!("{} insurance, {} day(s)", kind, days),
            amount: insurance_cost,
        });
    }
    if outside_hours_fee > 0.0 {
        line_items.push(LineItem {
            label: "Outside working hours surcharge".to_string(),
            amount: outside_hours_fee,
        });
    }
    if let Some(d) = discount
        && discount_amount > 0.0
    {
        line_items.push(LineItem {
            label: format!("Discount code {} (-{:.0}%)", d.code, d.rate * 100.0),
            amount: -discount_amount,
        });
    }

    Some(PriceBreakdown {
        days,
        base_price,
        location_fee,
        insurance_cost,
        outside_hours_fee,
        subtotal,
        discount_amount,
        final_price,
        line_items,
    })
}
