pub mod availability;
pub mod coupon_class;
pub mod pricing;
