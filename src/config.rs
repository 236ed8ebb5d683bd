use chrono::NaiveTime;
use dotenv::dotenv;
use std::env;
use std::time::Duration;

/// Daily rate applied when a vehicle carries no tariff at all. Deliberately
/// non-zero so a missing tariff row never quotes a free rental.
pub const FALLBACK_DAILY_RATE: f64 = 45.0;

/// Surcharge per pickup or return that falls outside working hours.
pub const OUTSIDE_HOURS_SURCHARGE: f64 = 20.0;

/// The serviced interval. A time is outside working hours when it is
/// strictly before `open` or strictly after `close`, so a return at the
/// closing minute itself is not surcharged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkingHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl WorkingHours {
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.open && time <= self.close
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        WorkingHours {
            open: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            close: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub working_hours: WorkingHours,
    pub outside_hours_surcharge: f64,
    pub fallback_daily_rate: f64,
    /// Input quiescence before a coupon validation fires.
    pub debounce: Duration,
    /// Minimum gap between validation attempts, and between identical
    /// error notifications.
    pub cooldown: Duration,
    /// Window in which an unchanged, already-valid (code, phone) pair is
    /// not revalidated.
    pub revalidate_window: Duration,
    /// How long the single-flight lock is held after a successful
    /// validation, to absorb trailing duplicate triggers.
    pub settle_delay: Duration,
    /// How long a shown error message stays in the dedup queue.
    pub notice_display: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            working_hours: WorkingHours::default(),
            outside_hours_surcharge: OUTSIDE_HOURS_SURCHARGE,
            fallback_daily_rate: FALLBACK_DAILY_RATE,
            debounce: Duration::from_millis(1000),
            cooldown: Duration::from_millis(3000),
            revalidate_window: Duration::from_secs(10),
            settle_delay: Duration::from_millis(500),
            notice_display: Duration::from_millis(6000),
        }
    }
}

impl EngineConfig {
    /// Defaults with `AUTORENT_*_MS` environment overrides for the timing
    /// knobs. Unset or unparsable variables keep the default.
    pub fn from_env() -> EngineConfig {
        dotenv().ok();
        let mut cfg = EngineConfig::default();
        cfg.debounce = env_ms("AUTORENT_DEBOUNCE_MS", cfg.debounce);
        cfg.cooldown = env_ms("AUTORENT_COOLDOWN_MS", cfg.cooldown);
        cfg.revalidate_window = env_ms("AUTORENT_REVALIDATE_MS", cfg.revalidate_window);
        cfg.settle_delay = env_ms("AUTORENT_SETTLE_MS", cfg.settle_delay);
        cfg.notice_display = env_ms("AUTORENT_NOTICE_MS", cfg.notice_display);
        cfg
    }
}

fn env_ms(name: &str, default: Duration) -> Duration {
    env::var(name)
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}
