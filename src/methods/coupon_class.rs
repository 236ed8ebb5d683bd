use once_cell::sync::Lazy;

use crate::error::CouponErrorKind;

/// Keyword table for one language. Matching is case-insensitive substring
/// search; the display text itself stays with the localization layer, only
/// classification happens here.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    pub language: &'static str,
    pub expired: &'static [&'static str],
    pub used: &'static [&'static str],
    pub limit_reached: &'static [&'static str],
    pub phone_not_authorized: &'static [&'static str],
    pub invalid: &'static [&'static str],
}

/// Built-in English and Romanian tables, matching the markets the booking
/// form ships in.
pub static DEFAULT_TABLES: Lazy<Vec<KeywordTable>> = Lazy::new(|| {
    vec![
        KeywordTable {
            language: "en",
            expired: &["expired", "no longer valid"],
            used: &["already used", "already redeemed", "been used"],
            limit_reached: &["limit reached", "usage limit", "too many uses"],
            phone_not_authorized: &["phone", "not authorized", "not eligible"],
            invalid: &["invalid", "not found", "unknown code", "does not exist"],
        },
        KeywordTable {
            language: "ro",
            expired: &["expirat"],
            used: &["folosit", "utilizat deja"],
            limit_reached: &["limita", "limită"],
            phone_not_authorized: &["telefon", "nu este autorizat"],
            invalid: &["invalid", "inexistent", "gresit", "greșit", "nu a fost gasit"],
        },
    ]
});

/// Map a free-text server rejection onto a [`CouponErrorKind`].
///
/// Specific kinds are tried before the catch-all `invalid` keywords so that
/// e.g. "code expired" never classifies as plain Invalid. Anything no table
/// recognizes is `Generic`.
pub fn classify(message: &str, tables: &[KeywordTable]) -> CouponErrorKind {
    let message = message.to_lowercase();
    let hit = |words: &[&str]| words.iter().any(|w| message.contains(w));

    for table in tables {
        if hit(table.expired) {
            return CouponErrorKind::Expired;
        }
        if hit(table.used) {
            return CouponErrorKind::Used;
        }
        if hit(table.limit_reached) {
            return CouponErrorKind::LimitReached;
        }
        if hit(table.phone_not_authorized) {
            return CouponErrorKind::PhoneNotAuthorized;
        }
    }
    for table in tables {
        if hit(table.invalid) {
            return CouponErrorKind::Invalid;
        }
    }
    CouponErrorKind::Generic
}

pub fn classify_default(message: &str) -> CouponErrorKind {
    classify(message, &DEFAULT_TABLES)
}
