//! Supported account currencies

pub const USD: &str = "USD";
pub const EUR: &str = "EUR";
pub const CAD: &str = "CAD";

pub const SUPPORTED_CURRENCIES: [&str; 3] = [USD, EUR, CAD];

/// Currency codes are matched exactly (upper case ISO 4217).
pub fn is_supported_currency(currency: &str) -> bool {
    SUPPORTED_CURRENCIES.contains(&currency)
}
