//! Pure helpers for input validation and display formatting.

pub mod format;
pub mod validation;

// Re-export commonly used functions at module level
pub use format::{
    format_date, format_date_time, format_short_date, format_usd, format_vnd, relative_time,
    time_remaining, truncate, DateFormat, MonthStyle,
};
pub use validation::{
    check_donation_amount, check_password_strength, is_empty, is_valid_email, is_valid_phone,
    is_valid_url, AmountCheck, PasswordStrength,
};
