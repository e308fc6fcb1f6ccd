//! Input validation for the expense creation/update boundary.
//!
//! Amounts and dates are checked here, before anything touches a bucket, so
//! no malformed record is ever persisted and aggregation can stay total.

use chrono::NaiveDate;

use crate::domain::errors::ExpenseError;

/// Upper bound on a single expense amount (one million, inclusive).
pub const MAX_AMOUNT: u32 = 1_000_000;

/// Check that an amount is within 1..=1_000_000.
pub fn validate_amount(amount: u32) -> Result<(), ExpenseError> {
    if amount == 0 {
        return Err(ExpenseError::InvalidInput(
            "Amount must be greater than zero".to_string(),
        ));
    }
    if amount > MAX_AMOUNT {
        return Err(ExpenseError::InvalidInput(format!(
            "Amount must be at most {}",
            MAX_AMOUNT
        )));
    }
    Ok(())
}

/// Parse a strict "YYYY-MM-DD" date string.
///
/// Length is checked first because chrono accepts unpadded components like
/// "2024-3-5", which the on-device schema does not.
pub fn parse_date(date: &str) -> Result<NaiveDate, ExpenseError> {
    if date.len() != 10 {
        return Err(ExpenseError::InvalidInput(format!(
            "Date must be in YYYY-MM-DD format: {}",
            date
        )));
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        ExpenseError::InvalidInput(format!("Date is not a valid calendar day: {}", date))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_bounds() {
        assert!(validate_amount(1).is_ok());
        assert!(validate_amount(MAX_AMOUNT).is_ok());

        assert!(validate_amount(0).is_err());
        assert!(validate_amount(MAX_AMOUNT + 1).is_err());
    }

    #[test]
    fn test_amount_error_messages_are_distinct() {
        let zero = validate_amount(0).unwrap_err().to_string();
        let over = validate_amount(2_000_000).unwrap_err().to_string();
        assert_ne!(zero, over);
    }

    #[test]
    fn test_valid_dates_parse() {
        assert!(parse_date("2024-03-15").is_ok());
        assert!(parse_date("2024-02-29").is_ok()); // leap day
    }

    #[test]
    fn test_malformed_dates_are_rejected() {
        assert!(parse_date("2024-3-5").is_err()); // unpadded
        assert!(parse_date("2024-13-01").is_err()); // no month 13
        assert!(parse_date("2023-02-29").is_err()); // not a leap year
        assert!(parse_date("15-03-2024").is_err());
        assert!(parse_date("").is_err());
        assert!(parse_date("2024-03-15T00:00:00").is_err());
    }
}
