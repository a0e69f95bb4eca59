//! Payment field validation
//!
//! Format checks for the wallet fields users copy out of payment
//! confirmation SMSes.

use crate::constants::{MAX_PAYER_NUMBER_LENGTH, MAX_TXN_ID_LENGTH};

/// Validate a mobile wallet payer number (digits only, sensible length)
pub fn validate_payer_number(number: &str) -> Result<(), &'static str> {
    if number.len() < 10 {
        return Err("Payer number must be at least 10 digits");
    }
    if number.len() > MAX_PAYER_NUMBER_LENGTH as usize {
        return Err("Payer number is too long");
    }
    if !number.chars().all(|c| c.is_ascii_digit() || c == '+') {
        return Err("Payer number can only contain digits and a leading +");
    }
    Ok(())
}

/// Validate a wallet transaction ID
pub fn validate_txn_id(txn_id: &str) -> Result<(), &'static str> {
    if txn_id.is_empty() {
        return Err("Transaction ID cannot be empty");
    }
    if txn_id.len() > MAX_TXN_ID_LENGTH as usize {
        return Err("Transaction ID is too long");
    }
    if !txn_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Transaction ID can only contain letters and numbers");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_payer_number() {
        assert!(validate_payer_number("01712345678").is_ok());
        assert!(validate_payer_number("+8801712345678").is_ok());
        assert!(validate_payer_number("12345").is_err());
        assert!(validate_payer_number("01712-345678").is_err());
    }

    #[test]
    fn test_validate_txn_id() {
        assert!(validate_txn_id("9HX2A7B1CD").is_ok());
        assert!(validate_txn_id("").is_err());
        assert!(validate_txn_id("TXN 123").is_err());
    }
}
