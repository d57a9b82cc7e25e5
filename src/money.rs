use crate::config::CONFIG;
use crate::error::LedgerError;

/// Residual below this is treated as settled. Matches the two-decimal
/// precision of stored balances.
pub const SPLIT_TOLERANCE: f64 = 0.01;

/// Guard for float comparisons between values that are already cent-precise.
pub const AMOUNT_EPSILON: f64 = 1e-9;

/// Rounds to two decimals, half away from zero.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Validates a money amount: positive, finite, at most two decimal places,
/// within the configured ceiling.
pub fn validate_amount(field: &str, amount: f64) -> Result<(), LedgerError> {
    if !amount.is_finite() {
        return Err(LedgerError::InvalidAmount {
            field: field.to_string(),
            reason: "amount must be a finite number".to_string(),
        });
    }
    if amount <= 0.0 {
        return Err(LedgerError::InvalidAmount {
            field: field.to_string(),
            reason: "amount must be greater than 0".to_string(),
        });
    }
    if amount > CONFIG.max_amount {
        return Err(LedgerError::InvalidAmount {
            field: field.to_string(),
            reason: format!("amount cannot exceed {}", CONFIG.max_amount),
        });
    }
    if (round_to_cents(amount) - amount).abs() > AMOUNT_EPSILON {
        return Err(LedgerError::InvalidAmount {
            field: field.to_string(),
            reason: "amount cannot have more than 2 decimal places".to_string(),
        });
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), LedgerError> {
    if description.trim().is_empty() {
        return Err(LedgerError::InvalidDescription(
            "description cannot be empty".to_string(),
        ));
    }
    if description.len() > CONFIG.max_description_len {
        return Err(LedgerError::InvalidDescription(format!(
            "description cannot exceed {} characters",
            CONFIG.max_description_len
        )));
    }
    Ok(())
}
