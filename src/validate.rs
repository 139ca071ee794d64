//! Amount and reference validation
//!
//! Pure checks, no store access. Every operation runs these before touching
//! a lock or staging a write, so a rejected request has no effect at all.

use crate::error::{Error, Result};
use crate::types::Reference;

/// Check a caller-supplied magnitude and convert it to `i64`.
///
/// Callers pass unsigned magnitudes; the operation kind applies the sign.
/// Zero is rejected, as is anything that cannot live in an `i64` balance.
pub fn validate_amount(magnitude: u64) -> Result<i64> {
    if magnitude == 0 {
        return Err(Error::InvalidAmount("amount must be positive".to_string()));
    }
    if magnitude > i64::MAX as u64 {
        return Err(Error::InvalidAmount(format!(
            "amount {} exceeds the representable balance range",
            magnitude
        )));
    }
    Ok(magnitude as i64)
}

/// Check that a payment reference names a valid business event.
///
/// Payments settle rides and deliveries only; their event IDs start at 1.
pub fn validate_payment_reference(reference: &Reference) -> Result<()> {
    match reference {
        Reference::Ride(id) | Reference::Delivery(id) => {
            if *id == 0 {
                Err(Error::InvalidReference(
                    "reference id must be nonzero".to_string(),
                ))
            } else {
                Ok(())
            }
        }
        other => Err(Error::InvalidReference(format!(
            "payment must reference a ride or delivery, got {}",
            other
        ))),
    }
}
