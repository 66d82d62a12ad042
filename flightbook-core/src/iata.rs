use crate::{CoreError, CoreResult};

// ============================================================================
// IATA Airport Codes
// ============================================================================

/// Length of an IATA airport (location) code, e.g. `LHR`.
pub const AIRPORT_CODE_LEN: usize = 3;

/// Check that `code` looks like an IATA airport code: exactly three
/// uppercase ASCII letters.
///
/// This only checks the shape of the code, not that the airport exists.
pub fn validate_airport_code(code: &str) -> CoreResult<()> {
    if code.len() != AIRPORT_CODE_LEN {
        return Err(CoreError::ValidationError(format!(
            "airport code '{}' must be {} letters",
            code, AIRPORT_CODE_LEN
        )));
    }

    if !code.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(CoreError::ValidationError(format!(
            "airport code '{}' must be uppercase letters only",
            code
        )));
    }

    Ok(())
}
