//! The `explain` command: describe a compiler error code.

use juice_diagnostic::ErrorCode;

use crate::DriverError;

/// Print what `code_str` means, e.g. `E1002`.
pub fn explain_error(code_str: &str) -> Result<(), DriverError> {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        return Err(DriverError::UnknownErrorCode(code_str.to_string()));
    };
    println!("{code}: {}", code.description());
    Ok(())
}
