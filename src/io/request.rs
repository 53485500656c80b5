//! Read a meal request from JSON.
//!
//! The schema matches the original service's request body: `foods` is
//! required, the energy target and macro percentages fall back to the
//! standard defaults when omitted. Precondition checks happen in
//! `MealRequest::validate`, not here — this layer only decodes.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::MealRequest;
use crate::error::AppError;

/// Read a request JSON file; `-` reads from stdin.
pub fn read_request(path: &Path) -> Result<MealRequest, AppError> {
    if path.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .map_err(|e| AppError::new(2, format!("Failed to read request from stdin: {e}")))?;
        parse_request(&raw)
    } else {
        let file = File::open(path).map_err(|e| {
            AppError::new(2, format!("Failed to open request JSON '{}': {e}", path.display()))
        })?;
        serde_json::from_reader(file)
            .map_err(|e| AppError::new(2, format!("Invalid request JSON: {e}")))
    }
}

/// Parse a request from a JSON string.
pub fn parse_request(raw: &str) -> Result<MealRequest, AppError> {
    serde_json::from_str(raw).map_err(|e| AppError::new(2, format!("Invalid request JSON: {e}")))
}
