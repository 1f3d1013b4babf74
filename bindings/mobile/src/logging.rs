//! Logging FFI functions
//!
//! Global logging configuration for the native library

use std::os::raw::c_char;

use crate::error::{
    c_str_to_string, clear_last_error, set_last_error, string_to_c_str, DidcommErrorCode,
};
use didcomm_core::log_info;

/// Set the global log level
///
/// # Parameters
/// - `level`: Log level string (one of: "ERROR", "WARN", "INFO", "DEBUG", "TRACE")
///
/// # Returns
/// - `DidcommErrorCode::Success` (0) on success
/// - Error code on failure
#[no_mangle]
pub extern "C" fn didcomm_set_log_level(level: *const c_char) -> i32 {
    clear_last_error();

    let level_str = match c_str_to_string(level) {
        Some(s) => s,
        None => {
            set_last_error("level is null or invalid UTF-8");
            return DidcommErrorCode::NullPointer as i32;
        }
    };

    let log_level = match didcomm_core::LogLevel::from_str(&level_str) {
        Some(l) => l,
        None => {
            set_last_error(&format!(
                "invalid log level '{}'. Must be one of: ERROR, WARN, INFO, DEBUG, TRACE",
                level_str
            ));
            return DidcommErrorCode::InvalidArgument as i32;
        }
    };

    didcomm_core::set_log_level(log_level);
    log_info!("log level set to {}", log_level.as_str());
    DidcommErrorCode::Success as i32
}

/// Get the current global log level
///
/// # Returns
/// - Log level string (caller must free with `free_string()`)
/// - Null on error
#[no_mangle]
pub extern "C" fn didcomm_get_log_level() -> *mut c_char {
    clear_last_error();

    let level = didcomm_core::get_log_level();
    string_to_c_str(level.as_str())
}
