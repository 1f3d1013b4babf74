//! Smoke-test entry point
//!
//! The first function the host bridges call after loading the library to
//! prove the symbol table, string marshalling and reclaim path all work.

use std::os::raw::c_char;

use crate::error::{clear_last_error, set_last_error, string_to_c_str};

/// Produce the library greeting
///
/// Every call allocates a fresh null-terminated UTF-8 string on the
/// native heap; concurrent calls return distinct buffers.
///
/// # Returns
/// - Pointer to the greeting (caller must free with `free_string()`)
/// - Null if the string could not be allocated (see `didcomm_last_error()`)
#[no_mangle]
pub extern "C" fn hello_world() -> *mut c_char {
    clear_last_error();

    let ptr = string_to_c_str(didcomm_core::GREETING);
    if ptr.is_null() {
        set_last_error("failed to allocate greeting buffer");
    }
    ptr
}
