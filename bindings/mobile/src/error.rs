//! Error handling for FFI
//!
//! Functions return error codes; the detailed message for the most recent
//! failure on the calling thread is available via `didcomm_last_error()`.

use didcomm_core::DidcommError;
use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Error codes returned by FFI functions
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DidcommErrorCode {
    /// Operation succeeded
    Success = 0,

    /// Null pointer or non-UTF-8 string passed to a function
    NullPointer = -1,

    /// JSON serialization/deserialization error
    SerializationError = -2,

    /// Envelope violates the plaintext message rules
    InvalidMessage = -3,

    /// Argument value out of range (e.g. unknown log level)
    InvalidArgument = -4,

    /// Result string could not be allocated as a C string
    AllocationFailed = -5,

    /// Unknown/internal error
    Unknown = -99,
}

impl From<&DidcommError> for DidcommErrorCode {
    fn from(err: &DidcommError) -> Self {
        match err {
            DidcommError::Serialization(_) => DidcommErrorCode::SerializationError,
            DidcommError::InvalidMessage(_) => DidcommErrorCode::InvalidMessage,
        }
    }
}

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message (internal use)
pub(crate) fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Set error from DidcommError (internal use)
pub(crate) fn set_error(err: &DidcommError) -> DidcommErrorCode {
    set_last_error(&err.to_string());
    DidcommErrorCode::from(err)
}

/// Clear the last error message
pub(crate) fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Get the last error message
///
/// Returns a pointer to a null-terminated UTF-8 string describing the
/// most recent failure on the calling thread, or null if none occurred.
///
/// # Safety
/// The returned pointer must NOT be passed to `free_string()`; it stays
/// owned by the library and is only valid until the next FFI call on the
/// same thread.
#[no_mangle]
pub extern "C" fn didcomm_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match e.borrow().as_ref() {
        Some(cstr) => cstr.as_ptr(),
        None => std::ptr::null(),
    })
}

/// Clear the last error message
#[no_mangle]
pub extern "C" fn didcomm_clear_error() {
    clear_last_error();
}

/// Check if an error occurred
///
/// Returns 1 if there is an error message for the calling thread, 0 otherwise.
#[no_mangle]
pub extern "C" fn didcomm_has_error() -> i32 {
    LAST_ERROR.with(|e| if e.borrow().is_some() { 1 } else { 0 })
}

/// Helper to convert a C string to a Rust string
///
/// Returns None if the pointer is null or the string is not valid UTF-8
pub(crate) fn c_str_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string()) }
}

/// Helper to convert a Rust string to a caller-owned C string
///
/// Every string handed out here is counted as live until `free_string()`
/// reclaims it. Returns null if the text contains an interior NUL or the
/// allocation fails.
pub(crate) fn string_to_c_str(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => {
            crate::memory::note_alloc();
            cstr.into_raw()
        }
        Err(_) => std::ptr::null_mut(),
    }
}
