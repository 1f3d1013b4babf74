//! Memory management FFI functions
//!
//! The reclaim half of the string ownership contract, allocation
//! accounting, and the `OwnedString` guard used wherever this library
//! consumes its own producer functions.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr::NonNull;
use std::str::Utf8Error;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::string_to_c_str;

// Live caller-owned strings: +1 per successful producing call, -1 per
// reclaimed pointer. Shared process-wide so host test harnesses can
// assert leak-freedom across threads.
static LIVE_STRINGS: AtomicUsize = AtomicUsize::new(0);

pub(crate) fn note_alloc() {
    LIVE_STRINGS.fetch_add(1, Ordering::Relaxed);
}

/// Free a string allocated by the FFI layer
///
/// This must be called exactly once for any string returned by
/// `hello_world()` or a `didcomm_*` function that returns `*mut c_char`
/// (but never for `didcomm_last_error()`, which stays library-owned).
///
/// # Parameters
/// - `ptr`: Pointer to the string to free
///
/// # Safety
/// - The pointer must have been returned by this library
/// - The pointer must not be used after this call
/// - It is safe to call with a null pointer (no-op)
#[no_mangle]
pub extern "C" fn free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            // Reconstruct the CString so the original allocator frees it
            let _ = std::ffi::CString::from_raw(ptr);
        }
        LIVE_STRINGS.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Number of strings produced by this library and not yet freed
///
/// Intended for leak assertions in integration tests; a balanced caller
/// sees the same value before and after a produce/consume/free cycle.
#[no_mangle]
pub extern "C" fn didcomm_live_strings() -> u64 {
    LIVE_STRINGS.load(Ordering::Relaxed) as u64
}

/// Get the version of the DIDComm SDK native library
///
/// # Returns
/// - Version string (caller must free with `free_string()`)
#[no_mangle]
pub extern "C" fn didcomm_version() -> *mut c_char {
    string_to_c_str(env!("CARGO_PKG_VERSION"))
}

/// A producer string with scoped release
///
/// Wraps a non-null pointer returned by one of this library's string
/// producers and calls [`free_string`] exactly once when dropped. The JNI
/// bridge and the test suite go through this type, so no code path on the
/// Rust side can forget to reclaim or reclaim twice.
pub struct OwnedString {
    ptr: NonNull<c_char>,
}

impl OwnedString {
    /// Take ownership of a producer pointer; None for null.
    ///
    /// # Safety
    /// `ptr` must be null or a pointer returned by this library's string
    /// producers that has not been freed.
    pub unsafe fn from_raw(ptr: *mut c_char) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| OwnedString { ptr })
    }

    pub fn as_c_str(&self) -> &CStr {
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
    }

    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        self.as_c_str().to_str()
    }
}

impl Drop for OwnedString {
    fn drop(&mut self) {
        free_string(self.ptr.as_ptr());
    }
}
