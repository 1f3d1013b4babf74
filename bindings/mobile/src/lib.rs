//! DIDComm SDK C FFI Layer
//!
//! This crate provides the C-compatible surface of the DIDComm SDK,
//! consumed directly by the iOS host module and through the JNI bridge
//! on Android. The build script generates `include/didcomm.h` with
//! cbindgen for C callers.
//!
//! Ownership contract: every `*mut c_char` returned by these functions
//! is a fresh heap allocation owned by the caller, released exactly once
//! with [`free_string`]. The borrowed exception is
//! [`didcomm_last_error`], which stays owned by the library.

mod error;
mod hello;
mod logging;
mod memory;
mod message;

/// cbindgen:ignore
#[cfg(target_os = "android")]
mod android;

// Re-export all public FFI functions
pub use error::*;
pub use hello::*;
pub use logging::*;
pub use memory::*;
pub use message::*;

#[cfg(target_os = "android")]
pub use android::*;
