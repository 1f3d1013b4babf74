// didcomm-core/src/lib.rs
// Pure Rust API - no FFI types here

pub mod error;
pub mod logging;
pub mod message;

// Public exports
pub use error::{DidcommError, Result};
pub use logging::{get_log_level, set_log_level, LogLevel};
pub use message::{PlaintextMessage, GREETING, PLAINTEXT_TYP};
