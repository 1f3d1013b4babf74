//! Message operations FFI functions
//!
//! Plaintext pack/unpack. Strings in, caller-owned strings out through
//! out-parameters, error codes back.

use std::os::raw::c_char;

use didcomm_core::PlaintextMessage;
use serde_json::Value;

use crate::error::{
    c_str_to_string, clear_last_error, set_error, set_last_error, string_to_c_str,
    DidcommErrorCode,
};

/// Pack a message body into a plaintext envelope
///
/// Builds a fresh envelope (new id, current timestamp) around the given
/// body and serializes it to compact JSON.
///
/// # Parameters
/// - `message_type`: Protocol message type URI (UTF-8 null-terminated string)
/// - `body_json`: Message body as a JSON object string
/// - `out_msg`: Pointer to receive the packed envelope (caller must free
///   with `free_string()`)
///
/// # Returns
/// - `DidcommErrorCode::Success` (0) on success
/// - Error code on failure (check `didcomm_last_error()` for details)
#[no_mangle]
pub extern "C" fn didcomm_pack_plaintext(
    message_type: *const c_char,
    body_json: *const c_char,
    out_msg: *mut *mut c_char,
) -> i32 {
    clear_last_error();

    if out_msg.is_null() {
        set_last_error("out_msg is null");
        return DidcommErrorCode::NullPointer as i32;
    }

    let type_str = match c_str_to_string(message_type) {
        Some(s) => s,
        None => {
            set_last_error("message type is null or invalid UTF-8");
            return DidcommErrorCode::NullPointer as i32;
        }
    };

    let body_str = match c_str_to_string(body_json) {
        Some(s) => s,
        None => {
            set_last_error("body is null or invalid UTF-8");
            return DidcommErrorCode::NullPointer as i32;
        }
    };

    let body: Value = match serde_json::from_str(&body_str) {
        Ok(v) => v,
        Err(e) => {
            set_last_error(&format!("invalid body JSON: {}", e));
            return DidcommErrorCode::SerializationError as i32;
        }
    };

    let message = PlaintextMessage::new(&type_str, body);
    match message.pack() {
        Ok(json) => {
            let ptr = string_to_c_str(&json);
            if ptr.is_null() {
                set_last_error("failed to allocate envelope buffer");
                return DidcommErrorCode::AllocationFailed as i32;
            }
            unsafe {
                *out_msg = ptr;
            }
            DidcommErrorCode::Success as i32
        }
        Err(e) => set_error(&e) as i32,
    }
}

/// Unpack and validate a plaintext envelope
///
/// # Parameters
/// - `msg`: Envelope JSON (UTF-8 null-terminated string)
/// - `out_json`: Pointer to receive the validated envelope in canonical
///   compact JSON (caller must free with `free_string()`)
///
/// # Returns
/// - `DidcommErrorCode::Success` (0) on success
/// - Error code on failure (check `didcomm_last_error()` for details)
#[no_mangle]
pub extern "C" fn didcomm_unpack_plaintext(
    msg: *const c_char,
    out_json: *mut *mut c_char,
) -> i32 {
    clear_last_error();

    if out_json.is_null() {
        set_last_error("out_json is null");
        return DidcommErrorCode::NullPointer as i32;
    }

    let msg_str = match c_str_to_string(msg) {
        Some(s) => s,
        None => {
            set_last_error("message is null or invalid UTF-8");
            return DidcommErrorCode::NullPointer as i32;
        }
    };

    let message = match PlaintextMessage::unpack(&msg_str) {
        Ok(m) => m,
        Err(e) => return set_error(&e) as i32,
    };

    match message.pack() {
        Ok(json) => {
            let ptr = string_to_c_str(&json);
            if ptr.is_null() {
                set_last_error("failed to allocate envelope buffer");
                return DidcommErrorCode::AllocationFailed as i32;
            }
            unsafe {
                *out_json = ptr;
            }
            DidcommErrorCode::Success as i32
        }
        Err(e) => set_error(&e) as i32,
    }
}
