//! JNI bridge methods for the Android host module
//!
//! Bound by `com.didcomm.DidcommModule`'s native-method declarations.
//! Every method converts the produced native string into a Java string
//! through the [`OwnedString`] guard and releases the native buffer
//! before returning, so no raw pointer ever reaches the Java layer.
//! Native failures surface as thrown `IllegalStateException`s, never as
//! crashes of the host process.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;

use crate::memory::OwnedString;

const EXCEPTION_CLASS: &str = "java/lang/IllegalStateException";

/// Throw the thread's last error, or `fallback` if none is recorded.
fn throw_last_error(env: &mut JNIEnv, fallback: &str) {
    let detail = {
        let ptr = crate::error::didcomm_last_error();
        if ptr.is_null() {
            fallback.to_string()
        } else {
            unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
        }
    };
    let _ = env.throw_new(EXCEPTION_CLASS, detail);
}

/// Consume a producer pointer and hand its contents to Java.
///
/// Takes ownership of `ptr`; the native buffer is released before this
/// function returns on every path.
fn to_java_string(env: &mut JNIEnv, ptr: *mut c_char) -> jstring {
    let owned = match unsafe { OwnedString::from_raw(ptr) } {
        Some(s) => s,
        None => {
            throw_last_error(env, "native call returned null");
            return ptr::null_mut();
        }
    };

    match owned.to_str() {
        Ok(s) => match env.new_string(s) {
            Ok(js) => js.into_raw(),
            Err(_) => {
                // new_string leaves a pending OutOfMemoryError in the VM
                ptr::null_mut()
            }
        },
        Err(_) => {
            let _ = env.throw_new(EXCEPTION_CLASS, "native string is not valid UTF-8");
            ptr::null_mut()
        }
    }
}

/// Read a Java string argument into a C string for the FFI surface.
fn read_argument(env: &mut JNIEnv, value: &JString, name: &str) -> Option<CString> {
    let text: String = match env.get_string(value) {
        Ok(s) => s.into(),
        Err(_) => {
            let _ = env.throw_new(EXCEPTION_CLASS, format!("{} is not a valid string", name));
            return None;
        }
    };
    match CString::new(text) {
        Ok(cstr) => Some(cstr),
        Err(_) => {
            let _ = env.throw_new(
                EXCEPTION_CLASS,
                format!("{} contains an interior NUL byte", name),
            );
            None
        }
    }
}

#[no_mangle]
pub extern "system" fn Java_com_didcomm_DidcommModule_hello_1world<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jstring {
    to_java_string(&mut env, crate::hello::hello_world())
}

#[no_mangle]
pub extern "system" fn Java_com_didcomm_DidcommModule_pack_1plaintext<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    message_type: JString<'local>,
    body_json: JString<'local>,
) -> jstring {
    let type_c = match read_argument(&mut env, &message_type, "message type") {
        Some(c) => c,
        None => return ptr::null_mut(),
    };
    let body_c = match read_argument(&mut env, &body_json, "body") {
        Some(c) => c,
        None => return ptr::null_mut(),
    };

    let mut out: *mut c_char = ptr::null_mut();
    let rc = crate::message::didcomm_pack_plaintext(type_c.as_ptr(), body_c.as_ptr(), &mut out);
    if rc != crate::error::DidcommErrorCode::Success as i32 {
        throw_last_error(&mut env, "pack failed");
        return ptr::null_mut();
    }
    to_java_string(&mut env, out)
}

#[no_mangle]
pub extern "system" fn Java_com_didcomm_DidcommModule_unpack_1plaintext<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    msg: JString<'local>,
) -> jstring {
    let msg_c = match read_argument(&mut env, &msg, "message") {
        Some(c) => c,
        None => return ptr::null_mut(),
    };

    let mut out: *mut c_char = ptr::null_mut();
    let rc = crate::message::didcomm_unpack_plaintext(msg_c.as_ptr(), &mut out);
    if rc != crate::error::DidcommErrorCode::Success as i32 {
        throw_last_error(&mut env, "unpack failed");
        return ptr::null_mut();
    }
    to_java_string(&mut env, out)
}
