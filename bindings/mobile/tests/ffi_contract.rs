// ffi_contract.rs
// String ownership contract tests for the C surface:
// 1. Producers return valid, distinct, caller-owned strings
// 2. free_string reclaims exactly what was produced, null is a no-op
// 3. Allocation accounting balances under concurrency

use std::collections::HashSet;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use std::sync::{Barrier, Mutex, OnceLock};
use std::thread;

use didcomm_sdk::{
    didcomm_clear_error, didcomm_get_log_level, didcomm_has_error, didcomm_last_error,
    didcomm_live_strings, didcomm_pack_plaintext, didcomm_set_log_level,
    didcomm_unpack_plaintext, didcomm_version, free_string, hello_world, DidcommErrorCode,
    OwnedString,
};

// The live-string counter is process-wide and the test harness runs tests
// in parallel, so anything asserting on counter values serializes here.
fn counter_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn lock_counter() -> std::sync::MutexGuard<'static, ()> {
    counter_lock()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn read_c_string(ptr: *const c_char) -> String {
    assert!(!ptr.is_null(), "expected a non-null string");
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .expect("producer strings are valid UTF-8")
        .to_string()
}

// =============================================================================
// PRODUCER / RECLAIMER CONTRACT
// =============================================================================

#[test]
fn test_hello_world_produces_valid_greeting() {
    let _guard = lock_counter();
    let baseline = didcomm_live_strings();

    let ptr = hello_world();
    assert!(!ptr.is_null(), "hello_world must not return null on success");
    assert_eq!(didcomm_live_strings(), baseline + 1);

    let text = read_c_string(ptr);
    assert_eq!(text, "Hello from the DIDComm native module!");

    free_string(ptr);
    assert_eq!(didcomm_live_strings(), baseline);
}

#[test]
fn test_free_string_null_is_noop() {
    let _guard = lock_counter();
    let baseline = didcomm_live_strings();

    free_string(ptr::null_mut());

    assert_eq!(didcomm_live_strings(), baseline);
}

#[test]
fn test_version_is_caller_owned() {
    let _guard = lock_counter();
    let baseline = didcomm_live_strings();

    let ptr = didcomm_version();
    let version = read_c_string(ptr);
    assert!(
        version.split('.').count() >= 2,
        "version should look like semver, got '{}'",
        version
    );

    free_string(ptr);
    assert_eq!(didcomm_live_strings(), baseline);
}

#[test]
fn test_repeated_calls_return_fresh_buffers() {
    let _guard = lock_counter();

    let first = hello_world();
    let second = hello_world();
    assert_ne!(first, second, "producer buffers must not alias");

    free_string(first);
    // second stays readable after the first buffer is reclaimed
    assert_eq!(read_c_string(second), "Hello from the DIDComm native module!");
    free_string(second);
}

// =============================================================================
// RAII GUARD
// =============================================================================

#[test]
fn test_owned_string_releases_exactly_once() {
    let _guard = lock_counter();
    let baseline = didcomm_live_strings();

    {
        let owned = unsafe { OwnedString::from_raw(hello_world()) }
            .expect("hello_world returned null");
        assert_eq!(didcomm_live_strings(), baseline + 1);
        assert_eq!(
            owned.to_str().unwrap(),
            "Hello from the DIDComm native module!"
        );
    }

    // dropped exactly once, counter balanced
    assert_eq!(didcomm_live_strings(), baseline);
}

#[test]
fn test_owned_string_rejects_null() {
    assert!(unsafe { OwnedString::from_raw(ptr::null_mut()) }.is_none());
}

// =============================================================================
// CONCURRENT PRODUCERS
// =============================================================================

/// 100 producer calls across 4 threads: all pointers distinct and valid,
/// each independently reclaimable, accounting balanced at the end.
#[test]
fn test_concurrent_producers_yield_distinct_buffers() {
    const NUM_THREADS: usize = 4;
    const CALLS_PER_THREAD: usize = 25;

    let _guard = lock_counter();
    let baseline = didcomm_live_strings();

    let barrier = std::sync::Arc::new(Barrier::new(NUM_THREADS));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|_| {
            let barrier = std::sync::Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait(); // all threads produce together

                let mut produced = Vec::with_capacity(CALLS_PER_THREAD);
                for _ in 0..CALLS_PER_THREAD {
                    let ptr = hello_world();
                    assert!(!ptr.is_null());
                    assert_eq!(
                        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap(),
                        "Hello from the DIDComm native module!"
                    );
                    produced.push(ptr as usize);
                }
                produced
            })
        })
        .collect();

    let mut all: Vec<usize> = Vec::new();
    for handle in handles {
        all.extend(handle.join().expect("producer thread should not panic"));
    }

    let distinct: HashSet<usize> = all.iter().copied().collect();
    assert_eq!(distinct.len(), NUM_THREADS * CALLS_PER_THREAD);
    assert_eq!(
        didcomm_live_strings(),
        baseline + (NUM_THREADS * CALLS_PER_THREAD) as u64
    );

    // reclaim from this thread: ownership is per-buffer, not per-thread
    for ptr in all {
        free_string(ptr as *mut c_char);
    }
    assert_eq!(didcomm_live_strings(), baseline);
}

// =============================================================================
// MESSAGE OPERATIONS
// =============================================================================

const PING_TYPE: &str = "https://didcomm.org/trust-ping/2.0/ping";

#[test]
fn test_pack_unpack_round_trip() {
    let _guard = lock_counter();
    let baseline = didcomm_live_strings();

    let message_type = CString::new(PING_TYPE).unwrap();
    let body = CString::new(r#"{"response_requested":true}"#).unwrap();

    let mut packed: *mut c_char = ptr::null_mut();
    let rc = didcomm_pack_plaintext(message_type.as_ptr(), body.as_ptr(), &mut packed);
    assert_eq!(rc, DidcommErrorCode::Success as i32);

    let envelope = read_c_string(packed);
    let wire: serde_json::Value = serde_json::from_str(&envelope).unwrap();
    assert_eq!(wire["typ"], "application/didcomm-plain+json");
    assert_eq!(wire["type"], PING_TYPE);
    assert_eq!(wire["body"]["response_requested"], true);
    assert!(!wire["id"].as_str().unwrap().is_empty());

    let mut unpacked: *mut c_char = ptr::null_mut();
    let rc = didcomm_unpack_plaintext(packed, &mut unpacked);
    assert_eq!(rc, DidcommErrorCode::Success as i32);
    assert_eq!(read_c_string(unpacked), envelope);

    free_string(packed);
    free_string(unpacked);
    assert_eq!(didcomm_live_strings(), baseline);
}

#[test]
fn test_unpack_invalid_json_sets_error() {
    let _guard = lock_counter();

    didcomm_clear_error();
    let msg = CString::new("{not an envelope").unwrap();
    let mut out: *mut c_char = ptr::null_mut();

    let rc = didcomm_unpack_plaintext(msg.as_ptr(), &mut out);
    assert_eq!(rc, DidcommErrorCode::SerializationError as i32);
    assert!(out.is_null(), "no string is produced on failure");

    assert_eq!(didcomm_has_error(), 1);
    let detail = read_c_string(didcomm_last_error());
    assert!(!detail.is_empty());

    didcomm_clear_error();
    assert_eq!(didcomm_has_error(), 0);
    assert!(didcomm_last_error().is_null());
}

#[test]
fn test_unpack_rejects_wrong_media_type() {
    let _guard = lock_counter();

    let msg = CString::new(format!(
        r#"{{"id":"abc-1","typ":"application/json","type":"{}","body":{{}}}}"#,
        PING_TYPE
    ))
    .unwrap();
    let mut out: *mut c_char = ptr::null_mut();

    let rc = didcomm_unpack_plaintext(msg.as_ptr(), &mut out);
    assert_eq!(rc, DidcommErrorCode::InvalidMessage as i32);
    assert!(out.is_null());
}

#[test]
fn test_pack_null_arguments() {
    let _guard = lock_counter();

    let message_type = CString::new(PING_TYPE).unwrap();
    let body = CString::new("{}").unwrap();
    let mut out: *mut c_char = ptr::null_mut();

    let rc = didcomm_pack_plaintext(message_type.as_ptr(), body.as_ptr(), ptr::null_mut());
    assert_eq!(rc, DidcommErrorCode::NullPointer as i32);

    let rc = didcomm_pack_plaintext(ptr::null(), body.as_ptr(), &mut out);
    assert_eq!(rc, DidcommErrorCode::NullPointer as i32);
    assert!(out.is_null());

    let rc = didcomm_pack_plaintext(message_type.as_ptr(), ptr::null(), &mut out);
    assert_eq!(rc, DidcommErrorCode::NullPointer as i32);
    assert!(out.is_null());
}

// =============================================================================
// ERROR SLOT
// =============================================================================

/// The last-error slot is thread-local: a failure on one thread is not
/// visible from another.
#[test]
fn test_last_error_is_thread_confined() {
    let _guard = lock_counter();

    didcomm_clear_error();
    thread::spawn(|| {
        let msg = CString::new("{broken").unwrap();
        let mut out: *mut c_char = ptr::null_mut();
        let rc = didcomm_unpack_plaintext(msg.as_ptr(), &mut out);
        assert_ne!(rc, DidcommErrorCode::Success as i32);
        assert_eq!(didcomm_has_error(), 1);
    })
    .join()
    .expect("worker thread should not panic");

    assert_eq!(didcomm_has_error(), 0);
}

// =============================================================================
// LOGGING SURFACE
// =============================================================================

#[test]
fn test_log_level_round_trip_over_ffi() {
    let _guard = lock_counter();

    let initial = {
        let ptr = didcomm_get_log_level();
        let level = read_c_string(ptr);
        free_string(ptr);
        level
    };

    let debug = CString::new("debug").unwrap();
    assert_eq!(
        didcomm_set_log_level(debug.as_ptr()),
        DidcommErrorCode::Success as i32
    );

    let ptr = didcomm_get_log_level();
    assert_eq!(read_c_string(ptr), "DEBUG");
    free_string(ptr);

    let bogus = CString::new("chatty").unwrap();
    assert_eq!(
        didcomm_set_log_level(bogus.as_ptr()),
        DidcommErrorCode::InvalidArgument as i32
    );
    assert_eq!(didcomm_has_error(), 1);

    // restore so other suites keep their expected verbosity
    let restore = CString::new(initial).unwrap();
    assert_eq!(
        didcomm_set_log_level(restore.as_ptr()),
        DidcommErrorCode::Success as i32
    );
}
