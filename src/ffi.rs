//! FFI layer for the mobile host
//!
//! Provides C-compatible functions around an opaque scorer handle.
//! Structured values cross the boundary as JSON C strings.

// FFI functions necessarily work with raw pointers - this is expected behavior
#![allow(clippy::not_unsafe_ptr_arg_deref)]

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::config::ScoringConfig;
use crate::error::{Error, Result};
use crate::scorer::Scorer;
use crate::transcript::Transcript;
use crate::types::TranscribedWord;

/// Opaque handle to a configured scorer
pub struct PronounceHandle {
    scorer: Scorer,
    last_error: Mutex<Option<String>>,
}

fn set_last_error(handle: &PronounceHandle, message: impl Into<String>) {
    let message = message.into();
    warn!("FFI call failed: {}", message);
    *handle.last_error.lock() = Some(message);
}

fn clear_last_error(handle: &PronounceHandle) {
    *handle.last_error.lock() = None;
}

/// Borrow a C string, null is treated as empty text
fn str_or_empty<'a>(s: *const c_char) -> Result<&'a str> {
    if s.is_null() {
        return Ok("");
    }
    unsafe { CStr::from_ptr(s) }
        .to_str()
        .map_err(|e| Error::InvalidInput(format!("string is not valid UTF-8: {}", e)))
}

/// Borrow a required C string
fn required_str<'a>(s: *const c_char, name: &str) -> Result<&'a str> {
    if s.is_null() {
        return Err(Error::InvalidInput(format!("{} is null", name)));
    }
    str_or_empty(s)
}

fn into_c_string(handle: &PronounceHandle, json: String) -> *mut c_char {
    match CString::new(json) {
        Ok(cstr) => cstr.into_raw(),
        Err(e) => {
            set_last_error(handle, e.to_string());
            ptr::null_mut()
        }
    }
}

/// Create a scorer handle
///
/// `config_json` may be null for defaults. Returns null if the config is invalid.
/// Free with pronounce_destroy.
#[unsafe(no_mangle)]
pub extern "C" fn pronounce_init(config_json: *const c_char) -> *mut PronounceHandle {
    let config = if config_json.is_null() {
        Ok(ScoringConfig::default())
    } else {
        str_or_empty(config_json).and_then(ScoringConfig::from_json_str)
    };

    match config.and_then(Scorer::new) {
        Ok(scorer) => {
            debug!("Created scorer handle");
            Box::into_raw(Box::new(PronounceHandle {
                scorer,
                last_error: Mutex::new(None),
            }))
        }
        Err(e) => {
            warn!("Failed to create scorer handle: {}", e);
            ptr::null_mut()
        }
    }
}

/// Destroy a handle created by pronounce_init
#[unsafe(no_mangle)]
pub extern "C" fn pronounce_destroy(handle: *mut PronounceHandle) {
    if !handle.is_null() {
        unsafe {
            drop(Box::from_raw(handle));
        }
    }
}

/// Similarity percentage in [0, 100]; null strings count as empty
/// Returns -1 on a null handle or non-UTF-8 input
#[unsafe(no_mangle)]
pub extern "C" fn pronounce_similarity_percent(
    handle: *mut PronounceHandle,
    reference: *const c_char,
    hypothesis: *const c_char,
) -> f64 {
    if handle.is_null() {
        return -1.0;
    }
    let handle = unsafe { &*handle };

    let texts = str_or_empty(reference).and_then(|r| Ok((r, str_or_empty(hypothesis)?)));
    match texts {
        Ok((reference, hypothesis)) => {
            clear_last_error(handle);
            handle.scorer.similarity_percent(reference, hypothesis)
        }
        Err(e) => {
            set_last_error(handle, e.to_string());
            -1.0
        }
    }
}

/// Compare transcribed words against the reference
/// `words_json` is an array of {"word", "confidence"} objects
/// Returns a JSON array of {"word", "isCorrect", "confidence"} (caller must free with
/// pronounce_free_string), or null on failure
#[unsafe(no_mangle)]
pub extern "C" fn pronounce_compare_words(
    handle: *mut PronounceHandle,
    reference: *const c_char,
    words_json: *const c_char,
) -> *mut c_char {
    if handle.is_null() {
        return ptr::null_mut();
    }
    let handle = unsafe { &*handle };

    let result = (|| -> Result<String> {
        let reference = str_or_empty(reference)?;
        let words: Vec<TranscribedWord> =
            serde_json::from_str(required_str(words_json, "words_json")?)?;
        let results = handle.scorer.compare_words(reference, &words);
        Ok(serde_json::to_string(&results)?)
    })();

    match result {
        Ok(json) => {
            clear_last_error(handle);
            into_c_string(handle, json)
        }
        Err(e) => {
            set_last_error(handle, e.to_string());
            ptr::null_mut()
        }
    }
}

/// Score a full attempt from a Deepgram listen response
/// Returns the report as JSON (caller must free with pronounce_free_string), or null on failure
#[unsafe(no_mangle)]
pub extern "C" fn pronounce_evaluate(
    handle: *mut PronounceHandle,
    reference: *const c_char,
    deepgram_json: *const c_char,
    audio_duration_secs: u64,
) -> *mut c_char {
    if handle.is_null() {
        return ptr::null_mut();
    }
    let handle = unsafe { &*handle };

    let result = (|| -> Result<String> {
        let reference = str_or_empty(reference)?;
        let transcript =
            Transcript::from_deepgram_json(required_str(deepgram_json, "deepgram_json")?)?;
        let report = handle
            .scorer
            .evaluate(reference, &transcript, audio_duration_secs);
        report.to_json()
    })();

    match result {
        Ok(json) => {
            clear_last_error(handle);
            into_c_string(handle, json)
        }
        Err(e) => {
            set_last_error(handle, e.to_string());
            ptr::null_mut()
        }
    }
}

/// Last error message for this handle (caller must free with pronounce_free_string)
/// Returns null if the last call succeeded
#[unsafe(no_mangle)]
pub extern "C" fn pronounce_get_last_error(handle: *mut PronounceHandle) -> *mut c_char {
    if handle.is_null() {
        return ptr::null_mut();
    }
    let handle = unsafe { &*handle };
    let message = handle.last_error.lock().clone();
    match message {
        Some(text) => match CString::new(text) {
            Ok(cstr) => cstr.into_raw(),
            Err(_) => ptr::null_mut(),
        },
        None => ptr::null_mut(),
    }
}

/// Free a string returned by this library
#[unsafe(no_mangle)]
pub extern "C" fn pronounce_free_string(s: *mut c_char) {
    if !s.is_null() {
        unsafe {
            drop(CString::from_raw(s));
        }
    }
}
