/*
 * lib.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Mailto, a mailto: URI builder for email clients.
 *
 * Mailto is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Mailto is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Mailto.  If not, see <http://www.gnu.org/licenses/>.
 */

//! C FFI for mailto core. Builders are identified by an opaque id string returned by
//! mailto_builder_new (free with mailto_free_string, release with mailto_builder_free).
//! All string parameters are UTF-8 NUL-terminated. Functions returning c_int return 0 on
//! success or one of the MAILTO_ERR_* codes; mailto_last_error then holds the message.

use libc::{c_char, c_int, c_void, size_t};
use log::debug;
use mailto_core::{
    encode_recipient, is_valid_address, normalize_line_endings, Dispatcher, MailtoBuilder, MailtoError,
    NoHandlerFound, RecipientField, SystemDispatcher,
};
use std::collections::HashMap;
use std::ffi::{CStr, CString};
use std::ptr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

/// A required argument was NULL.
pub const MAILTO_ERR_MISSING_ARGUMENT: c_int = -2;
/// An address failed validation.
pub const MAILTO_ERR_INVALID_ADDRESS: c_int = -3;
/// The subject contained CR or LF.
pub const MAILTO_ERR_CONTAINS_LINE_BREAK: c_int = -4;
/// No builder is registered under the given id (never created, or already freed).
pub const MAILTO_ERR_UNKNOWN_BUILDER: c_int = -5;
/// A string argument was not valid UTF-8.
pub const MAILTO_ERR_INVALID_UTF8: c_int = -6;
/// The builder registry is unusable after a panic while it was locked.
pub const MAILTO_ERR_REGISTRY_POISONED: c_int = -7;

/// Dispatch callback: open the URI with the platform's mail client. Return 0 if it was handed
/// over, non-zero if no application can handle it. Called on the thread that called
/// mailto_builder_start.
type DispatchCallback = extern "C" fn(*const c_char, *mut c_void) -> c_int;

/// Wrapper so *mut c_void can live in a static. The UI owns user_data and keeps it valid while
/// the callback is registered.
struct SendableUserData(*mut c_void);
unsafe impl Send for SendableUserData {}
unsafe impl Sync for SendableUserData {}

static DISPATCH_CALLBACK: once_cell::sync::OnceCell<Mutex<Option<(DispatchCallback, SendableUserData)>>> =
    once_cell::sync::OnceCell::new();

fn with_dispatch_callback<R, F: FnOnce(Option<&(DispatchCallback, SendableUserData)>) -> R>(f: F) -> R {
    let m = DISPATCH_CALLBACK.get_or_init(|| Mutex::new(None));
    let guard = m.lock().ok();
    f(guard.as_ref().and_then(|g| g.as_ref()))
}

/// Dispatcher that forwards to the UI callback.
struct CallbackDispatcher {
    callback: DispatchCallback,
    user_data: *mut c_void,
}

impl Dispatcher for CallbackDispatcher {
    fn dispatch(&self, uri: &str) -> Result<(), NoHandlerFound> {
        let uri_c = CString::new(uri).map_err(|_| NoHandlerFound::for_uri(uri))?;
        if (self.callback)(uri_c.as_ptr(), self.user_data) == 0 {
            Ok(())
        } else {
            Err(NoHandlerFound::for_uri(uri))
        }
    }
}

/// Builders keyed by opaque id.
struct Registry {
    builders: RwLock<HashMap<String, MailtoBuilder>>,
    builder_counter: AtomicU64,
}

impl Registry {
    fn new() -> Self {
        Registry {
            builders: RwLock::new(HashMap::new()),
            builder_counter: AtomicU64::new(0),
        }
    }

    /// Register an empty builder and return its id, or None if the lock is poisoned.
    fn create(&self) -> Option<String> {
        let mut guard = self.builders.write().ok()?;
        let ctr = self.builder_counter.fetch_add(1, Ordering::Relaxed);
        let id = format!("mailto:builder:{}", ctr);
        guard.insert(id.clone(), MailtoBuilder::new());
        Some(id)
    }

    /// Run `f` on the builder registered as `id`, mapping its error to a code.
    fn with_builder<F>(&self, id: &str, f: F) -> c_int
    where
        F: FnOnce(&mut MailtoBuilder) -> Result<(), MailtoError>,
    {
        let mut guard = match self.builders.write() {
            Ok(g) => g,
            Err(_) => return fail_poisoned(),
        };
        let builder = match guard.get_mut(id) {
            Some(b) => b,
            None => return fail_unknown_builder(id),
        };
        match f(builder) {
            Ok(()) => {
                clear_last_error();
                0
            }
            Err(e) => fail(&e),
        }
    }
}

fn registry() -> &'static Registry {
    static REGISTRY: once_cell::sync::OnceCell<Registry> = once_cell::sync::OnceCell::new();
    REGISTRY.get_or_init(Registry::new)
}

/// Why a string argument could not be read.
enum ArgError {
    Null(&'static str),
    NotUtf8(&'static str),
}

/// Borrow a C string argument. Valid for the duration of the FFI call.
unsafe fn arg_str<'a>(ptr: *const c_char, name: &'static str) -> Result<&'a str, ArgError> {
    if ptr.is_null() {
        return Err(ArgError::Null(name));
    }
    CStr::from_ptr(ptr).to_str().map_err(|_| ArgError::NotUtf8(name))
}

thread_local! {
    static LAST_ERROR: std::cell::RefCell<Option<CString>> = std::cell::RefCell::new(None);
}

fn set_last_error_message(msg: &str) {
    let msg = CString::new(msg.replace('\0', " ")).unwrap_or_default();
    LAST_ERROR.with(|e| *e.borrow_mut() = Some(msg));
}

fn clear_last_error() {
    LAST_ERROR.with(|e| *e.borrow_mut() = None);
}

/// Record `err` as the last error and return its code.
fn fail(err: &MailtoError) -> c_int {
    set_last_error_message(&err.to_string());
    match err {
        MailtoError::MissingArgument(_) => MAILTO_ERR_MISSING_ARGUMENT,
        MailtoError::InvalidAddress(_) => MAILTO_ERR_INVALID_ADDRESS,
        MailtoError::ContainsLineBreak => MAILTO_ERR_CONTAINS_LINE_BREAK,
    }
}

fn fail_arg(err: ArgError) -> c_int {
    match err {
        ArgError::Null(name) => fail(&MailtoError::MissingArgument(name)),
        ArgError::NotUtf8(name) => {
            set_last_error_message(&format!("{} is not valid UTF-8", name));
            MAILTO_ERR_INVALID_UTF8
        }
    }
}

fn fail_unknown_builder(id: &str) -> c_int {
    set_last_error_message(&format!("builder not found: {}", id));
    MAILTO_ERR_UNKNOWN_BUILDER
}

fn fail_poisoned() -> c_int {
    set_last_error_message("builder registry lock poisoned");
    MAILTO_ERR_REGISTRY_POISONED
}

/// Run `f` on the builder registered as `builder_id`, mapping its error to a code.
unsafe fn with_builder<F>(builder_id: *const c_char, f: F) -> c_int
where
    F: FnOnce(&mut MailtoBuilder) -> Result<(), MailtoError>,
{
    match arg_str(builder_id, "builder_id") {
        Ok(id) => registry().with_builder(id, f),
        Err(e) => fail_arg(e),
    }
}

/// Copy `s` into a newly allocated C string (caller frees with mailto_free_string).
fn into_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c) => c.into_raw(),
        Err(_) => {
            set_last_error_message("string contains NUL");
            ptr::null_mut()
        }
    }
}

/// Version string (static, do not free).
#[no_mangle]
pub extern "C" fn mailto_version() -> *const c_char {
    b"0.1.0\0".as_ptr() as *const c_char
}

/// Last error message from a failed call on this thread. Valid until the next FFI call. Do not free.
#[no_mangle]
pub extern "C" fn mailto_last_error() -> *const c_char {
    LAST_ERROR.with(|e| e.borrow().as_ref().map(|s| s.as_ptr()).unwrap_or(ptr::null()))
}

/// Free a string returned by mailto_builder_new, mailto_builder_build, mailto_encode_recipient
/// or mailto_normalize_line_endings. No-op if ptr is NULL.
#[no_mangle]
pub unsafe extern "C" fn mailto_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        let _ = CString::from_raw(ptr);
    }
}

/// Install env_logger (filter from RUST_LOG). Safe to call more than once.
#[no_mangle]
pub extern "C" fn mailto_init_logging() {
    let _ = env_logger::try_init();
}

/// Register the platform dispatcher used by mailto_builder_start. Pass NULL to unregister and
/// fall back to the desktop's mailto: handler.
#[no_mangle]
pub unsafe extern "C" fn mailto_set_dispatch_callback(callback: Option<DispatchCallback>, user_data: *mut c_void) {
    let m = DISPATCH_CALLBACK.get_or_init(|| Mutex::new(None));
    if let Ok(mut guard) = m.lock() {
        *guard = callback.map(|cb| (cb, SendableUserData(user_data)));
    }
}

// ---------- Builder ----------

/// Create an empty builder. Returns its id (caller frees with mailto_free_string and releases
/// the builder with mailto_builder_free), or NULL if the registry is poisoned.
#[no_mangle]
pub extern "C" fn mailto_builder_new() -> *mut c_char {
    match registry().create() {
        Some(id) => {
            debug!("created {}", id);
            clear_last_error();
            into_c_string(id)
        }
        None => {
            fail_poisoned();
            ptr::null_mut()
        }
    }
}

/// Release a builder. No-op if the id is NULL or unknown.
#[no_mangle]
pub unsafe extern "C" fn mailto_builder_free(builder_id: *const c_char) {
    if let Ok(id) = arg_str(builder_id, "builder_id") {
        if let Ok(mut guard) = registry().builders.write() {
            guard.remove(id);
        }
    }
}

unsafe fn add_recipient(builder_id: *const c_char, field: RecipientField, address: *const c_char) -> c_int {
    let address = match arg_str(address, "address") {
        Ok(s) => s,
        Err(e) => return fail_arg(e),
    };
    with_builder(builder_id, |b| b.add_recipient(field, address).map(|_| ()))
}

unsafe fn add_recipient_list(
    builder_id: *const c_char,
    field: RecipientField,
    addresses: *const *const c_char,
    count: size_t,
) -> c_int {
    if addresses.is_null() {
        if count == 0 {
            return with_builder(builder_id, |_| Ok(()));
        }
        return fail(&MailtoError::MissingArgument("addresses"));
    }
    let mut list = Vec::with_capacity(count);
    for &p in std::slice::from_raw_parts(addresses, count) {
        match arg_str(p, "address") {
            Ok(s) => list.push(s),
            Err(e) => return fail_arg(e),
        }
    }
    with_builder(builder_id, |b| b.add_recipients(field, list).map(|_| ()))
}

/// Add one "to" address. Returns 0 or a MAILTO_ERR_* code; the builder is unchanged on error.
#[no_mangle]
pub unsafe extern "C" fn mailto_builder_to(builder_id: *const c_char, address: *const c_char) -> c_int {
    add_recipient(builder_id, RecipientField::To, address)
}

/// Add one "cc" address.
#[no_mangle]
pub unsafe extern "C" fn mailto_builder_cc(builder_id: *const c_char, address: *const c_char) -> c_int {
    add_recipient(builder_id, RecipientField::Cc, address)
}

/// Add one "bcc" address.
#[no_mangle]
pub unsafe extern "C" fn mailto_builder_bcc(builder_id: *const c_char, address: *const c_char) -> c_int {
    add_recipient(builder_id, RecipientField::Bcc, address)
}

/// Add `count` "to" addresses from an array. All are validated before any is added.
#[no_mangle]
pub unsafe extern "C" fn mailto_builder_to_list(
    builder_id: *const c_char,
    addresses: *const *const c_char,
    count: size_t,
) -> c_int {
    add_recipient_list(builder_id, RecipientField::To, addresses, count)
}

#[no_mangle]
pub unsafe extern "C" fn mailto_builder_cc_list(
    builder_id: *const c_char,
    addresses: *const *const c_char,
    count: size_t,
) -> c_int {
    add_recipient_list(builder_id, RecipientField::Cc, addresses, count)
}

#[no_mangle]
pub unsafe extern "C" fn mailto_builder_bcc_list(
    builder_id: *const c_char,
    addresses: *const *const c_char,
    count: size_t,
) -> c_int {
    add_recipient_list(builder_id, RecipientField::Bcc, addresses, count)
}

/// Set the subject (single line, replaces any previous subject).
#[no_mangle]
pub unsafe extern "C" fn mailto_builder_subject(builder_id: *const c_char, subject: *const c_char) -> c_int {
    let subject = match arg_str(subject, "subject") {
        Ok(s) => s,
        Err(e) => return fail_arg(e),
    };
    with_builder(builder_id, |b| b.subject(subject).map(|_| ()))
}

/// Set the body (replaces any previous body). Line endings are normalized to CRLF.
#[no_mangle]
pub unsafe extern "C" fn mailto_builder_body(builder_id: *const c_char, body: *const c_char) -> c_int {
    let body = match arg_str(body, "body") {
        Ok(s) => s,
        Err(e) => return fail_arg(e),
    };
    with_builder(builder_id, |b| {
        b.body(body);
        Ok(())
    })
}

/// Build the mailto: URI. Returns it (caller frees with mailto_free_string), or NULL on error.
#[no_mangle]
pub unsafe extern "C" fn mailto_builder_build(builder_id: *const c_char) -> *mut c_char {
    let mut uri = None;
    if with_builder(builder_id, |b| {
        uri = Some(b.build());
        Ok(())
    }) != 0
    {
        return ptr::null_mut();
    }
    uri.map(into_c_string).unwrap_or(ptr::null_mut())
}

/// Build the URI and open it: with the registered dispatch callback if there is one, otherwise
/// with the desktop's registered mailto: handler.
/// Returns 1 if a mail application took it, 0 if none was found, or a MAILTO_ERR_* code.
#[no_mangle]
pub unsafe extern "C" fn mailto_builder_start(builder_id: *const c_char) -> c_int {
    let mut snapshot = None;
    let rc = with_builder(builder_id, |b| {
        snapshot = Some(b.clone());
        Ok(())
    });
    let builder = match snapshot {
        Some(b) if rc == 0 => b,
        _ => return rc,
    };
    // The registry lock is released before dispatching; the callback may call back into the API.
    let callback = with_dispatch_callback(|opt| opt.map(|(cb, user_data)| (*cb, user_data.0)));
    let started = match callback {
        Some((callback, user_data)) => builder.start(&CallbackDispatcher { callback, user_data }),
        None => builder.start(&SystemDispatcher::new()),
    };
    if started {
        1
    } else {
        0
    }
}

// ---------- Helpers ----------

/// 1 if `address` is a syntactically valid email address, 0 otherwise (including NULL).
#[no_mangle]
pub unsafe extern "C" fn mailto_is_valid_address(address: *const c_char) -> c_int {
    match arg_str(address, "address") {
        Ok(s) if is_valid_address(s) => 1,
        _ => 0,
    }
}

/// Percent-encode an address the way mailto_builder_build does. Caller frees the result.
#[no_mangle]
pub unsafe extern "C" fn mailto_encode_recipient(address: *const c_char) -> *mut c_char {
    match arg_str(address, "address") {
        Ok(s) => {
            clear_last_error();
            into_c_string(encode_recipient(s))
        }
        Err(e) => {
            fail_arg(e);
            ptr::null_mut()
        }
    }
}

/// Normalize line endings to CRLF. Caller frees the result.
#[no_mangle]
pub unsafe extern "C" fn mailto_normalize_line_endings(text: *const c_char) -> *mut c_char {
    match arg_str(text, "text") {
        Ok(s) => {
            clear_last_error();
            into_c_string(normalize_line_endings(s))
        }
        Err(e) => {
            fail_arg(e);
            ptr::null_mut()
        }
    }
}
