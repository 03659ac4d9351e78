//! The C-callable surface consumed by compiled Flap programs.
//!
//! Handles are opaque pointers minted by [`channel_create`] and owned by the
//! embedding runtime: exactly one thread calls [`channel_destroy`], after
//! every other thread has relinquished the handle. All other operations may
//! be called concurrently from any thread. A null handle is tolerated
//! everywhere and behaves like a closed, drained channel.
//!
//! [`channel_recv`] collapses the drained-closed state into the sentinel
//! value `0.0`, which collides with a legitimate payload; callers that must
//! tell the two apart use the Rust surface, where [`Channel::recv`] returns
//! an `Option`.
//!
//! [`Channel::recv`]: crate::Channel::recv

use crate::Channel;

/// Creates a channel with the given capacity and returns an owning handle.
///
/// A capacity of `0` denotes a rendezvous channel. The handle stays valid
/// until passed to [`channel_destroy`].
#[no_mangle]
pub extern "C" fn channel_create(capacity: usize) -> *mut Channel {
    Box::into_raw(Box::new(Channel::new(capacity)))
}

/// Sends `value`, blocking until it is enqueued (buffered) or taken by a
/// receiver (rendezvous).
///
/// Returns `0` on success, `-1` if `ch` is null or the channel is closed; on
/// `-1` the value was not enqueued.
///
/// # Safety
///
/// `ch` must be null or a handle returned by [`channel_create`] that has not
/// yet been destroyed.
#[no_mangle]
pub unsafe extern "C" fn channel_send(ch: *const Channel, value: f64) -> i32 {
    match ch.as_ref() {
        Some(ch) => match ch.send(value) {
            Ok(()) => 0,
            Err(_) => -1,
        },
        None => -1,
    }
}

/// Receives the next value, blocking while the channel is empty and open.
///
/// Returns `0.0` if `ch` is null or the channel is drained and closed.
///
/// # Safety
///
/// `ch` must be null or a handle returned by [`channel_create`] that has not
/// yet been destroyed.
#[no_mangle]
pub unsafe extern "C" fn channel_recv(ch: *const Channel) -> f64 {
    match ch.as_ref() {
        Some(ch) => ch.recv().unwrap_or(0.0),
        None => 0.0,
    }
}

/// Closes the channel, waking every parked sender and receiver. Idempotent;
/// a null `ch` is a no-op.
///
/// # Safety
///
/// `ch` must be null or a handle returned by [`channel_create`] that has not
/// yet been destroyed.
#[no_mangle]
pub unsafe extern "C" fn channel_close(ch: *const Channel) {
    if let Some(ch) = ch.as_ref() {
        ch.close();
    }
}

/// Destroys a channel, releasing its ring and synchronization primitives.
/// A null `ch` is a no-op.
///
/// # Safety
///
/// `ch` must be null or a handle returned by [`channel_create`]. The handle
/// must be destroyed at most once, and no other thread may still be using
/// it or parked inside one of its operations.
#[no_mangle]
pub unsafe extern "C" fn channel_destroy(ch: *mut Channel) {
    if !ch.is_null() {
        drop(Box::from_raw(ch));
    }
}

/// Returns `0` if the channel is open, nonzero if it is closed or `ch` is
/// null.
///
/// Advisory only — an open result may be stale by the time the caller acts
/// on it.
///
/// # Safety
///
/// `ch` must be null or a handle returned by [`channel_create`] that has not
/// yet been destroyed.
#[no_mangle]
pub unsafe extern "C" fn channel_is_closed(ch: *const Channel) -> i32 {
    match ch.as_ref() {
        Some(ch) => i32::from(ch.is_closed()),
        None => 1,
    }
}
