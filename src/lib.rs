//! Blocking CSP channels for the Flap runtime.
//!
//! A _channel_ is a synchronization and communication primitive that combines
//! a shared queue with the ability to _wait_. Channels provide a [send]
//! operation, which enqueues a value if there is capacity in the queue, or
//! waits for capacity to become available if there is none; and a [receive]
//! operation, which dequeues a value from the queue if any are available, or
//! waits for a value to be sent if the queue is empty. This crate implements
//! the channel used by Flap's `chan` type to pass `f64` values between
//! preemptively scheduled OS threads, guarded by a mutex and a pair of
//! condition variables.
//!
//! # Buffered and rendezvous channels
//!
//! The capacity passed to [`Channel::new`] selects between two flavors:
//!
//! | capacity | flavor         | `send` completes when             |
//! |----------|----------------|-----------------------------------|
//! | `> 0`    | **buffered**   | the value is enqueued in the ring |
//! | `0`      | **rendezvous** | a receiver has taken the value    |
//!
//! A buffered channel is a FIFO ring: senders block only while the ring is
//! full, and receivers observe values in exactly the order senders deposited
//! them. A rendezvous channel has no queue at all — each send and receive
//! pair up synchronously, and a send reports success only once the matching
//! receive has the value.
//!
//! # Closing
//!
//! [`Channel::close`] transitions the channel to the closed state exactly
//! once and wakes every parked sender and receiver. After close, sends fail
//! with [`Closed`] (carrying the undelivered value back to the caller), while
//! receives first drain any values enqueued before the close, in order, and
//! then return [`None`] forever. Closing an already-closed channel has no
//! further effect.
//!
//! # Example
//!
//! ```
//! use flapchan::Channel;
//! use std::{sync::Arc, thread};
//!
//! let ch = Arc::new(Channel::new(4));
//!
//! let tx = ch.clone();
//! let producer = thread::spawn(move || {
//!     for i in 0..8 {
//!         tx.send(i as f64).unwrap();
//!     }
//!     tx.close();
//! });
//!
//! let mut received = Vec::new();
//! while let Some(value) = ch.recv() {
//!     received.push(value);
//! }
//!
//! assert_eq!(received.len(), 8);
//! assert_eq!(received[0], 0.0);
//! assert_eq!(received[7], 7.0);
//! producer.join().unwrap();
//! ```
//!
//! # The C surface
//!
//! Compiled Flap programs do not use the Rust API; they call the exported
//! `channel_*` symbols in the [`ffi`] module, which trade in opaque handles
//! and collapse the drained-closed state into a `0.0` sentinel. The Rust
//! surface keeps the two states distinguishable ([`Channel::recv`] returns
//! an `Option`).
//!
//! [send]: Channel::send
//! [receive]: Channel::recv
//! [`Closed`]: error::Closed

#[macro_use]
mod macros;

mod channel;
pub mod error;
pub mod ffi;
mod loom;
mod util;

pub use self::channel::{Channel, Iter};
pub use self::error::{Closed, TryRecvError, TrySendError};
