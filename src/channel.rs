//! The channel state machine.
//!
//! All mutable state lives in [`State`] behind a single mutex. Two condition
//! variables provide the blocking: `cond_space` is signaled when a slot
//! frees up (or on close), `cond_data` when a value arrives (or on close).
//! Every wait re-checks its predicate in a `while` loop, so spurious wakeups
//! are harmless. `notify_one` is used for one-to-one wakeups; only [`close`]
//! broadcasts, plus the rendezvous take, which may have to release both the
//! handed-off sender and a parked depositor.
//!
//! [`close`]: Channel::close

use crate::{
    error::{Closed, TryRecvError, TrySendError},
    util::mutex::{Condvar, Mutex},
};
use core::fmt;

/// A blocking channel carrying `f64` values between threads.
///
/// A capacity of zero makes the channel a _rendezvous_ channel: every send
/// blocks until a receiver takes the value, and reports success only once
/// the hand-off has happened. A nonzero capacity makes the channel
/// _buffered_: sends complete as soon as the value is enqueued, blocking
/// only while the ring is full.
///
/// The channel is shared by any number of sender and receiver threads for
/// its lifetime (it is `Sync`; share it by reference or in an
/// [`Arc`](std::sync::Arc)). Dropping it releases the ring and the
/// synchronization primitives.
pub struct Channel {
    capacity: usize,
    state: Mutex<State>,
    /// Signaled when a slot frees, or on close.
    cond_space: Condvar,
    /// Signaled when a value arrives, or on close.
    cond_data: Condvar,
}

struct State {
    /// Ring of value slots; a rendezvous channel uses a single hand-off slot.
    ring: Box<[f64]>,
    read_idx: usize,
    write_idx: usize,
    /// Number of enqueued values; 0 or 1 on a rendezvous channel.
    count: usize,
    closed: bool,
    /// Receivers currently parked in [`Channel::recv`].
    recv_waiters: usize,
    /// Rendezvous hand-offs completed so far. `count` alone cannot tell a
    /// parked sender whose value was taken once another sender reuses the
    /// slot; this counter can.
    handoffs: u64,
}

// === impl Channel ===

impl Channel {
    /// Returns a new channel with the provided capacity.
    ///
    /// A capacity of `0` denotes a rendezvous channel. The hand-off slot is
    /// allocated here, up front, so [`send`](Self::send) never allocates.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let slots = capacity.max(1);
        Self {
            capacity,
            state: Mutex::new(State {
                ring: vec![0.0; slots].into_boxed_slice(),
                read_idx: 0,
                write_idx: 0,
                count: 0,
                closed: false,
                recv_waiters: 0,
                handoffs: 0,
            }),
            cond_space: Condvar::new(),
            cond_data: Condvar::new(),
        }
    }

    /// Returns the channel's capacity. Zero denotes a rendezvous channel.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of values currently enqueued.
    ///
    /// Advisory only: another thread may enqueue or dequeue between this
    /// returning and the caller acting on the result.
    pub fn len(&self) -> usize {
        self.state.lock().count
    }

    /// Returns `true` if no values are currently enqueued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the channel has been closed.
    ///
    /// Advisory only — a `false` result may be stale by the time the caller
    /// acts on it.
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Sends `value`, blocking until it is enqueued (buffered) or taken by a
    /// receiver (rendezvous).
    ///
    /// Returns [`Closed`], carrying the value back, if the channel was
    /// closed before the value could be delivered. A rejected value is never
    /// observable to any receiver.
    pub fn send(&self, value: f64) -> Result<(), Closed> {
        if self.capacity > 0 {
            self.send_buffered(value)
        } else {
            self.send_rendezvous(value)
        }
    }

    fn send_buffered(&self, value: f64) -> Result<(), Closed> {
        let mut state = self.state.lock();
        while state.count == self.capacity && !state.closed {
            state = self.cond_space.wait(state);
        }
        if state.closed {
            return Err(Closed(value));
        }
        state.deposit(value, self.capacity);
        test_println!("sent {:?}", value);
        self.cond_data.notify_one();
        Ok(())
    }

    fn send_rendezvous(&self, value: f64) -> Result<(), Closed> {
        let mut state = self.state.lock();
        // At most one undelivered value may be parked at a time.
        while state.count > 0 && !state.closed {
            state = self.cond_space.wait(state);
        }
        if state.closed {
            return Err(Closed(value));
        }

        state.ring[0] = value;
        state.count = 1;
        let parked_at = state.handoffs;
        test_println!("parked {:?} for hand-off", value);
        self.cond_data.notify_one();

        while state.handoffs == parked_at && !state.closed {
            state = self.cond_space.wait(state);
        }
        if test_dbg!(state.handoffs == parked_at) {
            // Closed with the value still parked. Withdraw it: the error
            // hands the value back, so no receiver may observe it too.
            state.count = 0;
            return Err(Closed(value));
        }
        test_println!("hand-off of {:?} complete", value);
        Ok(())
    }

    /// Receives the next value, blocking while the channel is empty and
    /// open.
    ///
    /// Returns [`None`] once the channel is closed and fully drained. Values
    /// enqueued before the close are still delivered, in order.
    pub fn recv(&self) -> Option<f64> {
        let mut state = self.state.lock();
        state.recv_waiters += 1;
        while state.count == 0 && !state.closed {
            state = self.cond_data.wait(state);
        }
        state.recv_waiters -= 1;

        if test_dbg!(state.count == 0) {
            // drained and closed
            return None;
        }
        let value = state.take(self.capacity);
        test_println!("received {:?}", value);
        self.notify_space();
        Some(value)
    }

    /// Attempts to send `value` without blocking.
    ///
    /// On a buffered channel this fails with [`TrySendError::Full`] while
    /// the ring is full. On a rendezvous channel it succeeds only when a
    /// receiver is already parked waiting, so the hand-off is assured.
    pub fn try_send(&self, value: f64) -> Result<(), TrySendError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(TrySendError::Closed(value));
        }
        if self.capacity > 0 {
            if state.count == self.capacity {
                return Err(TrySendError::Full(value));
            }
            state.deposit(value, self.capacity);
        } else {
            if state.count > 0 || state.recv_waiters == 0 {
                return Err(TrySendError::Full(value));
            }
            state.ring[0] = value;
            state.count = 1;
        }
        test_println!("sent {:?} (try)", value);
        self.cond_data.notify_one();
        Ok(())
    }

    /// Attempts to receive a value without blocking.
    pub fn try_recv(&self) -> Result<f64, TryRecvError> {
        let mut state = self.state.lock();
        if state.count == 0 {
            return Err(if state.closed {
                TryRecvError::Closed
            } else {
                TryRecvError::Empty
            });
        }
        let value = state.take(self.capacity);
        test_println!("received {:?} (try)", value);
        self.notify_space();
        Ok(value)
    }

    /// Closes the channel, waking every parked sender and receiver.
    ///
    /// Idempotent: closing an already-closed channel has no further effect.
    /// Values already enqueued remain receivable; subsequent sends fail.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        test_println!("closed");
        self.cond_space.notify_all();
        self.cond_data.notify_all();
    }

    /// Wakes space waiters after a take.
    fn notify_space(&self) {
        if self.capacity > 0 {
            self.cond_space.notify_one();
        } else {
            // A rendezvous take may have to release both the handed-off
            // sender and one parked depositor; `notify_one` could wake the
            // wrong one and strand the other.
            self.cond_space.notify_all();
        }
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Channel")
            .field("capacity", &self.capacity)
            .field("len", &state.count)
            .field("closed", &state.closed)
            .finish()
    }
}

// === impl State ===

impl State {
    fn deposit(&mut self, value: f64, capacity: usize) {
        debug_assert!(self.count < capacity);
        self.ring[self.write_idx] = value;
        self.write_idx = (self.write_idx + 1) % capacity;
        self.count += 1;
    }

    fn take(&mut self, capacity: usize) -> f64 {
        debug_assert!(self.count > 0);
        if capacity > 0 {
            let value = self.ring[self.read_idx];
            self.read_idx = (self.read_idx + 1) % capacity;
            self.count -= 1;
            value
        } else {
            let value = self.ring[0];
            self.count = 0;
            self.handoffs += 1;
            value
        }
    }
}

// === impl Iter ===

/// A blocking iterator over received values.
///
/// Yields values until the channel is drained and closed; each call to
/// [`next`](Iterator::next) is exactly a [`Channel::recv`].
pub struct Iter<'chan> {
    channel: &'chan Channel,
}

impl<'chan> IntoIterator for &'chan Channel {
    type Item = f64;
    type IntoIter = Iter<'chan>;

    fn into_iter(self) -> Iter<'chan> {
        Iter { channel: self }
    }
}

impl Iterator for Iter<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.channel.recv()
    }
}
