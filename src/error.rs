//! Errors returned by channel operations.
use core::fmt;

/// Error returned by [`Channel::send`] if the channel has been closed.
///
/// The undelivered value is carried back to the caller; it was not enqueued
/// and will never be observed by a receiver.
///
/// [`Channel::send`]: crate::Channel::send
#[derive(PartialEq)]
pub struct Closed(pub(crate) f64);

/// Error returned by [`Channel::try_send`].
///
/// [`Channel::try_send`]: crate::Channel::try_send
#[non_exhaustive]
#[derive(PartialEq)]
pub enum TrySendError {
    /// The value could not be sent without waiting: the ring is full, or —
    /// on a rendezvous channel — no receiver was parked waiting.
    Full(f64),
    /// The channel is closed.
    Closed(f64),
}

/// Error returned by [`Channel::try_recv`].
///
/// [`Channel::try_recv`]: crate::Channel::try_recv
#[non_exhaustive]
#[derive(Debug, PartialEq, Eq)]
pub enum TryRecvError {
    /// The channel is currently empty, but has not been closed.
    Empty,
    /// The channel is closed and fully drained.
    Closed,
}

// === impl Closed ===

impl Closed {
    /// Unwraps the value held by this error.
    ///
    /// This method allows recovering the original value when sending to a
    /// channel has failed.
    pub fn into_inner(self) -> f64 {
        self.0
    }
}

impl fmt::Debug for Closed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Closed(..)")
    }
}

impl fmt::Display for Closed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("channel closed")
    }
}

impl std::error::Error for Closed {}

// === impl TrySendError ===

impl TrySendError {
    /// Returns `true` if this error was returned because the channel had no
    /// capacity for the value without waiting.
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }

    /// Returns `true` if this error was returned because the channel has
    /// closed.
    ///
    /// If this returns `true`, no future [`try_send`] or [`send`] operation
    /// on this channel will succeed.
    ///
    /// [`try_send`]: crate::Channel::try_send
    /// [`send`]: crate::Channel::send
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed(_))
    }

    /// Unwraps the value held by this error.
    ///
    /// This method allows recovering the original value when sending to a
    /// channel has failed.
    pub fn into_inner(self) -> f64 {
        match self {
            Self::Full(val) | Self::Closed(val) => val,
        }
    }
}

impl fmt::Debug for TrySendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Full(_) => "TrySendError::Full(..)",
            Self::Closed(_) => "TrySendError::Closed(..)",
        })
    }
}

impl fmt::Display for TrySendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Full(_) => "no available capacity",
            Self::Closed(_) => "channel closed",
        })
    }
}

impl std::error::Error for TrySendError {}

// === impl TryRecvError ===

impl fmt::Display for TryRecvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "channel is empty",
            Self::Closed => "channel closed",
        })
    }
}

impl std::error::Error for TryRecvError {}
