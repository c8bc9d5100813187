//! Cooperative cancellation for long field computations.
//!
//! Computations poll a [`CancelToken`] between pixels and give up with
//! [`Cancelled`] once it fires. A cancelled computation produces no field.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// How many pixels a worker processes between two polls of its cancel token.
pub const CANCEL_CHECK_INTERVAL_PIXELS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field computation cancelled")
    }
}

impl std::error::Error for Cancelled {}

pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

/// Token for one-shot renders that nobody can supersede.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Fires once a newer generation has been submitted or shutdown has begun.
#[derive(Debug, Clone, Copy)]
pub struct GenerationToken<'a> {
    generation: u64,
    latest_generation: &'a AtomicU64,
    shutdown: &'a AtomicBool,
}

impl<'a> GenerationToken<'a> {
    #[must_use]
    pub fn new(generation: u64, latest_generation: &'a AtomicU64, shutdown: &'a AtomicBool) -> Self {
        Self {
            generation,
            latest_generation,
            shutdown,
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl CancelToken for GenerationToken<'_> {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
            || self.latest_generation.load(Ordering::Relaxed) != self.generation
    }
}
