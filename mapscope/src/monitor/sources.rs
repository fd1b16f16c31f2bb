//! Host capabilities the sampler reads from
//!
//! The sampler never sees a concrete map or platform: it reads layer counts,
//! memory usage and time through these three narrow traits.

use log::debug;
use std::fs;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Anything that can report how many layers it currently shows.
pub trait LayerSource: Send + Sync {
    fn layer_count(&self) -> usize;
}

impl LayerSource for AtomicUsize {
    fn layer_count(&self) -> usize {
        self.load(Ordering::Relaxed)
    }
}

impl<T: LayerSource + ?Sized> LayerSource for Arc<T> {
    fn layer_count(&self) -> usize {
        (**self).layer_count()
    }
}

/// Memory usage of the host process, if the platform exposes it.
pub trait MemoryProbe: Send {
    /// Resident bytes, or `None` when unavailable.
    fn resident_bytes(&self) -> Option<u64>;
}

/// Monotonic time source in milliseconds.
pub trait Clock: Send {
    fn now_ms(&self) -> f64;
}

// ============================================================================
// Process memory (/proc/self/status)
// ============================================================================

/// Reads `VmRSS` from `/proc/self/status`.
///
/// Yields `None` on platforms without procfs, which the sampler reports as 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessMemory;

impl MemoryProbe for ProcessMemory {
    fn resident_bytes(&self) -> Option<u64> {
        match fs::read_to_string("/proc/self/status") {
            Ok(status) => parse_vm_rss(&status),
            Err(e) => {
                debug!("Memory usage unavailable: {e}");
                None
            }
        }
    }
}

/// Extract `VmRSS` in bytes from the contents of a `/proc/<pid>/status` file.
///
/// Format: `VmRSS:\t   12345 kB`
pub fn parse_vm_rss(status: &str) -> Option<u64> {
    let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
    let mut fields = line["VmRSS:".len()..].split_whitespace();
    let value: u64 = fields.next()?.parse().ok()?;
    match fields.next() {
        Some("kB") | None => Some(value * 1024),
        Some(_) => None,
    }
}

/// Fixed memory reading, for hosts that report memory some other way.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedMemory(pub Option<u64>);

impl MemoryProbe for FixedMemory {
    fn resident_bytes(&self) -> Option<u64> {
        self.0
    }
}

// ============================================================================
// Clocks
// ============================================================================

/// Milliseconds since the clock was created, from [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock advanced by hand. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_us: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now_us.fetch_add(ms * 1000, Ordering::SeqCst);
    }

    pub fn set_ms(&self, ms: u64) {
        self.now_us.store(ms * 1000, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    #[allow(clippy::cast_precision_loss)]
    fn now_ms(&self) -> f64 {
        self.now_us.load(Ordering::SeqCst) as f64 / 1000.0
    }
}
