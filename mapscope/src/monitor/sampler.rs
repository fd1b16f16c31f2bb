//! Frame-rate, memory and layer-count sampler
//!
//! ## Lifecycle
//!
//! ```text
//!            start()                    stop() / drop
//! Stopped ─────────────▶ Running ─────────────────────▶ Stopped
//!    ▲ start() while Running: no-op      stop() while Stopped: no-op
//! ```
//!
//! While running, a ticker thread calls [`Sampler::record_frame`] once per
//! frame interval. Every step counts a frame; once the sample window (1 s by
//! default) has elapsed, the step publishes a new [`PerformanceSnapshot`]:
//!
//! ```text
//! frames_per_second = round(frames × 1000 / elapsed_ms)
//! memory_megabytes  = round(resident_bytes / MiB)   (0 if unavailable)
//! layer_count       = layers.layer_count()
//! ```
//!
//! Snapshots go out through a `tokio::sync::watch` channel, so readers always
//! get the latest value without waiting on the sampler thread.

// Frame counts and byte totals are small enough that f64 round-trips are exact
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use crossbeam_channel::{select, Sender};
use log::{debug, info};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::watch;

use super::sources::{Clock, LayerSource, MemoryProbe, MonotonicClock, ProcessMemory};
use crate::domain::PerformanceSnapshot;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Sampler tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Interval between frame steps while running (render-loop cadence)
    pub frame_interval: Duration,
    /// Elapsed time after which a snapshot is published
    pub sample_window: Duration,
}

impl SamplerConfig {
    /// Frame interval for a target frame rate (clamped to at least 1 fps).
    pub fn with_target_fps(fps: u32) -> Self {
        Self {
            frame_interval: Duration::from_secs(1) / fps.max(1),
            ..Self::default()
        }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_secs(1) / 60,
            sample_window: Duration::from_secs(1),
        }
    }
}

/// Mutable state touched only by the step, one at a time.
struct SamplerCore<L, M, C> {
    layers: L,
    memory: M,
    clock: C,
    window_ms: f64,
    frames: u32,
    last_sample_ms: f64,
    publisher: watch::Sender<PerformanceSnapshot>,
}

impl<L: LayerSource, M: MemoryProbe, C: Clock> SamplerCore<L, M, C> {
    fn reset_window(&mut self) {
        self.frames = 0;
        self.last_sample_ms = self.clock.now_ms();
    }

    fn step(&mut self) -> Option<PerformanceSnapshot> {
        let now = self.clock.now_ms();
        self.frames += 1;

        let elapsed = now - self.last_sample_ms;
        if elapsed < self.window_ms {
            return None;
        }

        let snapshot = PerformanceSnapshot {
            frames_per_second: (f64::from(self.frames) * 1000.0 / elapsed).round() as u32,
            memory_megabytes: self
                .memory
                .resident_bytes()
                .map_or(0.0, |bytes| (bytes as f64 / BYTES_PER_MIB).round()),
            layer_count: self.layers.layer_count(),
        };

        self.frames = 0;
        self.last_sample_ms = now;
        self.publisher.send_replace(snapshot);

        debug!(
            "Sample: {} fps, {} MiB, {} layers",
            snapshot.frames_per_second, snapshot.memory_megabytes, snapshot.layer_count
        );
        Some(snapshot)
    }
}

/// Handle to the ticker thread of a running sampler.
struct Ticker {
    /// Dropping this sender cancels the loop
    cancel: Sender<()>,
    thread: JoinHandle<()>,
}

/// Read-only view of a sampler's latest snapshot.
///
/// Cheap to clone; outlives the sampler (reads keep returning the final
/// snapshot once the sampler is gone).
#[derive(Debug, Clone)]
pub struct MetricsHandle {
    rx: watch::Receiver<PerformanceSnapshot>,
}

impl MetricsHandle {
    /// Latest published snapshot.
    pub fn latest(&self) -> PerformanceSnapshot {
        *self.rx.borrow()
    }

    /// Wait for the next published snapshot.
    ///
    /// Returns `None` once the sampler has been dropped.
    pub async fn next(&mut self) -> Option<PerformanceSnapshot> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

/// Recurring performance sampler.
///
/// `L` reports the layer count, `M` the memory usage, `C` the time. The
/// default parameters read `/proc/self/status` and [`std::time::Instant`].
pub struct Sampler<L, M = ProcessMemory, C = MonotonicClock> {
    core: Arc<Mutex<SamplerCore<L, M, C>>>,
    metrics: watch::Receiver<PerformanceSnapshot>,
    config: SamplerConfig,
    ticker: Option<Ticker>,
}

/// Sampler reading process memory and monotonic time.
pub type PerformanceSampler<L> = Sampler<L, ProcessMemory, MonotonicClock>;

impl<L: LayerSource + 'static> Sampler<L> {
    /// Sampler over `layers` with default memory probe, clock and config.
    pub fn new(layers: L) -> Self {
        Sampler::with_parts(layers, ProcessMemory, MonotonicClock::new(), SamplerConfig::default())
    }
}

impl<L, M, C> Sampler<L, M, C>
where
    L: LayerSource + 'static,
    M: MemoryProbe + 'static,
    C: Clock + 'static,
{
    pub fn with_parts(layers: L, memory: M, clock: C, config: SamplerConfig) -> Self {
        let (publisher, metrics) = watch::channel(PerformanceSnapshot::default());
        let last_sample_ms = clock.now_ms();
        let core = SamplerCore {
            layers,
            memory,
            clock,
            window_ms: config.sample_window.as_secs_f64() * 1000.0,
            frames: 0,
            last_sample_ms,
            publisher,
        };

        Self { core: Arc::new(Mutex::new(core)), metrics, config, ticker: None }
    }

    pub fn config(&self) -> SamplerConfig {
        self.config
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Start the ticker. No-op if already running.
    ///
    /// The sample window restarts at this point, so time spent stopped does
    /// not dilute the first frame rate after a restart.
    pub fn start(&mut self) {
        if self.ticker.is_some() {
            debug!("Sampler already running");
            return;
        }

        self.core.lock().unwrap_or_else(PoisonError::into_inner).reset_window();

        let (cancel, cancelled) = crossbeam_channel::bounded::<()>(0);
        let ticks = crossbeam_channel::tick(self.config.frame_interval);
        let core = Arc::clone(&self.core);

        let thread = std::thread::spawn(move || loop {
            select! {
                recv(cancelled) -> _ => break,
                recv(ticks) -> _ => {
                    core.lock().unwrap_or_else(PoisonError::into_inner).step();
                }
            }
        });

        info!("Sampler started ({:?} per frame)", self.config.frame_interval);
        self.ticker = Some(Ticker { cancel, thread });
    }

    /// Stop the ticker and wait for it to exit. No-op if stopped.
    ///
    /// Once this returns no further step runs, so the latest snapshot stays
    /// fixed until the next [`start`](Self::start).
    pub fn stop(&mut self) {
        let Some(Ticker { cancel, thread }) = self.ticker.take() else {
            return;
        };

        drop(cancel);
        if thread.join().is_err() {
            log::error!("Sampler thread panicked");
        }
        info!("Sampler stopped");
    }

    /// Count one rendered frame, publishing a snapshot at window boundaries.
    ///
    /// The ticker calls this while running; a host with its own render loop
    /// can call it directly instead of using [`start`](Self::start).
    pub fn record_frame(&self) -> Option<PerformanceSnapshot> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner).step()
    }

    /// Latest snapshot; zeroed until the first window completes.
    pub fn get_metrics(&self) -> PerformanceSnapshot {
        *self.metrics.borrow()
    }

    pub fn subscribe(&self) -> MetricsHandle {
        MetricsHandle { rx: self.metrics.clone() }
    }
}

impl<L, M, C> Drop for Sampler<L, M, C> {
    fn drop(&mut self) {
        if let Some(Ticker { cancel, thread }) = self.ticker.take() {
            drop(cancel);
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::sources::{FixedMemory, ManualClock};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn manual_sampler(
        layers: usize,
        memory: Option<u64>,
    ) -> (Sampler<Arc<AtomicUsize>, FixedMemory, ManualClock>, ManualClock, Arc<AtomicUsize>) {
        let clock = ManualClock::new();
        let layers = Arc::new(AtomicUsize::new(layers));
        let sampler = Sampler::with_parts(
            Arc::clone(&layers),
            FixedMemory(memory),
            clock.clone(),
            SamplerConfig::default(),
        );
        (sampler, clock, layers)
    }

    #[test]
    fn test_metrics_zeroed_before_start() {
        let sampler = Sampler::new(Arc::new(AtomicUsize::new(4)));
        assert!(!sampler.is_running());
        assert_eq!(sampler.get_metrics(), PerformanceSnapshot::default());
    }

    #[test]
    fn test_snapshot_published_at_window_boundary() {
        let (sampler, clock, _) = manual_sampler(3, Some(256 * 1024 * 1024));

        for _ in 0..59 {
            clock.advance_ms(16);
            assert!(sampler.record_frame().is_none());
        }
        // Stale read between boundaries
        assert_eq!(sampler.get_metrics(), PerformanceSnapshot::default());

        clock.set_ms(1000);
        let snapshot = sampler.record_frame().expect("window elapsed");
        assert_eq!(snapshot.frames_per_second, 60);
        assert_eq!(snapshot.memory_megabytes, 256.0);
        assert_eq!(snapshot.layer_count, 3);
        assert_eq!(sampler.get_metrics(), snapshot);
    }

    #[test]
    fn test_fps_scaled_to_elapsed_time() {
        let (sampler, clock, _) = manual_sampler(0, None);
        for _ in 0..44 {
            sampler.record_frame();
        }
        clock.set_ms(1500);
        let snapshot = sampler.record_frame().unwrap();
        // 45 frames over 1.5 s
        assert_eq!(snapshot.frames_per_second, 30);
    }

    #[test]
    fn test_counter_resets_after_snapshot() {
        let (sampler, clock, layers) = manual_sampler(1, None);
        clock.set_ms(1000);
        assert_eq!(sampler.record_frame().unwrap().frames_per_second, 1);

        layers.store(5, Ordering::Relaxed);
        for _ in 0..9 {
            sampler.record_frame();
        }
        clock.set_ms(2000);
        let second = sampler.record_frame().unwrap();
        assert_eq!(second.frames_per_second, 10);
        assert_eq!(second.layer_count, 5);
    }

    #[test]
    fn test_missing_memory_reports_zero() {
        let (sampler, clock, _) = manual_sampler(2, None);
        clock.set_ms(1000);
        assert_eq!(sampler.record_frame().unwrap().memory_megabytes, 0.0);
    }

    #[test]
    fn test_memory_rounded_to_whole_mib() {
        let (sampler, clock, _) = manual_sampler(0, Some(3 * 1024 * 1024 + 600 * 1024));
        clock.set_ms(1000);
        assert_eq!(sampler.record_frame().unwrap().memory_megabytes, 4.0);
    }

    #[test]
    fn test_target_fps_config() {
        let config = SamplerConfig::with_target_fps(50);
        assert_eq!(config.frame_interval, Duration::from_millis(20));
        assert_eq!(config.sample_window, Duration::from_secs(1));
        assert_eq!(SamplerConfig::with_target_fps(0).frame_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_stop_when_stopped_is_noop() {
        let mut sampler = Sampler::new(Arc::new(AtomicUsize::new(0)));
        sampler.stop();
        sampler.stop();
        assert!(!sampler.is_running());
    }

    #[test]
    fn test_stop_freezes_metrics() {
        let config = SamplerConfig {
            frame_interval: Duration::from_millis(1),
            sample_window: Duration::from_millis(10),
        };
        let layers = Arc::new(AtomicUsize::new(2));
        let mut sampler =
            Sampler::with_parts(layers, FixedMemory(None), MonotonicClock::new(), config);

        sampler.start();
        sampler.start();
        assert!(sampler.is_running());
        std::thread::sleep(Duration::from_millis(100));
        sampler.stop();
        assert!(!sampler.is_running());

        let frozen = sampler.get_metrics();
        assert!(frozen.frames_per_second > 0);
        assert_eq!(frozen.layer_count, 2);

        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(sampler.get_metrics(), frozen);
    }

    #[test]
    fn test_restart_after_stop() {
        let config = SamplerConfig {
            frame_interval: Duration::from_millis(1),
            sample_window: Duration::from_millis(5),
        };
        let mut sampler = Sampler::with_parts(
            Arc::new(AtomicUsize::new(1)),
            FixedMemory(None),
            MonotonicClock::new(),
            config,
        );
        let mut handle = sampler.subscribe();

        sampler.start();
        sampler.stop();
        sampler.start();
        std::thread::sleep(Duration::from_millis(60));
        sampler.stop();

        assert!(handle.latest().frames_per_second > 0);

        drop(sampler);
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        // The unseen final snapshot is still delivered, then the stream ends
        let last = runtime.block_on(handle.next());
        assert!(last.is_some_and(|s| s.frames_per_second > 0));
        assert!(runtime.block_on(handle.next()).is_none());
        assert_eq!(Some(handle.latest()), last);
    }
}
