//! Render and layer-switch benchmarks built on a running sampler

#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use log::info;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::sampler::MetricsHandle;
use crate::domain::PerformanceSnapshot;

/// Summary of snapshots taken over a measurement window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RenderReport {
    pub average_fps: u32,
    pub max_memory_megabytes: f64,
    pub samples: usize,
}

impl RenderReport {
    /// Average frame rate (rounded) and peak memory over `snapshots`.
    pub fn from_snapshots(snapshots: &[PerformanceSnapshot]) -> Self {
        if snapshots.is_empty() {
            return Self::default();
        }

        let total_fps: f64 = snapshots.iter().map(|s| f64::from(s.frames_per_second)).sum();
        let max_memory_megabytes =
            snapshots.iter().map(|s| s.memory_megabytes).fold(0.0, f64::max);

        Self {
            average_fps: (total_fps / snapshots.len() as f64).round() as u32,
            max_memory_megabytes,
            samples: snapshots.len(),
        }
    }
}

/// Time taken by one layer switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerSwitchReport {
    pub switch_time: Duration,
}

/// Read `metrics` every `every` for `window` and summarise what was seen.
///
/// The first read happens one `every` after the call; reads that would land
/// past the end of the window are not taken.
pub async fn measure_render_performance(
    metrics: &MetricsHandle,
    window: Duration,
    every: Duration,
) -> RenderReport {
    let every = every.max(Duration::from_millis(1));
    let start = Instant::now();
    let mut ticks = interval_at(start + every, every);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut snapshots = Vec::new();
    loop {
        let tick = ticks.tick().await;
        if tick.duration_since(start) > window {
            break;
        }
        snapshots.push(metrics.latest());
    }

    let report = RenderReport::from_snapshots(&snapshots);
    info!(
        "Render benchmark: {} fps average, {} MiB peak over {} samples",
        report.average_fps, report.max_memory_megabytes, report.samples
    );
    report
}

/// Time one layer switch, from call to completion of the returned future.
pub async fn measure_layer_switch<F, Fut>(switch: F) -> LayerSwitchReport
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    let start = Instant::now();
    switch().await;
    let report = LayerSwitchReport { switch_time: start.elapsed() };
    info!("Layer switch took {:?}", report.switch_time);
    report
}
