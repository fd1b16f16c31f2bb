//! Snapshot export
//!
//! Writes collected snapshots as one JSON document:
//!
//! ```json
//! {
//!   "samples": [
//!     { "elapsed_ms": 1002, "frames_per_second": 60, "memory_megabytes": 42.0, "layer_count": 3 }
//!   ],
//!   "report": { "average_fps": 60, "max_memory_megabytes": 42.0, "samples": 1 }
//! }
//! ```

use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use super::benchmark::RenderReport;
use crate::domain::{ExportError, PerformanceSnapshot};

/// A snapshot tagged with the time since monitoring began.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimedSnapshot {
    pub elapsed_ms: u64,
    #[serde(flatten)]
    pub snapshot: PerformanceSnapshot,
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    samples: &'a [TimedSnapshot],
    report: RenderReport,
}

/// Collects snapshots during a monitoring run and writes them out at the end.
#[derive(Debug, Default)]
pub struct SnapshotExporter {
    samples: Vec<TimedSnapshot>,
}

impl SnapshotExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, elapsed: Duration, snapshot: PerformanceSnapshot) {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.samples.push(TimedSnapshot { elapsed_ms, snapshot });
    }

    pub fn samples(&self) -> &[TimedSnapshot] {
        &self.samples
    }

    pub fn report(&self) -> RenderReport {
        let snapshots: Vec<PerformanceSnapshot> = self.samples.iter().map(|s| s.snapshot).collect();
        RenderReport::from_snapshots(&snapshots)
    }

    /// Write samples and their summary as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn export<W: Write>(&self, mut writer: W) -> Result<(), ExportError> {
        let document = ExportDocument { samples: &self.samples, report: self.report() };
        serde_json::to_writer_pretty(&mut writer, &document)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
