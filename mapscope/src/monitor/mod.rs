//! Performance monitoring
//!
//! - `sampler`: start/stop sampler publishing one snapshot per second
//! - `sources`: capability traits the sampler reads (layers, memory, clock)
//! - `benchmark`: render and layer-switch measurements over a sampler
//! - `export`: JSON export of collected snapshots

pub mod benchmark;
pub mod export;
pub mod sampler;
pub mod sources;

pub use benchmark::{measure_layer_switch, measure_render_performance, LayerSwitchReport, RenderReport};
pub use export::{SnapshotExporter, TimedSnapshot};
pub use sampler::{MetricsHandle, PerformanceSampler, Sampler, SamplerConfig};
pub use sources::{
    Clock, FixedMemory, LayerSource, ManualClock, MemoryProbe, MonotonicClock, ProcessMemory,
};
