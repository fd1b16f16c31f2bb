//! # mapscope - Map Front-End Core Utilities
//!
//! The non-UI core of a browser map viewer: coordinate transforms and
//! geometry helpers, a render performance sampler, and a process-wide error
//! handler. Rendering, tiling and projection maths belong to external
//! libraries; this crate is the glue logic around them.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────┐    ┌──────────────────────────────┐
//! │            geo               │    │           monitor            │
//! │                              │    │                              │
//! │  projection ──▶ proj4rs      │    │  Sampler ──▶ LayerSource     │
//! │  measure (bounds/dist/area)  │    │     │    ──▶ MemoryProbe     │
//! │  simplify (RDP)              │    │     │    ──▶ Clock           │
//! └──────────────────────────────┘    │     ▼                        │
//!                                     │  watch ──▶ MetricsHandle     │
//!                                     │              │               │
//!                                     │  benchmark ◀─┘   export      │
//!                                     └──────────────────────────────┘
//!
//!            error_handler (OnceLock) ──▶ panic hook, watched tasks ──▶ log
//! ```
//!
//! ## Module Structure
//!
//! - [`geo`]: pure coordinate functions
//!   - `transform_coordinate` degrades to the input point on failure;
//!     `try_transform_coordinate` reports the error
//!   - `check_bounds`, `calculate_distance` (haversine, R = 6378137 m),
//!     `calculate_area` (planar shoelace over a closed ring)
//!
//! - [`monitor`]: the performance sampler
//!   - Stopped/Running state machine, one snapshot per second
//!   - Latest snapshot readable at any time, zeroed before the first window
//!
//! - [`error_handler`]: one handler per process, logs panics and failed tasks
//!
//! - [`domain`]: shared types (`CoordinatePair`, `PerformanceSnapshot`,
//!   `ReferenceCode`) and error enums
//!
//! - [`cli`]: command-line argument parsing for the `mapscope` binary
//!
//! ## Typical Usage
//!
//! ```bash
//! mapscope transform 116.39 39.91 --from EPSG:4326 --to EPSG:3857
//! RUST_LOG=info mapscope monitor --duration 5 --layers 3 --export metrics.json
//! ```

pub mod cli;
pub mod domain;
pub mod error_handler;
pub mod geo;
pub mod monitor;
