//! # mapscope - Main Entry Point
//!
//! Thin command-line front end over the library:
//! - `transform`, `bounds`, `distance`, `area`: one-shot coordinate utilities
//! - `monitor`: runs the performance sampler until a duration or Ctrl+C

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use mapscope::cli::{Args, Command};
use mapscope::domain::CoordinatePair;
use mapscope::error_handler::ErrorHandler;
use mapscope::geo;
use mapscope::monitor::{MonotonicClock, ProcessMemory, Sampler, SamplerConfig, SnapshotExporter};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;

/// Decimal places used when printing coordinates
const COORDINATE_PRECISION: usize = 6;

fn main() {
    env_logger::init();
    ErrorHandler::global();

    let args = Args::parse();
    std::process::exit(match run(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    let msg = err.to_string().to_lowercase();
    if msg.contains("expects") || msg.contains("invalid --define") {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Transform { x, y, from, to, definitions, strict } => {
            for definition in &definitions {
                let Some((code, proj)) = definition.split_once('=') else {
                    bail!("Invalid --define '{definition}': expected CODE=PROJ_STRING");
                };
                geo::register_reference_system(code, proj)
                    .with_context(|| format!("Failed to register {code}"))?;
            }

            let point = CoordinatePair::new(x, y);
            let transformed = if strict {
                geo::try_transform_coordinate(point, &from, &to)?
            } else {
                geo::transform_coordinate(point, &from, &to)
            };
            println!("{}", geo::format_coordinate(transformed, COORDINATE_PRECISION));
        }

        Command::Bounds { lon, lat } => {
            let inside = geo::check_bounds(CoordinatePair::new(lon, lat));
            println!("{}", if inside { "in bounds" } else { "out of bounds" });
        }

        Command::Distance { lon1, lat1, lon2, lat2 } => {
            let meters = geo::calculate_distance(
                CoordinatePair::new(lon1, lat1),
                CoordinatePair::new(lon2, lat2),
            );
            println!("{meters:.3} m");
        }

        Command::Area { coords } => {
            if coords.len() % 2 != 0 {
                bail!("Area expects X Y pairs, got {} numbers", coords.len());
            }
            let ring: Vec<CoordinatePair> =
                coords.chunks_exact(2).map(|c| CoordinatePair::new(c[0], c[1])).collect();
            if ring.first() != ring.last() {
                warn!("Ring is not closed; the closing edge is not counted");
            }
            println!("{:.3}", geo::calculate_area(&ring));
        }

        Command::Monitor { duration, layers, fps, export, quiet } => {
            let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
            runtime.block_on(monitor(duration, layers, fps, export, quiet))?;
        }
    }

    Ok(())
}

async fn monitor(
    duration: u64,
    layers: usize,
    fps: u32,
    export: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let layer_count = Arc::new(AtomicUsize::new(layers));
    let mut sampler = Sampler::with_parts(
        layer_count,
        ProcessMemory,
        MonotonicClock::new(),
        SamplerConfig::with_target_fps(fps),
    );
    let mut metrics = sampler.subscribe();
    let mut exporter = SnapshotExporter::new();

    let deadline =
        (duration > 0).then(|| tokio::time::Instant::now() + Duration::from_secs(duration));
    let started = Instant::now();
    sampler.start();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let limit = async {
            match deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            next = metrics.next() => {
                let Some(snapshot) = next else { break };
                exporter.record(started.elapsed(), snapshot);
                if !quiet {
                    println!(
                        "FPS: {:>3} | Memory: {:>6.0} MB | Layers: {}",
                        snapshot.frames_per_second, snapshot.memory_megabytes, snapshot.layer_count
                    );
                }
            }
            () = limit => {
                info!("Duration limit reached");
                break;
            }
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
        }
    }

    sampler.stop();

    let report = exporter.report();
    println!(
        "{} samples, average {} fps, peak {} MB",
        report.samples, report.average_fps, report.max_memory_megabytes
    );

    if let Some(path) = export {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        exporter
            .export(BufWriter::new(file))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Exported {} samples to {}", exporter.samples().len(), path.display());
    }

    Ok(())
}
