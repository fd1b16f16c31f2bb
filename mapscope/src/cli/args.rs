//! CLI argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mapscope",
    about = "Coordinate utilities and render performance sampling for map front ends",
    after_help = "\
EXAMPLES:
    mapscope transform 116.39 39.91 --from EPSG:4326 --to EPSG:3857
    mapscope distance 116.39 39.91 121.47 31.23
    mapscope area 0 0 1 0 1 1 0 1 0 0
    mapscope monitor --duration 10 --layers 3 --export metrics.json"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Transform a point between reference systems
    Transform {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        /// Source reference system code
        #[arg(long, default_value = "EPSG:4326")]
        from: String,
        /// Target reference system code
        #[arg(long, default_value = "EPSG:3857")]
        to: String,
        /// Register an extra definition as CODE=PROJ_STRING (repeatable)
        #[arg(long = "define", value_name = "CODE=PROJ")]
        definitions: Vec<String>,
        /// Fail instead of echoing the input when the transform fails
        #[arg(long)]
        strict: bool,
    },

    /// Check that a longitude/latitude pair is in range
    Bounds {
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        #[arg(allow_negative_numbers = true)]
        lat: f64,
    },

    /// Great-circle distance in metres between two longitude/latitude points
    Distance {
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lon2: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
    },

    /// Planar area of a closed ring given as X Y pairs
    Area {
        #[arg(required = true, num_args = 2.., allow_negative_numbers = true)]
        coords: Vec<f64>,
    },

    /// Run the performance sampler and print one line per snapshot
    Monitor {
        /// Stop after N seconds (0 = until Ctrl+C)
        #[arg(long, default_value = "0")]
        duration: u64,
        /// Layer count reported by the simulated map
        #[arg(long, default_value = "1")]
        layers: usize,
        /// Target frame rate of the simulated render loop
        #[arg(long, default_value = "60")]
        fps: u32,
        /// Export snapshots to a JSON file
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
        /// Suppress per-snapshot output
        #[arg(short, long)]
        quiet: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transform_negative() {
        let args = Args::try_parse_from(["mapscope", "transform", "-73.98", "40.75", "--to", "EPSG:3857"])
            .unwrap();
        match args.command {
            Command::Transform { x, y, from, to, strict, .. } => {
                assert_eq!(x, -73.98);
                assert_eq!(y, 40.75);
                assert_eq!(from, "EPSG:4326");
                assert_eq!(to, "EPSG:3857");
                assert!(!strict);
            }
            _ => panic!("expected transform"),
        }
    }

    #[test]
    fn test_parse_area_requires_points() {
        assert!(Args::try_parse_from(["mapscope", "area"]).is_err());
        let args = Args::try_parse_from(["mapscope", "area", "0", "0", "1", "0"]).unwrap();
        assert!(matches!(args.command, Command::Area { coords } if coords.len() == 4));
    }

    #[test]
    fn test_parse_monitor_defaults() {
        let args = Args::try_parse_from(["mapscope", "monitor"]).unwrap();
        match args.command {
            Command::Monitor { duration, layers, fps, export, quiet } => {
                assert_eq!(duration, 0);
                assert_eq!(layers, 1);
                assert_eq!(fps, 60);
                assert!(export.is_none());
                assert!(!quiet);
            }
            _ => panic!("expected monitor"),
        }
    }
}
