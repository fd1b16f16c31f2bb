//! Coordinate and geometry utilities
//!
//! Pure functions with no shared mutable state apart from the reference
//! system registry in [`projection`]:
//! - `projection`: reference system registry and point transforms (`proj4rs`)
//! - `measure`: bounds check, great-circle distance, planar area, formatting
//! - `simplify`: Ramer-Douglas-Peucker line simplification

pub mod measure;
pub mod projection;
pub mod simplify;

pub use measure::{
    calculate_area, calculate_distance, check_bounds, format_coordinate, EARTH_RADIUS_METERS,
};
pub use projection::{
    is_registered, register_reference_system, transform_coordinate, try_transform_coordinate,
};
pub use simplify::simplify_line;
