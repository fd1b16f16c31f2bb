//! Reference system registry and point transformation
//!
//! Definitions are proj4 strings keyed by [`ReferenceCode`]. The registry is
//! process-wide and seeded with the two systems every web map needs:
//!
//! | Code        | Definition                                  |
//! |-------------|---------------------------------------------|
//! | `EPSG:4326` | WGS84 longitude/latitude (degrees)          |
//! | `EPSG:3857` | Spherical (web) mercator, radius 6378137 m  |
//!
//! `proj4rs` works in radians for geographic systems; callers always pass and
//! receive degrees, the conversion happens here.

use log::{debug, error, info};
use proj4rs::proj::Proj;
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::domain::{CoordinatePair, ProjectionError, ReferenceCode};

/// WGS84 geographic coordinates
pub const WGS84_DEFINITION: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Spherical mercator as used by web tile servers
pub const WEB_MERCATOR_DEFINITION: &str = "+proj=merc +a=6378137 +b=6378137 +lat_ts=0.0 \
     +lon_0=0.0 +x_0=0.0 +y_0=0 +k=1.0 +units=m +no_defs";

const BUILTIN_DEFINITIONS: [(&str, &str); 4] = [
    ("EPSG:4326", WGS84_DEFINITION),
    ("CRS:84", WGS84_DEFINITION),
    ("EPSG:3857", WEB_MERCATOR_DEFINITION),
    ("EPSG:900913", WEB_MERCATOR_DEFINITION),
];

type Registry = RwLock<HashMap<ReferenceCode, String>>;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let definitions = BUILTIN_DEFINITIONS
            .iter()
            .map(|(code, definition)| (ReferenceCode::new(code), (*definition).to_string()))
            .collect();
        RwLock::new(definitions)
    })
}

fn parse_definition(code: &ReferenceCode, definition: &str) -> Result<Proj, ProjectionError> {
    Proj::from_proj_string(definition).map_err(|e| ProjectionError::InvalidDefinition {
        code: code.clone(),
        reason: e.to_string(),
    })
}

/// Register (or replace) a reference system definition.
///
/// The definition is parsed before it is stored, so a malformed proj string
/// never enters the registry.
///
/// # Errors
/// Returns [`ProjectionError::InvalidDefinition`] if `proj4rs` rejects the string.
pub fn register_reference_system(
    code: impl Into<ReferenceCode>,
    definition: &str,
) -> Result<(), ProjectionError> {
    let code = code.into();
    parse_definition(&code, definition)?;

    let mut definitions = registry().write().unwrap_or_else(PoisonError::into_inner);
    if definitions.insert(code.clone(), definition.to_string()).is_some() {
        info!("Replaced definition for {code}");
    } else {
        info!("Registered reference system {code}");
    }
    Ok(())
}

/// Whether `code` is currently registered.
pub fn is_registered(code: &str) -> bool {
    let definitions = registry().read().unwrap_or_else(PoisonError::into_inner);
    definitions.contains_key(&ReferenceCode::new(code))
}

fn lookup(code: &ReferenceCode) -> Result<Proj, ProjectionError> {
    let definition = {
        let definitions = registry().read().unwrap_or_else(PoisonError::into_inner);
        definitions.get(code).cloned()
    }
    .ok_or_else(|| ProjectionError::UnknownReferenceSystem(code.clone()))?;

    parse_definition(code, &definition)
}

/// Transform a point between two registered reference systems.
///
/// # Errors
/// - [`ProjectionError::NonFiniteInput`] for NaN/infinite input
/// - [`ProjectionError::UnknownReferenceSystem`] if either code is not registered
/// - [`ProjectionError::TransformFailed`] if the projection fails or produces
///   a non-finite result (e.g. latitude ±90 into mercator)
pub fn try_transform_coordinate(
    point: CoordinatePair,
    source: &str,
    target: &str,
) -> Result<CoordinatePair, ProjectionError> {
    if !point.is_finite() {
        return Err(ProjectionError::NonFiniteInput { x: point.x, y: point.y });
    }

    let from = ReferenceCode::new(source);
    let to = ReferenceCode::new(target);
    let src = lookup(&from)?;
    let dst = lookup(&to)?;

    if from == to {
        return Ok(point);
    }

    let failed = |reason: String| ProjectionError::TransformFailed {
        x: point.x,
        y: point.y,
        from: from.clone(),
        to: to.clone(),
        reason,
    };

    let mut xyz = if src.is_latlong() {
        (point.x.to_radians(), point.y.to_radians(), 0.0)
    } else {
        (point.x, point.y, 0.0)
    };

    proj4rs::transform::transform(&src, &dst, &mut xyz).map_err(|e| failed(e.to_string()))?;

    let result = if dst.is_latlong() {
        CoordinatePair::new(xyz.0.to_degrees(), xyz.1.to_degrees())
    } else {
        CoordinatePair::new(xyz.0, xyz.1)
    };

    if !result.is_finite() {
        return Err(failed("result is not finite".to_string()));
    }

    debug!("{from} ({}, {}) -> {to} ({}, {})", point.x, point.y, result.x, result.y);
    Ok(result)
}

/// Transform a point, falling back to the input on failure.
///
/// Failures are logged, never returned: an output identical to the input may
/// mean the transform failed. Use [`try_transform_coordinate`] when the
/// caller needs to know.
pub fn transform_coordinate(point: CoordinatePair, source: &str, target: &str) -> CoordinatePair {
    match try_transform_coordinate(point, source, target) {
        Ok(transformed) => transformed,
        Err(e) => {
            error!("Coordinate transform error: {e}");
            point
        }
    }
}
