//! Domain types providing compile-time safety and self-documentation

use std::fmt;

/// Reference system code (e.g. `EPSG:4326`)
///
/// Codes are compared case-insensitively: the stored form is upper-cased and
/// trimmed, so `epsg:3857` and `EPSG:3857` name the same system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReferenceCode(String);

impl ReferenceCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReferenceCode {
    fn from(s: &str) -> Self {
        ReferenceCode::new(s)
    }
}

impl From<String> for ReferenceCode {
    fn from(s: String) -> Self {
        ReferenceCode::new(s)
    }
}

/// Where an observed error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSource {
    /// Map construction or view state
    Map,
    /// Layer add/remove/visibility
    Layer,
    /// Tile loading
    Tile,
    /// User interaction handlers (draw, measure, select)
    Interaction,
    /// Asynchronous task that failed or panicked without being awaited
    Task,
    /// Uncaught panic
    Panic,
}

impl fmt::Display for ErrorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorSource::Map => "map",
            ErrorSource::Layer => "layer",
            ErrorSource::Tile => "tile",
            ErrorSource::Interaction => "interaction",
            ErrorSource::Task => "task",
            ErrorSource::Panic => "panic",
        };
        f.write_str(name)
    }
}
