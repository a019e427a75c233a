//! Orbital decay prediction for low-Earth-orbit objects.
//!
//! The physics lives in the workspace crates re-exported here; this crate
//! adds the glue that turns a configured scenario into a decay run and its
//! exported artifacts, so the CLI and tests share one entry point.

pub mod logging;
pub mod scenario;

pub use decay_atmosphere as atmosphere;
pub use decay_config as config;
pub use decay_core as core;
pub use decay_export as export;
pub use decay_integrator as decay;
pub use decay_orbits as orbits;
pub use decay_spaceweather as spaceweather;
