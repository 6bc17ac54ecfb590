//! Configuration types for loading rod scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`ParametersConfig`] – physical constants and the base time unit
//! - [`SpeedConfig`]      – initial speed multiplier and optional ceiling
//! - [`RodConfig`]        – one rod with its pivot, geometry and bobs
//! - [`BobConfig`]        – one bob and the rod end it hangs from
//! - [`ScenarioConfig`]   – top-level wrapper
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   gravity: 0.6            # optional, default 0.6
//!   damping: 0.995          # optional, default 0.995, must be in (0, 1)
//!   base_dt: 1.0            # optional, one frame
//!   tracer_angular_velocity: 0.02
//!
//! speed:
//!   initial: 1.0            # >= 0.1
//!   max: 4.0                # optional, unbounded when absent
//!
//! rods:
//!   - pivot: [0.0, 0.0]
//!     length: 400.0
//!     angle: 3.141592653589793
//!     bobs:
//!       - { length: 100.0, mass: 20.0, angle: 3.141592653589793, end: first, tag: "#f95869" }
//!       - { length: 200.0, mass: 10.0, angle: 3.141592653589793, end: second, tag: "#ffa500" }
//! ```
//!
//! `end` may be omitted, in which case the first bob of a rod goes on the
//! first end and the rest on the second. Pivots given as `null` are placed
//! at the caller-supplied default (the window centre in the viewer).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::simulation::params::{
    DEFAULT_BASE_DT, DEFAULT_DAMPING, DEFAULT_GRAVITY, DEFAULT_TRACER_ANGULAR_VELOCITY,
};
use crate::simulation::states::RodEnd;

fn default_gravity() -> f64 { DEFAULT_GRAVITY }
fn default_damping() -> f64 { DEFAULT_DAMPING }
fn default_base_dt() -> f64 { DEFAULT_BASE_DT }
fn default_tracer() -> f64 { DEFAULT_TRACER_ANGULAR_VELOCITY }
fn default_speed() -> f64 { 1.0 }

/// Global physical constants for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_base_dt")]
    pub base_dt: f64, // time unit before the speed multiplier
    #[serde(default = "default_tracer")]
    pub tracer_angular_velocity: f64,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            damping: DEFAULT_DAMPING,
            base_dt: DEFAULT_BASE_DT,
            tracer_angular_velocity: DEFAULT_TRACER_ANGULAR_VELOCITY,
        }
    }
}

/// Speed multiplier settings
#[derive(Deserialize, Debug, Clone)]
pub struct SpeedConfig {
    #[serde(default = "default_speed")]
    pub initial: f64,
    pub max: Option<f64>, // no ceiling when absent
}

/// One bob hanging from a rod end
#[derive(Deserialize, Debug, Clone)]
pub struct BobConfig {
    pub length: f64,
    pub mass: f64,
    pub angle: f64,
    pub end: Option<RodEnd>, // inferred from order when absent
    #[serde(default)]
    pub tag: String, // hex colour for the viewer
}

/// One rod and its bobs
#[derive(Deserialize, Debug, Clone)]
pub struct RodConfig {
    pub pivot: Option<[f64; 2]>, // None -> caller's default pivot
    pub length: f64,
    pub angle: f64,
    #[serde(default)]
    pub bobs: Vec<BobConfig>,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub parameters: ParametersConfig,
    pub speed: Option<SpeedConfig>,
    pub rods: Vec<RodConfig>,
}

impl ScenarioConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let cfg = serde_yaml::from_reader(reader).context("malformed scenario YAML")?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open scenario {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to load scenario {}", path.display()))
    }
}
