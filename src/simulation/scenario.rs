//! Build fully-initialized rod scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime `Scenario`
//! containing:
//! - physical parameters (`Parameters`)
//! - speed and pause state (`SpeedControl`)
//! - every rod with its bobs at t = 0
//!
//! The scenario is inserted into Bevy as a `Resource` and stepped once per
//! frame by the viewer, or in a plain loop when running headless.

use bevy::log::warn;
use bevy::prelude::Resource;

use crate::configuration::config::{BobConfig, ScenarioConfig};
use crate::error::SimError;
use super::params::Parameters;
use super::speed::SpeedControl;
use super::states::{Bob, NVec2, RodEnd, RodSystem};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Description of one bob before it is attached
#[derive(Debug, Clone, PartialEq)]
pub struct BobSpec {
    pub length: f64,
    pub mass: f64,
    pub angle: f64,
    pub tag: String,
}

impl BobSpec {
    pub fn new(length: f64, mass: f64, angle: f64, tag: impl Into<String>) -> Self {
        Self { length, mass, angle, tag: tag.into() }
    }
}

/// Builds a `RodSystem` from a list of bob specs with explicit ends
#[derive(Debug, Clone)]
pub struct RodSystemBuilder {
    pivot: NVec2,
    length: f64,
    angle: f64,
    bobs: Vec<(BobSpec, Option<RodEnd>)>,
}

impl RodSystemBuilder {
    pub fn new(pivot: NVec2, length: f64) -> Self {
        Self { pivot, length, angle: 0.0, bobs: Vec::new() }
    }

    pub fn angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Hang a bob from `end`
    pub fn bob(mut self, spec: BobSpec, end: RodEnd) -> Self {
        self.bobs.push((spec, Some(end)));
        self
    }

    /// Hang a bob using the order convention of `RodSystem::attach`
    pub fn bob_in_order(mut self, spec: BobSpec) -> Self {
        self.bobs.push((spec, None));
        self
    }

    pub fn build(self, params: Parameters) -> Result<RodSystem, SimError> {
        let mut rod = RodSystem::new(self.pivot.x, self.pivot.y, self.length, self.angle, params)?;
        for (spec, end) in self.bobs {
            let bob = Bob::new(spec.length, spec.mass, spec.angle, spec.tag)?;
            match end {
                Some(end) => rod.attach_at(bob, end),
                None => rod.attach(bob),
            }
        }
        Ok(rod)
    }
}

/// Bevy resource holding every independent rod of a run
///
/// `initial_rods` keeps the t = 0 state so diverged rods can be reset.
#[derive(Resource, Debug, Clone)]
pub struct Scenario {
    pub parameters: Parameters,
    pub speed: SpeedControl,
    pub rods: Vec<RodSystem>,
    initial_rods: Vec<RodSystem>,
}

impl Scenario {
    pub fn new(parameters: Parameters, speed: SpeedControl, rods: Vec<RodSystem>) -> Result<Self, SimError> {
        parameters.validate()?;
        Ok(Self {
            parameters,
            speed,
            initial_rods: rods.clone(),
            rods,
        })
    }

    /// Map a `ScenarioConfig` into runtime rods; rods without a pivot are
    /// anchored at `default_pivot`
    pub fn build_scenario(cfg: ScenarioConfig, default_pivot: NVec2) -> Result<Self, SimError> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            gravity: p_cfg.gravity,
            damping: p_cfg.damping,
            base_dt: p_cfg.base_dt,
            tracer_angular_velocity: p_cfg.tracer_angular_velocity,
        };
        parameters.validate()?;

        let speed = match cfg.speed {
            Some(s) => SpeedControl::new(s.initial, s.max)?,
            None => SpeedControl::default(),
        };

        // Rods: map `RodConfig` -> runtime `RodSystem` through the builder
        let mut rods = Vec::with_capacity(cfg.rods.len());
        for rc in cfg.rods {
            let pivot = rc.pivot.map(|[x, y]| NVec2::new(x, y)).unwrap_or(default_pivot);
            let mut builder = RodSystemBuilder::new(pivot, rc.length).angle(rc.angle);
            for bc in rc.bobs {
                let BobConfig { length, mass, angle, end, tag } = bc;
                let spec = BobSpec::new(length, mass, angle, tag);
                builder = match end {
                    Some(end) => builder.bob(spec, end),
                    None => builder.bob_in_order(spec),
                };
            }
            rods.push(builder.build(parameters)?);
        }

        Self::new(parameters, speed, rods)
    }

    /// The two stock assemblies, both anchored at `pivot`
    pub fn reference(pivot: NVec2) -> Result<Self, SimError> {
        use std::f64::consts::PI;

        let parameters = Parameters::default();
        let main_rod = RodSystemBuilder::new(pivot, 400.0)
            .angle(PI)
            .bob(BobSpec::new(100.0, 20.0, PI, "#f95869"), RodEnd::First)
            .bob(BobSpec::new(200.0, 10.0, PI, "#ffa500"), RodEnd::Second)
            .build(parameters)?;
        let second_rod = RodSystemBuilder::new(pivot, 400.0)
            .angle(PI)
            .bob(BobSpec::new(300.0, 20.0, PI, "#4972c1"), RodEnd::First)
            .bob(BobSpec::new(200.0, 20.0, PI, "#6dbb1f"), RodEnd::Second)
            .build(parameters)?;

        Self::new(parameters, SpeedControl::default(), vec![main_rod, second_rod])
    }

    /// Step every rod once with the current speed; returns the `dt` used, or
    /// `None` while paused
    pub fn advance(&mut self) -> Option<f64> {
        let dt = self.speed.dt(self.parameters.base_dt)?;
        self.step_all(dt);
        Some(dt)
    }

    #[cfg(not(feature = "parallel"))]
    fn step_all(&mut self, dt: f64) {
        for rod in self.rods.iter_mut() {
            rod.step(dt);
        }
    }

    #[cfg(feature = "parallel")]
    fn step_all(&mut self, dt: f64) {
        self.rods.par_iter_mut().for_each(|rod| rod.step(dt));
    }

    /// Indices of rods whose state is no longer finite
    pub fn diverged(&self) -> Vec<usize> {
        self.rods
            .iter()
            .enumerate()
            .filter(|(_, rod)| !rod.is_finite())
            .map(|(i, _)| i)
            .collect()
    }

    /// Put one rod back to its initial state
    pub fn reset_rod(&mut self, index: usize) -> Result<(), SimError> {
        let initial = self.initial_rods.get(index).ok_or(SimError::UnknownRod(index))?;
        let rod = self.rods.get_mut(index).ok_or(SimError::UnknownRod(index))?;
        *rod = initial.clone();
        Ok(())
    }

    /// Reset every diverged rod, returning how many were reset
    pub fn recover_diverged(&mut self) -> usize {
        let diverged = self.diverged();
        for &i in &diverged {
            if let Err(e) = self.rods[i].check_finite() {
                warn!("rod {i}: {e}; resetting to initial state");
            }
            if let Err(e) = self.reset_rod(i) {
                warn!("rod {i}: {e}; left as is");
            }
        }
        diverged.len()
    }

    pub fn reset(&mut self) {
        self.rods = self.initial_rods.clone();
    }
}
