//! Signal-flow particle field.
//!
//! A fixed pool of particles drifts left-to-right through a pipe-shaped
//! volume in three stages: raw (flat gray, x < -5), classification (color
//! and lane blend in over -5..5), and routed (full class color, locked to
//! one of three lanes, class-dependent speed). Particles that leave the
//! right edge are recycled in place at the left edge; their class, target
//! color, and lane never change after creation.
//!
//! Motion constants are defined per frame at a 60 Hz reference and scaled
//! by the real `dt`, so a dropped frame advances the animation further on
//! the next tick instead of slowing it down.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::theme::Theme;

/// Default pool size.
pub const PARTICLE_COUNT: usize = 300;

/// Zone boundaries along x.
pub const LEFT_BOUNDARY: f32 = -5.0;
pub const RIGHT_BOUNDARY: f32 = 5.0;

/// Visible field extent; recycling happens past `FIELD_MAX_X`.
pub const FIELD_MIN_X: f32 = -25.0;
pub const FIELD_MAX_X: f32 = 25.0;
/// Recycled particles respawn in [FIELD_MIN_X, FIELD_MIN_X + RESPAWN_JITTER).
pub const RESPAWN_JITTER: f32 = 2.0;

/// Vertical and depth half-spread of the pipe volume.
pub const HALF_SPREAD_Y: f32 = 12.0;
pub const HALF_SPREAD_Z: f32 = 5.0;

/// Per-frame advance (at 60 Hz) before a particle is routed.
pub const RAW_SPEED: f32 = 0.12;
/// Width of the band just past the left boundary that marks activation.
pub const ACTIVATION_BAND: f32 = 0.5;

/// Lane-approach factor while classifying, scaled by zone progress.
pub const CLASSIFY_LANE_PULL: f32 = 0.12;
/// Stronger lane lock once routed.
pub const ROUTED_LANE_PULL: f32 = 0.15;
/// Routed particles flatten into the lane plane at this rate.
pub const ROUTED_Z_RELAX: f32 = 0.05;

/// The frame rate the per-frame constants were tuned at.
pub const REFERENCE_FPS: f32 = 60.0;

/// Damped approach over fractional reference frames: the fraction of the
/// remaining distance covered when a per-frame factor `k` compounds for
/// `steps` frames. Equals `k` at one step and composes exactly, so two
/// half-length ticks advance the same as one full tick.
#[inline]
fn approach(k: f32, steps: f32) -> f32 {
    1.0 - (1.0 - k).powf(steps)
}

/// What kind of signal a particle represents. Drawn once at creation with a
/// 30/40/30 split; lane, palette color, and routed speed all derive from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalClass {
    /// Semantic cache hit: blue, top lane, fastest.
    Cache,
    /// Small-model answer: purple, middle lane.
    SmallModel,
    /// Large-model answer: gold, bottom lane, slowest.
    LargeModel,
}

impl SignalClass {
    /// Weighted random draw: 30% cache, 40% small model, 30% large model.
    pub fn draw(rng: &mut impl Rng) -> SignalClass {
        let r: f32 = rng.gen();
        if r < 0.3 {
            SignalClass::Cache
        } else if r < 0.7 {
            SignalClass::SmallModel
        } else {
            SignalClass::LargeModel
        }
    }

    /// Target palette color (#3b82f6 / #8b5cf6 / #f59e0b).
    pub fn color(self) -> Vec3 {
        match self {
            SignalClass::Cache => Vec3::new(0.23, 0.51, 0.96),
            SignalClass::SmallModel => Vec3::new(0.55, 0.36, 0.96),
            SignalClass::LargeModel => Vec3::new(0.96, 0.62, 0.04),
        }
    }

    /// Lane index: 0 = top, 1 = middle, 2 = bottom.
    pub fn lane(self) -> usize {
        match self {
            SignalClass::Cache => 0,
            SignalClass::SmallModel => 1,
            SignalClass::LargeModel => 2,
        }
    }

    /// Y coordinate the lane sits at.
    pub fn lane_y(self) -> f32 {
        match self {
            SignalClass::Cache => 10.0,
            SignalClass::SmallModel => 0.0,
            SignalClass::LargeModel => -10.0,
        }
    }

    /// Per-frame advance (at 60 Hz) once routed. Cache hits are fastest.
    pub fn routed_speed(self) -> f32 {
        match self {
            SignalClass::Cache => 0.20,
            SignalClass::SmallModel => 0.16,
            SignalClass::LargeModel => 0.12,
        }
    }
}

/// Flat gray used for unclassified particles.
#[inline]
pub fn unclassified_gray(theme: Theme) -> Vec3 {
    if theme.is_dark() {
        Vec3::splat(0.15)
    } else {
        Vec3::splat(0.2)
    }
}

/// Snapshot taken the first time a particle crosses the activation band.
/// Drives the activation glow flash; cleared on recycle.
#[derive(Clone, Copy, Debug)]
pub struct Activation {
    /// Field-elapsed time at the crossing.
    pub time: f32,
    /// Where the particle was when it lit up.
    pub position: Vec3,
}

/// One particle of the pool.
#[derive(Clone, Copy, Debug)]
pub struct FlowParticle {
    /// Fixed for the particle's whole lifetime, including recycles.
    pub class: SignalClass,
    pub position: Vec3,
    /// Rendered color this frame.
    pub color: Vec3,
    pub activation: Option<Activation>,
}

impl FlowParticle {
    #[inline]
    pub fn activated(&self) -> bool {
        self.activation.is_some()
    }
}

/// Fixed-size particle pool plus the rng used for respawn jitter.
pub struct FlowField {
    particles: Vec<FlowParticle>,
    rng: StdRng,
    elapsed: f32,
}

impl FlowField {
    /// Build a pool spread uniformly over the whole pipe volume so the
    /// animation looks populated on the very first frame.
    pub fn new(count: usize, theme: Theme) -> Self {
        Self::from_rng(count, theme, StdRng::from_entropy())
    }

    /// Deterministic variant for tests and golden captures.
    pub fn seeded(count: usize, theme: Theme, seed: u64) -> Self {
        Self::from_rng(count, theme, StdRng::seed_from_u64(seed))
    }

    fn from_rng(count: usize, theme: Theme, mut rng: StdRng) -> Self {
        let gray = unclassified_gray(theme);
        let particles = (0..count)
            .map(|_| FlowParticle {
                class: SignalClass::draw(&mut rng),
                position: Vec3::new(
                    rng.gen_range(FIELD_MIN_X..FIELD_MAX_X),
                    rng.gen_range(-HALF_SPREAD_Y..HALF_SPREAD_Y),
                    rng.gen_range(-HALF_SPREAD_Z..HALF_SPREAD_Z),
                ),
                color: gray,
                activation: None,
            })
            .collect();

        log::debug!("flow field created: {count} particles");

        Self {
            particles,
            rng,
            elapsed: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[FlowParticle] {
        &self.particles
    }

    /// Time accumulated over all `update` calls.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance every particle by `dt` seconds. Single pass, in place; the
    /// zone a particle is in is decided by its x before this frame's move,
    /// matching a per-frame evaluation at the 60 Hz reference.
    pub fn update(&mut self, dt: f32, theme: Theme) {
        let steps = dt * REFERENCE_FPS;
        let gray = unclassified_gray(theme);

        for p in &mut self.particles {
            let x0 = p.position.x;

            if x0 < LEFT_BOUNDARY {
                // Raw zone: steady drift, no classification yet.
                p.position.x += RAW_SPEED * steps;
                p.color = gray;
            } else if x0 < RIGHT_BOUNDARY {
                // First crossing of the narrow band past the left boundary
                // lights the particle up and records where that happened.
                if p.activation.is_none() && x0 < LEFT_BOUNDARY + ACTIVATION_BAND {
                    p.activation = Some(Activation {
                        time: self.elapsed,
                        position: p.position,
                    });
                }

                p.position.x += RAW_SPEED * steps;

                let progress = (x0 - LEFT_BOUNDARY) / (RIGHT_BOUNDARY - LEFT_BOUNDARY);
                p.color = gray.lerp(p.class.color(), progress);

                let pull = approach(CLASSIFY_LANE_PULL * progress, steps);
                p.position.y += (p.class.lane_y() - p.position.y) * pull;
            } else {
                // Routed: class speed, exact class color, hard lane lock.
                p.position.x += p.class.routed_speed() * steps;
                p.color = p.class.color();

                let pull = approach(ROUTED_LANE_PULL, steps);
                p.position.y += (p.class.lane_y() - p.position.y) * pull;

                let relax = approach(ROUTED_Z_RELAX, steps);
                p.position.z -= p.position.z * relax;
            }

            if p.position.x > FIELD_MAX_X {
                Self::recycle(p, gray, &mut self.rng);
            }
        }

        self.elapsed += dt;
    }

    /// Reset a particle to the left edge. Identity (class, lane, target
    /// color) is preserved; position, rendered color, and activation are not.
    fn recycle(p: &mut FlowParticle, gray: Vec3, rng: &mut StdRng) {
        p.position = Vec3::new(
            FIELD_MIN_X + rng.gen_range(0.0..RESPAWN_JITTER),
            rng.gen_range(-HALF_SPREAD_Y..HALF_SPREAD_Y),
            rng.gen_range(-HALF_SPREAD_Z..HALF_SPREAD_Z),
        );
        p.color = gray;
        p.activation = None;
    }
}
