//! Grid-warp backdrop math.
//!
//! A 20x15 plane is subdivided into an 80x60 grid and drawn with a shader
//! that bends the surface into a bowl near the center, ripples it in sync
//! with a 6-second pulse cycle, and sweeps a thin colored ring outward from
//! the center once per cycle, alternating between two palette colors.
//!
//! The functions here are the reference implementation of that shader. The
//! WGSL in `viz/src/gpu/shaders/gridwarp.wgsl` mirrors them term for term,
//! so the golden-value tests against this module pin down what the GPU
//! renders. Every quantity is a pure function of (vertex position, elapsed
//! time, theme); there is no per-frame state to carry.

use glam::{Vec2, Vec3};

use crate::theme::Theme;

/// Plane extent in model units (full width x height).
pub const PLANE_SIZE: Vec2 = Vec2::new(20.0, 15.0);
/// Plane subdivisions (quads along x and y).
pub const PLANE_SEGMENTS: (u32, u32) = (80, 60);

/// Radius of the warp falloff: vertices farther than this are flat.
pub const WARP_RADIUS: f32 = 4.0;
/// Seconds between pulse-ring emissions; also gates the ripple boost.
pub const WAVE_INTERVAL: f32 = 6.0;

/// Grid-line cells across one UV unit, shared by lines and ring distance.
pub const GRID_CELLS: f32 = 70.0;
/// How far (in grid cells from the UV center) a ring travels per cycle.
pub const RING_MAX_DISTANCE: f32 = 50.0;
/// Half-band around the ring radius that lights up.
pub const RING_WIDTH: f32 = 1.0;

/// Edge fade geometry: half extents of the plane and the fade margin.
pub const PLANE_HALF_EXTENT: Vec2 = Vec2::new(10.0, 7.5);
pub const EDGE_FADE_WIDTH: f32 = 2.5;
/// Everything below this y is faded out over [`BOTTOM_FADE_HEIGHT`].
pub const BOTTOM_CUTOFF: f32 = -2.5;
pub const BOTTOM_FADE_HEIGHT: f32 = 1.5;

#[inline]
fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Warp falloff: 1 at the center, 0 beyond [`WARP_RADIUS`].
#[inline]
pub fn warp(distance: f32) -> f32 {
    (1.0 - distance / WARP_RADIUS).max(0.0)
}

/// Phase within the current pulse cycle, in [0, 1).
#[inline]
pub fn wave_phase(time: f32) -> f32 {
    fract(time / WAVE_INTERVAL)
}

/// Ripple amplification window: rises over the first tenth of the cycle,
/// falls back to zero by phase 0.3. Zero for the rest of the cycle.
pub fn wave_boost(time: f32) -> f32 {
    let phase = wave_phase(time);
    smoothstep(0.0, 0.1, phase) * smoothstep(0.3, 0.0, phase)
}

/// Vertex z-displacement at a plane position: center bowl plus the synced
/// radial wave and a faint angular spiral.
pub fn displacement(pos: Vec2, time: f32) -> f32 {
    let distance = pos.length();
    let warp = warp(distance);
    let boost = wave_boost(time);

    let center_wave = (distance * 2.0 - time * 1.2).sin() * warp * (0.06 + boost * 0.05);
    let bowl = -warp * warp * 2.0;

    let angle = pos.y.atan2(pos.x);
    let spiral = (angle * 4.0 + time * 0.3).sin() * warp * (0.008 + boost * 0.006);

    bowl + center_wave + spiral
}

/// Slow z-axis sway applied to the whole mesh.
#[inline]
pub fn sway(time: f32) -> f32 {
    (time * 0.05).sin() * 0.01
}

/// The two base grid tones for a theme. Dark mode uses light grays, light
/// mode darker, higher-contrast grays.
pub fn base_colors(theme: Theme) -> (Vec3, Vec3) {
    match theme {
        Theme::Dark => (Vec3::new(0.6, 0.6, 0.6), Vec3::new(0.5, 0.5, 0.5)),
        Theme::Light => (Vec3::new(0.2, 0.2, 0.25), Vec3::new(0.15, 0.15, 0.2)),
    }
}

/// Base grid-line color: a slow oscillation between the two theme tones as
/// a function of time and radial distance, weighted by the warp falloff.
pub fn base_color(distance: f32, time: f32, theme: Theme) -> Vec3 {
    let (a, b) = base_colors(theme);
    let mix = (time * 0.5 + distance * 1.5).sin() * 0.5 + 0.5;
    a.lerp(b, mix * warp(distance))
}

/// Which of the two pulse palette entries the current cycle uses.
#[inline]
pub fn pulse_index(time: f32) -> u32 {
    (time / WAVE_INTERVAL).floor() as u32 % 2
}

/// Pulse ring color for the current cycle: blue then purple, alternating.
/// Brighter in dark mode, deeper and more saturated in light mode.
pub fn pulse_color(time: f32, theme: Theme) -> Vec3 {
    match (pulse_index(time), theme) {
        (0, Theme::Dark) => Vec3::new(0.3, 0.5, 1.0),
        (0, Theme::Light) => Vec3::new(0.0, 0.2, 0.7),
        (_, Theme::Dark) => Vec3::new(0.7, 0.4, 1.0),
        (_, Theme::Light) => Vec3::new(0.4, 0.1, 0.7),
    }
}

/// Ring brightness multiplier; light mode compensates for the pale page.
#[inline]
pub fn pulse_intensity(theme: Theme) -> f32 {
    if theme.is_dark() {
        2.5
    } else {
        3.5
    }
}

/// Distance (in grid cells from the UV center) the current ring has
/// traveled. Sweeps 0 -> [`RING_MAX_DISTANCE`] once per cycle, then wraps.
#[inline]
pub fn ring_distance(time: f32) -> f32 {
    wave_phase(time) * RING_MAX_DISTANCE
}

/// Ring band membership: 1 on the ring radius, falling to 0 at
/// [`RING_WIDTH`] cells away.
pub fn ring_visibility(grid_distance: f32, time: f32) -> f32 {
    let to_ring = (grid_distance - ring_distance(time)).abs();
    smoothstep(RING_WIDTH, 0.0, to_ring)
}

/// Fade along one axis: 0 at the plane boundary, 1 once
/// [`EDGE_FADE_WIDTH`] inside it. Monotone in between.
pub fn axis_fade(coord: f32, half_extent: f32) -> f32 {
    let dist_to_edge = (half_extent - coord.abs()).min(half_extent);
    smoothstep(0.0, EDGE_FADE_WIDTH, dist_to_edge)
}

/// Rectangular edge fade: product of the independent x and y axis fades.
pub fn edge_fade(pos: Vec2) -> f32 {
    axis_fade(pos.x, PLANE_HALF_EXTENT.x) * axis_fade(pos.y, PLANE_HALF_EXTENT.y)
}

/// Bottom clip: fades the grid out entirely below [`BOTTOM_CUTOFF`] so the
/// plane blends into the page background.
#[inline]
pub fn bottom_cut(y: f32) -> f32 {
    smoothstep(BOTTOM_CUTOFF, BOTTOM_CUTOFF + BOTTOM_FADE_HEIGHT, y)
}

/// Keeps full intensity away from the center, dips 10% right at it.
#[inline]
pub fn center_fade(distance: f32) -> f32 {
    smoothstep(0.0, 0.5, distance) * 0.1 + 0.9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warp_falloff() {
        assert_eq!(warp(0.0), 1.0);
        assert_eq!(warp(WARP_RADIUS), 0.0);
        assert_eq!(warp(WARP_RADIUS * 2.0), 0.0);
        assert!(warp(1.0) > warp(2.0));
    }

    #[test]
    fn test_wave_boost_window() {
        // Zero right at emission, peaks inside (0, 0.3), zero after.
        assert_eq!(wave_boost(0.0), 0.0);
        assert!(wave_boost(0.9) > 0.0); // phase 0.15
        assert_eq!(wave_boost(3.0), 0.0); // phase 0.5
        // Periodic with the cycle.
        assert!((wave_boost(0.9) - wave_boost(0.9 + WAVE_INTERVAL)).abs() < 1e-5);
    }

    #[test]
    fn test_ring_distance_cycle() {
        assert_eq!(ring_distance(0.0), 0.0);
        assert!((ring_distance(3.0) - 25.0).abs() < 1e-4);
        assert!(ring_distance(6.0).abs() < 1e-3);
    }

    #[test]
    fn test_pulse_alternates_between_two_colors() {
        assert_eq!(pulse_index(0.0), 0);
        assert_eq!(pulse_index(5.9), 0);
        assert_eq!(pulse_index(6.0), 1);
        assert_eq!(pulse_index(11.9), 1);
        assert_eq!(pulse_index(12.0), 0);

        for theme in [Theme::Light, Theme::Dark] {
            assert_ne!(pulse_color(0.0, theme), pulse_color(6.0, theme));
            assert_eq!(pulse_color(0.0, theme), pulse_color(12.0, theme));
        }
    }

    #[test]
    fn test_ring_visibility_band() {
        let t = 3.0; // ring at 25 cells
        assert_eq!(ring_visibility(25.0, t), 1.0);
        assert_eq!(ring_visibility(25.0 + RING_WIDTH, t), 0.0);
        assert_eq!(ring_visibility(25.0 - RING_WIDTH, t), 0.0);
        let near = ring_visibility(25.3, t);
        assert!(near > 0.0 && near < 1.0);
    }

    #[test]
    fn test_edge_fade_bounds_and_monotonicity() {
        assert_eq!(axis_fade(PLANE_HALF_EXTENT.x, PLANE_HALF_EXTENT.x), 0.0);
        assert_eq!(axis_fade(-PLANE_HALF_EXTENT.y, PLANE_HALF_EXTENT.y), 0.0);
        assert_eq!(axis_fade(0.0, PLANE_HALF_EXTENT.x), 1.0);

        let mut prev = axis_fade(PLANE_HALF_EXTENT.x, PLANE_HALF_EXTENT.x);
        let mut coord = PLANE_HALF_EXTENT.x;
        while coord > 0.0 {
            coord -= 0.25;
            let fade = axis_fade(coord, PLANE_HALF_EXTENT.x);
            assert!(fade >= prev, "fade must not decrease toward the center");
            prev = fade;
        }

        assert_eq!(edge_fade(Vec2::ZERO), 1.0);
        assert_eq!(edge_fade(Vec2::new(10.0, 0.0)), 0.0);
        assert_eq!(edge_fade(Vec2::new(0.0, 7.5)), 0.0);
    }

    #[test]
    fn test_bottom_cut_clips_low_grid() {
        assert_eq!(bottom_cut(-3.0), 0.0);
        assert_eq!(bottom_cut(0.0), 1.0);
        let mid = bottom_cut(-1.75);
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn test_displacement_is_bowl_shaped_at_center() {
        // The -2*warp^2 term dominates near the center: clearly negative.
        assert!(displacement(Vec2::ZERO, 0.0) < -1.5);
        // Flat beyond the warp radius.
        assert_eq!(displacement(Vec2::new(8.0, 0.0), 1.7), 0.0);
    }

    #[test]
    fn test_base_color_stays_between_theme_tones() {
        for theme in [Theme::Light, Theme::Dark] {
            let (a, b) = base_colors(theme);
            let lo = a.min(b);
            let hi = a.max(b);
            for i in 0..50 {
                let c = base_color(i as f32 * 0.2, i as f32 * 0.37, theme);
                assert!(c.cmpge(lo - 1e-6).all() && c.cmple(hi + 1e-6).all());
            }
        }
    }
}
