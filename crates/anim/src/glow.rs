//! Activation flash envelope.
//!
//! When a particle first crosses the activation band the field records an
//! [`Activation`](crate::flow::Activation) snapshot. Each snapshot drives a
//! short localized flash at the recorded position: visible for 0.3 seconds
//! from the recorded time, swelling and shrinking along a half-sine. Pure
//! timing math; the `viz` glow renderer walks the pool and draws one sprite
//! per live flash.

/// How long a flash stays visible after its activation.
pub const VISIBLE: f32 = 0.3;

/// Sprite size floor and swell amplitude.
pub const BASE_SIZE: f32 = 0.1;
pub const SWELL: f32 = 0.3;

/// Sprite size for an activation recorded at `at`, observed at `now`.
/// Zero before the activation and once the flash has expired.
pub fn flash_size(now: f32, at: f32) -> f32 {
    let age = now - at;
    if age < 0.0 || age >= VISIBLE {
        return 0.0;
    }
    let progress = age / VISIBLE;
    BASE_SIZE + (progress * std::f32::consts::PI).sin() * SWELL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_window() {
        // Dark before the recorded time, lit inside the window, dark after.
        assert_eq!(flash_size(0.0, 0.1), 0.0);
        assert!(flash_size(0.15, 0.1) > 0.0);
        assert_eq!(flash_size(0.1 + VISIBLE, 0.1), 0.0);
        assert_eq!(flash_size(5.0, 0.1), 0.0);
    }

    #[test]
    fn test_flash_peaks_mid_window() {
        let at = 2.0;
        let early = flash_size(at + 0.03, at);
        let peak = flash_size(at + VISIBLE / 2.0, at);
        let late = flash_size(at + VISIBLE - 0.03, at);
        assert!(peak > early && peak > late);
        assert!((peak - (BASE_SIZE + SWELL)).abs() < 1e-4);
    }

    #[test]
    fn test_each_activation_flashes_once() {
        // No periodic repeat: a given activation stays dark from VISIBLE on.
        let mut t = VISIBLE;
        while t < 10.0 {
            assert_eq!(flash_size(t, 0.0), 0.0);
            t += 0.05;
        }
    }
}
