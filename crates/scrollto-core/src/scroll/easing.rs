//! Easing curves for scroll animations
//!
//! Maps an elapsed-time ratio in [0, 1] to a progress ratio. Presets are
//! named by [`EasingType`] so they can live in the config file; anything else
//! goes through [`Easing::custom`].

use std::f64::consts::PI;
use std::fmt;
use std::rc::Rc;

pub use crate::config::EasingType;

/// Extension trait for EasingType with calculation methods
pub trait EasingTypeExt {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value in range [0, 1]
    ///
    /// # Returns
    /// Eased value in range [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::QuadIn => t * t,
            EasingType::QuadOut => -t * (t - 2.0),
            EasingType::QuadInOut => quad_in_out(t),
            EasingType::CubicIn => t * t * t,
            EasingType::CubicOut => cubic_out(t),
            EasingType::CubicInOut => cubic_in_out(t),
            EasingType::QuintOut => quint_out(t),
            EasingType::SineInOut => -0.5 * ((PI * t).cos() - 1.0),
            EasingType::ExpoOut => expo_out(t),
        }
    }
}

#[inline]
fn quad_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t < 1.0 {
        0.5 * t * t
    } else {
        let t = t - 1.0;
        -0.5 * (t * (t - 2.0) - 1.0)
    }
}

/// Cubic ease-out: f(t) = (t-1)³ + 1
#[inline]
fn cubic_out(t: f64) -> f64 {
    let f = t - 1.0;
    f * f * f + 1.0
}

/// Symmetric cubic: 4t³ on the first half, mirrored on the second
#[inline]
fn cubic_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let f = 2.0 * t - 2.0;
        0.5 * f * f * f + 1.0
    }
}

/// Quintic ease-out: f(t) = (t-1)⁵ + 1
#[inline]
fn quint_out(t: f64) -> f64 {
    let f = t - 1.0;
    f * f * f * f * f + 1.0
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
fn expo_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

/// Easing curve used by an animation
#[derive(Clone)]
pub enum Easing {
    Preset(EasingType),
    Custom(Rc<dyn Fn(f64) -> f64>),
}

impl Easing {
    /// Create a custom easing from a closure. Input is not clamped.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + 'static,
    {
        Easing::Custom(Rc::new(f))
    }

    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Preset(easing) => easing.apply(t),
            Easing::Custom(f) => f(t),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Preset(EasingType::default())
    }
}

impl From<EasingType> for Easing {
    fn from(easing: EasingType) -> Self {
        Easing::Preset(easing)
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Preset(easing) => write!(f, "Preset({})", easing),
            Easing::Custom(_) => write!(f, "Custom"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_boundaries() {
        for easing in EasingType::ALL {
            assert!(easing.apply(0.0).abs() < 0.001, "{:?} at t=0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in EasingType::ALL {
            let mut prev = 0.0;
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                let v = easing.apply(t);
                assert!(v >= prev - 1e-12, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_cubic_in_out_symmetric() {
        let easing = EasingType::CubicInOut;
        assert!((easing.apply(0.5) - 0.5).abs() < 1e-9);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let mirrored = 1.0 - easing.apply(1.0 - t);
            assert!((easing.apply(t) - mirrored).abs() < 1e-9);
        }
    }

    #[test]
    fn test_custom_easing_unclamped() {
        let overshoot = Easing::custom(|t| t * 1.5);
        assert_eq!(overshoot.apply(1.0), 1.5);
        assert_eq!(Easing::default().apply(0.25), EasingType::CubicInOut.apply(0.25));
    }
}
