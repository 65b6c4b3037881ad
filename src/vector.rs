/*
 * Vector Module
 *
 * This module defines the Vector trait that all steering math is written
 * against. It is implemented for the 2-D and 3-D glam vectors re-exported
 * by nannou, so one flocking engine drives both planar and volumetric flocks.
 *
 * Every operation here is total over finite inputs: normalizing or limiting
 * a zero-length vector yields the zero vector rather than NaN.
 */

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

use nannou::prelude::{Vec2, Vec3};
use rand::Rng;

pub trait Vector:
    Copy
    + Debug
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f32, Output = Self>
    + Div<f32, Output = Self>
    + AddAssign
    + SubAssign
{
    /// The additive identity.
    const ZERO: Self;

    /// Number of scalar components.
    const DIMS: usize;

    /// Component `index` (0 = x, 1 = y, 2 = z).
    fn axis(&self, index: usize) -> f32;

    fn set_axis(&mut self, index: usize, value: f32);

    fn length_squared(self) -> f32;

    /// Build from a configuration triple; planar vectors drop the z value.
    fn from_array3(values: [f32; 3]) -> Self;

    /// Widen to 3-D for rendering; planar vectors get z = 0.
    fn to_vec3(self) -> Vec3;

    fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    fn distance_squared(self, other: Self) -> f32 {
        (self - other).length_squared()
    }

    fn distance(self, other: Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Largest absolute component.
    fn max_abs_component(self) -> f32 {
        (0..Self::DIMS).fold(0.0_f32, |largest, i| largest.max(self.axis(i).abs()))
    }

    // Unit vector in the same direction, or zero when the length is zero
    fn normalize_or_zero(self) -> Self {
        let length_squared = self.length_squared();
        if length_squared.is_infinite() && self.is_finite() {
            // Squaring overflowed; bring the components down to at most 1 first
            let scaled = self / self.max_abs_component();
            return scaled / scaled.length();
        }
        if length_squared > 0.0 {
            self / length_squared.sqrt()
        } else {
            Self::ZERO
        }
    }

    // Clamp the magnitude to `max`, preserving direction
    fn limit(self, max: f32) -> Self {
        let length_squared = self.length_squared();
        if length_squared.is_infinite() && self.is_finite() {
            // Longer than sqrt(f32::MAX), so only a larger `max` leaves it alone
            let largest = self.max_abs_component();
            let scaled = self / largest;
            let length = scaled.length();
            if largest * length > max {
                return scaled * (max / length);
            }
            return self;
        }
        if length_squared > max * max && length_squared > 0.0 {
            self * (max / length_squared.sqrt())
        } else {
            self
        }
    }

    fn is_finite(self) -> bool {
        (0..Self::DIMS).all(|i| self.axis(i).is_finite())
    }

    // Each component drawn independently from [-range, range]
    fn random_in<R: Rng + ?Sized>(rng: &mut R, range: f32) -> Self {
        let mut v = Self::ZERO;
        for i in 0..Self::DIMS {
            v.set_axis(i, rng.gen_range(-range..=range));
        }
        v
    }
}

impl Vector for Vec2 {
    const ZERO: Self = Vec2::ZERO;
    const DIMS: usize = 2;

    #[inline]
    fn axis(&self, index: usize) -> f32 {
        match index {
            0 => self.x,
            _ => self.y,
        }
    }

    #[inline]
    fn set_axis(&mut self, index: usize, value: f32) {
        match index {
            0 => self.x = value,
            _ => self.y = value,
        }
    }

    #[inline]
    fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    fn from_array3(values: [f32; 3]) -> Self {
        Vec2::new(values[0], values[1])
    }

    fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, 0.0)
    }
}

impl Vector for Vec3 {
    const ZERO: Self = Vec3::ZERO;
    const DIMS: usize = 3;

    #[inline]
    fn axis(&self, index: usize) -> f32 {
        match index {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    #[inline]
    fn set_axis(&mut self, index: usize, value: f32) {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            _ => self.z = value,
        }
    }

    #[inline]
    fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    fn from_array3(values: [f32; 3]) -> Self {
        Vec3::new(values[0], values[1], values[2])
    }

    fn to_vec3(self) -> Vec3 {
        self
    }
}
