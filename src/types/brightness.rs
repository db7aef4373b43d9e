//! Brightness on the normalized 0-255 scale.

use serde::{Deserialize, Serialize};

/// Native `(min, max)` brightness range of a device property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrightnessScale {
    pub min: i64,
    pub max: i64,
}

impl BrightnessScale {
    pub fn new(min: i64, max: i64) -> Self {
        BrightnessScale { min, max }
    }

    /// Like [`new`](Self::new), but `None` unless `min <= max` and the number
    /// of native states fits in an `i64`.
    pub fn checked(min: i64, max: i64) -> Option<Self> {
        if min > max {
            return None;
        }
        max.checked_sub(min)?.checked_add(1)?;
        Some(BrightnessScale { min, max })
    }

    fn states(&self) -> i128 {
        (i128::from(self.max) - i128::from(self.min) + 1).max(1)
    }
}

/// Brightness level from 0 to 255.
///
/// Device values are rescaled against the property's native range with
/// [`Brightness::from_native`] and [`Brightness::to_native`].
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Brightness {
    pub(crate) value: u8,
}

impl Brightness {
    pub const MAX: u8 = 255;

    pub fn new(value: u8) -> Self {
        Brightness { value }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Rescale a native device value to 0-255, rounding up.
    ///
    /// # Examples
    ///
    /// ```
    /// use miot_light_rs::{Brightness, BrightnessScale};
    ///
    /// let scale = BrightnessScale::new(1, 100);
    /// assert_eq!(Brightness::from_native(scale, 100).value(), 255);
    /// assert_eq!(Brightness::from_native(scale, 1).value(), 3);
    /// assert_eq!(Brightness::from_native(scale, 50).value(), 128);
    /// ```
    pub fn from_native(scale: BrightnessScale, value: i64) -> Self {
        let states = scale.states();
        let offset = (i128::from(value) - i128::from(scale.min) + 1).clamp(0, states);
        let scaled = (offset * i128::from(Self::MAX) + states - 1) / states;
        Brightness {
            value: scaled.clamp(0, i128::from(Self::MAX)) as u8,
        }
    }

    /// Rescale to the native device range, rounding down and clamping to it.
    ///
    /// Rounding down keeps `from_native(to_native(b))` in the same bucket as `b`;
    /// rounding up would drift one native step per round trip.
    ///
    /// # Examples
    ///
    /// ```
    /// use miot_light_rs::{Brightness, BrightnessScale};
    ///
    /// let scale = BrightnessScale::new(1, 100);
    /// assert_eq!(Brightness::new(255).to_native(scale), 100);
    /// assert_eq!(Brightness::new(3).to_native(scale), 1);
    /// assert_eq!(Brightness::new(0).to_native(scale), 1);
    /// ```
    pub fn to_native(&self, scale: BrightnessScale) -> i64 {
        let native = i128::from(self.value) * scale.states() / i128::from(Self::MAX)
            + i128::from(scale.min)
            - 1;
        let (min, max) = (scale.min, scale.max.max(scale.min));
        native.clamp(i128::from(min), i128::from(max)) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_keeps_bucket() {
        let scales = [
            BrightnessScale::new(1, 100),
            BrightnessScale::new(0, 100),
            BrightnessScale::new(1, 65535),
            BrightnessScale::new(0, 255),
            BrightnessScale::new(2, 7),
            BrightnessScale::new(1, 200),
        ];
        for scale in scales {
            for native in scale.min..=scale.max {
                let bucket = Brightness::from_native(scale, native);
                let back = bucket.to_native(scale);
                assert!((scale.min..=scale.max).contains(&back));
                assert_eq!(
                    Brightness::from_native(scale, back),
                    bucket,
                    "scale {scale:?} native {native}"
                );
            }
        }
    }

    #[test]
    fn test_monotonic() {
        let scale = BrightnessScale::new(1, 100);
        let mut last = Brightness::new(0);
        for native in 1..=100 {
            let b = Brightness::from_native(scale, native);
            assert!(b >= last);
            last = b;
        }
        let mut last = 0;
        for value in 0..=255u8 {
            let native = Brightness::new(value).to_native(scale);
            assert!(native >= last);
            last = native;
        }
    }

    #[test]
    fn test_extreme_scale_does_not_overflow() {
        let scale = BrightnessScale::new(0, i64::MAX / 2);
        assert_eq!(Brightness::from_native(scale, i64::MAX / 4).value(), 128);
        assert_eq!(Brightness::new(255).to_native(scale), i64::MAX / 2);

        let scale = BrightnessScale::new(i64::MIN, i64::MAX);
        assert_eq!(Brightness::from_native(scale, i64::MAX).value(), 255);
        assert_eq!(Brightness::new(0).to_native(scale), i64::MIN);
    }

    #[test]
    fn test_checked_scale() {
        assert_eq!(BrightnessScale::checked(1, 100), Some(BrightnessScale::new(1, 100)));
        assert!(BrightnessScale::checked(100, 1).is_none());
        assert!(BrightnessScale::checked(i64::MIN, i64::MAX).is_none());
        assert!(BrightnessScale::checked(0, i64::MAX).is_none());
    }

    #[test]
    fn test_out_of_range_native_is_clamped() {
        let scale = BrightnessScale::new(1, 100);
        assert_eq!(Brightness::from_native(scale, 500).value(), 255);
        assert_eq!(Brightness::from_native(scale, -4).value(), 0);
    }
}
