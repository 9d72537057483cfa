//! The APA102 5-bit global brightness register.

/// 5-bit brightness (0-31) sent in the control byte of every LED packet.
///
/// The LED multiplies it with the 8-bit colour channels in its PWM driver, so
/// it dims the whole pixel without losing colour resolution at the top end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(u8);

impl Brightness {
    pub const OFF: Self = Self(0);
    pub const MAX: Self = Self(31);

    /// Highest possible product of an 8-bit channel and the 5-bit register.
    pub const MAX_POWER: u16 = 255 * 31;

    /// Clamps `level` to the 5-bit range.
    pub const fn new(level: u8) -> Self {
        if level > Self::MAX.0 {
            Self::MAX
        } else {
            Self(level)
        }
    }

    pub const fn level(self) -> u8 {
        self.0
    }

    /// First byte of an LED packet: three marker bits then the brightness.
    pub const fn control_byte(self) -> u8 {
        0b1110_0000 | self.0
    }

    /// Splits a combined `power` (8-bit level x 5-bit brightness) into the
    /// lowest brightness that can reach it and the matching 8-bit level.
    ///
    /// Keeping the brightness register low for dim values leaves the 8-bit
    /// channel as much resolution as possible. `power` above
    /// [`MAX_POWER`](Self::MAX_POWER) saturates.
    pub fn split_power(power: u16) -> (Self, u8) {
        let mut brightness: u16 = 1;
        while brightness * 255 < power && brightness < u16::from(Self::MAX.0) {
            brightness += 1;
        }

        let level = (u32::from(power) + u32::from(brightness / 2)) / u32::from(brightness);
        let level = u8::try_from(level).unwrap_or(u8::MAX);

        // brightness <= 31 here
        (Self(brightness as u8), level)
    }
}

impl From<u8> for Brightness {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

impl From<Brightness> for u8 {
    fn from(brightness: Brightness) -> Self {
        brightness.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_five_bits() {
        assert_eq!(Brightness::new(0).level(), 0);
        assert_eq!(Brightness::new(31).level(), 31);
        assert_eq!(Brightness::new(32).level(), 31);
        assert_eq!(Brightness::from(0x3F).level(), 31);
        assert_eq!(Brightness::new(255), Brightness::MAX);
    }

    #[test]
    fn control_byte_sets_marker_bits() {
        assert_eq!(Brightness::OFF.control_byte(), 0xE0);
        assert_eq!(Brightness::new(1).control_byte(), 0xE1);
        assert_eq!(Brightness::MAX.control_byte(), 0xFF);
        assert_eq!(Brightness::new(200).control_byte(), 0xFF);
    }

    #[test]
    fn split_power_prefers_low_brightness() {
        assert_eq!(Brightness::split_power(0), (Brightness::new(1), 0));
        assert_eq!(Brightness::split_power(1), (Brightness::new(1), 1));
        assert_eq!(Brightness::split_power(255), (Brightness::new(1), 255));
        // 256 no longer fits in one brightness step: 2 * 128 = 256
        assert_eq!(Brightness::split_power(256), (Brightness::new(2), 128));
        assert_eq!(
            Brightness::split_power(Brightness::MAX_POWER),
            (Brightness::MAX, 255)
        );
    }

    #[test]
    fn split_power_saturates() {
        assert_eq!(Brightness::split_power(u16::MAX), (Brightness::MAX, 255));
    }

    #[test]
    fn split_power_roughly_preserves_product() {
        for power in (0..=Brightness::MAX_POWER).step_by(97) {
            let (brightness, level) = Brightness::split_power(power);
            let product = i32::from(brightness.level()) * i32::from(level);
            let error = (product - i32::from(power)).abs();
            assert!(error <= i32::from(brightness.level()) / 2 + 1, "power {power}");
        }
    }
}
