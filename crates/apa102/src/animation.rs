//! LED task state machine.
//!
//! One task owns the strip. It drains [`LedCommand`]s from a bounded queue,
//! keeps the current [`LedMode`] and brightness in an [`Animator`], and every
//! tick asks the animator to render into the frame buffer. Everything here is
//! free of hardware so it can be driven from any executor or a test.

use palette::{
    FromColor,
    Hsv,
};

use crate::{
    BLACK,
    Brightness,
    Frame,
    Pixel,
};

/// What the strip shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedMode {
    #[default]
    Off,
    /// Whole strip one colour, hue cycling with time.
    Gradient,
    /// Rainbow running along the strip.
    Rotate,
    /// Single LED lit, moved with [`LedCommand::Step`].
    Independent,
    White,
    Orange,
    /// Level meter fed by [`LedCommand::Level`].
    Level,
}

impl LedMode {
    /// Modes offered by the mode picker, in order. [`Level`](Self::Level)
    /// is not among them: it only makes sense while something feeds
    /// [`LedCommand::Level`] readings.
    pub const PICKER: [Self; 6] = [
        Self::Off,
        Self::Gradient,
        Self::Rotate,
        Self::Independent,
        Self::White,
        Self::Orange,
    ];

    /// Map a mode index to a mode: `0..=5` are the picker entries and `15`
    /// selects [`Level`](Self::Level).
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Off),
            1 => Some(Self::Gradient),
            2 => Some(Self::Rotate),
            3 => Some(Self::Independent),
            4 => Some(Self::White),
            5 => Some(Self::Orange),
            15 => Some(Self::Level),
            _ => None,
        }
    }

    /// The next picker mode, wrapping around. Leaving
    /// [`Level`](Self::Level) goes back to [`Off`](Self::Off).
    #[must_use]
    pub fn next(self) -> Self {
        match Self::PICKER.iter().position(|mode| *mode == self) {
            Some(index) => Self::PICKER[(index + 1) % Self::PICKER.len()],
            None => Self::Off,
        }
    }
}

/// Direction to move the [`Independent`](LedMode::Independent) cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Forward,
    Backward,
}

/// Message sent to the LED task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedCommand {
    Set { mode: LedMode, brightness: Brightness },
    Step(Step),
    /// New reading for the level meter; number of LEDs to light.
    Level(u8),
}

pub const ORANGE: Pixel = Pixel::new(255, 128, 0);
pub const WHITE: Pixel = Pixel::new(255, 255, 255);

/// Hue step between neighbouring LEDs in [`LedMode::Rotate`], in phase units.
const ROTATE_SPREAD: u8 = 8;

/// Renders [`LedMode`]s into a [`Frame`] of `N` LEDs.
pub struct Animator<const N: usize> {
    mode: LedMode,
    brightness: Brightness,
    cursor: usize,
    level: Option<u8>,
    level_order: [usize; N],
}

impl<const N: usize> Animator<N> {
    /// Start dark at brightness 1. `level_order` lists LED indices from the
    /// bottom of the level meter to the top.
    pub const fn new(level_order: [usize; N]) -> Self {
        Self {
            mode: LedMode::Off,
            brightness: Brightness::new(1),
            cursor: 0,
            level: None,
            level_order,
        }
    }

    pub const fn mode(&self) -> LedMode {
        self.mode
    }

    pub const fn brightness(&self) -> Brightness {
        self.brightness
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn apply(&mut self, command: LedCommand) {
        match command {
            LedCommand::Set { mode, brightness } => {
                self.mode = mode;
                self.brightness = brightness;
            }
            LedCommand::Step(step) => self.step(step),
            LedCommand::Level(level) => self.level = Some(level),
        }
    }

    fn step(&mut self, step: Step) {
        if N == 0 {
            return;
        }
        self.cursor = match step {
            Step::Forward => (self.cursor + 1) % N,
            Step::Backward => (self.cursor + N - 1) % N,
        };
    }

    /// Fill `frame` for time `now_ms`. Returns `false` when the strip should
    /// be left as it is, which only happens in level mode while no new
    /// reading has arrived.
    pub fn render(&mut self, now_ms: u64, frame: &mut Frame<N>) -> bool {
        let phase = phase(now_ms);
        frame.set_brightness(self.brightness);

        match self.mode {
            LedMode::Off => frame.clear(),
            LedMode::Gradient => frame.fill(hue_color(phase)),
            LedMode::Rotate => {
                for (index, pixel) in frame.pixels_mut().iter_mut().enumerate() {
                    let offset = (index as u8).wrapping_mul(ROTATE_SPREAD);
                    *pixel = hue_color(phase.wrapping_sub(offset));
                }
            }
            LedMode::Independent => {
                frame.clear();
                frame.set(self.cursor, hue_color(phase));
            }
            LedMode::White => frame.fill(WHITE),
            LedMode::Orange => frame.fill(ORANGE),
            LedMode::Level => {
                let Some(level) = self.level.take() else {
                    return false;
                };
                frame.clear();
                let color = hue_color(phase);
                let lit = usize::from(level).max(1);
                for &index in self.level_order.iter().take(lit) {
                    frame.set(index, color);
                }
            }
        }
        true
    }
}

/// Colour clock: one step every 16 ms, wrapping every ~4 s.
const fn phase(now_ms: u64) -> u8 {
    (now_ms >> 4) as u8
}

/// Hue in degrees for a phase, spread over 0..359.
const fn hue_degrees(phase: u8) -> u16 {
    // 255 * 359 needs more than 16 bits
    (phase as u32 * 359 / 256) as u16
}

/// Fully saturated colour for a phase.
fn hue_color(phase: u8) -> Pixel {
    let hsv: Hsv = Hsv::new(f32::from(hue_degrees(phase)), 1.0, 1.0);
    let rgb: palette::Srgb = palette::Srgb::from_color(hsv);
    rgb.into_format()
}

impl<const N: usize> Default for Animator<N> {
    fn default() -> Self {
        let mut order = [0; N];
        for (index, slot) in order.iter_mut().enumerate() {
            *slot = index;
        }
        Self::new(order)
    }
}
