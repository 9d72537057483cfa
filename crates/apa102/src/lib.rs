//! # apa102
//!
//! Bit-banged driver for APA102 / SK9822 addressable LED strips.
//!
//! The strip is driven through two plain output pins (clock and data), so any
//! [`embedded_hal::digital::OutputPin`] implementation works. A transmission
//! is a 32-bit zero start frame, one 32-bit packet per LED and a short run of
//! zero bytes that pushes the data through the chain:
//!
//! ```text
//! 00 00 00 00 | E0|br  blue  green  red | ... | 00 x ((count + 14) / 16)
//! ```
//!
//! Besides the encoder the crate holds the pieces that sit directly on top of
//! it: a fixed-size [`Frame`] buffer, the 5-bit [`Brightness`] register, sRGB
//! [`gamma`] correction and the [`animation`] state machine used by the LED
//! task of the T-Embed firmware.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let mut strip = apa102::Apa102::new(data_pin, clock_pin);
//! let pixels = [apa102::Pixel::new(255, 128, 0); 7];
//! strip.write(&pixels, apa102::Brightness::new(4))?;
//! ```

#![cfg_attr(not(test), no_std)]

pub mod animation;
mod brightness;
mod encoder;
mod frame;
pub mod gamma;

pub use brightness::Brightness;
pub use encoder::{
    Apa102,
    Error,
    START_FRAME,
    end_frame_len,
    pixel_packet,
};
pub use frame::Frame;

/// One LED colour, 8 bits per channel.
pub type Pixel = palette::Srgb<u8>;

/// All channels off.
pub const BLACK: Pixel = Pixel::new(0, 0, 0);
