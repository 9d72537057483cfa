//! APA102 / SK9822 frame encoder over two bit-banged GPIO lines.

use embedded_hal::digital::OutputPin;

use crate::{
    Brightness,
    Frame,
    Pixel,
};

/// 32 zero bits that open every transmission.
pub const START_FRAME: [u8; 4] = [0; 4];

/// Number of zero bytes clocked out after the last LED packet.
///
/// Every LED in the chain delays the data by one clock edge, so the last of
/// `count` LEDs only latches its packet after `count - 1` extra edges. Each
/// padding byte provides 16 edges, giving `ceil((count - 1) / 16)` bytes.
///
/// This replaces the datasheet's fixed four `0xFF` bytes, which fail from 66
/// LEDs upwards and light stray white pixels when fewer LEDs are written than
/// the strip holds.
pub const fn end_frame_len(count: usize) -> usize {
    (count + 14) / 16
}

/// The four bytes sent for one LED: control byte, then blue, green, red.
pub const fn pixel_packet(pixel: Pixel, brightness: Brightness) -> [u8; 4] {
    [
        brightness.control_byte(),
        pixel.blue,
        pixel.green,
        pixel.red,
    ]
}

/// A pin failed to change level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<DataError, ClockError> {
    Data(DataError),
    Clock(ClockError),
}

/// An APA102 strip on a data pin and a clock pin.
///
/// Owning both pins is what keeps a second writer from interleaving bits
/// into a transmission in progress. Nothing else is remembered between
/// frames.
///
/// Most callers only need [`write`](Self::write). The low-level interface
/// ([`start_frame`](Self::start_frame), [`send_color`](Self::send_color),
/// [`end_frame`](Self::end_frame)) lets colours be streamed as they are
/// computed instead of being stored first.
pub struct Apa102<D, C> {
    data: D,
    clock: C,
}

impl<D, C> Apa102<D, C>
where
    D: OutputPin,
    C: OutputPin,
{
    pub const fn new(data: D, clock: C) -> Self {
        Self { data, clock }
    }

    /// Give back the data and clock pins.
    pub fn release(self) -> (D, C) {
        (self.data, self.clock)
    }

    /// Drive both lines low.
    ///
    /// With both lines idle-low several strips can share one clock pin.
    pub fn initialize(&mut self) -> Result<(), Error<D::Error, C::Error>> {
        self.data.set_low().map_err(Error::Data)?;
        self.clock.set_low().map_err(Error::Clock)
    }

    /// Idle the lines and send the start frame.
    pub fn start_frame(&mut self) -> Result<(), Error<D::Error, C::Error>> {
        self.initialize()?;
        for byte in START_FRAME {
            self.transfer(byte)?;
        }
        Ok(())
    }

    /// Send one LED packet.
    pub fn send_color(
        &mut self,
        pixel: Pixel,
        brightness: Brightness,
    ) -> Result<(), Error<D::Error, C::Error>> {
        for byte in pixel_packet(pixel, brightness) {
            self.transfer(byte)?;
        }
        Ok(())
    }

    /// Send one LED packet from raw channel values. `brightness` above 31 is
    /// clamped.
    pub fn send_rgb(
        &mut self,
        red: u8,
        green: u8,
        blue: u8,
        brightness: u8,
    ) -> Result<(), Error<D::Error, C::Error>> {
        self.send_color(Pixel::new(red, green, blue), Brightness::new(brightness))
    }

    /// Pad the transmission for `count` LEDs and leave both lines low, even
    /// when `count` is 0 or 1 and no padding is sent.
    pub fn end_frame(&mut self, count: usize) -> Result<(), Error<D::Error, C::Error>> {
        for _ in 0..end_frame_len(count) {
            self.transfer(0)?;
        }
        self.initialize()
    }

    /// Send `pixels` to the strip with one global brightness.
    pub fn write(
        &mut self,
        pixels: &[Pixel],
        brightness: Brightness,
    ) -> Result<(), Error<D::Error, C::Error>> {
        self.write_iter(pixels.iter().copied(), brightness)
    }

    /// Like [`write`](Self::write) but for colours produced on the fly.
    pub fn write_iter<I>(
        &mut self,
        pixels: I,
        brightness: Brightness,
    ) -> Result<(), Error<D::Error, C::Error>>
    where
        I: IntoIterator<Item = Pixel>,
    {
        self.start_frame()?;
        let mut count = 0;
        for pixel in pixels {
            self.send_color(pixel, brightness)?;
            count += 1;
        }
        self.end_frame(count)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("apa102: wrote {} leds at brightness {}", count, brightness);

        Ok(())
    }

    /// Send a whole frame buffer.
    pub fn write_frame<const N: usize>(
        &mut self,
        frame: &Frame<N>,
    ) -> Result<(), Error<D::Error, C::Error>> {
        self.write(frame.pixels(), frame.brightness())
    }

    /// Clock out one byte, most significant bit first. Data is set while the
    /// clock is low and latched on the rising edge.
    fn transfer(&mut self, byte: u8) -> Result<(), Error<D::Error, C::Error>> {
        for shift in (0..8).rev() {
            if (byte >> shift) & 1 != 0 {
                self.data.set_high().map_err(Error::Data)?;
            } else {
                self.data.set_low().map_err(Error::Data)?;
            }
            self.clock.set_high().map_err(Error::Clock)?;
            self.clock.set_low().map_err(Error::Clock)?;
        }
        Ok(())
    }
}
