use crate::{
    BLACK,
    Brightness,
    Pixel,
    gamma,
};

/// Framebuffer for a strip of `N` LEDs sharing one brightness.
///
/// Colours are staged here and flushed with
/// [`Apa102::write_frame`](crate::Apa102::write_frame).
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<const N: usize> {
    pixels: [Pixel; N],
    brightness: Brightness,
}

impl<const N: usize> Frame<N> {
    /// All LEDs off.
    pub const fn new(brightness: Brightness) -> Self {
        Self {
            pixels: [BLACK; N],
            brightness,
        }
    }

    /// Set a single LED. Indices past the end are ignored.
    pub fn set(&mut self, index: usize, pixel: Pixel) {
        if let Some(slot) = self.pixels.get_mut(index) {
            *slot = pixel;
        }
    }

    pub fn get(&self, index: usize) -> Option<Pixel> {
        self.pixels.get(index).copied()
    }

    pub fn fill(&mut self, pixel: Pixel) {
        self.pixels.fill(pixel);
    }

    pub fn clear(&mut self) {
        self.fill(BLACK);
    }

    /// Copy colours from `iter` until either the strip or the iterator ends.
    pub fn fill_from_iter(&mut self, iter: impl IntoIterator<Item = Pixel>) {
        for (slot, pixel) in self.pixels.iter_mut().zip(iter) {
            *slot = pixel;
        }
    }

    pub const fn pixels(&self) -> &[Pixel; N] {
        &self.pixels
    }

    pub const fn pixels_mut(&mut self) -> &mut [Pixel; N] {
        &mut self.pixels
    }

    pub const fn brightness(&self) -> Brightness {
        self.brightness
    }

    pub const fn set_brightness(&mut self, brightness: Brightness) {
        self.brightness = brightness;
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Copy of this frame with every pixel passed through [`gamma::correct`].
    #[must_use]
    pub fn gamma_corrected(&self) -> Self {
        let mut corrected = self.clone();
        for pixel in &mut corrected.pixels {
            *pixel = gamma::correct(*pixel);
        }
        corrected
    }
}

impl<const N: usize> Default for Frame<N> {
    fn default() -> Self {
        Self::new(Brightness::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_dark() {
        let frame: Frame<7> = Frame::new(Brightness::new(3));
        assert!(frame.pixels().iter().all(|p| *p == BLACK));
        assert_eq!(frame.brightness().level(), 3);
        assert_eq!(frame.len(), 7);
    }

    #[test]
    fn out_of_range_set_is_ignored() {
        let mut frame: Frame<3> = Frame::default();
        frame.set(3, Pixel::new(1, 1, 1));
        frame.set(1, Pixel::new(9, 8, 7));
        assert_eq!(frame.get(1), Some(Pixel::new(9, 8, 7)));
        assert_eq!(frame.get(3), None);
        assert_eq!(frame.get(0), Some(BLACK));
    }

    #[test]
    fn fill_from_short_iter_keeps_tail() {
        let mut frame: Frame<4> = Frame::default();
        frame.fill(Pixel::new(5, 5, 5));
        frame.fill_from_iter([Pixel::new(1, 0, 0), Pixel::new(0, 1, 0)]);
        assert_eq!(
            frame.pixels(),
            &[
                Pixel::new(1, 0, 0),
                Pixel::new(0, 1, 0),
                Pixel::new(5, 5, 5),
                Pixel::new(5, 5, 5),
            ]
        );
        frame.clear();
        assert!(frame.pixels().iter().all(|p| *p == BLACK));
    }

    #[test]
    fn gamma_keeps_brightness() {
        let mut frame: Frame<2> = Frame::new(Brightness::new(9));
        frame.fill(Pixel::new(255, 255, 255));
        let corrected = frame.gamma_corrected();
        assert_eq!(corrected.brightness(), Brightness::new(9));
        assert_eq!(corrected.pixels(), frame.pixels());
    }
}
