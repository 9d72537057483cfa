//! APA102 LED strip, bit-banged on two GPIOs.
//!
//! The T-Embed has 7 LEDs in a ring around the dial. Data is on GPIO42 and
//! clock on GPIO45. The strip is powered from the switched rail, so a
//! [`PowerRail`](crate::PowerRail) must be enabled first.

use core::convert::Infallible;

use apa102::{
    Apa102,
    Brightness,
    Frame,
    Pixel,
    animation::{
        Animator,
        LedCommand,
    },
};
use defmt::{
    error,
    info,
};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::Channel,
};
use embassy_time::{
    Duration,
    Instant,
    Ticker,
};
use esp_hal::gpio::{
    Level,
    Output,
    OutputConfig,
};

use crate::LedResources;

/// Number of APA102 LEDs on the board.
pub const LED_COUNT: usize = 7;

/// Depth of the [`LedCommands`] queue.
pub const LED_QUEUE_DEPTH: usize = 5;

/// How often [`Leds::run`] renders and flushes a frame.
pub const LED_FRAME_INTERVAL: Duration = Duration::from_millis(10);

/// Ring positions from the bottom of the level meter to the top.
pub const LEVEL_ORDER: [usize; LED_COUNT] = [2, 1, 0, 6, 5, 4, 3];

/// Pin error of the strip. Never constructed on the ESP32-S3, whose GPIO
/// writes cannot fail.
pub type LedError = apa102::Error<Infallible, Infallible>;

/// Queue feeding the LED task. Producers use `try_send`; a full queue drops
/// the command.
pub type LedCommands = Channel<CriticalSectionRawMutex, LedCommand, LED_QUEUE_DEPTH>;

/// The LED strip with its framebuffer.
///
/// Either draw directly with [`set`](Leds::set) / [`fill`](Leds::fill) and
/// [`update`](Leds::update), or hand the strip to [`run`](Leds::run) and drive
/// it through [`LedCommand`]s.
pub struct Leds<'a> {
    strip: Apa102<Output<'a>, Output<'a>>,
    frame: Frame<LED_COUNT>,
}

impl<'a> From<LedResources<'a>> for Leds<'a> {
    fn from(res: LedResources<'a>) -> Self {
        let data = Output::new(res.data, Level::Low, OutputConfig::default());
        let clock = Output::new(res.clock, Level::Low, OutputConfig::default());
        Self::new(data, clock)
    }
}

impl<'a> Leds<'a> {
    pub const fn new(data: Output<'a>, clock: Output<'a>) -> Self {
        Self {
            strip: Apa102::new(data, clock),
            frame: Frame::new(Brightness::new(1)),
        }
    }

    /// Flush the framebuffer to the physical LEDs.
    pub fn update(&mut self) {
        if self.strip.write_frame(&self.frame).is_err() {
            error!("APA102 write failed");
        }
    }

    /// Flush the framebuffer through sRGB gamma correction, for colours
    /// picked by eye. The framebuffer itself is left untouched.
    pub fn update_corrected(&mut self) {
        if self.strip.write_frame(&self.frame.gamma_corrected()).is_err() {
            error!("APA102 write failed");
        }
    }

    /// Set a single LED by index. Indices past the end are ignored.
    pub fn set(&mut self, index: usize, color: Pixel) {
        self.frame.set(index, color);
    }

    /// Fill all LEDs with one colour.
    pub fn fill(&mut self, color: Pixel) {
        self.frame.fill(color);
    }

    /// Turn all LEDs off.
    pub fn clear(&mut self) {
        self.frame.clear();
    }

    /// Fill LEDs from an iterator.
    pub fn fill_from_iter(&mut self, iter: impl IntoIterator<Item = Pixel>) {
        self.frame.fill_from_iter(iter);
    }

    pub fn set_brightness(&mut self, brightness: Brightness) {
        self.frame.set_brightness(brightness);
    }

    pub const fn brightness(&self) -> Brightness {
        self.frame.brightness()
    }

    /// Direct access to the encoder for the streaming interface
    /// (`start_frame` / `send_color` / `end_frame`).
    pub fn strip(&mut self) -> &mut Apa102<Output<'a>, Output<'a>> {
        &mut self.strip
    }

    /// Number of LEDs on the strip.
    pub const fn len(&self) -> usize {
        LED_COUNT
    }

    /// Body of the LED task. Owns the strip for good: every
    /// [`LED_FRAME_INTERVAL`] it drains `commands`, renders the current mode
    /// and flushes it.
    pub async fn run(&mut self, commands: &LedCommands) -> ! {
        let mut animator = Animator::new(LEVEL_ORDER);
        let mut ticker = Ticker::every(LED_FRAME_INTERVAL);
        info!("LED task started");

        loop {
            while let Ok(command) = commands.try_receive() {
                info!("LED command: {}", command);
                animator.apply(command);
            }

            if animator.render(Instant::now().as_millis(), &mut self.frame) {
                self.update();
            }
            ticker.next().await;
        }
    }
}
