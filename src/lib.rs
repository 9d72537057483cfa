//! # tembed
//!
//! Hardware support library for the LilyGO T-Embed (ESP32-S3).
//!
//! Provides abstractions for the onboard peripherals:
//! - **LEDs**: 7× APA102 RGB LEDs, bit-banged on two GPIOs (see the [`apa102`] crate)
//! - **Power rail**: the switched 3V3 supply feeding the LEDs and the LCD
//! - **Display**: 320×170 ST7789 LCD over SPI with DMA
//! - **Backlight**: Display backlight control
//! - **Dial**: rotary encoder with push button
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let peripherals = tembed::init();
//! let resources = tembed::split_resources!(peripherals);
//!
//! let _power: tembed::PowerRail = resources.power.into();
//! let leds: tembed::Leds = resources.leds.into();
//! let dial: tembed::Dial = resources.dial.into();
//! ```

#![no_std]

mod dial;
mod display;
mod leds;
mod power;

pub use apa102::{
    Brightness,
    Pixel,
    animation::{
        LedCommand,
        LedMode,
        Step,
    },
};
pub use dial::{
    Button,
    Dial,
    Knob,
    Rotation,
};
pub use display::Display;
use esp_hal::{
    assign_resources,
    clock::CpuClock,
};
pub use leds::{
    LED_COUNT,
    LED_FRAME_INTERVAL,
    LED_QUEUE_DEPTH,
    LEVEL_ORDER,
    LedCommands,
    LedError,
    Leds,
};
pub use power::{
    Backlight,
    PowerRail,
};

/// StaticCell helper — allocates a value into a `static` exactly once.
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

// ── Pin / peripheral assignments ────────────────────────────────────────────

assign_resources! {
    pub Resources<'d> {
        leds: LedResources<'d> {
            data: GPIO42,
            clock: GPIO45,
        },
        power: PowerResources<'d> {
            enable: GPIO46,
        },
        display: DisplayResources<'d> {
            dc: GPIO13,
            rst: GPIO9,
            sck: GPIO12,
            cs: GPIO10,
            mosi: GPIO11,
            spi: SPI2,
            dma: DMA_CH0,
        },
        backlight: BacklightResources<'d> {
            led: GPIO15,
        },
        dial: DialResources<'d> {
            a: GPIO2,
            b: GPIO1,
            button: GPIO0,
        },
    }
}

// ── Board initialisation ────────────────────────────────────────────────────

/// Initialise the ESP32-S3 at full CPU speed and return the raw peripheral set.
///
/// Call this once at the top of your `main`. Then use [`split_resources!`] to
/// break the peripherals into typed resource groups, and bring up the
/// [`PowerRail`] before touching the LEDs or the display.
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}

impl From<esp_hal::peripherals::Peripherals> for Resources<'_> {
    fn from(peripherals: esp_hal::peripherals::Peripherals) -> Self {
        split_resources!(peripherals)
    }
}
