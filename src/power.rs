//! Switched peripheral supply and display backlight.

use esp_hal::gpio::{
    Level,
    Output,
    OutputConfig,
};

use crate::{
    BacklightResources,
    PowerResources,
};

/// Enable line of the 3V3 rail that powers the LED strip and the LCD.
///
/// The rail is switched on when this is created. Keep it alive for as long
/// as those peripherals are in use; dropping it releases the pin.
pub struct PowerRail {
    enable: Output<'static>,
}

impl From<PowerResources<'static>> for PowerRail {
    fn from(res: PowerResources<'static>) -> Self {
        defmt::info!("Peripheral power rail on");
        Self {
            enable: Output::new(res.enable, Level::High, OutputConfig::default()),
        }
    }
}

impl PowerRail {
    pub fn enable(&mut self) {
        self.enable.set_high();
    }

    /// Cut power to the LEDs and the LCD. Both need re-initialising after
    /// [`enable`](Self::enable).
    pub fn disable(&mut self) {
        self.enable.set_low();
    }

    pub fn is_enabled(&self) -> bool {
        self.enable.is_set_high()
    }
}

/// LCD backlight, on at start-up.
pub struct Backlight {
    pin: Output<'static>,
}

impl From<BacklightResources<'static>> for Backlight {
    fn from(res: BacklightResources<'static>) -> Self {
        Self {
            pin: Output::new(res.led, Level::High, OutputConfig::default()),
        }
    }
}

impl Backlight {
    pub fn set(&mut self, on: bool) {
        self.pin.set_level(Level::from(on));
    }

    pub fn toggle(&mut self) {
        self.pin.toggle();
    }

    pub fn is_on(&self) -> bool {
        self.pin.is_set_high()
    }
}
