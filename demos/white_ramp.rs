//! Exponential white ramp across the LED ring.
//!
//! Defines "power" as the 8-bit channel value times the 5-bit brightness
//! register and grows it geometrically from the dimmest possible white on the
//! first LED to full power on the last. Each LED gets its own brightness, so
//! this streams packets through the low-level interface instead of a frame.

#![no_std]
#![no_main]

use defmt::{
    error,
    info,
};
use embassy_executor::Spawner;
use embassy_time::{
    Duration,
    Timer,
};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;
use palette::num::Powf;
#[allow(clippy::wildcard_imports)]
use tembed::*;

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

const MIN_POWER: f32 = 1.0;

fn send_ramp(leds: &mut Leds<'_>) -> Result<(), LedError> {
    let max_power = f32::from(Brightness::MAX_POWER);
    let multiplier = (max_power / MIN_POWER).powf(1.0 / (LED_COUNT - 1) as f32);

    let strip = leds.strip();
    strip.start_frame()?;
    let mut power = MIN_POWER;
    for _ in 0..LED_COUNT {
        let (brightness, level) = Brightness::split_power(power as u16);
        info!("power {} -> level {} brightness {}", power as u16, level, brightness);
        strip.send_color(Pixel::new(level, level, level), brightness)?;
        power *= multiplier;
    }
    strip.end_frame(LED_COUNT)
}

#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    let peripherals = tembed::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 64 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let _power: PowerRail = resources.power.into();
    let mut leds: Leds = resources.leds.into();

    if send_ramp(&mut leds).is_err() {
        error!("LED write failed");
    }

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
