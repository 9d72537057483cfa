//! Draws a banner on the LCD and mirrors its accent colour on the LED ring.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_time::{
    Duration,
    Timer,
};
use embedded_graphics::{
    mono_font::{
        MonoTextStyle,
        iso_8859_1::FONT_10X20,
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{
        PrimitiveStyle,
        Rectangle,
    },
    text::Text,
};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;
use tembed::{
    Backlight,
    Brightness,
    Display,
    Leds,
    PowerRail,
    split_resources,
};

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

const WIDTH: u32 = 320;
const HEIGHT: u32 = 170;

#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    let peripherals = tembed::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 64 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let _power: PowerRail = resources.power.into();
    let mut backlight: Backlight = resources.backlight.into();
    let mut display: Display<'static> = resources.display.into();
    let mut leds: Leds = resources.leds.into();

    Rectangle::new(Point::zero(), Size::new(WIDTH, HEIGHT))
        .into_styled(PrimitiveStyle::with_fill(Rgb565::BLACK))
        .draw(&mut display)
        .unwrap();
    Rectangle::new(Point::new(0, 120), Size::new(WIDTH, 8))
        .into_styled(PrimitiveStyle::with_fill(Rgb565::CSS_ORANGE))
        .draw(&mut display)
        .unwrap();

    let style = MonoTextStyle::new(&FONT_10X20, Rgb565::WHITE);
    Text::new("T-Embed", Point::new(20, 50), style)
        .draw(&mut display)
        .unwrap();
    Text::new("APA102 x7 on GPIO42/45", Point::new(20, 90), style)
        .draw(&mut display)
        .unwrap();

    leds.set_brightness(Brightness::new(3));
    leds.fill(tembed::Pixel::new(255, 128, 0));
    leds.update_corrected();

    info!("Display demo drawn, blinking backlight");

    loop {
        Timer::after(Duration::from_secs(3)).await;
        backlight.set(false);
        Timer::after(Duration::from_millis(200)).await;
        backlight.set(true);
    }
}
