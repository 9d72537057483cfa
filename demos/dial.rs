//! Logs dial rotations and clicks, and walks one LED around the ring.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_futures::select::{
    Either,
    select,
};
use embassy_time::{
    Duration,
    Timer,
};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;
#[allow(clippy::wildcard_imports)]
use tembed::*;

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

const CURSOR: Pixel = Pixel::new(0, 40, 60);

#[embassy_executor::task]
async fn dial_task(dial: &'static mut Dial, leds: &'static mut Leds<'static>) {
    info!("Dial task started — turn or press the dial");

    let mut position: usize = 0;
    let mut clicks: u32 = 0;
    leds.set_brightness(Brightness::new(2));

    loop {
        leds.clear();
        leds.set(position, CURSOR);
        leds.update();

        match select(dial.knob.rotation(), dial.button.click()).await {
            Either::First(Rotation::Clockwise) => {
                position = (position + 1) % LED_COUNT;
                info!("Clockwise → LED {}", position);
            }
            Either::First(Rotation::CounterClockwise) => {
                position = (position + LED_COUNT - 1) % LED_COUNT;
                info!("Counter-clockwise → LED {}", position);
            }
            Either::Second(()) => {
                clicks += 1;
                info!("Click #{}", clicks);
            }
        }
    }
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = tembed::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 64 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let _power = mk_static!(PowerRail, resources.power.into());
    let dial = mk_static!(Dial, resources.dial.into());
    let leds = mk_static!(Leds<'static>, resources.leds.into());
    spawner.must_spawn(dial_task(dial, leds));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
