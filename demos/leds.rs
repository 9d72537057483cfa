//! The factory LED demo.
//!
//! One task owns the strip and reads commands from a queue. Turning the dial
//! moves the lit LED in `Independent` mode, a click on the dial selects the
//! next mode, and a long hold cycles the brightness.

#![no_std]
#![no_main]

use defmt::{
    info,
    warn,
};
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

static COMMANDS: LedCommands = LedCommands::new();

const HOLD: Duration = Duration::from_millis(600);

#[embassy_executor::task]
async fn led_task(leds: &'static mut Leds<'static>) {
    leds.run(&COMMANDS).await
}

fn send(command: LedCommand) {
    if COMMANDS.try_send(command).is_err() {
        warn!("LED queue full, dropped {}", command);
    }
}

#[embassy_executor::task]
async fn dial_task(dial: &'static mut Dial) {
    let mut mode = LedMode::Rotate;
    let mut brightness = Brightness::new(4);
    send(LedCommand::Set { mode, brightness });

    loop {
        match select(dial.knob.rotation(), dial.button.press()).await {
            Either::First(rotation) => {
                info!("Dial: {}", rotation);
                send(LedCommand::Step(rotation.into()));
            }
            Either::Second(()) => {
                let held = select(dial.button.release(), Timer::after(HOLD)).await;
                if let Either::Second(()) = held {
                    brightness = Brightness::new((brightness.level() + 4) % 32);
                    dial.button.release().await;
                } else {
                    mode = mode.next();
                }
                info!("Mode {} at brightness {}", mode, brightness);
                send(LedCommand::Set { mode, brightness });
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
    let leds = mk_static!(Leds<'static>, resources.leds.into());
    let dial = mk_static!(Dial, resources.dial.into());

    spawner.must_spawn(led_task(leds));
    spawner.must_spawn(dial_task(dial));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
