//! Rotary dial: quadrature encoder plus push button.

use embassy_time::{
    Duration,
    Timer,
};
use esp_hal::gpio::{
    Input,
    InputConfig,
    Pull,
};

use crate::{
    DialResources,
    Step,
};

const DEBOUNCE_MS: u64 = 20;

/// Time the knob's A line gets to settle after an edge.
const KNOB_SETTLE: Duration = Duration::from_millis(1);

/// One detent of the encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl From<Rotation> for Step {
    fn from(rotation: Rotation) -> Self {
        match rotation {
            Rotation::Clockwise => Step::Forward,
            Rotation::CounterClockwise => Step::Backward,
        }
    }
}

/// The dial under the LED ring. All inputs are active low.
///
/// The knob and the button are separate fields so both can be awaited at
/// once, e.g. with `embassy_futures::select`.
pub struct Dial {
    pub knob: Knob,
    pub button: Button,
}

/// Quadrature encoder half of the [`Dial`].
pub struct Knob {
    a: Input<'static>,
    b: Input<'static>,
}

/// Push button half of the [`Dial`].
pub struct Button {
    pin: Input<'static>,
}

impl From<DialResources<'static>> for Dial {
    fn from(res: DialResources<'static>) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        Self {
            knob: Knob {
                a: Input::new(res.a, pull_up),
                b: Input::new(res.b, pull_up),
            },
            button: Button {
                pin: Input::new(res.button, pull_up),
            },
        }
    }
}

impl Knob {
    /// Wait for the next detent.
    ///
    /// Decodes on channel A edges: B lagging A means clockwise. An edge is
    /// dropped if A is back at its previous level after [`KNOB_SETTLE`].
    pub async fn rotation(&mut self) -> Rotation {
        loop {
            let before = self.a.is_high();
            self.a.wait_for_any_edge().await;
            Timer::after(KNOB_SETTLE).await;

            let a = self.a.is_high();
            if a == before {
                continue;
            }
            return if a == self.b.is_high() {
                Rotation::CounterClockwise
            } else {
                Rotation::Clockwise
            };
        }
    }
}

impl Button {
    pub fn is_pressed(&self) -> bool {
        self.pin.is_low()
    }

    /// Wait for a debounced button press (falling edge, active low).
    pub async fn press(&mut self) {
        loop {
            self.pin.wait_for_falling_edge().await;
            Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
            if self.pin.is_low() {
                return;
            }
        }
    }

    /// Wait for a debounced button release (rising edge).
    pub async fn release(&mut self) {
        loop {
            self.pin.wait_for_rising_edge().await;
            Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
            if self.pin.is_high() {
                return;
            }
        }
    }

    /// Wait for a full press-and-release cycle.
    pub async fn click(&mut self) {
        self.press().await;
        self.release().await;
    }
}
