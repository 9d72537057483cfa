//! Bit-level checks of the APA102 stream using recording mock pins.

use std::{
    cell::RefCell,
    convert::Infallible,
    rc::Rc,
};

use apa102::{
    Apa102,
    Brightness,
    Frame,
    Pixel,
    end_frame_len,
};
use embedded_hal::digital::{
    ErrorType,
    OutputPin,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Line {
    Data,
    Clock,
}

type Trace = Rc<RefCell<Vec<(Line, bool)>>>;

/// Output pin that appends every level it is driven to into a shared trace.
struct RecordingPin {
    line: Line,
    trace: Trace,
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.trace.borrow_mut().push((self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.trace.borrow_mut().push((self.line, true));
        Ok(())
    }
}

fn strip() -> (Apa102<RecordingPin, RecordingPin>, Trace) {
    let trace: Trace = Rc::default();
    let data = RecordingPin {
        line: Line::Data,
        trace: trace.clone(),
    };
    let clock = RecordingPin {
        line: Line::Clock,
        trace: trace.clone(),
    };
    (Apa102::new(data, clock), trace)
}

/// Logic-analyser view of a trace: every byte latched on rising clock edges,
/// plus the final level of both lines.
struct Capture {
    bytes: Vec<u8>,
    data_idle: bool,
    clock_idle: bool,
}

fn decode(trace: &Trace) -> Capture {
    let mut data = false;
    let mut clock = false;
    let mut bits = Vec::new();

    for &(line, level) in trace.borrow().iter() {
        match line {
            Line::Data => {
                assert!(!clock, "data changed while clock was high");
                data = level;
            }
            Line::Clock => {
                if level && !clock {
                    bits.push(data);
                }
                clock = level;
            }
        }
    }

    assert_eq!(bits.len() % 8, 0, "partial byte on the wire");
    let bytes = bits
        .chunks(8)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | u8::from(bit)))
        .collect();

    Capture {
        bytes,
        data_idle: !data,
        clock_idle: !clock,
    }
}

fn rainbow(count: usize) -> Vec<Pixel> {
    (0..count)
        .map(|i| Pixel::new(i as u8, (i * 3) as u8, 255 - i as u8))
        .collect()
}

#[test]
fn start_frame_is_32_zero_bits() {
    let (mut strip, trace) = strip();
    strip.start_frame().unwrap();

    let capture = decode(&trace);
    assert_eq!(capture.bytes, [0, 0, 0, 0]);
}

#[test]
fn initialize_drives_both_lines_low() {
    let (mut strip, trace) = strip();
    strip.initialize().unwrap();

    assert_eq!(*trace.borrow(), [(Line::Data, false), (Line::Clock, false)]);
}

#[test]
fn send_color_is_control_blue_green_red() {
    for level in 0..=31u8 {
        let (mut strip, trace) = strip();
        strip.send_rgb(0xA1, 0xB2, 0xC3, level).unwrap();

        let capture = decode(&trace);
        assert_eq!(capture.bytes, [0xE0 | level, 0xC3, 0xB2, 0xA1]);
    }
}

#[test]
fn send_color_clamps_brightness() {
    let (mut strip, trace) = strip();
    strip.send_rgb(1, 2, 3, 0x3F).unwrap();

    assert_eq!(decode(&trace).bytes, [0xFF, 3, 2, 1]);
}

#[test]
fn bits_go_out_msb_first() {
    let (mut strip, trace) = strip();
    strip.send_rgb(0, 0, 0b1000_0001, 0).unwrap();

    let rising_edges = trace
        .borrow()
        .iter()
        .filter(|&&(line, level)| line == Line::Clock && level)
        .count();
    assert_eq!(rising_edges, 32);
    assert_eq!(decode(&trace).bytes[1], 0b1000_0001);
}

#[test]
fn end_frame_padding_follows_count() {
    for (count, padding) in [(0, 0), (1, 0), (2, 1), (16, 1), (17, 1), (18, 2), (66, 5)] {
        let (mut strip, trace) = strip();
        strip.end_frame(count).unwrap();

        let capture = decode(&trace);
        assert_eq!(capture.bytes.len(), padding, "count {count}");
        assert!(capture.bytes.iter().all(|&b| b == 0));
        assert!(capture.data_idle && capture.clock_idle);
    }
}

#[test]
fn sixty_six_leds_do_not_use_the_datasheet_end_frame() {
    let (mut strip, trace) = strip();
    strip.write(&rainbow(66), Brightness::MAX).unwrap();

    let capture = decode(&trace);
    let tail = &capture.bytes[4 + 4 * 66..];
    assert_eq!(tail, [0, 0, 0, 0, 0]);
    assert_ne!(tail, [0xFF, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn write_length_is_start_pixels_and_padding() {
    for count in [0, 1, 2, 7, 16, 17, 33, 66, 100] {
        let (mut strip, trace) = strip();
        strip.write(&rainbow(count), Brightness::new(7)).unwrap();

        let capture = decode(&trace);
        assert_eq!(
            capture.bytes.len(),
            4 + 4 * count + end_frame_len(count),
            "count {count}"
        );
        assert!(capture.data_idle, "data line left high, count {count}");
        assert!(capture.clock_idle, "clock line left high, count {count}");
    }
}

#[test]
fn empty_write_is_only_the_start_frame() {
    let (mut strip, trace) = strip();
    strip.write(&[], Brightness::MAX).unwrap();

    assert_eq!(decode(&trace).bytes, [0, 0, 0, 0]);
}

#[test]
fn writes_are_repeatable() {
    let pixels = rainbow(20);
    let (mut strip, trace) = strip();

    strip.write(&pixels, Brightness::new(12)).unwrap();
    let first = trace.take();
    strip.write(&pixels, Brightness::new(12)).unwrap();
    let second = trace.take();

    assert_eq!(first, second);
}

#[test]
fn packets_decode_back_to_pixels() {
    let pixels = rainbow(9);
    let (mut strip, trace) = strip();
    strip.write(&pixels, Brightness::new(21)).unwrap();

    let capture = decode(&trace);
    let decoded: Vec<(u8, u8, u8, u8)> = capture.bytes[4..4 + 4 * pixels.len()]
        .chunks(4)
        .map(|packet| {
            assert_eq!(packet[0] & 0xE0, 0xE0);
            (packet[3], packet[2], packet[1], packet[0] & 0x1F)
        })
        .collect();
    let expected: Vec<(u8, u8, u8, u8)> = pixels
        .iter()
        .map(|p| (p.red, p.green, p.blue, 21))
        .collect();
    assert_eq!(decoded, expected);
}

#[test]
fn write_iter_counts_streamed_pixels() {
    let (mut strip, trace) = strip();
    strip
        .write_iter((0..18).map(|i| Pixel::new(i, i, i)), Brightness::new(1))
        .unwrap();

    let capture = decode(&trace);
    assert_eq!(capture.bytes.len(), 4 + 4 * 18 + 2);
}

#[test]
fn write_frame_uses_frame_brightness() {
    let mut frame: Frame<3> = Frame::new(Brightness::new(4));
    frame.set(2, Pixel::new(10, 20, 30));
    let (mut strip, trace) = strip();
    strip.write_frame(&frame).unwrap();

    let capture = decode(&trace);
    assert_eq!(
        capture.bytes,
        [
            0, 0, 0, 0, //
            0xE4, 0, 0, 0, //
            0xE4, 0, 0, 0, //
            0xE4, 30, 20, 10, //
            0,
        ]
    );
}

#[test]
fn gamma_corrected_frame_darkens_mid_tones_on_the_wire() {
    let mut frame: Frame<1> = Frame::new(Brightness::new(3));
    frame.fill(Pixel::new(255, 128, 0));
    let (mut strip, trace) = strip();
    strip.write_frame(&frame.gamma_corrected()).unwrap();

    let capture = decode(&trace);
    assert_eq!(capture.bytes.len(), 4 + 4 + 1);
    assert_eq!(capture.bytes[4..6], [0xE3, 0]);
    assert!((50..60).contains(&capture.bytes[6]), "green {}", capture.bytes[6]);
    assert_eq!(capture.bytes[7], 255);
}

#[test]
fn low_level_interface_matches_write() {
    let pixels = rainbow(5);

    let (mut strip, streamed) = strip();
    strip.start_frame().unwrap();
    for pixel in &pixels {
        strip.send_color(*pixel, Brightness::new(3)).unwrap();
    }
    strip.end_frame(pixels.len()).unwrap();

    let (mut strip, written) = self::strip();
    strip.write(&pixels, Brightness::new(3)).unwrap();

    assert_eq!(decode(&streamed).bytes, decode(&written).bytes);
}

#[test]
fn release_returns_pins() {
    let (strip, trace) = strip();
    let (mut data, mut clock) = strip.release();
    data.set_high().unwrap();
    clock.set_high().unwrap();

    assert_eq!(*trace.borrow(), [(Line::Data, true), (Line::Clock, true)]);
}
