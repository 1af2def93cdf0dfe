//! Operator display rendering
//!
//! Draws the clearance readout, the obstacle message and a three-aspect
//! signal head on the SSD1306 panel. Only regions whose underlying value
//! changed since the previous cycle are redrawn, and the buffer is flushed
//! at most once per cycle, keeping the panel flicker-free.
//!
//! # Reads
//! Distance and aspect come from their shared cells via independent bounded
//! reads; a contended read leaves that field showing its previous value.

use core::convert::Infallible;
use core::fmt::Write as _;

use crate::system::resources::{DisplayResources, Irqs};
use crate::system::state;
use defmt::warn;
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_time::{Duration, Timer};
use embedded_graphics::{
    mono_font::{
        ascii::{FONT_6X10, FONT_9X18_BOLD},
        MonoTextStyleBuilder,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use heapless::String;
use ssd1306::{mode::DisplayConfigAsync, prelude::*, I2CDisplayInterface, Ssd1306Async};
use trackguard_core::{obstacle_detected, DistanceSample, SignalState};

/// Redraw cycle period
const RENDER_INTERVAL: Duration = Duration::from_millis(200);

/// Distance below which the track counts as obstructed (cm)
const NEAR_THRESHOLD_CM: i32 = 20;

/// Clearance readout region and text origin
const DISTANCE_REGION: Rectangle = Rectangle::new(Point::new(0, 18), Size::new(96, 12));

/// Obstacle/clear message region and text origin
const MESSAGE_REGION: Rectangle = Rectangle::new(Point::new(0, 42), Size::new(100, 20));

/// Signal head column: three lamps, top to bottom Red/Yellow/Green
const HEAD_REGION: Rectangle = Rectangle::new(Point::new(104, 0), Size::new(24, 64));
const LAMP_X: i32 = 106;
const LAMP_DIAMETER: u32 = 14;
const LAMPS: [(SignalState, i32); 3] = [
    (SignalState::Red, 4),
    (SignalState::Yellow, 24),
    (SignalState::Green, 44),
];

/// Presentation rendering task
#[embassy_executor::task]
pub async fn display(r: DisplayResources) {
    let mut config = I2cConfig::default();
    config.frequency = 400_000;
    let i2c = I2c::new_async(r.i2c, r.scl_pin, r.sda_pin, Irqs, config);

    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    // A panel that cannot initialize leaves the operator blind; treat it
    // like any other failed resource initialization and halt.
    display.init().await.unwrap();

    // Static chrome, drawn once
    let title_style = MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build();
    Text::with_baseline("TRACKGUARD", Point::zero(), title_style, Baseline::Top)
        .draw(&mut display)
        .unwrap();
    display.flush().await.unwrap();

    let mut last_sample: Option<DistanceSample> = None;
    let mut last_aspect: Option<SignalState> = None;

    loop {
        Timer::after(RENDER_INTERVAL).await;
        let mut dirty = false;

        if let Some(sample) = state::read_distance().await {
            if last_sample != Some(sample) {
                draw_distance(&mut display, sample);
                let obstacle = obstacle_detected(sample, NEAR_THRESHOLD_CM);
                let was_obstacle =
                    last_sample.map(|s| obstacle_detected(s, NEAR_THRESHOLD_CM));
                if was_obstacle != Some(obstacle) {
                    draw_track_message(&mut display, obstacle);
                }
                last_sample = Some(sample);
                dirty = true;
            }
        }

        if let Some(aspect) = state::read_signal().await {
            if last_aspect != Some(aspect) {
                draw_signal_head(&mut display, aspect);
                last_aspect = Some(aspect);
                dirty = true;
            }
        }

        if dirty {
            if display.flush().await.is_err() {
                warn!("display flush failed, retrying next cycle");
            }
        }
    }
}

/// Repaints the clearance readout
fn draw_distance<D>(target: &mut D, sample: DistanceSample)
where
    D: DrawTarget<Color = BinaryColor, Error = Infallible>,
{
    clear(target, DISTANCE_REGION);

    let mut line: String<16> = String::new();
    match sample {
        Some(cm) => {
            let _ = write!(line, "Dist {:>4} cm", cm);
        }
        None => {
            let _ = write!(line, "Dist ---- cm");
        }
    }

    let style = MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build();
    Text::with_baseline(&line, DISTANCE_REGION.top_left, style, Baseline::Top)
        .draw(target)
        .unwrap();
}

/// Repaints the obstacle/clear message
fn draw_track_message<D>(target: &mut D, obstacle: bool)
where
    D: DrawTarget<Color = BinaryColor, Error = Infallible>,
{
    clear(target, MESSAGE_REGION);

    let message = if obstacle { "OBSTACLE" } else { "TRACK CLEAR" };
    let style = MonoTextStyleBuilder::new()
        .font(&FONT_9X18_BOLD)
        .text_color(BinaryColor::On)
        .build();
    Text::with_baseline(message, MESSAGE_REGION.top_left, style, Baseline::Top)
        .draw(target)
        .unwrap();
}

/// Repaints the signal head with the active aspect filled
fn draw_signal_head<D>(target: &mut D, aspect: SignalState)
where
    D: DrawTarget<Color = BinaryColor, Error = Infallible>,
{
    clear(target, HEAD_REGION);

    for (state, y) in LAMPS {
        let style = if state == aspect {
            PrimitiveStyle::with_fill(BinaryColor::On)
        } else {
            PrimitiveStyle::with_stroke(BinaryColor::On, 1)
        };
        Circle::new(Point::new(LAMP_X, y), LAMP_DIAMETER)
            .into_styled(style)
            .draw(target)
            .unwrap();
    }
}

/// Blanks a region before repainting it
fn clear<D>(target: &mut D, region: Rectangle)
where
    D: DrawTarget<Color = BinaryColor, Error = Infallible>,
{
    region
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
        .draw(target)
        .unwrap();
}
