//! Distance sensor handling
//!
//! Measures track-ahead clearance using the HC-SR04 ultrasonic sensor and
//! publishes it for the operator display.
//!
//! # Sensor Operation
//! - Uses async HC-SR04 driver for non-blocking measurements
//! - Measurements taken every 100ms
//! - Distance published in whole centimeters
//! - Assumes fixed ambient temperature of 21.5°C
//!
//! # Signal Processing
//! - Uses a moving median filter to reduce noise
//! - Window size of 3 measurements keeps single-echo glitches off the display
//!
//! # Error Handling
//! - A failed measurement publishes the no-reading sentinel rather than a
//!   stale or invented distance; no sensor fault is fatal

use crate::system::resources::DistanceSensorResources;
use crate::system::state;
use defmt::debug;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Duration, Timer};
use hcsr04_async::{Config, DistanceUnit, Hcsr04, TemperatureUnit};
use moving_median::MovingMedian;

/// Time between measurements (100ms balances responsiveness and stability)
const MEASUREMENT_INTERVAL: Duration = Duration::from_millis(100);

/// Size of median filter window (3 samples balances noise reduction vs. latency)
const MEDIAN_WINDOW_SIZE: usize = 3;

/// Fixed ambient temperature for distance calculations
/// Slight inaccuracy acceptable as we care more about consistent readings
const TEMPERATURE: f64 = 21.5;

/// Distance sampling task feeding the operator display
///
/// Publishing uses the bounded cell wait; a contended cycle keeps the
/// previous sample instead of stalling the sensor loop.
#[embassy_executor::task]
pub async fn distance_measure(r: DistanceSensorResources) {
    // Configure sensor for centimeter measurements
    let config = Config {
        distance_unit: DistanceUnit::Centimeters,
        temperature_unit: TemperatureUnit::Celsius,
    };

    // Initialize sensor with trigger and echo pins
    let trigger = Output::new(r.trigger_pin, Level::Low);
    let echo = Input::new(r.echo_pin, Pull::None);
    let mut sensor = Hcsr04::new(trigger, echo, config);

    // Initialize median filter for noise reduction
    let mut median_filter = MovingMedian::<f64, MEDIAN_WINDOW_SIZE>::new();

    loop {
        let sample = match sensor.measure(TEMPERATURE).await {
            Ok(distance_cm) => {
                median_filter.add_value(distance_cm);
                Some(median_filter.median() as i32)
            }
            // Sensor fault: publish the sentinel, not a guess
            Err(_) => None,
        };

        if !state::publish_distance(sample).await {
            debug!("distance cell contended, keeping previous sample");
        }

        // Wait before next measurement
        Timer::after(MEASUREMENT_INTERVAL).await;
    }
}
