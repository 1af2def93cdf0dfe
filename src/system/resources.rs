//! Hardware Resource Management
//!
//! Assigns pins and peripherals to the controller activities. Each activity
//! owns its group exclusively after `split_resources!`; the shared cells in
//! `system::state` are the only state crossing task boundaries.
//!
//! # Resource Groups
//! - Distance Sensor: HC-SR04 ultrasonic sensor pins
//! - Radio Link: UART-attached radio modem (transparent serial)
//! - Signal Lamps: the three discrete lamp driver outputs
//! - Display: SSD1306 operator panel on I2C

use assign_resources::assign_resources;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::InterruptHandler as I2cInterruptHandler;
use embassy_rp::peripherals::{self, I2C0, UART0};
use embassy_rp::uart::InterruptHandler as UartInterruptHandler;

assign_resources! {
    /// HC-SR04 ultrasonic proximity sensor pins
    distance_sensor: DistanceSensorResources {
        trigger_pin: PIN_15,
        echo_pin: PIN_14,
    },
    /// Radio modem on UART0, DMA on both directions
    radio_link: RadioLinkResources {
        uart: UART0,
        tx_pin: PIN_0,
        rx_pin: PIN_1,
        tx_dma: DMA_CH0,
        rx_dma: DMA_CH1,
    },
    /// Signal head lamp driver outputs
    signal_lamps: SignalLampResources {
        red_pin: PIN_2,
        yellow_pin: PIN_3,
        green_pin: PIN_4,
    },
    /// SSD1306 operator display on I2C0
    display: DisplayResources {
        i2c: I2C0,
        sda_pin: PIN_12,
        scl_pin: PIN_13,
    },
}

bind_interrupts!(pub struct Irqs {
    UART0_IRQ => UartInterruptHandler<UART0>;
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});
