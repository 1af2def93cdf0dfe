//! Locomotive signal controller firmware entry point
//!
//! Initializes hardware resources and spawns the controller activities.

#![no_std]
#![no_main]

use crate::task::{
    command_receive::command_receive, display::display, distance_measure::distance_measure,
    signal_manage::signal_manage,
};
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use system::resources::{
    AssignedResources, DisplayResources, DistanceSensorResources, RadioLinkResources,
    SignalLampResources,
};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// System core modules
mod system;
/// Task implementations
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Split the peripherals into per-task groups. Nothing is shared after
    // this point; the shared cells in system::state are the only common state.
    let r = split_resources!(p);

    // The signal manager goes first so the lamp head is showing Red before
    // the link or the sensor produce anything.
    spawner.spawn(signal_manage(r.signal_lamps)).unwrap();
    spawner.spawn(command_receive(r.radio_link)).unwrap();
    spawner.spawn(distance_measure(r.distance_sensor)).unwrap();
    spawner.spawn(display(r.display)).unwrap();
}
