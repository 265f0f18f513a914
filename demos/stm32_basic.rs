//! Basic example for STM32 with Embassy
//!
//! This example demonstrates how to use the LS7366R counter with
//! Embassy on an STM32 microcontroller.
//!
//! Hardware setup:
//! - LS7366R connected via SPI1
//! - SPI pins: SCK=PA5, MOSI=PA7, MISO=PA6, CS=PA4
//! - SPI Mode 0 (CPOL=0, CPHA=0)
//! - 1 MHz clock frequency

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::{
    gpio::{Level, Output, Speed},
    spi,
    time::Hertz,
};
use embassy_time::Timer;
use ls7366r::{CountMode, Ls7366r, Mdr0, Mdr1};
use {defmt_rtt as _, panic_probe as _};

// Embassy shared bus support
use embassy_embedded_hal::shared_bus::blocking::spi::SpiDevice;
use embassy_sync::blocking_mutex::NoopMutex;
use static_cell::StaticCell;

// Static storage for shared SPI bus
static SPI_BUS: StaticCell<NoopMutex<core::cell::RefCell<spi::Spi<'static, spi::SPI1>>>> =
    StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_stm32::init(Default::default());

    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(1_000_000);

    let spi = spi::Spi::new_blocking(p.SPI1, p.PA5, p.PA7, p.PA6, spi_config);

    let spi_bus = NoopMutex::new(core::cell::RefCell::new(spi));
    let spi_bus = SPI_BUS.init(spi_bus);

    let cs = Output::new(p.PA4, Level::High, Speed::VeryHigh);
    let spi_device = SpiDevice::new(spi_bus, cs);

    let mut counter = Ls7366r::new(spi_device);

    // X4 quadrature, free-running, four-byte counts
    counter
        .write_mdr0(Mdr0 {
            count_mode: CountMode::X4,
            ..Mdr0::default()
        })
        .unwrap();
    counter.write_mdr1(Mdr1::default()).unwrap();
    counter.clear_counter().unwrap();

    info!("LS7366R driver initialized");

    loop {
        match counter.read_counter() {
            Ok(count) => {
                info!("Count: {}", count);
            }
            Err(e) => {
                error!("Counter error: {:?}", e);

                if let Ok(status) = counter.read_status() {
                    if status.overflowed() {
                        warn!("Count wrapped since last status clear");
                    }
                    if status.power_loss() {
                        warn!("Chip lost power, reconfigure the mode registers");
                    }
                }
            }
        }

        Timer::after_millis(100).await;
    }
}
