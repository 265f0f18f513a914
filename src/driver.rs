//! Blocking driver for the LS7366R quadrature counter

use embedded_hal::spi::{Operation, SpiDevice};

use crate::{
    error::Error,
    register::{DataWidth, Mdr0, Mdr1, Status},
    utils,
};

const CLR_MDR0: u8 = 0x08;
const CLR_MDR1: u8 = 0x10;
const CLR_CNTR: u8 = 0x20;
const CLR_STR: u8 = 0x30;
const READ_MDR0: u8 = 0x48;
const READ_MDR1: u8 = 0x50;
const READ_CNTR: u8 = 0x60;
const READ_OTR: u8 = 0x68;
const READ_STR: u8 = 0x70;
const WRITE_MDR0: u8 = 0x88;
const WRITE_MDR1: u8 = 0x90;
const WRITE_DTR: u8 = 0x98;
const LOAD_CNTR: u8 = 0xE0;
const LOAD_OTR: u8 = 0xE4;

/// LS7366R driver instance (blocking)
///
/// One instance per physical chip; the `SpiDevice` owns the chip-select
/// line and frames every operation as a single bus transaction. The driver
/// tracks the data width configured through [`Self::write_mdr1`] so that
/// counter reads clock out the right number of bytes.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ls7366r<SPI> {
    spi: SPI,
    width: DataWidth,
}

impl<SPI, E> Ls7366r<SPI>
where
    SPI: SpiDevice<u8, Error = E>,
{
    /// Create a new LS7366R driver instance
    ///
    /// Assumes the chip is at its power-on data width (four bytes). If the
    /// chip may hold an earlier configuration, write MDR1 before the first
    /// counter read.
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            width: DataWidth::FourByte,
        }
    }

    /// Release the SPI bus, consuming the driver
    pub fn release(self) -> SPI {
        self.spi
    }

    /// Issue a payload-less op-code (clear/load family)
    fn command(&mut self, op_code: u8) -> Result<(), Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("Issuing command 0x{:02X}", op_code);

        self.spi.write(&[op_code]).map_err(Error::Communication)
    }

    /// Issue a read op-code and clock out one register byte
    fn read_byte(&mut self, op_code: u8) -> Result<u8, Error<E>> {
        let mut data = [0u8; 1];
        self.spi
            .transaction(&mut [Operation::Write(&[op_code]), Operation::Read(&mut data)])
            .map_err(Error::Communication)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Register 0x{:02X} value: 0x{:02X}", op_code, data[0]);

        Ok(data[0])
    }

    /// Issue a read op-code and clock out a CNTR/OTR value
    ///
    /// The chip transfers the most significant byte first and only the
    /// configured number of significant bytes, so each byte is shifted
    /// into the low end of the accumulator and the result sign-extended
    /// from the configured width.
    fn read_count(&mut self, op_code: u8) -> Result<i32, Error<E>> {
        let mut data = [0u8; 4];
        let payload = &mut data[..self.width.bytes()];
        self.spi
            .transaction(&mut [Operation::Write(&[op_code]), Operation::Read(payload)])
            .map_err(Error::Communication)?;

        let raw = payload
            .iter()
            .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte));

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "Count register 0x{:02X} raw: 0x{:08X} ({} bytes)",
            op_code,
            raw,
            self.width.bytes()
        );

        Ok(utils::sign_extend(raw, self.width))
    }

    /// Reset MDR0 to its default (0x00: non-quadrature, free-running,
    /// index disabled, asynchronous, filter division 1)
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn clear_mdr0(&mut self) -> Result<(), Error<E>> {
        self.command(CLR_MDR0)
    }

    /// Reset MDR1 to its default (0x00: no flags, counting enabled,
    /// four-byte width)
    ///
    /// The chip reverts to four-byte mode, but the driver's tracked width
    /// is updated by [`Self::write_mdr1`] only; reconfigure MDR1 before
    /// the next counter read if a narrower width was in effect.
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn clear_mdr1(&mut self) -> Result<(), Error<E>> {
        self.command(CLR_MDR1)
    }

    /// Reset the counter to zero
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn clear_counter(&mut self) -> Result<(), Error<E>> {
        self.command(CLR_CNTR)
    }

    /// Clear the latched status flags
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn clear_status(&mut self) -> Result<(), Error<E>> {
        self.command(CLR_STR)
    }

    /// Read MDR0
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn read_mdr0(&mut self) -> Result<Mdr0, Error<E>> {
        self.read_byte(READ_MDR0).map(Mdr0::from_byte)
    }

    /// Read MDR1
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn read_mdr1(&mut self) -> Result<Mdr1, Error<E>> {
        self.read_byte(READ_MDR1).map(Mdr1::from_byte)
    }

    /// Read the live counter, sign-extended from the configured width
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn read_counter(&mut self) -> Result<i32, Error<E>> {
        self.read_count(READ_CNTR)
    }

    /// Read the output latch, sign-extended from the configured width
    ///
    /// OTR holds the counter snapshot taken by [`Self::load_otr`] (or by
    /// an index pulse in the load-output-latch index mode), so it can be
    /// read without racing a live count.
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn read_otr(&mut self) -> Result<i32, Error<E>> {
        self.read_count(READ_OTR)
    }

    /// Read the status register
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn read_status(&mut self) -> Result<Status, Error<E>> {
        self.read_byte(READ_STR).map(Status::from)
    }

    /// Write MDR0
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn write_mdr0(&mut self, mdr0: Mdr0) -> Result<(), Error<E>> {
        let byte = mdr0.to_byte();

        #[cfg(feature = "defmt")]
        defmt::debug!("Writing 0x{:02X} to MDR0", byte);

        self.spi
            .write(&[WRITE_MDR0, byte])
            .map_err(Error::Communication)
    }

    /// Write MDR1 and adopt its data width for subsequent counter reads
    ///
    /// The width field governs how many bytes the chip transfers on CNTR
    /// and OTR reads; the tracked width is updated once the write has
    /// completed on the bus.
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn write_mdr1(&mut self, mdr1: Mdr1) -> Result<(), Error<E>> {
        let byte = mdr1.to_byte();

        #[cfg(feature = "defmt")]
        defmt::debug!("Writing 0x{:02X} to MDR1", byte);

        self.spi
            .write(&[WRITE_MDR1, byte])
            .map_err(Error::Communication)?;

        self.width = mdr1.data_width;

        Ok(())
    }

    /// Write the data transfer register (DTR)
    ///
    /// Always transmits all four bytes, most significant first; the chip
    /// truncates internally per its configured width. DTR feeds the
    /// counter via [`Self::load_counter`] and serves as the compare and
    /// modulo value.
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn write_data_register(&mut self, value: i32) -> Result<(), Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Writing {} to DTR", value);

        let bytes = value.to_be_bytes();
        self.spi
            .write(&[WRITE_DTR, bytes[0], bytes[1], bytes[2], bytes[3]])
            .map_err(Error::Communication)
    }

    /// Transfer DTR into the counter
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn load_counter(&mut self) -> Result<(), Error<E>> {
        self.command(LOAD_CNTR)
    }

    /// Latch the counter into OTR
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails
    pub fn load_otr(&mut self) -> Result<(), Error<E>> {
        self.command(LOAD_OTR)
    }
}
