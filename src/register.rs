//! Register types for the LS7366R counter.

use core::ops::{BitOr, BitOrAssign};

/// Quadrature count mode (MDR0 bits 1:0)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CountMode {
    /// Non-quadrature (A = clock, B = direction)
    #[default]
    NonQuadrature = 0x00,
    /// X1 quadrature (one count per quadrature cycle)
    X1 = 0x01,
    /// X2 quadrature (two counts per quadrature cycle)
    X2 = 0x02,
    /// X4 quadrature (four counts per quadrature cycle)
    X4 = 0x03,
}

/// Counting range behavior (MDR0 bits 3:2)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RunningMode {
    /// Count freely over the full register range
    #[default]
    FreeRun = 0x00,
    /// Count once between limits, then hold
    SingleCycle = 0x04,
    /// Hold the count at the DTR/zero limits
    RangeLimit = 0x08,
    /// Wrap the count modulo the DTR value
    ModuloN = 0x0C,
}

/// Effect of an index pulse (MDR0 bits 5:4)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum IndexMode {
    /// Index input ignored
    #[default]
    Disabled = 0x00,
    /// Index transfers DTR into the counter
    LoadCounter = 0x10,
    /// Index resets the counter to zero
    ResetCounter = 0x20,
    /// Index latches the counter into OTR
    LoadOutputLatch = 0x30,
}

/// Index pulse synchronization (MDR0 bit 6)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum IndexSync {
    #[default]
    Asynchronous = 0x00,
    /// Index gated by the quadrature clocks
    Synchronous = 0x40,
}

/// Filter clock frequency division (MDR0 bit 7)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FilterClock {
    #[default]
    DivideBy1 = 0x00,
    DivideBy2 = 0x80,
}

/// MDR0
///
/// First mode register. One value per field group, combined by bitwise OR
/// into the configuration byte. Every byte decodes back losslessly because
/// each group's bit range is fully enumerated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mdr0 {
    pub count_mode: CountMode,
    pub running_mode: RunningMode,
    pub index_mode: IndexMode,
    pub index_sync: IndexSync,
    pub filter_clock: FilterClock,
}

impl Mdr0 {
    /// Combine the five field groups into the MDR0 configuration byte
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        self.count_mode as u8
            | self.running_mode as u8
            | self.index_mode as u8
            | self.index_sync as u8
            | self.filter_clock as u8
    }

    /// Decode an MDR0 byte as read back from the chip
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        Self {
            count_mode: match byte & 0x03 {
                0x01 => CountMode::X1,
                0x02 => CountMode::X2,
                0x03 => CountMode::X4,
                _ => CountMode::NonQuadrature,
            },
            running_mode: match byte & 0x0C {
                0x04 => RunningMode::SingleCycle,
                0x08 => RunningMode::RangeLimit,
                0x0C => RunningMode::ModuloN,
                _ => RunningMode::FreeRun,
            },
            index_mode: match byte & 0x30 {
                0x10 => IndexMode::LoadCounter,
                0x20 => IndexMode::ResetCounter,
                0x30 => IndexMode::LoadOutputLatch,
                _ => IndexMode::Disabled,
            },
            index_sync: if byte & 0x40 != 0 {
                IndexSync::Synchronous
            } else {
                IndexSync::Asynchronous
            },
            filter_clock: if byte & 0x80 != 0 {
                FilterClock::DivideBy2
            } else {
                FilterClock::DivideBy1
            },
        }
    }
}

impl From<Mdr0> for u8 {
    fn from(reg: Mdr0) -> u8 {
        reg.to_byte()
    }
}

impl From<u8> for Mdr0 {
    fn from(byte: u8) -> Self {
        Self::from_byte(byte)
    }
}

/// FLAG pin enables (MDR1 bits 7:4)
///
/// The four sources are independently OR-able onto the open-drain FLAG
/// output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlagMode(u8);

impl FlagMode {
    /// All flag sources disabled
    pub const NONE: Self = Self(0x00);
    /// Flag on index
    pub const INDEX: Self = Self(0x10);
    /// Flag on compare (CNTR = DTR)
    pub const COMPARE: Self = Self(0x20);
    /// Flag on borrow (counter underflow)
    pub const BORROW: Self = Self(0x40);
    /// Flag on carry (counter overflow)
    pub const CARRY: Self = Self(0x80);

    /// Raw MDR1 flag bits
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether every source in `other` is enabled
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub(crate) const fn from_bits(bits: u8) -> Self {
        Self(bits & 0xF0)
    }
}

impl BitOr for FlagMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FlagMode {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Counter enable (MDR1 bit 2)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CountEnable {
    #[default]
    Enabled = 0x00,
    Disabled = 0x04,
}

/// Counter data width (MDR1 bits 1:0)
///
/// Selects how many significant bytes the chip stores and transfers for
/// CNTR and OTR.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DataWidth {
    #[default]
    FourByte = 0x00,
    ThreeByte = 0x01,
    TwoByte = 0x02,
    OneByte = 0x03,
}

impl DataWidth {
    /// Number of bytes clocked out per CNTR/OTR read
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::FourByte => 4,
            Self::ThreeByte => 3,
            Self::TwoByte => 2,
            Self::OneByte => 1,
        }
    }

    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0x01 => Self::ThreeByte,
            0x02 => Self::TwoByte,
            0x03 => Self::OneByte,
            _ => Self::FourByte,
        }
    }
}

/// MDR1
///
/// Second mode register: FLAG output enables, counter enable, and the
/// CNTR/OTR data width. The width field also governs how many bytes the
/// driver clocks out on counter reads.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mdr1 {
    pub flags: FlagMode,
    pub counting: CountEnable,
    pub data_width: DataWidth,
}

impl Mdr1 {
    /// Combine the field groups into the MDR1 configuration byte
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        self.flags.bits() | self.counting as u8 | self.data_width as u8
    }

    /// Decode an MDR1 byte as read back from the chip
    ///
    /// Bit 3 is unused by the chip and is dropped.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        Self {
            flags: FlagMode::from_bits(byte),
            counting: if byte & 0x04 != 0 {
                CountEnable::Disabled
            } else {
                CountEnable::Enabled
            },
            data_width: DataWidth::from_bits(byte),
        }
    }
}

impl From<Mdr1> for u8 {
    fn from(reg: Mdr1) -> u8 {
        reg.to_byte()
    }
}

impl From<u8> for Mdr1 {
    fn from(byte: u8) -> Self {
        Self::from_byte(byte)
    }
}

bitfield::bitfield! {
    /// STR
    ///
    /// Read-only status flags latched by the counter core. Latched bits
    /// stay set until the clear-status command
    pub struct Status(u8);
    impl Debug;
    /// Carry latch: counter overflowed past its maximum
    pub carry, _: 7;
    /// Borrow latch: counter underflowed past its minimum
    pub borrow, _: 6;
    /// Compare latch: CNTR matched DTR
    pub compare, _: 5;
    /// Index latch: an index pulse was accepted
    pub index, _: 4;
    /// Live counter-enable state
    pub count_enabled, _: 3;
    /// Power loss latch: supply dipped since last clear
    pub power_loss, _: 2;
    /// Count direction: `true` while counting up
    pub count_up, _: 1;
    /// Sign of the current count: `true` when negative
    pub negative, _: 0;
}

impl Status {
    /// Check whether the count wrapped in either direction since the
    /// status register was last cleared
    #[must_use]
    #[inline(always)]
    pub fn overflowed(&self) -> bool {
        self.carry() || self.borrow()
    }
}

impl From<u8> for Status {
    fn from(byte: u8) -> Self {
        Self(byte)
    }
}
