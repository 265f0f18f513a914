#![no_std]
#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

mod driver;
mod error;
mod register;
mod utils;

pub use driver::Ls7366r;
pub use error::Error;
pub use register::{
    CountEnable, CountMode, DataWidth, FilterClock, FlagMode, IndexMode, IndexSync, Mdr0, Mdr1,
    RunningMode, Status,
};
