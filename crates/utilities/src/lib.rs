#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod debug_trace;
mod error;
mod test_logger;
mod timing;

pub use error::*;
pub use test_logger::*;
pub use timing::*;
