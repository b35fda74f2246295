#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod error;
mod read_xml;
mod signature;
mod sort;
mod term;
mod trs;
mod write_mstrs;

pub use error::*;
pub use read_xml::*;
pub use signature::*;
pub use sort::*;
pub use term::*;
pub use trs::*;
pub use write_mstrs::*;
