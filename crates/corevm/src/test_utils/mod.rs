//! Test doubles and bytecode assembly helpers.

mod asm;
mod executor;
mod host;

pub use asm::*;
pub use executor::*;
pub use host::*;
