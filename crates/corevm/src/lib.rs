//! A deterministic, hardfork-parameterised EVM bytecode interpreter.
//!
//! The crate is a pure computation kernel: given bytecode, input data, a
//! gas limit, an environment snapshot and a [`Host`] implementing state
//! access, it returns a status, the gas consumed, the refund accrued and
//! the optional return data. Everything fork-varying lives in the
//! [`Spec`] record; the dispatch loop itself never branches on the fork.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod access_list;
pub use access_list::*;

mod bytecode;
pub use bytecode::*;

pub mod constants;

mod env;
pub use env::*;

mod evm;
pub use evm::*;

pub mod gas;
pub use gas::Gas;

mod host;
pub use host::*;

pub mod instructions;
pub use instructions::{
    instruction_table, DynamicGasFn, Instruction, InstructionEntry, InstructionTable,
};

mod interpreter;
pub use interpreter::*;

mod memory;
pub use memory::*;

pub mod opcode;

mod primitives;
pub use primitives::*;

mod result;
pub use result::*;

mod spec;
pub use spec::*;

mod stack;
pub use stack::*;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(test)]
mod tests;
