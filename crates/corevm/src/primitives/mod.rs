//! Fixed-width value types: the 256-bit machine word, addresses and hashes.

mod bits;
mod u256;

pub use bits::{keccak256, Address, B256};
pub use u256::U256;
