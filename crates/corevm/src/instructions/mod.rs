//! The per-fork dispatch table and the opcode handlers, grouped by
//! category.

pub mod arithmetic;
pub mod bitwise;
pub mod block_info;
pub mod contract;
pub mod control;
pub mod host;
pub mod memory;
pub mod stack;
pub mod system;
pub mod tx_info;

use crate::{
    constants,
    interpreter::{as_usize, Interpreter},
    primitives::U256,
    result::InstructionError,
    spec::{Features, Spec, SpecId},
};

/// An opcode handler.
pub type Instruction = fn(&mut Interpreter<'_>) -> Result<(), InstructionError>;

/// A dynamic gas function: computes the state-dependent part of an
/// opcode's cost from stack peeks and the current memory price, before
/// the handler runs.
pub type DynamicGasFn = fn(&Interpreter<'_>) -> Result<u64, InstructionError>;

/// One slot of the dispatch table.
#[derive(Debug, Clone, Copy)]
pub struct InstructionEntry {
    /// The handler.
    pub execute: Instruction,
    /// Optional dynamic cost, charged after `base_gas`.
    pub dynamic_gas: Option<DynamicGasFn>,
    /// Flat cost charged before any side effect.
    pub base_gas: u64,
    /// Whether the handler manages the program counter itself (jumps,
    /// halts and the call family).
    pub is_control_flow: bool,
}

impl InstructionEntry {
    const fn new(
        execute: Instruction,
        dynamic_gas: Option<DynamicGasFn>,
        base_gas: u64,
        is_control_flow: bool,
    ) -> Self {
        Self { execute, dynamic_gas, base_gas, is_control_flow }
    }

    /// The slot used for undefined and not-yet-active opcodes: charges
    /// nothing and raises `InvalidOpcode`.
    const fn undefined() -> Self {
        Self::new(control::unknown, None, 0, true)
    }
}

/// The full dispatch table of one fork: 256 entries indexed by opcode.
pub type InstructionTable = [InstructionEntry; 256];

/// Builds the dispatch table for `spec`. Opcode availability and
/// fork-varying base costs are resolved here once, keeping the dispatch
/// loop free of fork branches.
pub fn instruction_table(spec: &Spec) -> InstructionTable {
    use crate::opcode::*;

    let mut table = [InstructionEntry::undefined(); 256];

    table[STOP as usize] = InstructionEntry::new(control::stop, None, constants::ZERO, true);
    table[ADD as usize] = InstructionEntry::new(arithmetic::add, None, constants::VERYLOW, false);
    table[MUL as usize] = InstructionEntry::new(arithmetic::mul, None, constants::LOW, false);
    table[SUB as usize] = InstructionEntry::new(arithmetic::sub, None, constants::VERYLOW, false);
    table[DIV as usize] = InstructionEntry::new(arithmetic::div, None, constants::LOW, false);
    table[SDIV as usize] = InstructionEntry::new(arithmetic::sdiv, None, constants::LOW, false);
    table[MOD as usize] = InstructionEntry::new(arithmetic::rem, None, constants::LOW, false);
    table[SMOD as usize] = InstructionEntry::new(arithmetic::smod, None, constants::LOW, false);
    table[ADDMOD as usize] = InstructionEntry::new(arithmetic::addmod, None, constants::MID, false);
    table[MULMOD as usize] = InstructionEntry::new(arithmetic::mulmod, None, constants::MID, false);
    table[EXP as usize] = InstructionEntry::new(arithmetic::exp, Some(arithmetic::exp_gas), constants::HIGH, false);
    table[SIGNEXTEND as usize] = InstructionEntry::new(arithmetic::signextend, None, constants::LOW, false);

    table[LT as usize] = InstructionEntry::new(bitwise::lt, None, constants::VERYLOW, false);
    table[GT as usize] = InstructionEntry::new(bitwise::gt, None, constants::VERYLOW, false);
    table[SLT as usize] = InstructionEntry::new(bitwise::slt, None, constants::VERYLOW, false);
    table[SGT as usize] = InstructionEntry::new(bitwise::sgt, None, constants::VERYLOW, false);
    table[EQ as usize] = InstructionEntry::new(bitwise::eq, None, constants::VERYLOW, false);
    table[ISZERO as usize] = InstructionEntry::new(bitwise::iszero, None, constants::VERYLOW, false);
    table[AND as usize] = InstructionEntry::new(bitwise::bitand, None, constants::VERYLOW, false);
    table[OR as usize] = InstructionEntry::new(bitwise::bitor, None, constants::VERYLOW, false);
    table[XOR as usize] = InstructionEntry::new(bitwise::bitxor, None, constants::VERYLOW, false);
    table[NOT as usize] = InstructionEntry::new(bitwise::not, None, constants::VERYLOW, false);
    table[BYTE as usize] = InstructionEntry::new(bitwise::byte, None, constants::VERYLOW, false);
    if spec.enabled(SpecId::CONSTANTINOPLE) {
        table[SHL as usize] = InstructionEntry::new(bitwise::shl, None, constants::VERYLOW, false);
        table[SHR as usize] = InstructionEntry::new(bitwise::shr, None, constants::VERYLOW, false);
        table[SAR as usize] = InstructionEntry::new(bitwise::sar, None, constants::VERYLOW, false);
    }

    table[KECCAK256 as usize] = InstructionEntry::new(
            system::keccak256,
            Some(system::keccak256_gas),
            constants::KECCAK256,
            false,
        );

    table[ADDRESS as usize] = InstructionEntry::new(system::address, None, constants::BASE, false);
    table[BALANCE as usize] = InstructionEntry::new(host::balance, None, constants::ZERO, false);
    table[ORIGIN as usize] = InstructionEntry::new(tx_info::origin, None, constants::BASE, false);
    table[CALLER as usize] = InstructionEntry::new(system::caller, None, constants::BASE, false);
    table[CALLVALUE as usize] = InstructionEntry::new(system::callvalue, None, constants::BASE, false);
    table[CALLDATALOAD as usize] = InstructionEntry::new(system::calldataload, None, constants::VERYLOW, false);
    table[CALLDATASIZE as usize] = InstructionEntry::new(system::calldatasize, None, constants::BASE, false);
    table[CALLDATACOPY as usize] = InstructionEntry::new(
            system::calldatacopy,
            Some(system::copy_gas),
            constants::VERYLOW,
            false,
        );
    table[CODESIZE as usize] = InstructionEntry::new(system::codesize, None, constants::BASE, false);
    table[CODECOPY as usize] = InstructionEntry::new(system::codecopy, Some(system::copy_gas), constants::VERYLOW, false);
    table[GASPRICE as usize] = InstructionEntry::new(tx_info::gasprice, None, constants::BASE, false);
    table[EXTCODESIZE as usize] = InstructionEntry::new(host::extcodesize, None, constants::ZERO, false);
    table[EXTCODECOPY as usize] = InstructionEntry::new(
            host::extcodecopy,
            Some(host::extcodecopy_gas),
            constants::ZERO,
            false,
        );
    if spec.enabled(SpecId::BYZANTIUM) {
        table[RETURNDATASIZE as usize] = InstructionEntry::new(system::returndatasize, None, constants::BASE, false);
        table[RETURNDATACOPY as usize] = InstructionEntry::new(
                system::returndatacopy,
                Some(system::copy_gas),
                constants::VERYLOW,
                false,
            );
    }
    if spec.enabled(SpecId::CONSTANTINOPLE) {
        table[EXTCODEHASH as usize] = InstructionEntry::new(host::extcodehash, None, constants::ZERO, false);
    }

    table[BLOCKHASH as usize] = InstructionEntry::new(host::blockhash, None, constants::BLOCKHASH, false);
    table[COINBASE as usize] = InstructionEntry::new(block_info::coinbase, None, constants::BASE, false);
    table[TIMESTAMP as usize] = InstructionEntry::new(block_info::timestamp, None, constants::BASE, false);
    table[NUMBER as usize] = InstructionEntry::new(block_info::number, None, constants::BASE, false);
    table[DIFFICULTY as usize] = InstructionEntry::new(block_info::difficulty, None, constants::BASE, false);
    table[GASLIMIT as usize] = InstructionEntry::new(block_info::gaslimit, None, constants::BASE, false);
    if spec.enabled(SpecId::ISTANBUL) {
        table[CHAINID as usize] = InstructionEntry::new(block_info::chainid, None, constants::BASE, false);
        table[SELFBALANCE as usize] = InstructionEntry::new(host::selfbalance, None, constants::LOW, false);
    }
    if spec.has(Features::BASEFEE) {
        table[BASEFEE as usize] = InstructionEntry::new(block_info::basefee, None, constants::BASE, false);
    }
    if spec.has(Features::BLOB_OPCODES) {
        table[BLOBHASH as usize] = InstructionEntry::new(tx_info::blob_hash, None, constants::VERYLOW, false);
        table[BLOBBASEFEE as usize] = InstructionEntry::new(block_info::blob_basefee, None, constants::BASE, false);
    }

    table[POP as usize] = InstructionEntry::new(stack::pop, None, constants::BASE, false);
    table[MLOAD as usize] = InstructionEntry::new(memory::mload, Some(memory::mload_gas), constants::VERYLOW, false);
    table[MSTORE as usize] = InstructionEntry::new(memory::mstore, Some(memory::mstore_gas), constants::VERYLOW, false);
    table[MSTORE8 as usize] = InstructionEntry::new(
            memory::mstore8,
            Some(memory::mstore8_gas),
            constants::VERYLOW,
            false,
        );
    table[SLOAD as usize] = InstructionEntry::new(host::sload, None, constants::ZERO, false);
    table[SSTORE as usize] = InstructionEntry::new(host::sstore, None, constants::ZERO, false);
    table[JUMP as usize] = InstructionEntry::new(control::jump, None, constants::MID, true);
    table[JUMPI as usize] = InstructionEntry::new(control::jumpi, None, constants::HIGH, true);
    table[PC as usize] = InstructionEntry::new(control::pc, None, constants::BASE, false);
    table[MSIZE as usize] = InstructionEntry::new(memory::msize, None, constants::BASE, false);
    table[GAS as usize] = InstructionEntry::new(system::gas, None, constants::BASE, false);
    table[JUMPDEST as usize] = InstructionEntry::new(control::jumpdest, None, constants::JUMPDEST, false);
    if spec.has(Features::TSTORE) {
        table[TLOAD as usize] = InstructionEntry::new(host::tload, None, spec.warm_storage_read_cost, false);
        table[TSTORE as usize] = InstructionEntry::new(host::tstore, None, spec.warm_storage_read_cost, false);
    }
    if spec.has(Features::MCOPY) {
        table[MCOPY as usize] = InstructionEntry::new(
                memory::mcopy,
                Some(memory::mcopy_gas),
                constants::VERYLOW,
                false,
            );
    }

    if spec.has(Features::PUSH0) {
        table[PUSH0 as usize] = InstructionEntry::new(stack::push0, None, constants::BASE, false);
    }
    macro_rules! push_entries {
        ($($n:literal),*) => {
            $(
                table[(PUSH1 + $n - 1) as usize] =
                    InstructionEntry::new(stack::push::<$n>, None, constants::VERYLOW, false);
            )*
        };
    }
    push_entries!(
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
        25, 26, 27, 28, 29, 30, 31, 32
    );
    macro_rules! dup_swap_entries {
        ($($n:literal),*) => {
            $(
                table[(DUP1 + $n - 1) as usize] =
                    InstructionEntry::new(stack::dup::<$n>, None, constants::VERYLOW, false);
                table[(SWAP1 + $n - 1) as usize] =
                    InstructionEntry::new(stack::swap::<$n>, None, constants::VERYLOW, false);
            )*
        };
    }
    dup_swap_entries!(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16);

    macro_rules! log_entries {
        ($($n:literal),*) => {
            $(
                table[(LOG0 + $n) as usize] = InstructionEntry::new(
                    host::log::<$n>,
                    Some(host::log_gas::<$n>),
                    constants::LOG,
                    false,
                );
            )*
        };
    }
    log_entries!(0, 1, 2, 3, 4);

    table[CREATE as usize] = InstructionEntry::new(contract::create::<false>, None, constants::CREATE, true);
    table[CALL as usize] = InstructionEntry::new(contract::call, None, constants::ZERO, true);
    table[CALLCODE as usize] = InstructionEntry::new(contract::call_code, None, constants::ZERO, true);
    table[RETURN as usize] = InstructionEntry::new(control::ret, Some(control::ret_gas), constants::ZERO, true);
    if spec.enabled(SpecId::HOMESTEAD) {
        table[DELEGATECALL as usize] = InstructionEntry::new(contract::delegate_call, None, constants::ZERO, true);
    }
    if spec.enabled(SpecId::CONSTANTINOPLE) {
        table[CREATE2 as usize] = InstructionEntry::new(contract::create::<true>, None, constants::CREATE, true);
    }
    if spec.enabled(SpecId::BYZANTIUM) {
        table[STATICCALL as usize] = InstructionEntry::new(contract::static_call, None, constants::ZERO, true);
        table[REVERT as usize] = InstructionEntry::new(control::revert, Some(control::ret_gas), constants::ZERO, true);
    }
    table[INVALID as usize] = InstructionEntry::new(control::invalid, None, constants::ZERO, true);
    if spec.has(Features::SELFDESTRUCT) {
        table[SELFDESTRUCT as usize] = InstructionEntry::new(host::selfdestruct, None, spec.selfdestruct_gas, true);
    }

    table
}

/// Expansion delta for growing memory over `[offset, offset + len)`,
/// against the price already charged. Zero-length ranges never expand.
pub(crate) fn expansion_gas(
    interp: &Interpreter<'_>,
    offset: U256,
    len: U256,
) -> Result<u64, InstructionError> {
    if len.is_zero() {
        return Ok(0);
    }
    let offset = as_usize(offset)?;
    let len = as_usize(len)?;
    let end = offset.checked_add(len).ok_or(InstructionError::InvalidOffset)?;
    interp.gas.memory_expansion_cost(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode;

    #[test]
    fn availability_follows_the_fork() {
        let frontier = instruction_table(Spec::for_id(SpecId::FRONTIER));
        let shanghai = instruction_table(Spec::for_id(SpecId::SHANGHAI));
        let cancun = instruction_table(Spec::for_id(SpecId::CANCUN));

        assert_eq!(frontier[opcode::PUSH0 as usize].base_gas, 0);
        assert_eq!(shanghai[opcode::PUSH0 as usize].base_gas, constants::BASE);
        assert_eq!(shanghai[opcode::TLOAD as usize].base_gas, 0);
        assert_eq!(
            cancun[opcode::TLOAD as usize].base_gas,
            constants::WARM_STORAGE_READ_COST
        );
        assert!(cancun[opcode::MCOPY as usize].dynamic_gas.is_some());
    }

    #[test]
    fn control_flow_flags_cover_the_loop_exceptions() {
        let table = instruction_table(Spec::for_id(SpecId::CANCUN));
        for op in [
            opcode::JUMP,
            opcode::JUMPI,
            opcode::STOP,
            opcode::RETURN,
            opcode::REVERT,
            opcode::INVALID,
            opcode::SELFDESTRUCT,
            opcode::CREATE,
            opcode::CREATE2,
            opcode::CALL,
            opcode::CALLCODE,
            opcode::DELEGATECALL,
            opcode::STATICCALL,
        ] {
            assert!(table[op as usize].is_control_flow, "opcode {op:#x}");
        }
        assert!(!table[opcode::ADD as usize].is_control_flow);
        assert!(!table[opcode::SSTORE as usize].is_control_flow);
    }

    #[test]
    fn disabling_selfdestruct_removes_the_opcode() {
        let mut spec = Spec::new(SpecId::CANCUN);
        spec.features.remove(Features::SELFDESTRUCT);
        let table = instruction_table(&spec);
        assert_eq!(table[opcode::SELFDESTRUCT as usize].base_gas, 0);
    }
}
