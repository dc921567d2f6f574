use crate::{interpreter::Interpreter, primitives::U256, result::InstructionError};

pub(crate) fn pop(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    interp.frame.stack.pop()?;
    Ok(())
}

pub(crate) fn push0(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    interp.frame.stack.push(U256::ZERO)
}

/// PUSH1-PUSH32: the immediate bytes were bounds-checked by the dispatch
/// loop before the handler runs.
pub(crate) fn push<const N: usize>(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let start = interp.pc + 1;
    let value = U256::from_be_slice(&interp.frame.contract.bytecode.bytes()[start..start + N]);
    interp.frame.stack.push(value)
}

pub(crate) fn dup<const N: usize>(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    interp.frame.stack.dup(N)
}

pub(crate) fn swap<const N: usize>(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    interp.frame.stack.swap(N)
}
