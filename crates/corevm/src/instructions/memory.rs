use crate::{
    gas,
    instructions::expansion_gas,
    interpreter::{as_usize, Interpreter},
    primitives::U256,
    result::InstructionError,
};

const WORD: U256 = U256::from_limbs([32, 0, 0, 0]);

pub(crate) fn mload_gas(interp: &Interpreter<'_>) -> Result<u64, InstructionError> {
    let offset = interp.frame.stack.peek(0)?;
    expansion_gas(interp, offset, WORD)
}

pub(crate) fn mload(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [offset] = interp.frame.stack.popn()?;
    let offset = as_usize(offset)?;
    interp.frame.memory.ensure(offset, 32)?;
    let value = interp.frame.memory.load_word(offset);
    interp.frame.stack.push(value)
}

pub(crate) fn mstore_gas(interp: &Interpreter<'_>) -> Result<u64, InstructionError> {
    let offset = interp.frame.stack.peek(0)?;
    expansion_gas(interp, offset, WORD)
}

pub(crate) fn mstore(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [offset, value] = interp.frame.stack.popn()?;
    let offset = as_usize(offset)?;
    interp.frame.memory.ensure(offset, 32)?;
    interp.frame.memory.store_word(offset, value);
    Ok(())
}

pub(crate) fn mstore8_gas(interp: &Interpreter<'_>) -> Result<u64, InstructionError> {
    let offset = interp.frame.stack.peek(0)?;
    expansion_gas(interp, offset, U256::ONE)
}

pub(crate) fn mstore8(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [offset, value] = interp.frame.stack.popn()?;
    let offset = as_usize(offset)?;
    interp.frame.memory.ensure(offset, 1)?;
    interp.frame.memory.store_byte(offset, value);
    Ok(())
}

pub(crate) fn msize(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let len = interp.frame.memory.len();
    interp.frame.stack.push(len.into())
}

/// Expansion over the further of the two ranges plus per-word copy
/// pricing (EIP-5656).
pub(crate) fn mcopy_gas(interp: &Interpreter<'_>) -> Result<u64, InstructionError> {
    let dst = interp.frame.stack.peek(0)?;
    let src = interp.frame.stack.peek(1)?;
    let len = interp.frame.stack.peek(2)?;
    if len.is_zero() {
        return Ok(0);
    }
    let words = gas::copy_cost(as_usize(len)?).ok_or(InstructionError::OutOfGas)?;
    let expansion = expansion_gas(interp, dst, len)?.max(expansion_gas(interp, src, len)?);
    words.checked_add(expansion).ok_or(InstructionError::OutOfGas)
}

pub(crate) fn mcopy(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [dst, src, len] = interp.frame.stack.popn()?;
    let len = as_usize(len)?;
    if len == 0 {
        return Ok(());
    }
    let dst = as_usize(dst)?;
    let src = as_usize(src)?;
    interp.frame.memory.ensure(dst, len)?;
    interp.frame.memory.ensure(src, len)?;
    interp.frame.memory.copy(dst, src, len);
    Ok(())
}
