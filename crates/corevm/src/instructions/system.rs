use crate::{
    gas,
    instructions::expansion_gas,
    interpreter::{as_usize, as_usize_saturated, Interpreter},
    primitives,
    result::InstructionError,
};

pub(crate) fn keccak256_gas(interp: &Interpreter<'_>) -> Result<u64, InstructionError> {
    let offset = interp.frame.stack.peek(0)?;
    let len = interp.frame.stack.peek(1)?;
    let words = if len.is_zero() {
        0
    } else {
        gas::keccak256_word_cost(as_usize(len)?).ok_or(InstructionError::OutOfGas)?
    };
    let expansion = expansion_gas(interp, offset, len)?;
    words.checked_add(expansion).ok_or(InstructionError::OutOfGas)
}

pub(crate) fn keccak256(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [offset, len] = interp.frame.stack.popn()?;
    let len = as_usize(len)?;
    let hash = if len == 0 {
        primitives::keccak256([])
    } else {
        let offset = as_usize(offset)?;
        interp.frame.memory.ensure(offset, len)?;
        primitives::keccak256(interp.frame.memory.slice(offset, len))
    };
    interp.frame.stack.push(hash.into())
}

pub(crate) fn address(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let word = interp.frame.contract.address.into_word();
    interp.frame.stack.push(word)
}

pub(crate) fn caller(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let word = interp.frame.contract.caller.into_word();
    interp.frame.stack.push(word)
}

pub(crate) fn callvalue(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let value = interp.frame.contract.value;
    interp.frame.stack.push(value)
}

pub(crate) fn calldataload(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [offset] = interp.frame.stack.popn()?;
    let offset = as_usize_saturated(offset);
    let input = &interp.frame.contract.input;
    let mut word = [0u8; 32];
    if offset < input.len() {
        let count = 32.min(input.len() - offset);
        word[..count].copy_from_slice(&input[offset..offset + count]);
    }
    interp.frame.stack.push(primitives::U256::from_be_bytes(word))
}

pub(crate) fn calldatasize(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let len = interp.frame.contract.input.len();
    interp.frame.stack.push(len.into())
}

/// Shared pricing of CALLDATACOPY, CODECOPY and RETURNDATACOPY:
/// per-word copy cost plus destination expansion.
pub(crate) fn copy_gas(interp: &Interpreter<'_>) -> Result<u64, InstructionError> {
    copy_gas_at(interp, 0, 2)
}

pub(crate) fn copy_gas_at(
    interp: &Interpreter<'_>,
    dest_index: usize,
    len_index: usize,
) -> Result<u64, InstructionError> {
    let dest = interp.frame.stack.peek(dest_index)?;
    let len = interp.frame.stack.peek(len_index)?;
    if len.is_zero() {
        return Ok(0);
    }
    let words = gas::copy_cost(as_usize(len)?).ok_or(InstructionError::OutOfGas)?;
    let expansion = expansion_gas(interp, dest, len)?;
    words.checked_add(expansion).ok_or(InstructionError::OutOfGas)
}

pub(crate) fn calldatacopy(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [dest, offset, len] = interp.frame.stack.popn()?;
    let len = as_usize(len)?;
    if len == 0 {
        return Ok(());
    }
    let dest = as_usize(dest)?;
    let offset = as_usize_saturated(offset);
    interp.frame.memory.ensure(dest, len)?;
    interp.frame.memory.set_data(dest, offset, len, &interp.frame.contract.input);
    Ok(())
}

pub(crate) fn codesize(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let len = interp.frame.contract.bytecode.len();
    interp.frame.stack.push(len.into())
}

pub(crate) fn codecopy(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [dest, offset, len] = interp.frame.stack.popn()?;
    let len = as_usize(len)?;
    if len == 0 {
        return Ok(());
    }
    let dest = as_usize(dest)?;
    let offset = as_usize_saturated(offset);
    interp.frame.memory.ensure(dest, len)?;
    interp.frame.memory.set_data(dest, offset, len, interp.frame.contract.bytecode.bytes());
    Ok(())
}

pub(crate) fn returndatasize(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let len = interp.return_data.len();
    interp.frame.stack.push(len.into())
}

pub(crate) fn returndatacopy(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [dest, offset, len] = interp.frame.stack.popn()?;
    let len = as_usize(len)?;
    let offset = as_usize(offset)?;
    // Reading past the end of the return buffer is a hard error, unlike
    // the other copy opcodes.
    let end = offset.checked_add(len).ok_or(InstructionError::InvalidOffset)?;
    if end > interp.return_data.len() {
        return Err(InstructionError::InvalidOffset);
    }
    if len == 0 {
        return Ok(());
    }
    let dest = as_usize(dest)?;
    interp.frame.memory.ensure(dest, len)?;
    interp.frame.memory.set(dest, &interp.return_data[offset..end]);
    Ok(())
}

pub(crate) fn gas(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let remaining = interp.gas.remaining();
    interp.frame.stack.push(primitives::U256::from(remaining))
}
