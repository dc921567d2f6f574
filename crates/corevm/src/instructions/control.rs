use crate::{
    instructions::expansion_gas,
    interpreter::{as_usize, Interpreter},
    primitives::U256,
    result::InstructionError,
};

pub(crate) fn stop(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    interp.halt();
    Ok(())
}

pub(crate) fn jump(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [target] = interp.frame.stack.popn()?;
    jump_to(interp, target)
}

pub(crate) fn jumpi(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [target, condition] = interp.frame.stack.popn()?;
    if condition.is_zero() {
        interp.pc += 1;
        return Ok(());
    }
    jump_to(interp, target)
}

fn jump_to(interp: &mut Interpreter<'_>, target: U256) -> Result<(), InstructionError> {
    let dest = target.try_to_usize().ok_or(InstructionError::InvalidJump)?;
    if !interp.frame.contract.bytecode.is_valid_jump(dest) {
        return Err(InstructionError::InvalidJump);
    }
    interp.pc = dest;
    Ok(())
}

pub(crate) fn jumpdest(_interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    Ok(())
}

pub(crate) fn pc(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let pc = interp.pc;
    interp.frame.stack.push(pc.into())
}

/// Expansion pricing shared by RETURN and REVERT.
pub(crate) fn ret_gas(interp: &Interpreter<'_>) -> Result<u64, InstructionError> {
    let offset = interp.frame.stack.peek(0)?;
    let len = interp.frame.stack.peek(1)?;
    expansion_gas(interp, offset, len)
}

fn take_output(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [offset, len] = interp.frame.stack.popn()?;
    let len = as_usize(len)?;
    let data = if len == 0 {
        Vec::new()
    } else {
        let offset = as_usize(offset)?;
        interp.frame.memory.ensure(offset, len)?;
        interp.frame.memory.slice(offset, len).to_vec()
    };
    interp.output = Some(data);
    Ok(())
}

pub(crate) fn ret(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    take_output(interp)?;
    interp.halt();
    Ok(())
}

pub(crate) fn revert(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    take_output(interp)?;
    Err(InstructionError::Revert)
}

pub(crate) fn invalid(_interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    Err(InstructionError::InvalidOpcode)
}

/// Fills undefined and not-yet-active table slots.
pub(crate) fn unknown(_interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    Err(InstructionError::InvalidOpcode)
}
