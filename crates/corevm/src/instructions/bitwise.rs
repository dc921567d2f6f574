use crate::{interpreter::Interpreter, primitives::U256, result::InstructionError};

pub(crate) fn lt(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a, b] = interp.frame.stack.popn()?;
    interp.frame.stack.push(U256::from(a < b))
}

pub(crate) fn gt(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a, b] = interp.frame.stack.popn()?;
    interp.frame.stack.push(U256::from(a > b))
}

pub(crate) fn slt(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a, b] = interp.frame.stack.popn()?;
    interp.frame.stack.push(U256::from(a.slt(&b)))
}

pub(crate) fn sgt(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a, b] = interp.frame.stack.popn()?;
    interp.frame.stack.push(U256::from(a.sgt(&b)))
}

pub(crate) fn eq(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a, b] = interp.frame.stack.popn()?;
    interp.frame.stack.push(U256::from(a == b))
}

pub(crate) fn iszero(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a] = interp.frame.stack.popn()?;
    interp.frame.stack.push(U256::from(a.is_zero()))
}

pub(crate) fn bitand(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a, b] = interp.frame.stack.popn()?;
    interp.frame.stack.push(a & b)
}

pub(crate) fn bitor(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a, b] = interp.frame.stack.popn()?;
    interp.frame.stack.push(a | b)
}

pub(crate) fn bitxor(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a, b] = interp.frame.stack.popn()?;
    interp.frame.stack.push(a ^ b)
}

pub(crate) fn not(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a] = interp.frame.stack.popn()?;
    interp.frame.stack.push(!a)
}

pub(crate) fn byte(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [index, value] = interp.frame.stack.popn()?;
    interp.frame.stack.push(U256::byte(index, value))
}

pub(crate) fn shl(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [shift, value] = interp.frame.stack.popn()?;
    interp.frame.stack.push(value.shl(shift.to_shift_amount()))
}

pub(crate) fn shr(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [shift, value] = interp.frame.stack.popn()?;
    interp.frame.stack.push(value.shr(shift.to_shift_amount()))
}

pub(crate) fn sar(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [shift, value] = interp.frame.stack.popn()?;
    interp.frame.stack.push(value.sar(shift.to_shift_amount()))
}
