use crate::{
    gas,
    interpreter::Interpreter,
    primitives::U256,
    result::InstructionError,
};

pub(crate) fn add(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a, b] = interp.frame.stack.popn()?;
    interp.frame.stack.push(a.wrapping_add(b))
}

pub(crate) fn mul(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a, b] = interp.frame.stack.popn()?;
    interp.frame.stack.push(a.wrapping_mul(b))
}

pub(crate) fn sub(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a, b] = interp.frame.stack.popn()?;
    interp.frame.stack.push(a.wrapping_sub(b))
}

pub(crate) fn div(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a, b] = interp.frame.stack.popn()?;
    interp.frame.stack.push(a.div(b))
}

pub(crate) fn sdiv(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a, b] = interp.frame.stack.popn()?;
    interp.frame.stack.push(a.sdiv(b))
}

pub(crate) fn rem(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a, b] = interp.frame.stack.popn()?;
    interp.frame.stack.push(a.rem(b))
}

pub(crate) fn smod(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a, b] = interp.frame.stack.popn()?;
    interp.frame.stack.push(a.smod(b))
}

pub(crate) fn addmod(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a, b, n] = interp.frame.stack.popn()?;
    interp.frame.stack.push(a.add_mod(b, n))
}

pub(crate) fn mulmod(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [a, b, n] = interp.frame.stack.popn()?;
    interp.frame.stack.push(a.mul_mod(b, n))
}

pub(crate) fn exp(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [base, exponent] = interp.frame.stack.popn()?;
    interp.frame.stack.push(base.exp(exponent))
}

/// Per-byte exponent pricing, from the exponent still on the stack.
pub(crate) fn exp_gas(interp: &Interpreter<'_>) -> Result<u64, InstructionError> {
    let exponent = interp.frame.stack.peek(1)?;
    gas::exp_cost(interp.spec, &exponent).ok_or(InstructionError::OutOfGas)
}

pub(crate) fn signextend(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [byte_index, value] = interp.frame.stack.popn()?;
    interp.frame.stack.push(U256::sign_extend(byte_index, value))
}
