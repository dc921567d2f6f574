use crate::{
    interpreter::Interpreter,
    primitives::U256,
    result::InstructionError,
    spec::Features,
};

pub(crate) fn coinbase(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let word = interp.env.block.coinbase.into_word();
    interp.frame.stack.push(word)
}

pub(crate) fn timestamp(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let timestamp = interp.env.block.timestamp;
    interp.frame.stack.push(U256::from(timestamp))
}

pub(crate) fn number(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let number = interp.env.block.number;
    interp.frame.stack.push(U256::from(number))
}

/// DIFFICULTY before the Merge, PREVRANDAO after (EIP-4399).
pub(crate) fn difficulty(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let value = if interp.spec.has(Features::PREVRANDAO) {
        interp.env.block.prevrandao.into()
    } else {
        interp.env.block.difficulty
    };
    interp.frame.stack.push(value)
}

pub(crate) fn gaslimit(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let gas_limit = interp.env.block.gas_limit;
    interp.frame.stack.push(U256::from(gas_limit))
}

pub(crate) fn chainid(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let chain_id = interp.spec.chain_id;
    interp.frame.stack.push(U256::from(chain_id))
}

pub(crate) fn basefee(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let basefee = interp.env.block.basefee;
    interp.frame.stack.push(basefee)
}

pub(crate) fn blob_basefee(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let blob_basefee = interp.env.block.blob_basefee;
    interp.frame.stack.push(blob_basefee)
}
