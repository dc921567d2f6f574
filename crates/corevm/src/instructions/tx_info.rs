use crate::{
    interpreter::Interpreter,
    primitives::U256,
    result::InstructionError,
};

pub(crate) fn origin(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let word = interp.env.tx.origin.into_word();
    interp.frame.stack.push(word)
}

pub(crate) fn gasprice(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let gas_price = interp.env.tx.gas_price;
    interp.frame.stack.push(gas_price)
}

/// BLOBHASH (EIP-4844): the versioned hash at the popped index, or zero
/// past the end of the list.
pub(crate) fn blob_hash(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [index] = interp.frame.stack.popn()?;
    let hash = index
        .try_to_usize()
        .and_then(|i| interp.env.tx.blob_hashes.get(i).copied())
        .map(U256::from)
        .unwrap_or_default();
    interp.frame.stack.push(hash)
}
