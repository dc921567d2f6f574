use crate::{
    constants, gas,
    instructions::expansion_gas,
    interpreter::{as_usize, as_usize_saturated, Interpreter},
    primitives::{Address, B256},
    result::InstructionError,
    spec::Features,
};

pub(crate) fn balance(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [address] = interp.frame.stack.popn()?;
    let address = Address::from_word(address);
    let cold = interp.access_list.warm_account(address);
    interp.gas.consume(gas::account_access_cost(interp.spec, cold))?;
    let balance = interp.host.balance(address);
    interp.frame.stack.push(balance)
}

pub(crate) fn selfbalance(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let address = interp.frame.contract.address;
    let balance = interp.host.balance(address);
    interp.frame.stack.push(balance)
}

pub(crate) fn extcodesize(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [address] = interp.frame.stack.popn()?;
    let address = Address::from_word(address);
    let cold = interp.access_list.warm_account(address);
    interp.gas.consume(gas::account_access_cost(interp.spec, cold))?;
    let size = interp.host.code_size(address);
    interp.frame.stack.push(size.into())
}

pub(crate) fn extcodehash(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [address] = interp.frame.stack.popn()?;
    let address = Address::from_word(address);
    let cold = interp.access_list.warm_account(address);
    interp.gas.consume(gas::account_access_cost(interp.spec, cold))?;
    let hash = interp.host.code_hash(address);
    interp.frame.stack.push(hash.into())
}

/// Copy pricing over the EXTCODECOPY operand layout (destination and
/// length sit below the address).
pub(crate) fn extcodecopy_gas(interp: &Interpreter<'_>) -> Result<u64, InstructionError> {
    super::system::copy_gas_at(interp, 1, 3)
}

pub(crate) fn extcodecopy(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [address, dest, offset, len] = interp.frame.stack.popn()?;
    let address = Address::from_word(address);
    let cold = interp.access_list.warm_account(address);
    interp.gas.consume(gas::account_access_cost(interp.spec, cold))?;
    let len = as_usize(len)?;
    if len == 0 {
        return Ok(());
    }
    let dest = as_usize(dest)?;
    let offset = as_usize_saturated(offset);
    interp.frame.memory.ensure(dest, len)?;
    let code = interp.host.code(address);
    interp.frame.memory.set_data(dest, offset, len, &code);
    Ok(())
}

pub(crate) fn blockhash(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [number] = interp.frame.stack.popn()?;
    // The host enforces the servable window; numbers past a u64 cannot
    // name a block at all.
    let hash = match number.try_to_u64() {
        Some(number) => interp.host.block_hash(number),
        None => B256::ZERO,
    };
    interp.frame.stack.push(hash.into())
}

pub(crate) fn sload(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [key] = interp.frame.stack.popn()?;
    let address = interp.frame.contract.address;
    let cold = interp.access_list.warm_slot(address, key);
    interp.gas.consume(gas::sload_cost(interp.spec, cold))?;
    let value = interp.host.sload(address, key);
    interp.frame.stack.push(value)
}

/// SSTORE. The access-list touch comes first, then the host write (which
/// reports the original and prior values), then the gas charge and the
/// refund adjustment. The frame's snapshot rollback makes the
/// charge-after-write ordering safe.
pub(crate) fn sstore(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    interp.require_non_static()?;
    let [key, value] = interp.frame.stack.popn()?;
    let address = interp.frame.contract.address;
    let cold = interp.access_list.warm_slot(address, key);
    let result = interp.host.sstore(address, key, value);
    // EIP-1706: no storage writes on a bare stipend.
    if interp.spec.has(Features::NET_METERED_SSTORE)
        && interp.gas.remaining() <= interp.spec.call_stipend
    {
        return Err(InstructionError::OutOfGas);
    }
    interp.gas.consume(gas::sstore_cost(
        interp.spec,
        result.original_value,
        result.current_value,
        value,
        cold,
    ))?;
    interp.gas.adjust_refund(gas::sstore_refund(
        interp.spec,
        result.original_value,
        result.current_value,
        value,
    ));
    Ok(())
}

pub(crate) fn tload(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [key] = interp.frame.stack.popn()?;
    let address = interp.frame.contract.address;
    let value = interp.host.tload(address, key);
    interp.frame.stack.push(value)
}

pub(crate) fn tstore(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    interp.require_non_static()?;
    let [key, value] = interp.frame.stack.popn()?;
    let address = interp.frame.contract.address;
    interp.host.tstore(address, key, value);
    Ok(())
}

/// Topic and data pricing plus expansion for LOG0-LOG4.
pub(crate) fn log_gas<const N: usize>(
    interp: &Interpreter<'_>,
) -> Result<u64, InstructionError> {
    let offset = interp.frame.stack.peek(0)?;
    let len = interp.frame.stack.peek(1)?;
    let byte_len = if len.is_zero() { 0 } else { as_usize(len)? };
    let cost = gas::log_cost(N as u64, byte_len).ok_or(InstructionError::OutOfGas)?;
    let expansion = expansion_gas(interp, offset, len)?;
    cost.checked_add(expansion).ok_or(InstructionError::OutOfGas)
}

pub(crate) fn log<const N: usize>(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    interp.require_non_static()?;
    let [offset, len] = interp.frame.stack.popn()?;
    let len = as_usize(len)?;
    let data = if len == 0 {
        Vec::new()
    } else {
        let offset = as_usize(offset)?;
        interp.frame.memory.ensure(offset, len)?;
        interp.frame.memory.slice(offset, len).to_vec()
    };
    let raw_topics = interp.frame.stack.popn::<N>()?;
    let topics = raw_topics.map(B256::from);
    let address = interp.frame.contract.address;
    interp.host.log(address, &topics, &data);
    Ok(())
}

/// SELFDESTRUCT: charges the beneficiary touch, credits the pre-London
/// refund, reports the destruction to the host and halts the frame with
/// success. Whether the account is actually removed (EIP-6780) is host
/// policy.
pub(crate) fn selfdestruct(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    interp.require_non_static()?;
    let [beneficiary] = interp.frame.stack.popn()?;
    let beneficiary = Address::from_word(beneficiary);
    let address = interp.frame.contract.address;
    let cold = interp.access_list.warm_account(beneficiary);
    let mut cost = 0;
    if cold && interp.spec.cold_account_access_cost != 0 {
        cost += interp.spec.cold_account_access_cost;
    }
    if !interp.host.account_exists(beneficiary) && !interp.host.balance(address).is_zero() {
        cost += constants::NEWACCOUNT;
    }
    interp.gas.consume(cost)?;
    if interp.spec.selfdestruct_refund != 0 {
        interp.gas.adjust_refund(interp.spec.selfdestruct_refund as i64);
    }
    interp.host.selfdestruct(address, beneficiary);
    interp.halt();
    Ok(())
}
