use crate::{
    constants, gas,
    host::{CallInputs, CallKind},
    interpreter::{as_usize, Interpreter},
    primitives::{Address, U256},
    result::InstructionError,
};

/// Converts an operand pair into a charged, zeroed memory region and
/// returns it as machine words.
fn memory_region(
    interp: &mut Interpreter<'_>,
    offset: U256,
    len: U256,
) -> Result<(usize, usize), InstructionError> {
    let len = as_usize(len)?;
    if len == 0 {
        return Ok((0, 0));
    }
    let offset = as_usize(offset)?;
    interp.resize_memory(offset, len)?;
    Ok((offset, len))
}

/// EIP-150: at most 63/64 of the remaining gas goes to the child.
fn forwardable_gas(remaining: u64, requested: U256) -> u64 {
    let cap = remaining - remaining / 64;
    cap.min(requested.to_u64_saturating())
}

/// Runs the child frame and applies its outcome: return-data buffer,
/// output region, unused gas, refund aggregation and the success flag.
/// Child failures never propagate as errors.
fn run_subcall(
    interp: &mut Interpreter<'_>,
    inputs: CallInputs,
    out_offset: usize,
    out_len: usize,
) -> Result<(), InstructionError> {
    let child_limit = inputs.gas_limit;
    let result = interp.subcall(inputs);
    interp.gas.erase_cost(child_limit.saturating_sub(result.gas_used));
    let success = result.status.is_success();
    if success {
        interp.gas.absorb_refund(result.gas_refund);
    }
    interp.return_data = result.output;
    let copy_len = out_len.min(interp.return_data.len());
    if copy_len > 0 {
        interp.frame.memory.set(out_offset, &interp.return_data[..copy_len]);
    }
    interp.frame.stack.push(U256::from(success))?;
    interp.pc += 1;
    Ok(())
}

pub(crate) fn call(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [gas_req, to, value, in_offset, in_len, out_offset, out_len] =
        interp.frame.stack.popn()?;
    let to = Address::from_word(to);
    let has_transfer = !value.is_zero();
    if interp.is_static && has_transfer {
        return Err(InstructionError::StateWriteInStaticCall);
    }
    let (in_offset, in_len) = memory_region(interp, in_offset, in_len)?;
    let (out_offset, out_len) = memory_region(interp, out_offset, out_len)?;
    let input = interp.frame.memory.slice(in_offset, in_len).to_vec();

    let cold = interp.access_list.warm_account(to);
    let mut cost = gas::account_access_cost(interp.spec, cold);
    if has_transfer {
        cost += constants::CALLVALUE;
        // EIP-161: creating the callee costs extra, but only when value
        // actually moves there.
        if !interp.host.account_exists(to) {
            cost += constants::NEWACCOUNT;
        }
    }
    interp.gas.consume(cost)?;

    let gas_limit = forwardable_gas(interp.gas.remaining(), gas_req);
    interp.gas.consume(gas_limit)?;
    let stipend = if has_transfer { constants::CALL_STIPEND } else { 0 };

    let inputs = CallInputs {
        kind: CallKind::Call,
        target: to,
        bytecode_address: to,
        caller: interp.frame.contract.address,
        value,
        input,
        gas_limit: gas_limit + stipend,
        is_static: interp.is_static,
        transfer_value: has_transfer,
    };
    run_subcall(interp, inputs, out_offset, out_len)
}

pub(crate) fn call_code(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [gas_req, to, value, in_offset, in_len, out_offset, out_len] =
        interp.frame.stack.popn()?;
    let to = Address::from_word(to);
    let has_transfer = !value.is_zero();
    let (in_offset, in_len) = memory_region(interp, in_offset, in_len)?;
    let (out_offset, out_len) = memory_region(interp, out_offset, out_len)?;
    let input = interp.frame.memory.slice(in_offset, in_len).to_vec();

    let cold = interp.access_list.warm_account(to);
    let mut cost = gas::account_access_cost(interp.spec, cold);
    if has_transfer {
        cost += constants::CALLVALUE;
    }
    interp.gas.consume(cost)?;

    let gas_limit = forwardable_gas(interp.gas.remaining(), gas_req);
    interp.gas.consume(gas_limit)?;
    let stipend = if has_transfer { constants::CALL_STIPEND } else { 0 };

    let inputs = CallInputs {
        kind: CallKind::CallCode,
        // Callee code runs against this frame's own storage.
        target: interp.frame.contract.address,
        bytecode_address: to,
        caller: interp.frame.contract.address,
        value,
        input,
        gas_limit: gas_limit + stipend,
        is_static: interp.is_static,
        transfer_value: false,
    };
    run_subcall(interp, inputs, out_offset, out_len)
}

pub(crate) fn delegate_call(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [gas_req, to, in_offset, in_len, out_offset, out_len] = interp.frame.stack.popn()?;
    let to = Address::from_word(to);
    let (in_offset, in_len) = memory_region(interp, in_offset, in_len)?;
    let (out_offset, out_len) = memory_region(interp, out_offset, out_len)?;
    let input = interp.frame.memory.slice(in_offset, in_len).to_vec();

    let cold = interp.access_list.warm_account(to);
    interp.gas.consume(gas::account_access_cost(interp.spec, cold))?;

    let gas_limit = forwardable_gas(interp.gas.remaining(), gas_req);
    interp.gas.consume(gas_limit)?;

    let inputs = CallInputs {
        kind: CallKind::DelegateCall,
        // The parent's identity carries through: its storage address,
        // its caller and its value.
        target: interp.frame.contract.address,
        bytecode_address: to,
        caller: interp.frame.contract.caller,
        value: interp.frame.contract.value,
        input,
        gas_limit,
        is_static: interp.is_static,
        transfer_value: false,
    };
    run_subcall(interp, inputs, out_offset, out_len)
}

pub(crate) fn static_call(interp: &mut Interpreter<'_>) -> Result<(), InstructionError> {
    let [gas_req, to, in_offset, in_len, out_offset, out_len] = interp.frame.stack.popn()?;
    let to = Address::from_word(to);
    let (in_offset, in_len) = memory_region(interp, in_offset, in_len)?;
    let (out_offset, out_len) = memory_region(interp, out_offset, out_len)?;
    let input = interp.frame.memory.slice(in_offset, in_len).to_vec();

    let cold = interp.access_list.warm_account(to);
    interp.gas.consume(gas::account_access_cost(interp.spec, cold))?;

    let gas_limit = forwardable_gas(interp.gas.remaining(), gas_req);
    interp.gas.consume(gas_limit)?;

    let inputs = CallInputs {
        kind: CallKind::StaticCall,
        target: to,
        bytecode_address: to,
        caller: interp.frame.contract.address,
        value: U256::ZERO,
        input,
        gas_limit,
        is_static: true,
        transfer_value: false,
    };
    run_subcall(interp, inputs, out_offset, out_len)
}

pub(crate) fn create<const IS_CREATE2: bool>(
    interp: &mut Interpreter<'_>,
) -> Result<(), InstructionError> {
    interp.require_non_static()?;
    let [value, code_offset, len] = interp.frame.stack.popn()?;
    let len = as_usize(len)?;

    let mut init_code = Vec::new();
    if len != 0 {
        // EIP-3860: cap and meter initcode.
        if let Some(max_initcode_size) = interp.spec.max_initcode_size {
            if len > max_initcode_size {
                return Err(InstructionError::OutOfGas);
            }
            let cost = gas::initcode_cost(len).ok_or(InstructionError::OutOfGas)?;
            interp.gas.consume(cost)?;
        }
        let code_offset = as_usize(code_offset)?;
        interp.resize_memory(code_offset, len)?;
        init_code = interp.frame.memory.slice(code_offset, len).to_vec();
    }

    let kind = if IS_CREATE2 {
        let [salt] = interp.frame.stack.popn()?;
        // EIP-1014: the address derivation hashes the initcode.
        let cost = gas::keccak256_word_cost(len).ok_or(InstructionError::OutOfGas)?;
        interp.gas.consume(cost)?;
        CallKind::Create2 { salt }
    } else {
        CallKind::Create
    };

    let remaining = interp.gas.remaining();
    let gas_limit = remaining - remaining / 64;
    interp.gas.consume(gas_limit)?;

    let inputs = CallInputs {
        kind,
        target: Address::ZERO,
        bytecode_address: Address::ZERO,
        caller: interp.frame.contract.address,
        value,
        input: init_code,
        gas_limit,
        is_static: interp.is_static,
        transfer_value: true,
    };
    let result = interp.subcall(inputs);
    interp.gas.erase_cost(gas_limit.saturating_sub(result.gas_used));
    match result.status {
        s if s.is_success() => {
            interp.gas.absorb_refund(result.gas_refund);
            // A successful create reports the new address and clears the
            // return buffer.
            interp.return_data.clear();
            let created = if result.output.len() == Address::len_bytes() {
                let mut bytes = [0u8; 20];
                bytes.copy_from_slice(&result.output);
                Address(bytes).into_word()
            } else {
                U256::ZERO
            };
            interp.frame.stack.push(created)?;
        }
        s if s.is_revert() => {
            interp.return_data = result.output;
            interp.frame.stack.push(U256::ZERO)?;
        }
        _ => {
            interp.return_data.clear();
            interp.frame.stack.push(U256::ZERO)?;
        }
    }
    interp.pc += 1;
    Ok(())
}
