use crate::{
    access_list::AccessList,
    bytecode::AnalyzedBytecode,
    env::Env,
    gas::Gas,
    host::{CallExecutor, Host},
    instructions::InstructionTable,
    memory::Memory,
    opcode,
    primitives::{Address, U256},
    result::{ExecutionResult, ExecutionStatus, InstructionError},
    spec::Spec,
    stack::Stack,
};

/// The code and identity a frame executes under.
///
/// `address` is where storage applies. Under DELEGATECALL it is the
/// caller's frame address while `bytecode` is borrowed from the target.
#[derive(Debug, Clone)]
pub struct Contract {
    /// Address the frame executes as.
    pub address: Address,
    /// Caller visible to the frame.
    pub caller: Address,
    /// Value visible to the frame.
    pub value: U256,
    /// Input data of the frame.
    pub input: Vec<u8>,
    /// Analyzed bytecode being executed.
    pub bytecode: AnalyzedBytecode,
}

/// Per-frame execution state: the contract plus its operand stack and
/// linear memory. Created on frame entry, destroyed on exit.
#[derive(Debug)]
pub struct CallContext {
    /// Contract identity and code.
    pub contract: Contract,
    /// Operand stack.
    pub stack: Stack,
    /// Linear memory.
    pub memory: Memory,
}

impl CallContext {
    /// Creates a fresh frame for `contract`.
    pub fn new(contract: Contract) -> Self {
        Self { contract, stack: Stack::new(), memory: Memory::new() }
    }
}

/// The fetch-decode-execute loop over one call frame.
#[derive(Debug)]
pub struct Interpreter<'a> {
    /// Frame-local state.
    pub frame: CallContext,
    /// Gas accounting for this frame.
    pub gas: Gas,
    /// Program counter.
    pub pc: usize,
    /// Whether state writes are forbidden.
    pub is_static: bool,
    /// Call depth of this frame (0 for the outermost).
    pub depth: u32,
    /// Output of the most recent subcall, observable via RETURNDATA*.
    pub return_data: Vec<u8>,
    /// RETURN/REVERT payload of this frame.
    pub output: Option<Vec<u8>>,
    halted: bool,
    /// Fork rule table.
    pub spec: &'a Spec,
    /// Environment snapshot.
    pub env: &'a Env,
    /// Host state access.
    pub host: &'a mut dyn Host,
    /// Transaction-wide warm/cold list, shared with nested frames.
    pub access_list: &'a mut AccessList,
    /// Callback for nested frames.
    pub executor: &'a mut dyn CallExecutor,
    /// The fork's instruction table.
    pub table: &'a InstructionTable,
}

impl<'a> Interpreter<'a> {
    /// Builds an interpreter for one frame.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        contract: Contract,
        gas_limit: u64,
        is_static: bool,
        depth: u32,
        spec: &'a Spec,
        env: &'a Env,
        host: &'a mut dyn Host,
        access_list: &'a mut AccessList,
        executor: &'a mut dyn CallExecutor,
        table: &'a InstructionTable,
    ) -> Self {
        Self {
            frame: CallContext::new(contract),
            gas: Gas::new(gas_limit),
            pc: 0,
            is_static,
            depth,
            return_data: Vec::new(),
            output: None,
            halted: false,
            spec,
            env,
            host,
            access_list,
            executor,
            table,
        }
    }

    /// Whether a handler has requested a halt.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Requests a halt at the end of the current step.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Fails unless state writes are allowed in this frame.
    pub fn require_non_static(&self) -> Result<(), InstructionError> {
        if self.is_static {
            return Err(InstructionError::StateWriteInStaticCall);
        }
        Ok(())
    }

    /// Charges the expansion delta for `[offset, offset + len)` and grows
    /// memory. Used by handlers whose cost depends on host state and is
    /// therefore not in the dispatch table.
    pub fn resize_memory(&mut self, offset: usize, len: usize) -> Result<(), InstructionError> {
        if len == 0 {
            return Ok(());
        }
        let end = offset.checked_add(len).ok_or(InstructionError::InvalidOffset)?;
        let cost = self.gas.memory_expansion_cost(end)?;
        self.gas.consume(cost)?;
        self.frame.memory.ensure(offset, len)?;
        self.gas.update_memory_cost(self.frame.memory.len());
        Ok(())
    }

    /// Hands a fully metered frame request to the call executor,
    /// re-lending this frame's resources for the duration of the child.
    pub(crate) fn subcall(&mut self, inputs: crate::host::CallInputs) -> crate::host::CallResult {
        let scope = crate::host::CallScope {
            host: &mut *self.host,
            access_list: &mut *self.access_list,
            spec: self.spec,
            env: self.env,
            table: self.table,
            depth: self.depth + 1,
        };
        self.executor.call(scope, inputs)
    }

    /// Executes one instruction.
    ///
    /// The fixed order of duties: implicit STOP past the end of code;
    /// immediate-width bounds check; base gas; dynamic gas from stack
    /// peeks; the handler; memory price bookkeeping; and the program
    /// counter advance for non-control-flow opcodes.
    pub fn step(&mut self) -> Result<(), InstructionError> {
        let code_len = self.frame.contract.bytecode.len();
        if self.pc >= code_len {
            self.halted = true;
            return Ok(());
        }
        let op = self.frame.contract.bytecode.bytes()[self.pc];
        let immediate = opcode::immediate_len(op);
        if self.pc + 1 + immediate > code_len {
            return Err(InstructionError::InvalidProgramCounter);
        }
        let entry = self.table[op as usize];
        self.gas.consume(entry.base_gas)?;
        if let Some(dynamic_gas) = entry.dynamic_gas {
            let cost = dynamic_gas(self)?;
            self.gas.consume(cost)?;
        }
        let old_pc = self.pc;
        let memory_len = self.frame.memory.len();
        (entry.execute)(self)?;
        if self.frame.memory.len() != memory_len {
            self.gas.update_memory_cost(self.frame.memory.len());
        }
        if !self.halted && !entry.is_control_flow && self.pc == old_pc {
            self.pc = old_pc + 1 + immediate;
        }
        Ok(())
    }

    /// Runs the frame to completion and maps the outcome onto the public
    /// status space.
    pub fn run(&mut self) -> ExecutionResult {
        let status = loop {
            match self.step() {
                Ok(()) => {
                    if self.halted {
                        break ExecutionStatus::Success;
                    }
                }
                Err(error) => break error.into(),
            }
        };
        self.finish(status)
    }

    fn finish(&mut self, status: ExecutionStatus) -> ExecutionResult {
        match status {
            ExecutionStatus::Success => ExecutionResult {
                status,
                gas_used: self.gas.used(),
                gas_refunded: self.gas.final_refund(self.spec.max_refund_quotient),
                output: Some(self.output.take().unwrap_or_default()),
            },
            ExecutionStatus::Revert => ExecutionResult {
                status,
                gas_used: self.gas.used(),
                gas_refunded: 0,
                output: Some(self.output.take().unwrap_or_default()),
            },
            ExecutionStatus::OutOfGas => {
                self.gas.spend_all();
                ExecutionResult {
                    status,
                    gas_used: self.gas.used(),
                    gas_refunded: 0,
                    output: None,
                }
            }
            _ => ExecutionResult {
                status,
                gas_used: self.gas.used(),
                gas_refunded: 0,
                output: None,
            },
        }
    }
}

/// Converts a 256-bit operand into a machine word where one is required.
pub(crate) fn as_usize(value: U256) -> Result<usize, InstructionError> {
    value.try_to_usize().ok_or(InstructionError::InvalidOffset)
}

/// Saturating conversion for source offsets of the copy opcodes, where
/// out-of-range reads zero-fill instead of failing.
pub(crate) fn as_usize_saturated(value: U256) -> usize {
    value.try_to_usize().unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        evm::SubcallExecutor, instructions::instruction_table, spec::SpecId,
        test_utils::MockHost,
    };

    fn run_frame(spec_id: SpecId, code: Vec<u8>, gas_limit: u64) -> (ExecutionResult, Vec<U256>) {
        let spec = Spec::for_id(spec_id);
        let env = Env::default();
        let mut host = MockHost::new();
        let mut access_list = AccessList::new();
        let mut executor = SubcallExecutor;
        let table = instruction_table(spec);
        let contract = Contract {
            address: Address::ZERO,
            caller: Address::ZERO,
            value: U256::ZERO,
            input: Vec::new(),
            bytecode: AnalyzedBytecode::analyze(code),
        };
        let mut interp = Interpreter::new(
            contract,
            gas_limit,
            false,
            0,
            spec,
            &env,
            &mut host,
            &mut access_list,
            &mut executor,
            &table,
        );
        let result = interp.run();
        (result, interp.frame.stack.data().to_vec())
    }

    #[test]
    fn implicit_stop_past_end_of_code() {
        let (result, stack) = run_frame(SpecId::BERLIN, vec![0x60, 0x01], 100);
        assert_eq!(result.status, ExecutionStatus::Success);
        assert_eq!(result.gas_used, 3);
        assert_eq!(stack, vec![U256::ONE]);
    }

    #[test]
    fn truncated_push_immediate_is_invalid_pc() {
        // PUSH2 with a single immediate byte.
        let (result, _) = run_frame(SpecId::BERLIN, vec![0x61, 0x01], 100);
        assert_eq!(result.status, ExecutionStatus::InvalidProgramCounter);
    }

    #[test]
    fn base_gas_is_charged_before_side_effects() {
        // Two PUSH1s at 3 gas each; the second one cannot be paid for.
        let (result, stack) = run_frame(SpecId::BERLIN, vec![0x60, 0x01, 0x60, 0x02], 5);
        assert_eq!(result.status, ExecutionStatus::OutOfGas);
        assert_eq!(result.gas_used, 5);
        assert_eq!(stack, vec![U256::ONE]);
    }

    #[test]
    fn undefined_opcode_consumes_nothing() {
        let (result, _) = run_frame(SpecId::BERLIN, vec![0x0C], 100);
        assert_eq!(result.status, ExecutionStatus::InvalidOpcode);
        assert_eq!(result.gas_used, 0);
    }
}
