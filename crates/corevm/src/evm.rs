use tracing::trace;

use crate::{
    access_list::AccessList,
    bytecode::{AnalyzedBytecode, Bytecode},
    constants::CALL_DEPTH_LIMIT,
    env::Env,
    host::{CallExecutor, CallInputs, CallResult, CallScope, Host},
    instructions::{instruction_table, InstructionTable},
    interpreter::{Contract, Interpreter},
    primitives::Address,
    result::{ExecutionResult, ExecutionStatus},
    spec::{Features, Spec},
};

/// Loads and analyzes the code executable at `address`, resolving an
/// EIP-7702 delegation designator one hop when the fork allows them. A
/// designator behind a designator executes as plain bytes.
pub(crate) fn load_code(host: &mut dyn Host, spec: &Spec, address: Address) -> AnalyzedBytecode {
    let raw = host.code(address);
    match Bytecode::analyze(raw, spec.has(Features::EIP7702)) {
        Bytecode::Legacy(code) => code,
        Bytecode::Delegation(delegate) => AnalyzedBytecode::analyze(host.code(delegate)),
    }
}

/// The built-in [`CallExecutor`]: runs CALL-family frames recursively
/// against the host, with depth limiting, balance checks and snapshot
/// rollback.
///
/// CREATE and CREATE2 requests are reported as failures: the [`Host`]
/// interface exposes no account-creation primitives, so creation belongs
/// to an embedder-supplied executor. The handlers still meter the request
/// fully before it arrives here.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubcallExecutor;

impl CallExecutor for SubcallExecutor {
    fn call(&mut self, scope: CallScope<'_>, inputs: CallInputs) -> CallResult {
        let CallInputs {
            kind,
            target,
            bytecode_address,
            caller,
            value,
            input,
            gas_limit,
            is_static,
            transfer_value,
        } = inputs;

        if scope.depth > CALL_DEPTH_LIMIT {
            return CallResult::failure(ExecutionStatus::CallDepthExceeded, 0);
        }
        if kind.is_create() {
            return CallResult::failure(ExecutionStatus::InvalidOpcode, 0);
        }
        // An underfunded transfer fails before the child runs, handing
        // the forwarded gas straight back.
        if transfer_value && !value.is_zero() && scope.host.balance(caller) < value {
            return CallResult::failure(ExecutionStatus::Revert, 0);
        }

        let snapshot = scope.host.snapshot();
        let bytecode = load_code(&mut *scope.host, scope.spec, bytecode_address);
        if bytecode.is_empty() {
            return CallResult {
                status: ExecutionStatus::Success,
                gas_used: 0,
                gas_refund: 0,
                output: Vec::new(),
            };
        }

        trace!(depth = scope.depth, %target, gas_limit, ?kind, "entering call frame");
        let contract = Contract { address: target, caller, value, input, bytecode };
        let mut interp = Interpreter::new(
            contract,
            gas_limit,
            is_static,
            scope.depth,
            scope.spec,
            scope.env,
            &mut *scope.host,
            &mut *scope.access_list,
            self,
            scope.table,
        );
        let result = interp.run();
        // The raw counter, not the frame-capped value: the refund cap
        // applies once, at the end of the transaction.
        let raw_refund = interp.gas.refunded().max(0) as u64;
        trace!(depth = scope.depth, status = ?result.status, gas_used = result.gas_used, "call frame finished");

        match result.status {
            ExecutionStatus::Success => CallResult {
                status: ExecutionStatus::Success,
                gas_used: result.gas_used,
                gas_refund: raw_refund,
                output: result.output.unwrap_or_default(),
            },
            ExecutionStatus::Revert => {
                scope.host.revert_to(snapshot);
                CallResult {
                    status: ExecutionStatus::Revert,
                    gas_used: result.gas_used,
                    gas_refund: 0,
                    output: result.output.unwrap_or_default(),
                }
            }
            status => {
                // Every other halt burns the forwarded gas in full.
                scope.host.revert_to(snapshot);
                CallResult::failure(status, gas_limit)
            }
        }
    }
}

/// The execution engine: wires a fork rule table, an environment
/// snapshot, a host and the per-transaction access list into interpreter
/// frames.
#[derive(Debug)]
pub struct Evm<'a> {
    /// Fork rule table.
    pub spec: &'a Spec,
    /// Environment snapshot.
    pub env: &'a Env,
    host: &'a mut dyn Host,
    table: Box<InstructionTable>,
    access_list: AccessList,
}

impl<'a> Evm<'a> {
    /// Creates an engine for one fork, building its dispatch table once.
    pub fn new(spec: &'a Spec, env: &'a Env, host: &'a mut dyn Host) -> Self {
        Self {
            spec,
            env,
            host,
            table: Box::new(instruction_table(spec)),
            access_list: AccessList::new(),
        }
    }

    /// The access list of the most recent transaction.
    pub fn access_list(&self) -> &AccessList {
        &self.access_list
    }

    /// Executes `env.tx` against the code at `target` under `gas_limit`.
    ///
    /// Pre-warms the transaction principals (EIP-2929), snapshots the
    /// host, runs the outer frame and rolls state back unless the frame
    /// succeeded.
    pub fn transact(&mut self, target: Address, gas_limit: u64) -> ExecutionResult {
        trace!(%target, gas_limit, fork = %self.spec.id, "starting transaction");
        self.access_list.clear();
        self.access_list.warm_account(self.env.tx.origin);
        self.access_list.warm_account(self.env.tx.caller);
        self.access_list.warm_account(target);

        let snapshot = self.host.snapshot();
        let bytecode = load_code(&mut *self.host, self.spec, target);
        let contract = Contract {
            address: target,
            caller: self.env.tx.caller,
            value: self.env.tx.value,
            input: self.env.tx.data.clone(),
            bytecode,
        };
        let mut executor = SubcallExecutor;
        let mut interp = Interpreter::new(
            contract,
            gas_limit,
            false,
            0,
            self.spec,
            self.env,
            &mut *self.host,
            &mut self.access_list,
            &mut executor,
            &*self.table,
        );
        let result = interp.run();
        if !result.is_success() {
            self.host.revert_to(snapshot);
        }
        trace!(status = ?result.status, gas_used = result.gas_used, "transaction finished");
        result
    }
}
