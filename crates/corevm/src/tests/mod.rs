//! End-to-end bytecode scenarios driven through full frames and the
//! execution engine.

mod forks;
mod scenarios;
mod sstore;

use crate::{
    access_list::AccessList,
    bytecode::AnalyzedBytecode,
    env::Env,
    evm::SubcallExecutor,
    instructions::instruction_table,
    interpreter::{Contract, Interpreter},
    primitives::{Address, U256},
    result::ExecutionResult,
    spec::{Spec, SpecId},
    test_utils::MockHost,
};

pub(crate) const CONTRACT: Address = Address([0x10; 20]);
pub(crate) const CALLER: Address = Address([0x20; 20]);

/// A single interpreter frame under test, with its collaborators laid
/// out for inspection after the run.
pub(crate) struct Frame {
    spec_id: SpecId,
    code: Vec<u8>,
    gas_limit: u64,
    host: MockHost,
    env: Env,
    warm_slots: Vec<(Address, U256)>,
    is_static: bool,
}

pub(crate) struct Outcome {
    pub result: ExecutionResult,
    pub stack: Vec<U256>,
    pub refunded: i64,
    pub host: MockHost,
}

impl Frame {
    pub(crate) fn new(spec_id: SpecId, code: Vec<u8>) -> Self {
        Self {
            spec_id,
            code,
            gas_limit: 1_000_000,
            host: MockHost::new(),
            env: Env::default(),
            warm_slots: Vec::new(),
            is_static: false,
        }
    }

    pub(crate) fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub(crate) fn host(mut self, host: MockHost) -> Self {
        self.host = host;
        self
    }

    pub(crate) fn env(mut self, env: Env) -> Self {
        self.env = env;
        self
    }

    pub(crate) fn warm_slot(mut self, address: Address, key: U256) -> Self {
        self.warm_slots.push((address, key));
        self
    }

    pub(crate) fn is_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub(crate) fn run(self) -> Outcome {
        let spec = Spec::for_id(self.spec_id);
        let table = instruction_table(spec);
        let mut host = self.host;
        let mut access_list = AccessList::new();
        for (address, key) in self.warm_slots {
            access_list.warm_slot(address, key);
        }
        let mut executor = SubcallExecutor;
        let contract = Contract {
            address: CONTRACT,
            caller: CALLER,
            value: U256::ZERO,
            input: Vec::new(),
            bytecode: AnalyzedBytecode::analyze(self.code),
        };
        let mut interp = Interpreter::new(
            contract,
            self.gas_limit,
            self.is_static,
            0,
            spec,
            &self.env,
            &mut host,
            &mut access_list,
            &mut executor,
            &table,
        );
        let result = interp.run();
        let refunded = interp.gas.refunded();
        let stack = interp.frame.stack.data().to_vec();
        drop(interp);
        Outcome { result, stack, refunded, host }
    }
}

pub(crate) fn u(n: u64) -> U256 {
    U256::from(n)
}
