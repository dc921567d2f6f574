use std::collections::VecDeque;

use crate::{
    host::{CallExecutor, CallInputs, CallResult, CallScope},
    result::ExecutionStatus,
};

/// A scripted [`CallExecutor`]: records every frame request and replays
/// queued results (or an empty success once the queue runs dry).
#[derive(Debug, Default)]
pub struct MockCallExecutor {
    /// Every frame request received, in order.
    pub requests: Vec<CallInputs>,
    /// Results to hand back, front first.
    pub responses: VecDeque<CallResult>,
}

impl MockCallExecutor {
    /// Creates an executor that answers everything with empty success.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a result for the next frame request.
    pub fn respond_with(mut self, result: CallResult) -> Self {
        self.responses.push_back(result);
        self
    }
}

impl CallExecutor for MockCallExecutor {
    fn call(&mut self, _scope: CallScope<'_>, inputs: CallInputs) -> CallResult {
        self.requests.push(inputs);
        self.responses.pop_front().unwrap_or(CallResult {
            status: ExecutionStatus::Success,
            gas_used: 0,
            gas_refund: 0,
            output: Vec::new(),
        })
    }
}
