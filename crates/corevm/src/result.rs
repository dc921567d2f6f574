use serde::{Deserialize, Serialize};

/// Terminal state of an execution frame.
///
/// Only [`Success`](Self::Success) and [`Revert`](Self::Revert) carry a
/// return-data payload; every other state surfaces with no output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// The frame ran to STOP, RETURN, SELFDESTRUCT or the end of code.
    Success,
    /// The frame executed REVERT (or attempted a state write in a static
    /// context). Return data is preserved; unused gas goes back to the
    /// caller.
    Revert,
    /// The gas limit was exhausted. The full limit is reported as used.
    OutOfGas,
    /// A push would have exceeded the 1024-slot stack.
    StackOverflow,
    /// A pop, peek, dup or swap needed more elements than were present.
    StackUnderflow,
    /// An undefined or not-yet-active opcode was fetched, or an operand
    /// did not fit a machine word where one was required.
    InvalidOpcode,
    /// A jump targeted a byte not marked as a valid JUMPDEST.
    InvalidJump,
    /// The program counter left the code or landed on a truncated
    /// immediate.
    InvalidProgramCounter,
    /// The 1024-frame call depth limit was exceeded.
    CallDepthExceeded,
}

impl ExecutionStatus {
    /// Whether this is [`Success`](Self::Success).
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Whether this is [`Revert`](Self::Revert).
    pub const fn is_revert(&self) -> bool {
        matches!(self, Self::Revert)
    }
}

/// Internal error kinds raised by instruction handlers and the dispatch
/// loop. These never escape the crate as errors; [`Interpreter::run`]
/// converts each one into an [`ExecutionStatus`].
///
/// [`Interpreter::run`]: crate::Interpreter::run
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InstructionError {
    /// A gas charge would have pushed `used` past the limit.
    #[error("out of gas")]
    OutOfGas,
    /// Push onto a full stack.
    #[error("stack overflow")]
    StackOverflow,
    /// Pop, peek, dup or swap past the bottom of the stack.
    #[error("stack underflow")]
    StackUnderflow,
    /// Jump destination is not a valid JUMPDEST.
    #[error("invalid jump destination")]
    InvalidJump,
    /// Program counter outside the code or on a truncated immediate.
    #[error("invalid program counter")]
    InvalidProgramCounter,
    /// Undefined or not-yet-active opcode.
    #[error("invalid opcode")]
    InvalidOpcode,
    /// A 256-bit operand does not fit in a machine word where one is
    /// required (memory offsets, code offsets, return-data ranges).
    #[error("offset out of machine range")]
    InvalidOffset,
    /// A state-modifying opcode ran inside a static call.
    #[error("state write in static call")]
    StateWriteInStaticCall,
    /// The REVERT opcode executed.
    #[error("execution reverted")]
    Revert,
}

impl From<InstructionError> for ExecutionStatus {
    fn from(error: InstructionError) -> Self {
        match error {
            InstructionError::OutOfGas => Self::OutOfGas,
            InstructionError::StackOverflow => Self::StackOverflow,
            InstructionError::StackUnderflow => Self::StackUnderflow,
            InstructionError::InvalidJump => Self::InvalidJump,
            InstructionError::InvalidProgramCounter => Self::InvalidProgramCounter,
            InstructionError::InvalidOpcode => Self::InvalidOpcode,
            InstructionError::InvalidOffset => Self::InvalidOpcode,
            InstructionError::StateWriteInStaticCall => Self::Revert,
            InstructionError::Revert => Self::Revert,
        }
    }
}

/// Outcome of a completed execution: terminal status, gas accounting and
/// the optional return payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Terminal status of the outermost frame.
    pub status: ExecutionStatus,
    /// Gas consumed, after returning unused subcall gas.
    pub gas_used: u64,
    /// Refund granted at frame end, already capped by the fork's refund
    /// quotient. Zero unless the status is success.
    pub gas_refunded: u64,
    /// RETURN or REVERT payload; `None` for every other terminal state.
    pub output: Option<Vec<u8>>,
}

impl ExecutionResult {
    /// Whether execution finished successfully.
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The output payload, or an empty slice.
    pub fn output_or_default(&self) -> &[u8] {
        self.output.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_is_deterministic() {
        assert_eq!(ExecutionStatus::from(InstructionError::OutOfGas), ExecutionStatus::OutOfGas);
        assert_eq!(
            ExecutionStatus::from(InstructionError::InvalidOffset),
            ExecutionStatus::InvalidOpcode
        );
        assert_eq!(
            ExecutionStatus::from(InstructionError::StateWriteInStaticCall),
            ExecutionStatus::Revert
        );
        assert_eq!(ExecutionStatus::from(InstructionError::Revert), ExecutionStatus::Revert);
    }
}
