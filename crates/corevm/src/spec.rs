//! Hardfork identifiers and the fork-parameterised rule table.

use core::{
    fmt::{self, Display},
    str::FromStr,
};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::constants;

/// Identifier of an Ethereum execution-layer revision.
///
/// Revisions are backward compatible, so a later identifier always has
/// every earlier identifier enabled.
#[repr(u8)]
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
)]
#[allow(non_camel_case_types, clippy::upper_case_acronyms, missing_docs)]
pub enum SpecId {
    FRONTIER = 0,
    HOMESTEAD,
    TANGERINE,
    SPURIOUS_DRAGON,
    BYZANTIUM,
    CONSTANTINOPLE,
    PETERSBURG,
    ISTANBUL,
    BERLIN,
    LONDON,
    MERGE,
    SHANGHAI,
    CANCUN,
    #[default]
    PRAGUE,
}

impl SpecId {
    /// All revisions, oldest first.
    pub const ALL: [Self; 14] = [
        Self::FRONTIER,
        Self::HOMESTEAD,
        Self::TANGERINE,
        Self::SPURIOUS_DRAGON,
        Self::BYZANTIUM,
        Self::CONSTANTINOPLE,
        Self::PETERSBURG,
        Self::ISTANBUL,
        Self::BERLIN,
        Self::LONDON,
        Self::MERGE,
        Self::SHANGHAI,
        Self::CANCUN,
        Self::PRAGUE,
    ];

    /// Checks whether `other` is enabled in the current revision.
    pub const fn is_enabled(self, other: Self) -> bool {
        other as u8 <= self as u8
    }
}

/// String identifiers for the revisions.
#[allow(missing_docs)]
pub mod name {
    pub const FRONTIER: &str = "Frontier";
    pub const HOMESTEAD: &str = "Homestead";
    pub const TANGERINE: &str = "Tangerine";
    pub const SPURIOUS_DRAGON: &str = "SpuriousDragon";
    pub const BYZANTIUM: &str = "Byzantium";
    pub const CONSTANTINOPLE: &str = "Constantinople";
    pub const PETERSBURG: &str = "Petersburg";
    pub const ISTANBUL: &str = "Istanbul";
    pub const BERLIN: &str = "Berlin";
    pub const LONDON: &str = "London";
    pub const MERGE: &str = "Merge";
    pub const SHANGHAI: &str = "Shanghai";
    pub const CANCUN: &str = "Cancun";
    pub const PRAGUE: &str = "Prague";
}

/// Error returned when parsing an unknown hardfork name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown hardfork")]
pub struct UnknownHardfork;

impl From<SpecId> for &'static str {
    fn from(spec_id: SpecId) -> Self {
        match spec_id {
            SpecId::FRONTIER => name::FRONTIER,
            SpecId::HOMESTEAD => name::HOMESTEAD,
            SpecId::TANGERINE => name::TANGERINE,
            SpecId::SPURIOUS_DRAGON => name::SPURIOUS_DRAGON,
            SpecId::BYZANTIUM => name::BYZANTIUM,
            SpecId::CONSTANTINOPLE => name::CONSTANTINOPLE,
            SpecId::PETERSBURG => name::PETERSBURG,
            SpecId::ISTANBUL => name::ISTANBUL,
            SpecId::BERLIN => name::BERLIN,
            SpecId::LONDON => name::LONDON,
            SpecId::MERGE => name::MERGE,
            SpecId::SHANGHAI => name::SHANGHAI,
            SpecId::CANCUN => name::CANCUN,
            SpecId::PRAGUE => name::PRAGUE,
        }
    }
}

impl FromStr for SpecId {
    type Err = UnknownHardfork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            name::FRONTIER => Ok(Self::FRONTIER),
            name::HOMESTEAD => Ok(Self::HOMESTEAD),
            name::TANGERINE => Ok(Self::TANGERINE),
            name::SPURIOUS_DRAGON => Ok(Self::SPURIOUS_DRAGON),
            name::BYZANTIUM => Ok(Self::BYZANTIUM),
            name::CONSTANTINOPLE => Ok(Self::CONSTANTINOPLE),
            name::PETERSBURG => Ok(Self::PETERSBURG),
            name::ISTANBUL => Ok(Self::ISTANBUL),
            name::BERLIN => Ok(Self::BERLIN),
            name::LONDON => Ok(Self::LONDON),
            name::MERGE => Ok(Self::MERGE),
            name::SHANGHAI => Ok(Self::SHANGHAI),
            name::CANCUN => Ok(Self::CANCUN),
            name::PRAGUE => Ok(Self::PRAGUE),
            _ => Err(UnknownHardfork),
        }
    }
}

impl Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

bitflags::bitflags! {
    /// Opcode and rule availability switches carried by a [`Spec`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Features: u16 {
        /// PUSH0 (EIP-3855, Shanghai).
        const PUSH0 = 1 << 0;
        /// BASEFEE (EIP-3198, London).
        const BASEFEE = 1 << 1;
        /// DIFFICULTY reads the randomness beacon (EIP-4399, Merge).
        const PREVRANDAO = 1 << 2;
        /// TLOAD/TSTORE (EIP-1153, Cancun).
        const TSTORE = 1 << 3;
        /// MCOPY (EIP-5656, Cancun).
        const MCOPY = 1 << 4;
        /// BLOBHASH and BLOBBASEFEE (EIP-4844/7516, Cancun).
        const BLOB_OPCODES = 1 << 5;
        /// Blob gas accounting in the block environment (EIP-4844).
        const BLOB_GAS = 1 << 6;
        /// Delegation designators (EIP-7702, Prague).
        const EIP7702 = 1 << 7;
        /// BLS precompile address range (EIP-2537, Prague).
        const BLS_PRECOMPILES = 1 << 8;
        /// Extended BLOCKHASH window (EIP-2935, Prague).
        const HISTORICAL_BLOCK_HASHES = 1 << 9;
        /// SELFDESTRUCT is dispatchable at all. Chains that outlaw the
        /// opcode clear this flag.
        const SELFDESTRUCT = 1 << 10;
        /// Net-metered SSTORE pricing (EIP-2200, Istanbul).
        const NET_METERED_SSTORE = 1 << 11;
    }
}

/// The fork-varying rule table, created once per execution and read-only
/// for its duration.
///
/// Later revisions are derived from earlier ones by structural override in
/// [`Spec::new`], so every number appears exactly once per change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spec {
    /// The revision this table describes.
    pub id: SpecId,
    /// Chain identifier exposed by the CHAINID opcode.
    pub chain_id: u64,
    /// Availability switches.
    pub features: Features,
    /// Divisor capping the final refund against gas used.
    pub max_refund_quotient: u64,
    /// Refund for clearing a storage slot.
    pub sstore_clears_schedule: u64,
    /// Refund for SELFDESTRUCT (zero from London).
    pub selfdestruct_refund: u64,
    /// Cold storage-slot surcharge (zero before Berlin).
    pub cold_sload_cost: u64,
    /// Cold account surcharge (zero before Berlin).
    pub cold_account_access_cost: u64,
    /// Warm storage read cost, also TLOAD/TSTORE gas.
    pub warm_storage_read_cost: u64,
    /// SLOAD gas: the flat cost before Berlin, the warm cost after.
    pub sload_gas: u64,
    /// SSTORE gas for a zero to non-zero first transition.
    pub sstore_set_gas: u64,
    /// SSTORE gas for other first transitions. Berlin folds the cold
    /// surcharge out of this number (EIP-2929).
    pub sstore_reset_gas: u64,
    /// Gas granted to a value-bearing callee on top of the forwarded gas.
    pub call_stipend: u64,
    /// Flat account-touch gas before Berlin (zero after; cold/warm then
    /// applies).
    pub account_access_gas: u64,
    /// SELFDESTRUCT base gas.
    pub selfdestruct_gas: u64,
    /// Per-byte gas on the EXP exponent.
    pub exp_byte_gas: u64,
    /// Per-byte gas for non-zero calldata.
    pub nonzero_calldata_gas: u64,
    /// Deployed code size cap.
    pub max_code_size: usize,
    /// Initcode size cap (EIP-3860), absent before Shanghai.
    pub max_initcode_size: Option<usize>,
    /// Per-word initcode gas (EIP-3860).
    pub initcode_word_cost: u64,
    /// Blob target per block.
    pub target_blobs_per_block: u64,
    /// Blob cap per block.
    pub max_blobs_per_block: u64,
}

impl Spec {
    /// Builds the rule table for `id` on chain id 1.
    pub fn new(id: SpecId) -> Self {
        let mut spec = Self {
            id,
            chain_id: 1,
            features: Features::SELFDESTRUCT,
            max_refund_quotient: constants::MAX_REFUND_QUOTIENT,
            sstore_clears_schedule: constants::SSTORE_CLEARS_SCHEDULE,
            selfdestruct_refund: constants::SELFDESTRUCT_REFUND,
            cold_sload_cost: 0,
            cold_account_access_cost: 0,
            warm_storage_read_cost: 0,
            sload_gas: constants::SLOAD,
            sstore_set_gas: constants::SSTORE_SET,
            sstore_reset_gas: constants::SSTORE_RESET,
            call_stipend: constants::CALL_STIPEND,
            account_access_gas: constants::ACCOUNT_ACCESS,
            selfdestruct_gas: 0,
            exp_byte_gas: constants::EXP_BYTE,
            nonzero_calldata_gas: constants::TX_DATA_NON_ZERO,
            max_code_size: usize::MAX,
            max_initcode_size: None,
            initcode_word_cost: constants::INITCODE_WORD_COST,
            target_blobs_per_block: 0,
            max_blobs_per_block: 0,
        };
        if id.is_enabled(SpecId::TANGERINE) {
            spec.sload_gas = constants::SLOAD_EIP150;
            spec.account_access_gas = constants::ACCOUNT_ACCESS_EIP150;
            spec.selfdestruct_gas = constants::SELFDESTRUCT;
        }
        if id.is_enabled(SpecId::SPURIOUS_DRAGON) {
            spec.exp_byte_gas = constants::EXP_BYTE_EIP160;
            spec.max_code_size = constants::MAX_CODE_SIZE;
        }
        if id.is_enabled(SpecId::ISTANBUL) {
            spec.sload_gas = constants::SLOAD_EIP1884;
            spec.nonzero_calldata_gas = constants::TX_DATA_NON_ZERO_EIP2028;
            spec.features |= Features::NET_METERED_SSTORE;
        }
        if id.is_enabled(SpecId::BERLIN) {
            spec.cold_sload_cost = constants::COLD_SLOAD_COST;
            spec.cold_account_access_cost = constants::COLD_ACCOUNT_ACCESS_COST;
            spec.warm_storage_read_cost = constants::WARM_STORAGE_READ_COST;
            spec.sload_gas = constants::WARM_STORAGE_READ_COST;
            spec.sstore_reset_gas = constants::SSTORE_RESET - constants::COLD_SLOAD_COST;
            spec.account_access_gas = 0;
        }
        if id.is_enabled(SpecId::LONDON) {
            spec.features |= Features::BASEFEE;
            spec.max_refund_quotient = constants::MAX_REFUND_QUOTIENT_EIP3529;
            spec.sstore_clears_schedule = constants::SSTORE_CLEARS_SCHEDULE_EIP3529;
            spec.selfdestruct_refund = 0;
        }
        if id.is_enabled(SpecId::MERGE) {
            spec.features |= Features::PREVRANDAO;
        }
        if id.is_enabled(SpecId::SHANGHAI) {
            spec.features |= Features::PUSH0;
            spec.max_initcode_size = Some(constants::MAX_INITCODE_SIZE);
        }
        if id.is_enabled(SpecId::CANCUN) {
            spec.features |=
                Features::TSTORE | Features::MCOPY | Features::BLOB_OPCODES | Features::BLOB_GAS;
            spec.target_blobs_per_block = constants::TARGET_BLOBS_PER_BLOCK_CANCUN;
            spec.max_blobs_per_block = constants::MAX_BLOBS_PER_BLOCK_CANCUN;
        }
        if id.is_enabled(SpecId::PRAGUE) {
            spec.features |= Features::EIP7702
                | Features::BLS_PRECOMPILES
                | Features::HISTORICAL_BLOCK_HASHES;
            spec.target_blobs_per_block = constants::TARGET_BLOBS_PER_BLOCK_PRAGUE;
            spec.max_blobs_per_block = constants::MAX_BLOBS_PER_BLOCK_PRAGUE;
        }
        spec
    }

    /// The shared, chain-id-1 rule table for `id`.
    pub fn for_id(id: SpecId) -> &'static Self {
        static SPECS: Lazy<[Spec; 14]> = Lazy::new(|| SpecId::ALL.map(Spec::new));
        &SPECS[id as usize]
    }

    /// Overrides the chain id.
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Checks whether revision `other` is enabled.
    pub fn enabled(&self, other: SpecId) -> bool {
        self.id.is_enabled(other)
    }

    /// Checks an availability switch.
    pub fn has(&self, features: Features) -> bool {
        self.features.contains(features)
    }
}
