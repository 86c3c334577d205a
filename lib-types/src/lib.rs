//! Gold4X primitives.
//! Stable, serialization-neutral, behavior-free.
//!
//! Rule: amounts are integer base units, rates are basis points. No floats.

pub mod primitives;
pub mod compensation;
pub mod account;
pub mod registry;

pub use primitives::{
    Bps, PrimitiveError, TokenAmount, TxHash, WalletAddress, BPS_DENOMINATOR, TOKEN_DECIMALS,
    UNITS_PER_TOKEN,
};
pub use compensation::{RankName, RankTier, ReferralLevel, RuleTable};
pub use account::{
    AccountSnapshot, BotPool, IncomeBreakdown, IncomeSource, LevelIncome, Observed, SnapshotField,
};
pub use registry::{
    ErrorResponse, InvestRequest, InvestResponse, InvestmentRecord, ReferralValidation,
    RegisterRequest, RegisterResponse, TokenType, UserLookup, UserRecord,
};
