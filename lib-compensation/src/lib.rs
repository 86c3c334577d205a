//! Gold4X Compensation Engine
//!
//! Pure, deterministic eligibility and compensation rules for Gold4X accounts.
//!
//! # Design Principles
//!
//! 1. **Pure functions** - No I/O, no global state, no clock
//! 2. **Deterministic** - Same snapshot and rules produce identical outputs
//! 3. **No floats** - Amounts are u128 base units, rates are basis points
//! 4. **Recomputed, never stored** - Rank and unlock state derive from the
//!    current snapshot on every call
//!
//! # Type Architecture
//!
//! Pure data types (`RuleTable`, `AccountSnapshot`, `TokenAmount`, ...) are
//! defined in `lib-types` and re-exported here for convenience. The rule table
//! is built from named presets or a TOML file (see [`config`]) and validated
//! once at startup.
//!
//! # Usage
//!
//! ```ignore
//! use lib_compensation::{canonical_rule_table, derive_view, AccountSnapshot, TokenAmount};
//!
//! let rules = canonical_rule_table();
//! let mut snapshot = AccountSnapshot::new("0x1111111111111111111111111111111111111111".parse()?);
//! snapshot.total_invested = TokenAmount::from_tokens(1000);
//! snapshot.roi_eligible_principal = TokenAmount::from_tokens(950);
//!
//! let view = derive_view(&snapshot, &rules);
//! assert_eq!(view.cap.cap, TokenAmount::from_tokens(4000));
//! ```

pub mod presets;
pub mod rules;
pub mod config;
pub mod levels;
pub mod roi;
pub mod rank;
pub mod cap;
pub mod referrer;
pub mod income;
pub mod view;

mod golden_vectors;

// Re-export pure data types from lib-types (canonical location)
pub use lib_types::{
    AccountSnapshot, BotPool, Bps, IncomeBreakdown, IncomeSource, LevelIncome, Observed,
    RankName, RankTier, ReferralLevel, RuleTable, SnapshotField, TokenAmount, TokenType,
    WalletAddress,
};

// Re-export computation functions
pub use presets::{
    build_rule_table, canonical_rule_table, RankPreset, ReferralPreset, RoiPreset,
    GENESIS_ADDRESS,
};
pub use rules::{RuleTableError, RuleTableExt};
pub use config::{load_rule_table, ConfigError, RuleTableConfig};
pub use levels::{unlocked_level_count, unlocked_levels, LevelStatus};
pub use roi::{daily_roi, g4x_to_usd, investment_quote, usd_to_g4x, InvestmentQuote, QuoteError};
pub use rank::{rank_status, reconcile_rank, NextRank, RankReconciliation, RankStatus};
pub use cap::{earnings_cap_status, CapStatus};
pub use referrer::{
    is_genesis, referrer_eligibility, validate_registration, ReferrerEligibility,
    RegistrationRuleError,
};
pub use income::{autopool_status, income_summary, AutopoolStatus, IncomeSummary};
pub use view::{derive_view, DerivedView};
