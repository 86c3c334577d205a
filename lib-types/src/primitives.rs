//! Canonical primitive types for the compensation engine
//!
//! Rule: two spellings of the same wallet are the same identity.
//!
//! These types are designed to be:
//! - Fixed-size (no dynamic allocation for identities)
//! - Canonical on the wire (lowercase hex, decimal-string amounts)
//! - Integer-only (amounts in 18-decimal base units, rates in basis points)

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Basis points for rate and percentage calculations (10000 = 100%)
pub type Bps = u32;

/// Denominator for basis point arithmetic
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Decimal places of every on-chain token amount (USDT, USDC, G4X)
pub const TOKEN_DECIMALS: u32 = 18;

/// Base units in one whole token
pub const UNITS_PER_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Parse failures for primitive types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    #[error("invalid wallet address: '{0}'")]
    InvalidAddress(String),

    #[error("invalid transaction hash: '{0}'")]
    InvalidTxHash(String),

    #[error("invalid token amount: '{0}'")]
    InvalidAmount(String),
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// 20-byte EVM wallet address
///
/// Parsing accepts any letter case; display is always lowercase `0x`-prefixed.
/// Equality is byte equality, so case variants compare equal.
#[derive(Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
pub struct WalletAddress(pub [u8; 20]);

impl WalletAddress {
    /// Create a new WalletAddress from raw bytes
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// The zero address, used on-chain as "no referrer"
    pub const fn zero() -> Self {
        Self([0u8; 20])
    }

    /// Get the underlying bytes
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl FromStr for WalletAddress {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = strip_hex_prefix(trimmed);
        if digits.len() != 40 {
            return Err(PrimitiveError::InvalidAddress(s.to_string()));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| PrimitiveError::InvalidAddress(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletAddress(0x{}..)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 20]> for WalletAddress {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for WalletAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for WalletAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WalletAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// 32-byte transaction hash
#[derive(Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
pub struct TxHash(pub [u8; 32]);

impl TxHash {
    /// Create a new TxHash from raw bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero hash
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl FromStr for TxHash {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = strip_hex_prefix(s.trim());
        if digits.len() != 64 {
            return Err(PrimitiveError::InvalidTxHash(s.to_string()));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| PrimitiveError::InvalidTxHash(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash(0x{}..)", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for TxHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Serialize for TxHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// ============================================================================
// AMOUNTS
// ============================================================================

/// Token amount in 18-decimal base units
///
/// Serialized as a decimal string (`"1000.0"`, `"14.5"`). Deserialization also
/// accepts JSON numbers so that plain JavaScript clients can post amounts.
#[derive(Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
pub struct TokenAmount(pub u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    /// Construct from raw base units
    pub const fn from_units(units: u128) -> Self {
        Self(units)
    }

    /// Construct from a whole number of tokens
    pub const fn from_tokens(tokens: u64) -> Self {
        Self(tokens as u128 * UNITS_PER_TOKEN)
    }

    /// Raw base units
    pub const fn units(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtraction floored at zero
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    pub const fn saturating_mul(self, factor: u128) -> Self {
        Self(self.0.saturating_mul(factor))
    }

    /// `self × bps / 10000`, truncating at base-unit precision
    pub const fn mul_bps(self, bps: Bps) -> Self {
        Self(self.0.saturating_mul(bps as u128) / BPS_DENOMINATOR)
    }

    /// `self × 10000 / bps`; zero when `bps` is zero
    pub const fn div_bps(self, bps: Bps) -> Self {
        if bps == 0 {
            return Self(0);
        }
        Self(self.0.saturating_mul(BPS_DENOMINATOR) / bps as u128)
    }

    /// `self / whole` in basis points, clamped to `[0, 10000]`
    ///
    /// Returns 0 when `whole` is zero.
    pub fn ratio_bps(self, whole: Self) -> Bps {
        if whole.0 == 0 {
            return 0;
        }
        let ratio = self.0.saturating_mul(BPS_DENOMINATOR) / whole.0;
        ratio.min(BPS_DENOMINATOR) as Bps
    }

    /// Render rounded half-up to two decimals, for display only
    pub fn display_2dp(&self) -> String {
        let cent = UNITS_PER_TOKEN / 100;
        let cents = self.0.saturating_add(cent / 2) / cent;
        format!("{}.{:02}", cents / 100, cents % 100)
    }
}

impl fmt::Debug for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenAmount({})", self)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / UNITS_PER_TOKEN;
        let frac = self.0 % UNITS_PER_TOKEN;
        if frac == 0 {
            write!(f, "{}.0", whole)
        } else {
            let digits = format!("{:018}", frac);
            write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
        }
    }
}

impl FromStr for TokenAmount {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || PrimitiveError::InvalidAmount(s.to_string());

        let (whole, frac) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(frac) || frac.len() > TOKEN_DECIMALS as usize {
            return Err(invalid());
        }

        let whole_units: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let frac_units: u128 = if frac.is_empty() {
            0
        } else {
            let raw: u128 = frac.parse().map_err(|_| invalid())?;
            raw * 10u128.pow(TOKEN_DECIMALS - frac.len() as u32)
        };

        whole_units
            .checked_mul(UNITS_PER_TOKEN)
            .and_then(|units| units.checked_add(frac_units))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct TokenAmountVisitor;

impl<'de> Visitor<'de> for TokenAmountVisitor {
    type Value = TokenAmount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative decimal token amount")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(TokenAmount::from_tokens(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(TokenAmount::from_tokens)
            .map_err(|_| E::custom(PrimitiveError::InvalidAmount(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if !v.is_finite() || v < 0.0 {
            return Err(E::custom(PrimitiveError::InvalidAmount(v.to_string())));
        }
        v.to_string().parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TokenAmountVisitor)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED_CASE: &str = "0x7B84e7E09d210b76ED9d2d51b8473ff83e424A29";

    #[test]
    fn test_wallet_address_case_insensitive() {
        let upper: WalletAddress = MIXED_CASE.parse().unwrap();
        let lower: WalletAddress = MIXED_CASE.to_lowercase().parse().unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.to_string(), MIXED_CASE.to_lowercase());
    }

    #[test]
    fn test_wallet_address_without_prefix() {
        let addr: WalletAddress = "7b84e7e09d210b76ed9d2d51b8473ff83e424a29".parse().unwrap();
        assert_eq!(addr.to_string(), "0x7b84e7e09d210b76ed9d2d51b8473ff83e424a29");
    }

    #[test]
    fn test_wallet_address_rejects_bad_input() {
        assert!("".parse::<WalletAddress>().is_err());
        assert!("0x1234".parse::<WalletAddress>().is_err());
        assert!("0xzz84e7e09d210b76ed9d2d51b8473ff83e424a29".parse::<WalletAddress>().is_err());
    }

    #[test]
    fn test_zero_address() {
        let zero: WalletAddress = "0x0000000000000000000000000000000000000000".parse().unwrap();
        assert!(zero.is_zero());
        assert_eq!(zero, WalletAddress::zero());
    }

    #[test]
    fn test_tx_hash_parse() {
        let raw = format!("0x{}", "Ab".repeat(32));
        let hash: TxHash = raw.parse().unwrap();
        assert_eq!(hash.to_string(), raw.to_lowercase());
        assert!("0xabcd".parse::<TxHash>().is_err());
    }

    #[test]
    fn test_amount_parse_and_display() {
        let amount: TokenAmount = "14.50".parse().unwrap();
        assert_eq!(amount.units(), 14_500_000_000_000_000_000);
        assert_eq!(amount.to_string(), "14.5");
        assert_eq!(TokenAmount::from_tokens(1000).to_string(), "1000.0");
        assert_eq!(".5".parse::<TokenAmount>().unwrap().to_string(), "0.5");
    }

    #[test]
    fn test_amount_rejects_bad_input() {
        for bad in ["", ".", "-1", "1.2.3", "abc", "1e5", "0.0000000000000000001"] {
            assert!(bad.parse::<TokenAmount>().is_err(), "accepted '{}'", bad);
        }
    }

    #[test]
    fn test_amount_bps_math() {
        let principal = TokenAmount::from_tokens(2000);
        assert_eq!(principal.mul_bps(70), TokenAmount::from_tokens(14));
        assert_eq!(principal.mul_bps(40_000), TokenAmount::from_tokens(8000));
        assert_eq!(TokenAmount::from_tokens(110).div_bps(11_000), TokenAmount::from_tokens(100));
        assert_eq!(principal.div_bps(0), TokenAmount::ZERO);
    }

    #[test]
    fn test_ratio_bps_clamped() {
        let cap = TokenAmount::from_tokens(4000);
        assert_eq!(TokenAmount::ZERO.ratio_bps(cap), 0);
        assert_eq!(TokenAmount::from_tokens(1000).ratio_bps(cap), 2500);
        assert_eq!(TokenAmount::from_tokens(9000).ratio_bps(cap), 10_000);
        assert_eq!(cap.ratio_bps(TokenAmount::ZERO), 0);
    }

    #[test]
    fn test_display_2dp_rounds_half_up() {
        assert_eq!("14.005".parse::<TokenAmount>().unwrap().display_2dp(), "14.01");
        assert_eq!("14.004".parse::<TokenAmount>().unwrap().display_2dp(), "14.00");
        assert_eq!(TokenAmount::ZERO.display_2dp(), "0.00");
    }

    #[test]
    fn test_amount_accepts_json_numbers() {
        let from_int: TokenAmount = serde_json::from_str("1000").unwrap();
        let from_float: TokenAmount = serde_json::from_str("12.25").unwrap();
        let from_str: TokenAmount = serde_json::from_str("\"12.25\"").unwrap();
        assert_eq!(from_int, TokenAmount::from_tokens(1000));
        assert_eq!(from_float, from_str);
        assert!(serde_json::from_str::<TokenAmount>("-5").is_err());
    }

    #[test]
    fn test_address_serializes_lowercase() {
        let addr: WalletAddress = MIXED_CASE.parse().unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", MIXED_CASE.to_lowercase()));
    }
}
