//! Amount Conversions
//!
//! Decimal-string and whole-token conversions to wei. The native token
//! has 8 decimal places: `WEI_PER_TOKEN = 10^8` is the single source of
//! truth. Custom tokens may use up to 18 decimals. These helpers never
//! touch the wire format, which is decimals-agnostic.

use ethereum_types::U256;

/// Decimal places of the native token.
pub const TOKEN_DECIMALS: u32 = 8;

/// Wei per whole native token (10^8).
pub const WEI_PER_TOKEN: u64 = 100_000_000;

/// Largest supported token precision.
pub const MAX_DECIMALS: u32 = 18;

/// Errors from decimal amount parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("invalid decimal amount `{0}`")]
    InvalidAmount(String),

    #[error("amount `{amount}` has more than {decimals} decimal places")]
    TooManyDecimals { amount: String, decimals: u32 },

    #[error("unsupported precision {0}, maximum is {MAX_DECIMALS}")]
    UnsupportedDecimals(u32),

    #[error("amount does not fit in 256 bits")]
    Overflow,
}

/// Whole native tokens to wei.
pub fn tokens(count: u64) -> U256 {
    U256::from(count) * U256::from(WEI_PER_TOKEN)
}

/// Decimal native-token string to wei, e.g. `"0.001"` to `100_000`.
pub fn tokens_decimal(amount: &str) -> Result<U256, AmountError> {
    from_decimal_str(amount, TOKEN_DECIMALS)
}

/// Parse a decimal string into the smallest unit of a token with the
/// given precision.
///
/// # Arguments
/// * `amount` - decimal string like `"1.5"`, `"100"`, or `".25"`
/// * `decimals` - token precision, at most [`MAX_DECIMALS`]
pub fn from_decimal_str(amount: &str, decimals: u32) -> Result<U256, AmountError> {
    if decimals > MAX_DECIMALS {
        return Err(AmountError::UnsupportedDecimals(decimals));
    }

    let invalid = || AmountError::InvalidAmount(amount.to_string());

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }
    if fraction.len() > decimals as usize {
        return Err(AmountError::TooManyDecimals {
            amount: amount.to_string(),
            decimals,
        });
    }

    let scale = pow10(decimals);
    let whole_part = if whole.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(whole).map_err(|_| invalid())?
    };
    let fraction_part = if fraction.is_empty() {
        U256::zero()
    } else {
        // Right-pad the fraction to the full precision
        let padded = pow10(decimals - fraction.len() as u32);
        U256::from_dec_str(fraction).map_err(|_| invalid())? * padded
    };

    whole_part
        .checked_mul(scale)
        .and_then(|scaled| scaled.checked_add(fraction_part))
        .ok_or(AmountError::Overflow)
}

/// Format a smallest-unit amount as a decimal string, trimming
/// trailing fractional zeros.
pub fn to_decimal_string(wei: &U256, decimals: u32) -> String {
    let scale = pow10(decimals);
    let whole = *wei / scale;
    let fraction = *wei % scale;

    if fraction.is_zero() {
        return whole.to_string();
    }

    let fraction_str = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    format!("{}.{}", whole, fraction_str.trim_end_matches('0'))
}

fn pow10(exp: u32) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}
