//! Unified error type
//!
//! Every fallible operation in the crate reports one of the per-module
//! error enums; this module aggregates them for callers that want a
//! single error type at the API boundary. Nothing in the crate panics
//! on malformed input.

use crate::rlp::RlpError;
use crate::signing::SigningError;
use crate::tx::builder::BuilderError;
use crate::tx::CodecError;
use crate::types::HexError;
use crate::utils::amounts::AmountError;
use crate::wallet::WalletError;

/// Crate-wide error, categorized by the module that raised it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Rlp(#[from] RlpError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Builder(#[from] BuilderError),

    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Hex(#[from] HexError),

    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Result alias for crate-wide operations.
pub type CoreResult<T> = Result<T, CoreError>;
