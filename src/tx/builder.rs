//! Transaction Builder
//!
//! Collects transaction fields through chained setters and validates the
//! per-type invariants before signing. `sign` is the terminal operation:
//! it builds the unsigned record, computes the signing hash, signs, and
//! returns the immutable signed transaction with its derived fields
//! frozen.

use std::time::{SystemTime, UNIX_EPOCH};

use ethereum_types::U256;

use crate::enums::{Network, TxType, TxVersion};
use crate::error::CoreResult;
use crate::types::{Address, Hash, NATIVE_TOKEN};
use crate::wallet::PrivateKey;

use super::{BipPayload, SignedTx, Tx};

/// Pre-sign validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` is not allowed for {tx_type} transactions")]
    ForbiddenField {
        field: &'static str,
        tx_type: TxType,
    },

    #[error("{tx_type} transactions require a vote payload")]
    WrongPayloadKind { tx_type: TxType },
}

/// Builder for V1 transactions.
///
/// The builder is the only mutable intermediate in the crate; `sign`
/// consumes it and everything it returns is immutable.
#[derive(Debug, Clone, Default)]
pub struct TxBuilder {
    tx_type: Option<TxType>,
    network: Option<Network>,
    timestamp: Option<u64>,
    nonce: Option<u64>,
    recipient: Option<Address>,
    token_address: Option<Address>,
    amount: Option<U256>,
    fee: Option<U256>,
    message: Option<Vec<u8>>,
    payload: Option<BipPayload>,
    reference_hash: Option<Hash>,
}

impl TxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tx_type(mut self, tx_type: TxType) -> Self {
        self.tx_type = Some(tx_type);
        self
    }

    pub fn network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    /// Milliseconds since the Unix epoch. Defaults to the wall clock at
    /// build time when unset.
    pub fn timestamp(mut self, timestamp_ms: u64) -> Self {
        self.timestamp = Some(timestamp_ms);
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn recipient(mut self, recipient: Address) -> Self {
        self.recipient = Some(recipient);
        self
    }

    pub fn token_address(mut self, token_address: Address) -> Self {
        self.token_address = Some(token_address);
        self
    }

    /// Amount in wei.
    pub fn amount(mut self, amount: U256) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Fee in wei. Defaults to zero when unset.
    pub fn fee(mut self, fee: U256) -> Self {
        self.fee = Some(fee);
        self
    }

    /// Attach a UTF-8 message.
    pub fn message(mut self, message: &str) -> Self {
        self.message = Some(message.as_bytes().to_vec());
        self
    }

    /// Attach raw message bytes.
    pub fn message_bytes(mut self, message: Vec<u8>) -> Self {
        self.message = Some(message);
        self
    }

    pub fn payload(mut self, payload: BipPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn reference_hash(mut self, reference_hash: Hash) -> Self {
        self.reference_hash = Some(reference_hash);
        self
    }

    /// Validate the per-type invariants and produce the unsigned record.
    pub fn build_unsigned(self) -> Result<Tx, BuilderError> {
        let tx_type = self.tx_type.ok_or(BuilderError::MissingField("type"))?;
        let network = self.network.ok_or(BuilderError::MissingField("network"))?;

        self.validate_for(tx_type)?;

        let token_address = match tx_type {
            // Native transfers default to the all-zero token sentinel
            TxType::Transfer => Some(self.token_address.unwrap_or(NATIVE_TOKEN)),
            _ => self.token_address,
        };

        Ok(Tx {
            version: TxVersion::V1,
            timestamp: self.timestamp.unwrap_or_else(current_millis),
            tx_type,
            network,
            nonce: self.nonce,
            recipient: self.recipient,
            token_address,
            amount: self.amount,
            fee: self.fee.unwrap_or_else(U256::zero),
            message: self.message,
            payload: self.payload,
            reference_hash: self.reference_hash,
        })
    }

    /// Validate, build, sign, and freeze the derived fields.
    pub fn sign(self, private_key: &PrivateKey) -> CoreResult<SignedTx> {
        let tx = self.build_unsigned()?;
        let signature = private_key.sign_hash(&tx.hash_for_signing())?;
        let signed = SignedTx::new(tx, signature)?;
        Ok(signed)
    }

    fn validate_for(&self, tx_type: TxType) -> Result<(), BuilderError> {
        let forbidden = |field| BuilderError::ForbiddenField { field, tx_type };

        match tx_type {
            TxType::Transfer => {
                if self.recipient.is_none() {
                    return Err(BuilderError::MissingField("recipient"));
                }
                if self.payload.is_some() {
                    return Err(forbidden("payload"));
                }
                if self.reference_hash.is_some() {
                    return Err(forbidden("referenceHash"));
                }
            }
            TxType::BipCreate => {
                if self.payload.is_none() {
                    return Err(BuilderError::MissingField("payload"));
                }
                if self.amount.is_some() {
                    return Err(forbidden("amount"));
                }
                if self.recipient.is_some() {
                    return Err(forbidden("recipient"));
                }
                if self.reference_hash.is_some() {
                    return Err(forbidden("referenceHash"));
                }
            }
            TxType::BipVote => {
                match &self.payload {
                    None => return Err(BuilderError::MissingField("payload")),
                    Some(payload) if !payload.is_vote() => {
                        return Err(BuilderError::WrongPayloadKind { tx_type });
                    }
                    Some(_) => {}
                }
                if self.reference_hash.is_none() {
                    return Err(BuilderError::MissingField("referenceHash"));
                }
                if self.amount.is_some() {
                    return Err(forbidden("amount"));
                }
            }
        }
        Ok(())
    }
}

fn current_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
