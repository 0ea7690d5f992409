//! Wire Enum Codes
//!
//! Stable numeric codes for networks, transaction versions and types,
//! payload kinds, and vote kinds. These values are part of the wire
//! format and must never be renumbered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target network for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Wire code for this network.
    pub fn code(&self) -> u64 {
        match self {
            Network::Mainnet => 0,
            Network::Testnet => 1,
        }
    }

    /// Look up a network by wire code.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Network::Mainnet),
            1 => Some(Network::Testnet),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "MAINNET"),
            Network::Testnet => write!(f, "TESTNET"),
        }
    }
}

/// Transaction serialization version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxVersion {
    V1,
}

impl TxVersion {
    pub fn code(&self) -> u64 {
        match self {
            TxVersion::V1 => 1,
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(TxVersion::V1),
            _ => None,
        }
    }
}

/// Discriminant for the operation a transaction performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxType {
    /// Value transfer between two addresses.
    Transfer,
    /// Submission of a blockchain improvement proposal.
    BipCreate,
    /// Vote on an existing proposal, referenced by hash.
    BipVote,
}

impl TxType {
    pub fn code(&self) -> u64 {
        match self {
            TxType::Transfer => 0,
            TxType::BipCreate => 1,
            TxType::BipVote => 2,
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(TxType::Transfer),
            1 => Some(TxType::BipCreate),
            2 => Some(TxType::BipVote),
            _ => None,
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxType::Transfer => write!(f, "TRANSFER"),
            TxType::BipCreate => write!(f, "BIP_CREATE"),
            TxType::BipVote => write!(f, "BIP_VOTE"),
        }
    }
}

/// Wire codes for the BIP payload variants.
///
/// Codes 10 and 11 are reserved (validator add/remove); no payload exists
/// for them and decoders treat them as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BipPayloadType {
    AddressAliasAdd,
    AddressAliasRemove,
    AuthorityAdd,
    AuthorityRemove,
    NetworkParamsSet,
    TokenBurn,
    TokenCreate,
    TokenMint,
    TokenUpdate,
    Vote,
}

impl BipPayloadType {
    pub fn code(&self) -> u64 {
        match self {
            BipPayloadType::AddressAliasAdd => 0,
            BipPayloadType::AddressAliasRemove => 1,
            BipPayloadType::AuthorityAdd => 2,
            BipPayloadType::AuthorityRemove => 3,
            BipPayloadType::NetworkParamsSet => 4,
            BipPayloadType::TokenBurn => 5,
            BipPayloadType::TokenCreate => 6,
            BipPayloadType::TokenMint => 7,
            BipPayloadType::TokenUpdate => 8,
            BipPayloadType::Vote => 9,
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(BipPayloadType::AddressAliasAdd),
            1 => Some(BipPayloadType::AddressAliasRemove),
            2 => Some(BipPayloadType::AuthorityAdd),
            3 => Some(BipPayloadType::AuthorityRemove),
            4 => Some(BipPayloadType::NetworkParamsSet),
            5 => Some(BipPayloadType::TokenBurn),
            6 => Some(BipPayloadType::TokenCreate),
            7 => Some(BipPayloadType::TokenMint),
            8 => Some(BipPayloadType::TokenUpdate),
            9 => Some(BipPayloadType::Vote),
            _ => None,
        }
    }
}

/// Vote direction for a BIP_VOTE payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BipVoteType {
    Disapproval,
    Approval,
}

impl BipVoteType {
    pub fn code(&self) -> u64 {
        match self {
            BipVoteType::Disapproval => 0,
            BipVoteType::Approval => 1,
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(BipVoteType::Disapproval),
            1 => Some(BipVoteType::Approval),
            _ => None,
        }
    }
}
