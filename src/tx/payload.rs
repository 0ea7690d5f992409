//! BIP Payload Codec
//!
//! Payloads are a closed set tagged by a stable numeric code. A payload
//! encodes as a single RLP list whose first element is the code, followed
//! by the variant's fields in declaration order. Optional fields use the
//! same one-element-list wrapping as the outer transaction.

use ethereum_types::U256;
use serde::{Deserialize, Serialize};

use super::CodecError;
use crate::enums::{BipPayloadType, BipVoteType};
use crate::rlp;
use crate::rlp::RlpError;
use crate::types::Address;

/// A blockchain improvement proposal payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BipPayload {
    /// Register a human-readable alias for an address.
    /// The alias is encoded before the address; this ordering is part
    /// of the wire format.
    AddressAliasAdd { alias: String, address: Address },

    /// Remove a previously registered alias.
    AddressAliasRemove { alias: String },

    /// Grant authority status to an address.
    AuthorityAdd { authority_address: Address },

    /// Revoke authority status from an address.
    AuthorityRemove { authority_address: Address },

    /// Update network consensus parameters. Every field is optional;
    /// omitted parameters are left unchanged by the proposal.
    NetworkParamsSet {
        block_reward: Option<U256>,
        block_reward_pool_address: Option<Address>,
        target_mining_time_ms: Option<u64>,
        asert_half_life_blocks: Option<u64>,
        min_difficulty: Option<U256>,
        min_tx_base_fee: Option<U256>,
        min_tx_byte_fee: Option<U256>,
    },

    /// Burn tokens held by `sender`.
    TokenBurn {
        token_address: Address,
        sender: Address,
        amount: U256,
    },

    /// Create a new token.
    TokenCreate {
        name: String,
        smallest_unit_name: String,
        number_of_decimals: u8,
        website_url: Option<String>,
        logo_url: Option<String>,
        max_supply: Option<U256>,
        user_burnable: bool,
    },

    /// Mint tokens to a recipient.
    TokenMint {
        token_address: Address,
        recipient: Address,
        amount: U256,
    },

    /// Update mutable token metadata.
    TokenUpdate {
        token_address: Address,
        name: Option<String>,
        smallest_unit_name: Option<String>,
        website_url: Option<String>,
        logo_url: Option<String>,
    },

    /// Vote on a proposal; the target BIP is the transaction's
    /// reference hash.
    Vote { vote_type: BipVoteType },
}

impl BipPayload {
    /// The wire code tag for this variant.
    pub fn payload_type(&self) -> BipPayloadType {
        match self {
            BipPayload::AddressAliasAdd { .. } => BipPayloadType::AddressAliasAdd,
            BipPayload::AddressAliasRemove { .. } => BipPayloadType::AddressAliasRemove,
            BipPayload::AuthorityAdd { .. } => BipPayloadType::AuthorityAdd,
            BipPayload::AuthorityRemove { .. } => BipPayloadType::AuthorityRemove,
            BipPayload::NetworkParamsSet { .. } => BipPayloadType::NetworkParamsSet,
            BipPayload::TokenBurn { .. } => BipPayloadType::TokenBurn,
            BipPayload::TokenCreate { .. } => BipPayloadType::TokenCreate,
            BipPayload::TokenMint { .. } => BipPayloadType::TokenMint,
            BipPayload::TokenUpdate { .. } => BipPayloadType::TokenUpdate,
            BipPayload::Vote { .. } => BipPayloadType::Vote,
        }
    }

    /// True for the Vote variant (the only payload BIP_VOTE accepts).
    pub fn is_vote(&self) -> bool {
        matches!(self, BipPayload::Vote { .. })
    }

    /// Encode as an RLP list, code first.
    pub fn encode(&self) -> Vec<u8> {
        let mut content = rlp::encode_u64(self.payload_type().code());

        match self {
            BipPayload::AddressAliasAdd { alias, address } => {
                content.extend(rlp::encode_str(alias));
                content.extend(rlp::encode_address(address));
            }
            BipPayload::AddressAliasRemove { alias } => {
                content.extend(rlp::encode_str(alias));
            }
            BipPayload::AuthorityAdd { authority_address }
            | BipPayload::AuthorityRemove { authority_address } => {
                content.extend(rlp::encode_address(authority_address));
            }
            BipPayload::NetworkParamsSet {
                block_reward,
                block_reward_pool_address,
                target_mining_time_ms,
                asert_half_life_blocks,
                min_difficulty,
                min_tx_base_fee,
                min_tx_byte_fee,
            } => {
                content.extend(rlp::encode_opt_u256(block_reward.as_ref()));
                content.extend(rlp::encode_opt_address(block_reward_pool_address.as_ref()));
                content.extend(rlp::encode_opt_u64(*target_mining_time_ms));
                content.extend(rlp::encode_opt_u64(*asert_half_life_blocks));
                content.extend(rlp::encode_opt_u256(min_difficulty.as_ref()));
                content.extend(rlp::encode_opt_u256(min_tx_base_fee.as_ref()));
                content.extend(rlp::encode_opt_u256(min_tx_byte_fee.as_ref()));
            }
            BipPayload::TokenBurn {
                token_address,
                sender,
                amount,
            } => {
                content.extend(rlp::encode_address(token_address));
                content.extend(rlp::encode_address(sender));
                content.extend(rlp::encode_u256(amount));
            }
            BipPayload::TokenCreate {
                name,
                smallest_unit_name,
                number_of_decimals,
                website_url,
                logo_url,
                max_supply,
                user_burnable,
            } => {
                content.extend(rlp::encode_str(name));
                content.extend(rlp::encode_str(smallest_unit_name));
                content.extend(rlp::encode_u64(u64::from(*number_of_decimals)));
                content.extend(rlp::encode_opt_str(website_url.as_deref()));
                content.extend(rlp::encode_opt_str(logo_url.as_deref()));
                content.extend(rlp::encode_opt_u256(max_supply.as_ref()));
                content.extend(rlp::encode_bool(*user_burnable));
            }
            BipPayload::TokenMint {
                token_address,
                recipient,
                amount,
            } => {
                content.extend(rlp::encode_address(token_address));
                content.extend(rlp::encode_address(recipient));
                content.extend(rlp::encode_u256(amount));
            }
            BipPayload::TokenUpdate {
                token_address,
                name,
                smallest_unit_name,
                website_url,
                logo_url,
            } => {
                content.extend(rlp::encode_address(token_address));
                content.extend(rlp::encode_opt_str(name.as_deref()));
                content.extend(rlp::encode_opt_str(smallest_unit_name.as_deref()));
                content.extend(rlp::encode_opt_str(website_url.as_deref()));
                content.extend(rlp::encode_opt_str(logo_url.as_deref()));
            }
            BipPayload::Vote { vote_type } => {
                content.extend(rlp::encode_u64(vote_type.code()));
            }
        }

        rlp::encode_list(&content)
    }

    /// Decode a payload list, dispatching on the leading code.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        let items = rlp::decode_list(data)?;
        let code_item = *items.first().ok_or(CodecError::WrongItemCount {
            context: "payload",
            expected: 2,
            actual: 0,
        })?;
        let code = rlp::decode_u64(code_item)?;
        let payload_type =
            BipPayloadType::from_code(code).ok_or(CodecError::UnknownPayloadCode(code))?;

        match payload_type {
            BipPayloadType::AddressAliasAdd => {
                expect_items(&items, 3, "address alias add payload")?;
                Ok(BipPayload::AddressAliasAdd {
                    alias: rlp::decode_string(items[1])?,
                    address: decode_address(items[2])?,
                })
            }
            BipPayloadType::AddressAliasRemove => {
                expect_items(&items, 2, "address alias remove payload")?;
                Ok(BipPayload::AddressAliasRemove {
                    alias: rlp::decode_string(items[1])?,
                })
            }
            BipPayloadType::AuthorityAdd => {
                expect_items(&items, 2, "authority add payload")?;
                Ok(BipPayload::AuthorityAdd {
                    authority_address: decode_address(items[1])?,
                })
            }
            BipPayloadType::AuthorityRemove => {
                expect_items(&items, 2, "authority remove payload")?;
                Ok(BipPayload::AuthorityRemove {
                    authority_address: decode_address(items[1])?,
                })
            }
            BipPayloadType::NetworkParamsSet => {
                expect_items(&items, 8, "network params payload")?;
                Ok(BipPayload::NetworkParamsSet {
                    block_reward: rlp::decode_opt_u256(items[1])?,
                    block_reward_pool_address: rlp::decode_opt_address(items[2])?,
                    target_mining_time_ms: rlp::decode_opt_u64(items[3])?,
                    asert_half_life_blocks: rlp::decode_opt_u64(items[4])?,
                    min_difficulty: rlp::decode_opt_u256(items[5])?,
                    min_tx_base_fee: rlp::decode_opt_u256(items[6])?,
                    min_tx_byte_fee: rlp::decode_opt_u256(items[7])?,
                })
            }
            BipPayloadType::TokenBurn => {
                expect_items(&items, 4, "token burn payload")?;
                Ok(BipPayload::TokenBurn {
                    token_address: decode_address(items[1])?,
                    sender: decode_address(items[2])?,
                    amount: rlp::decode_u256(items[3])?,
                })
            }
            BipPayloadType::TokenCreate => {
                expect_items(&items, 8, "token create payload")?;
                let decimals = rlp::decode_u64(items[3])?;
                let number_of_decimals =
                    u8::try_from(decimals).map_err(|_| RlpError::IntegerOverflow)?;
                Ok(BipPayload::TokenCreate {
                    name: rlp::decode_string(items[1])?,
                    smallest_unit_name: rlp::decode_string(items[2])?,
                    number_of_decimals,
                    website_url: rlp::decode_opt_str(items[4])?,
                    logo_url: rlp::decode_opt_str(items[5])?,
                    max_supply: rlp::decode_opt_u256(items[6])?,
                    user_burnable: rlp::decode_bool(items[7])?,
                })
            }
            BipPayloadType::TokenMint => {
                expect_items(&items, 4, "token mint payload")?;
                Ok(BipPayload::TokenMint {
                    token_address: decode_address(items[1])?,
                    recipient: decode_address(items[2])?,
                    amount: rlp::decode_u256(items[3])?,
                })
            }
            BipPayloadType::TokenUpdate => {
                expect_items(&items, 6, "token update payload")?;
                Ok(BipPayload::TokenUpdate {
                    token_address: decode_address(items[1])?,
                    name: rlp::decode_opt_str(items[2])?,
                    smallest_unit_name: rlp::decode_opt_str(items[3])?,
                    website_url: rlp::decode_opt_str(items[4])?,
                    logo_url: rlp::decode_opt_str(items[5])?,
                })
            }
            BipPayloadType::Vote => {
                expect_items(&items, 2, "vote payload")?;
                let vote_code = rlp::decode_u64(items[1])?;
                let vote_type = BipVoteType::from_code(vote_code)
                    .ok_or(CodecError::UnknownVoteCode(vote_code))?;
                Ok(BipPayload::Vote { vote_type })
            }
        }
    }
}

fn expect_items(items: &[&[u8]], expected: usize, context: &'static str) -> Result<(), CodecError> {
    if items.len() != expected {
        return Err(CodecError::WrongItemCount {
            context,
            expected,
            actual: items.len(),
        });
    }
    Ok(())
}

fn decode_address(item: &[u8]) -> Result<Address, CodecError> {
    Ok(rlp::decode_address(item)?)
}
