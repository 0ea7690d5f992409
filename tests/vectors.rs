//! Interop scenario tests.
//!
//! Builds the golden-vector scenarios from the fixed test mnemonic and
//! checks the invariants that define byte-exact interoperability:
//! round-trips, signing-hash stability, signature determinism, low-S,
//! sender recovery, and size agreement.

use ethereum_types::U256;
use goldenera_core::utils::amounts;
use goldenera_core::{
    decode_tx, encode_signed_tx, encode_tx, recover_address, signing, Address, BipPayload,
    BipVoteType, CodecError, Hash, Network, PrivateKey, SignedTx, TxBuilder, TxType,
};

const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
const FIRST_TIMESTAMP: u64 = 1_702_200_000_000;

fn test_key() -> PrivateKey {
    PrivateKey::load(TEST_MNEMONIC, "", 0).expect("test mnemonic is valid")
}

fn addr(hex: &str) -> Address {
    Address::from_hex(hex).expect("valid address literal")
}

fn simple_transfer(key: &PrivateKey) -> SignedTx {
    TxBuilder::new()
        .tx_type(TxType::Transfer)
        .network(Network::Mainnet)
        .timestamp(FIRST_TIMESTAMP)
        .nonce(1)
        .recipient(addr("0x1111111111111111111111111111111111111111"))
        .amount(amounts::tokens(100))
        .fee(amounts::tokens_decimal("0.001").unwrap())
        .sign(key)
        .expect("scenario signs")
}

fn transfer_with_message(key: &PrivateKey) -> SignedTx {
    TxBuilder::new()
        .tx_type(TxType::Transfer)
        .network(Network::Testnet)
        .timestamp(FIRST_TIMESTAMP + 1)
        .nonce(42)
        .recipient(addr("0x2222222222222222222222222222222222222222"))
        .amount(amounts::tokens_decimal("1.5").unwrap())
        .fee(amounts::tokens(1))
        .message("Hello GoldenEra!")
        .sign(key)
        .expect("scenario signs")
}

fn bip_token_mint(key: &PrivateKey) -> SignedTx {
    TxBuilder::new()
        .tx_type(TxType::BipCreate)
        .network(Network::Mainnet)
        .timestamp(FIRST_TIMESTAMP + 2)
        .nonce(10)
        .fee(amounts::tokens_decimal("0.01").unwrap())
        .payload(BipPayload::TokenMint {
            token_address: addr("0x3333333333333333333333333333333333333333"),
            recipient: addr("0x4444444444444444444444444444444444444444"),
            amount: amounts::tokens(1_000_000),
        })
        .sign(key)
        .expect("scenario signs")
}

fn bip_token_create(key: &PrivateKey) -> SignedTx {
    TxBuilder::new()
        .tx_type(TxType::BipCreate)
        .network(Network::Mainnet)
        .timestamp(FIRST_TIMESTAMP + 3)
        .nonce(12)
        .fee(amounts::tokens_decimal("1").unwrap())
        .payload(BipPayload::TokenCreate {
            name: "TestToken".into(),
            smallest_unit_name: "TT".into(),
            number_of_decimals: 9,
            website_url: Some("https://test.token".into()),
            logo_url: Some("https://test.token/logo.png".into()),
            max_supply: Some(amounts::tokens(1_000_000_000)),
            user_burnable: true,
        })
        .sign(key)
        .expect("scenario signs")
}

fn bip_vote_approval(key: &PrivateKey) -> SignedTx {
    TxBuilder::new()
        .tx_type(TxType::BipVote)
        .network(Network::Mainnet)
        .timestamp(FIRST_TIMESTAMP + 4)
        .nonce(100)
        .fee(amounts::tokens_decimal("0.001").unwrap())
        .reference_hash(
            Hash::from_hex("0xabcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890")
                .unwrap(),
        )
        .payload(BipPayload::Vote {
            vote_type: BipVoteType::Approval,
        })
        .sign(key)
        .expect("scenario signs")
}

fn bip_network_params_set(key: &PrivateKey) -> SignedTx {
    TxBuilder::new()
        .tx_type(TxType::BipCreate)
        .network(Network::Mainnet)
        .timestamp(FIRST_TIMESTAMP + 5)
        .nonce(18)
        .fee(amounts::tokens_decimal("0.01").unwrap())
        .payload(BipPayload::NetworkParamsSet {
            block_reward: Some(amounts::tokens(50)),
            block_reward_pool_address: None,
            target_mining_time_ms: None,
            asert_half_life_blocks: None,
            min_difficulty: None,
            min_tx_base_fee: Some(U256::from(10_000u64)),
            min_tx_byte_fee: Some(U256::from(1_000u64)),
        })
        .sign(key)
        .expect("scenario signs")
}

fn all_scenarios(key: &PrivateKey) -> Vec<(&'static str, SignedTx)> {
    vec![
        ("simple_transfer", simple_transfer(key)),
        ("transfer_with_message", transfer_with_message(key)),
        ("bip_token_mint", bip_token_mint(key)),
        ("bip_token_create", bip_token_create(key)),
        ("bip_vote_approval", bip_vote_approval(key)),
        ("bip_network_params_set", bip_network_params_set(key)),
    ]
}

#[test]
fn scenarios_roundtrip_through_the_codec() {
    let key = test_key();
    for (name, tx) in all_scenarios(&key) {
        let encoded = encode_signed_tx(&tx);
        let decoded = decode_tx(&encoded).unwrap_or_else(|e| panic!("{name}: decode failed: {e}"));

        assert_eq!(decoded, tx, "{name}: decoded record differs");
        assert_eq!(decoded.sender(), tx.sender(), "{name}: sender differs");
        assert_eq!(decoded.hash(), tx.hash(), "{name}: hash differs");
        assert_eq!(decoded.size(), tx.size(), "{name}: size differs");
        assert_eq!(
            encode_signed_tx(&decoded),
            encoded,
            "{name}: re-encoding differs"
        );
    }
}

#[test]
fn scenarios_recover_the_key_address() {
    let key = test_key();
    for (name, tx) in all_scenarios(&key) {
        assert_eq!(tx.sender(), key.address(), "{name}: sender mismatch");
        let recovered = recover_address(&tx.hash_for_signing(), tx.signature())
            .unwrap_or_else(|e| panic!("{name}: recovery failed: {e}"));
        assert_eq!(recovered, key.address(), "{name}: recovery mismatch");
    }
}

#[test]
fn scenarios_sign_deterministically() {
    let key = test_key();
    let first = simple_transfer(&key);
    let second = simple_transfer(&key);

    assert_eq!(first.signature(), second.signature());
    assert_eq!(first.hash(), second.hash());
    assert_eq!(encode_signed_tx(&first), encode_signed_tx(&second));
}

#[test]
fn scenarios_produce_low_s_signatures() {
    let key = test_key();
    for (name, tx) in all_scenarios(&key) {
        assert!(
            tx.signature().s() <= signing::HALF_CURVE_ORDER,
            "{name}: high-S signature"
        );
        assert!(
            tx.signature().v() == 27 || tx.signature().v() == 28,
            "{name}: bad v"
        );
    }
}

#[test]
fn canonical_hash_differs_from_signing_hash() {
    let key = test_key();
    for (name, tx) in all_scenarios(&key) {
        assert_ne!(tx.hash(), tx.hash_for_signing(), "{name}: hashes collide");
    }
}

#[test]
fn size_agrees_with_encoding_length() {
    let key = test_key();
    for (name, tx) in all_scenarios(&key) {
        assert_eq!(
            tx.size() as usize,
            encode_signed_tx(&tx).len(),
            "{name}: size disagrees"
        );
        // The unsigned form is strictly shorter
        assert!(
            (encode_tx(tx.tx()).len() as u32) < tx.size(),
            "{name}: unsigned not shorter"
        );
    }
}

#[test]
fn signing_hash_is_signature_independent() {
    // Two different keys over the same unsigned fields produce the same
    // signing hash and different signatures
    let key0 = test_key();
    let key1 = PrivateKey::load(TEST_MNEMONIC, "", 1).unwrap();

    let tx0 = simple_transfer(&key0);
    let tx1 = simple_transfer(&key1);

    assert_eq!(tx0.hash_for_signing(), tx1.hash_for_signing());
    assert_ne!(tx0.signature(), tx1.signature());
    assert_ne!(tx0.sender(), tx1.sender());
    assert_ne!(tx0.hash(), tx1.hash());
}

#[test]
fn outer_amount_absent_for_bip_create() {
    let key = test_key();
    let tx = bip_token_mint(&key);
    assert_eq!(tx.tx().amount, None);

    // On the wire, the amount slot is the bare empty list
    let encoded = encode_signed_tx(&tx);
    let items = goldenera_core::rlp::decode_list(&encoded).unwrap();
    assert_eq!(items[7], &[0xc0]);
}

#[test]
fn network_params_absent_fields_are_empty_lists() {
    let key = test_key();
    let tx = bip_network_params_set(&key);

    let Some(BipPayload::NetworkParamsSet {
        block_reward,
        block_reward_pool_address,
        target_mining_time_ms,
        min_tx_base_fee,
        min_tx_byte_fee,
        ..
    }) = tx.tx().payload.clone()
    else {
        panic!("expected network params payload");
    };
    assert_eq!(block_reward, Some(amounts::tokens(50)));
    assert_eq!(min_tx_base_fee, Some(U256::from(10_000u64)));
    assert_eq!(min_tx_byte_fee, Some(U256::from(1_000u64)));
    assert_eq!(block_reward_pool_address, None);
    assert_eq!(target_mining_time_ms, None);

    // Decode the raw payload list and check the absent slots
    let encoded = encode_signed_tx(&tx);
    let items = goldenera_core::rlp::decode_list(&encoded).unwrap();
    let payload_wrapper = goldenera_core::rlp::decode_list(items[10]).unwrap();
    let payload_items = goldenera_core::rlp::decode_list(payload_wrapper[0]).unwrap();
    assert_eq!(payload_items.len(), 8);
    for absent in [2, 3, 4, 5] {
        assert_eq!(payload_items[absent], &[0xc0]);
    }
}

#[test]
fn message_bytes_survive_roundtrip_exactly() {
    let key = test_key();
    let tx = transfer_with_message(&key);
    let decoded = decode_tx(&encode_signed_tx(&tx)).unwrap();
    assert_eq!(
        decoded.tx().message.as_deref(),
        Some("Hello GoldenEra!".as_bytes())
    );
}

#[test]
fn builder_rejects_every_type_invariant_violation() {
    let violations: Vec<TxBuilder> = vec![
        // TRANSFER without recipient
        TxBuilder::new()
            .tx_type(TxType::Transfer)
            .network(Network::Mainnet),
        // TRANSFER with a payload
        TxBuilder::new()
            .tx_type(TxType::Transfer)
            .network(Network::Mainnet)
            .recipient(addr("0x1111111111111111111111111111111111111111"))
            .payload(BipPayload::Vote {
                vote_type: BipVoteType::Approval,
            }),
        // BIP_CREATE without payload
        TxBuilder::new()
            .tx_type(TxType::BipCreate)
            .network(Network::Mainnet),
        // BIP_CREATE with an outer amount
        TxBuilder::new()
            .tx_type(TxType::BipCreate)
            .network(Network::Mainnet)
            .amount(amounts::tokens(1))
            .payload(BipPayload::AddressAliasRemove {
                alias: "alias".into(),
            }),
        // BIP_VOTE with a non-vote payload
        TxBuilder::new()
            .tx_type(TxType::BipVote)
            .network(Network::Mainnet)
            .reference_hash(Hash::new([0xab; 32]))
            .payload(BipPayload::AddressAliasRemove {
                alias: "alias".into(),
            }),
        // BIP_VOTE without a reference hash
        TxBuilder::new()
            .tx_type(TxType::BipVote)
            .network(Network::Mainnet)
            .payload(BipPayload::Vote {
                vote_type: BipVoteType::Approval,
            }),
    ];

    let key = test_key();
    for (i, builder) in violations.into_iter().enumerate() {
        assert!(
            builder.sign(&key).is_err(),
            "violation {i} was not rejected"
        );
    }
}

#[test]
fn decode_rejects_tampered_payload_code() {
    let key = test_key();
    let tx = bip_vote_approval(&key);
    let encoded = encode_signed_tx(&tx);

    // The vote payload [9, 1] appears wrapped as c3 c2 09 01; retag it
    // with the reserved validator code 10
    let needle = [0xc3, 0xc2, 0x09, 0x01];
    let pos = encoded
        .windows(needle.len())
        .position(|w| w == needle)
        .expect("payload bytes present");
    let mut tampered = encoded.clone();
    tampered[pos + 2] = 0x0a;

    assert_eq!(
        decode_tx(&tampered),
        Err(CodecError::UnknownPayloadCode(10))
    );
}

#[test]
fn key_derivation_indices_are_stable() {
    let addresses: Vec<Address> = (0..5)
        .map(|i| PrivateKey::load(TEST_MNEMONIC, "", i).unwrap().address())
        .collect();

    // Deterministic across calls
    for (i, addr) in addresses.iter().enumerate() {
        let again = PrivateKey::load(TEST_MNEMONIC, "", i as u32).unwrap();
        assert_eq!(again.address(), *addr);
    }

    // Pairwise distinct
    for i in 0..addresses.len() {
        for j in (i + 1)..addresses.len() {
            assert_ne!(addresses[i], addresses[j]);
        }
    }

    // Index 0 is the well-known vector for this mnemonic
    assert_eq!(
        addresses[0].to_hex(),
        "0x9858effd232b4033e47d90003d41ec34ecaeda94"
    );
}
