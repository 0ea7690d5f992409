//! Golden vector generator.
//!
//! Regenerates the interop scenarios from the fixed test mnemonic and
//! prints them in the shared cross-implementation format, so the output
//! can be diffed byte-for-byte against any other implementation's
//! generator.

use std::error::Error;

use goldenera_core::utils::amounts;
use goldenera_core::{
    encode_signed_tx, encode_tx, Address, BipPayload, BipVoteType, Hash, Network, PrivateKey,
    SignedTx, TxBuilder, TxType,
};

const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
const TEST_PASSWORD: &str = "";
const FIRST_TIMESTAMP: u64 = 1_702_200_000_000;

struct VectorGen {
    key: PrivateKey,
    timestamp: u64,
}

impl VectorGen {
    fn next_timestamp(&mut self) -> u64 {
        let current = self.timestamp;
        self.timestamp += 1;
        current
    }

    fn builder(&mut self, tx_type: TxType) -> TxBuilder {
        let timestamp = self.next_timestamp();
        TxBuilder::new()
            .tx_type(tx_type)
            .network(Network::Mainnet)
            .timestamp(timestamp)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut ctx = VectorGen {
        key: PrivateKey::load(TEST_MNEMONIC, TEST_PASSWORD, 0)?,
        timestamp: FIRST_TIMESTAMP,
    };

    println!("// Auto-generated test vectors");
    println!("export const testVectors = [");

    print_vector("simple_transfer", &simple_transfer(&mut ctx)?);
    print_vector("transfer_with_message", &transfer_with_message(&mut ctx)?);
    print_vector("bip_token_mint", &token_mint(&mut ctx)?);
    print_vector("bip_token_burn", &token_burn(&mut ctx)?);
    print_vector("bip_token_create", &token_create(&mut ctx)?);
    print_vector("bip_token_update", &token_update(&mut ctx)?);
    print_vector("bip_address_alias_add", &alias_add(&mut ctx)?);
    print_vector("bip_address_alias_remove", &alias_remove(&mut ctx)?);
    print_vector("bip_authority_add", &authority_add(&mut ctx)?);
    print_vector("bip_authority_remove", &authority_remove(&mut ctx)?);
    print_vector("bip_network_params_set", &network_params_set(&mut ctx)?);
    print_vector("bip_vote_approval", &vote_approval(&mut ctx)?);
    print_vector("bip_vote_disapproval", &vote_disapproval(&mut ctx)?);

    println!("];");
    println!();
    println!("// Key derivation test vectors");
    println!("export const keyDerivationVectors = [");
    for index in 0..5 {
        let key = PrivateKey::load(TEST_MNEMONIC, TEST_PASSWORD, index)?;
        println!("  {{");
        println!("    index: {index},");
        println!("    privateKey: '{}',", key.to_hex());
        println!("    address: '{}',", key.address().to_hex());
        println!("  }},");
    }
    println!("];");

    Ok(())
}

fn print_vector(name: &str, tx: &SignedTx) {
    let rlp_with_sig = encode_signed_tx(tx);
    let rlp_without_sig = encode_tx(tx.tx());

    println!("  {{");
    println!("    name: '{name}',");
    println!("    timestamp: {}n,", tx.tx().timestamp);
    println!("    expected: {{");
    println!("      hashForSigning: '{}',", tx.hash_for_signing());
    println!("      txHash: '{}',", tx.hash());
    println!("      signature: '{}',", tx.signature());
    println!("      rlpWithoutSig: '0x{}',", hex::encode(rlp_without_sig));
    println!("      rlpWithSig: '0x{}',", hex::encode(rlp_with_sig));
    println!("      size: {},", tx.size());
    println!("    }},");
    println!("  }},");
}

fn simple_transfer(ctx: &mut VectorGen) -> Result<SignedTx, Box<dyn Error>> {
    let timestamp = ctx.next_timestamp();
    let tx = TxBuilder::new()
        .tx_type(TxType::Transfer)
        .network(Network::Mainnet)
        .timestamp(timestamp)
        .nonce(1)
        .recipient(Address::from_hex("0x1111111111111111111111111111111111111111")?)
        .amount(amounts::tokens(100))
        .fee(amounts::tokens_decimal("0.001")?)
        .sign(&ctx.key)?;
    Ok(tx)
}

fn transfer_with_message(ctx: &mut VectorGen) -> Result<SignedTx, Box<dyn Error>> {
    let timestamp = ctx.next_timestamp();
    let tx = TxBuilder::new()
        .tx_type(TxType::Transfer)
        .network(Network::Testnet)
        .timestamp(timestamp)
        .nonce(42)
        .recipient(Address::from_hex("0x2222222222222222222222222222222222222222")?)
        .amount(amounts::tokens_decimal("1.5")?)
        .fee(amounts::tokens(1))
        .message("Hello GoldenEra!")
        .sign(&ctx.key)?;
    Ok(tx)
}

fn token_mint(ctx: &mut VectorGen) -> Result<SignedTx, Box<dyn Error>> {
    let tx = ctx
        .builder(TxType::BipCreate)
        .nonce(10)
        .fee(amounts::tokens_decimal("0.01")?)
        .payload(BipPayload::TokenMint {
            token_address: Address::from_hex("0x3333333333333333333333333333333333333333")?,
            recipient: Address::from_hex("0x4444444444444444444444444444444444444444")?,
            amount: amounts::tokens(1_000_000),
        })
        .sign(&ctx.key)?;
    Ok(tx)
}

fn token_burn(ctx: &mut VectorGen) -> Result<SignedTx, Box<dyn Error>> {
    let tx = ctx
        .builder(TxType::BipCreate)
        .nonce(11)
        .fee(amounts::tokens_decimal("0.01")?)
        .payload(BipPayload::TokenBurn {
            token_address: Address::from_hex("0x5555555555555555555555555555555555555555")?,
            sender: Address::from_hex("0x6666666666666666666666666666666666666666")?,
            amount: amounts::tokens(500),
        })
        .sign(&ctx.key)?;
    Ok(tx)
}

fn token_create(ctx: &mut VectorGen) -> Result<SignedTx, Box<dyn Error>> {
    let tx = ctx
        .builder(TxType::BipCreate)
        .nonce(12)
        .fee(amounts::tokens_decimal("1")?)
        .payload(BipPayload::TokenCreate {
            name: "TestToken".into(),
            smallest_unit_name: "TT".into(),
            number_of_decimals: 9,
            website_url: Some("https://test.token".into()),
            logo_url: Some("https://test.token/logo.png".into()),
            max_supply: Some(amounts::tokens(1_000_000_000)),
            user_burnable: true,
        })
        .sign(&ctx.key)?;
    Ok(tx)
}

fn token_update(ctx: &mut VectorGen) -> Result<SignedTx, Box<dyn Error>> {
    let tx = ctx
        .builder(TxType::BipCreate)
        .nonce(13)
        .fee(amounts::tokens_decimal("0.1")?)
        .payload(BipPayload::TokenUpdate {
            token_address: Address::from_hex("0x7777777777777777777777777777777777777777")?,
            name: Some("UpdatedToken".into()),
            smallest_unit_name: None,
            website_url: Some("https://updated.token".into()),
            logo_url: None,
        })
        .sign(&ctx.key)?;
    Ok(tx)
}

fn alias_add(ctx: &mut VectorGen) -> Result<SignedTx, Box<dyn Error>> {
    let tx = ctx
        .builder(TxType::BipCreate)
        .nonce(14)
        .fee(amounts::tokens_decimal("0.01")?)
        .payload(BipPayload::AddressAliasAdd {
            alias: "my-alias".into(),
            address: Address::from_hex("0x8888888888888888888888888888888888888888")?,
        })
        .sign(&ctx.key)?;
    Ok(tx)
}

fn alias_remove(ctx: &mut VectorGen) -> Result<SignedTx, Box<dyn Error>> {
    let tx = ctx
        .builder(TxType::BipCreate)
        .nonce(15)
        .fee(amounts::tokens_decimal("0.01")?)
        .payload(BipPayload::AddressAliasRemove {
            alias: "old-alias".into(),
        })
        .sign(&ctx.key)?;
    Ok(tx)
}

fn authority_add(ctx: &mut VectorGen) -> Result<SignedTx, Box<dyn Error>> {
    let tx = ctx
        .builder(TxType::BipCreate)
        .nonce(16)
        .fee(amounts::tokens_decimal("0.01")?)
        .payload(BipPayload::AuthorityAdd {
            authority_address: Address::from_hex("0x9999999999999999999999999999999999999999")?,
        })
        .sign(&ctx.key)?;
    Ok(tx)
}

fn authority_remove(ctx: &mut VectorGen) -> Result<SignedTx, Box<dyn Error>> {
    let tx = ctx
        .builder(TxType::BipCreate)
        .nonce(17)
        .fee(amounts::tokens_decimal("0.01")?)
        .payload(BipPayload::AuthorityRemove {
            authority_address: Address::from_hex("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa")?,
        })
        .sign(&ctx.key)?;
    Ok(tx)
}

fn network_params_set(ctx: &mut VectorGen) -> Result<SignedTx, Box<dyn Error>> {
    let tx = ctx
        .builder(TxType::BipCreate)
        .nonce(18)
        .fee(amounts::tokens_decimal("0.01")?)
        .payload(BipPayload::NetworkParamsSet {
            block_reward: Some(amounts::tokens(50)),
            block_reward_pool_address: None,
            target_mining_time_ms: None,
            asert_half_life_blocks: None,
            min_difficulty: None,
            min_tx_base_fee: Some(amounts::tokens_decimal("0.0001")?),
            min_tx_byte_fee: Some(amounts::tokens_decimal("0.00001")?),
        })
        .sign(&ctx.key)?;
    Ok(tx)
}

fn vote_approval(ctx: &mut VectorGen) -> Result<SignedTx, Box<dyn Error>> {
    let tx = ctx
        .builder(TxType::BipVote)
        .nonce(100)
        .fee(amounts::tokens_decimal("0.001")?)
        .reference_hash(Hash::from_hex(
            "0xabcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890",
        )?)
        .payload(BipPayload::Vote {
            vote_type: BipVoteType::Approval,
        })
        .sign(&ctx.key)?;
    Ok(tx)
}

fn vote_disapproval(ctx: &mut VectorGen) -> Result<SignedTx, Box<dyn Error>> {
    let tx = ctx
        .builder(TxType::BipVote)
        .nonce(101)
        .fee(amounts::tokens_decimal("0.001")?)
        .reference_hash(Hash::from_hex(
            "0xfedcba0987654321fedcba0987654321fedcba0987654321fedcba0987654321",
        )?)
        .payload(BipPayload::Vote {
            vote_type: BipVoteType::Disapproval,
        })
        .sign(&ctx.key)?;
    Ok(tx)
}
