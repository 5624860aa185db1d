//! End-to-end walkthrough against a local Ganache node: open a session,
//! deploy a data token, mint to the session account and transfer a few
//! tokens onwards.
//!
//! Expects `OCEAN_CONF` to point at an ini config file with a `[DEFAULT]`
//! `GANACHE_URL` and a `[ganache]` section holding `FACTORY_ADDRESS` and
//! `GAS_PRICE`, and `OCEAN_PRIVATE_KEY` to hold a funded account's key.

use ocean_datatoken::config::FileConfig;
use ocean_datatoken::{Address, Ocean, Result, U256};

fn run() -> Result<()> {
    let conf_path = std::env::var("OCEAN_CONF").unwrap_or_else(|_| "ocean.conf".to_string());
    let private_key = std::env::var("OCEAN_PRIVATE_KEY").expect("Key must be provided");

    let config = FileConfig::load(&conf_path)?;
    let ocean = Ocean::new(config, "ganache", &private_key)?;
    println!("Session account: {}", ocean.address().to_checksum_address());

    let token = ocean.create_token("my-data-blob")?;
    println!("Deployed data token at {}", token.address().to_checksum_address());

    let receipt = token.mint(U256::from(100))?;
    println!("Minted 100 tokens, gas used: {}", receipt.gas_used);

    let recipient: Address = std::env::var("OCEAN_RECIPIENT")
        .expect("Recipient must be provided")
        .parse()
        .expect("Recipient must be an address");
    let receipt = token.transfer(recipient, U256::from(10))?;
    println!("Transferred 10 tokens, gas used: {}", receipt.gas_used);

    // The same token can be re-attached from its address alone.
    let again = ocean.token(token.address())?;
    assert_eq!(again.address(), token.address());
    Ok(())
}

fn main() {
    run().expect("Must not fail");
}
