use ocean_datatoken::config::{MemoryConfig, DEFAULT_SECTION};
use ocean_datatoken::contracts::{token_created_address, ContractCall};
use ocean_datatoken::network::{LogEntry, Receipt};
use ocean_datatoken::{keccak, Address, Error, Ocean, H256, U256};
use std::fs::File;

const TEST_KEY: &str = "0x4646464646464646464646464646464646464646464646464646464646464646";
const FACTORY_ADDR: &str = "0x2fc12ce163acdf6ab7f4b9b4a1b1e1a02e6f2c4e";

fn factory_abi() -> ethabi::Contract {
    ethabi::Contract::load(File::open("abi/Factory.abi").expect("Must exist"))
        .expect("Must be loadable")
}

fn token_abi() -> ethabi::Contract {
    ethabi::Contract::load(File::open("abi/DataTokenTemplate.abi").expect("Must exist"))
        .expect("Must be loadable")
}

fn topic(address: Address) -> H256 {
    let mut raw = [0u8; 32];
    raw[12..].copy_from_slice(address.as_bytes());
    H256::from(raw)
}

fn ganache_config() -> MemoryConfig {
    MemoryConfig::new()
        // Discard port: never reachable, and must never be contacted by the
        // tests below that expect configuration errors.
        .with(DEFAULT_SECTION, "GANACHE_URL", "http://127.0.0.1:9")
        .with("ganache", "FACTORY_ADDRESS", FACTORY_ADDR)
        .with("ganache", "GAS_PRICE", "9000000000")
}

#[test]
fn test_abi_documents_describe_the_contracts() {
    let factory = factory_abi();
    assert!(factory.function("createToken").is_ok());
    assert!(factory.event("TokenCreated").is_ok());
    let token = token_abi();
    assert!(token.function("mint").is_ok());
    assert!(token.function("transfer").is_ok());
}

#[test]
fn test_transfer_call_encoding() {
    let to: Address = "0x7567d83b7b8d80addcb281a71d54fc7b3364ffed".parse().unwrap();
    let call = ContractCall::Transfer {
        to,
        amount: U256::from(10),
    };
    let data = call.encode(&token_abi()).expect("Must encode");
    // Selector of transfer(address,uint256) plus two 32-byte words.
    assert_eq!(&data[..4], [0xa9, 0x05, 0x9c, 0xbb]);
    assert_eq!(data.len(), 4 + 32 + 32);
    // Address word is left-padded: 12 zero bytes, then the 20 address bytes.
    assert_eq!(data[16], 0x75);
    assert_eq!(data[35], 0xed);
    assert_eq!(data[67], 10);
}

#[test]
fn test_mint_call_encoding() {
    let call = ContractCall::Mint {
        to: Address::from([0x11u8; 20]),
        amount: U256::from(100),
    };
    let data = call.encode(&token_abi()).expect("Must encode");
    assert_eq!(&data[..4], [0x40, 0xc1, 0x0f, 0x19]);
}

#[test]
fn test_create_token_call_encoding() {
    let call = ContractCall::CreateToken {
        blob: "my-data-blob".to_string(),
    };
    let data = call.encode(&factory_abi()).expect("Must encode");
    assert_eq!(&data[..4], &keccak(b"createToken(string)")[..4]);
}

#[test]
fn test_token_created_decoding() {
    let abi = factory_abi();
    let event = abi.event("TokenCreated").unwrap();
    let factory: Address = FACTORY_ADDR.parse().unwrap();
    let token: Address = "0x7567d83b7b8d80addcb281a71d54fc7b3364ffed".parse().unwrap();
    let template = Address::from([0x22u8; 20]);
    let receipt = Receipt {
        transaction_hash: H256::repeat_byte(0x01),
        status: 1,
        gas_used: 1_500_000,
        contract_address: None,
        logs: vec![LogEntry {
            address: factory,
            topics: vec![event.signature(), topic(token), topic(template)],
            data: ethabi::encode(&[ethabi::Token::String("my-data-blob".to_string())]).into(),
        }],
    };
    assert_eq!(
        token_created_address(&abi, factory, &receipt).expect("Must decode"),
        token
    );
}

#[test]
fn test_missing_token_created_event() {
    let abi = factory_abi();
    let factory: Address = FACTORY_ADDR.parse().unwrap();
    let receipt = Receipt {
        transaction_hash: H256::repeat_byte(0x01),
        status: 1,
        gas_used: 1_500_000,
        contract_address: None,
        logs: vec![],
    };
    let err = token_created_address(&abi, factory, &receipt).expect_err("No event");
    assert!(matches!(err, Error::EventDecoding(_)));
}

#[test]
fn test_foreign_logs_are_ignored() {
    let abi = factory_abi();
    let event = abi.event("TokenCreated").unwrap();
    let factory: Address = FACTORY_ADDR.parse().unwrap();
    let other = Address::from([0x33u8; 20]);
    // A matching event emitted by a different contract must not count.
    let receipt = Receipt {
        transaction_hash: H256::repeat_byte(0x01),
        status: 1,
        gas_used: 1_500_000,
        contract_address: None,
        logs: vec![LogEntry {
            address: other,
            topics: vec![event.signature(), topic(other), topic(other)],
            data: ethabi::encode(&[ethabi::Token::String("spoof".to_string())]).into(),
        }],
    };
    let err = token_created_address(&abi, factory, &receipt).expect_err("No factory event");
    assert!(matches!(err, Error::EventDecoding(_)));
}

#[test]
fn test_token_facade_round_trip() {
    let ocean = Ocean::new(ganache_config(), "ganache", TEST_KEY).expect("Must open");
    let address: Address = "0x7567d83b7b8d80addcb281a71d54fc7b3364ffed".parse().unwrap();
    let token = ocean.token(address).expect("Must bind");
    assert_eq!(token.address(), address);
    let again = ocean.token(token.address()).expect("Must bind");
    assert_eq!(again.address(), token.address());
}

#[test]
fn test_download_is_an_explicit_stub() {
    let ocean = Ocean::new(ganache_config(), "ganache", TEST_KEY).expect("Must open");
    let token = ocean.token(Address::from([0x44u8; 20])).expect("Must bind");
    let err = token.download().expect_err("Stub");
    assert!(matches!(err, Error::NotImplemented(_)));
}

#[test]
fn test_missing_gas_price_fails_before_any_network_call() {
    let config = MemoryConfig::new()
        .with(DEFAULT_SECTION, "GANACHE_URL", "http://127.0.0.1:9")
        .with("ganache", "FACTORY_ADDRESS", FACTORY_ADDR);
    let ocean = Ocean::new(config, "ganache", TEST_KEY).expect("Must open");
    let token = ocean.token(Address::from([0x44u8; 20])).expect("Must bind");
    // The node at the configured URL does not exist; reaching it would
    // surface a Submission error instead.
    let err = token.mint(U256::from(1)).expect_err("No GAS_PRICE");
    assert!(matches!(err, Error::Configuration(_)));
    assert!(err.to_string().contains("GAS_PRICE"));
}

#[test]
fn test_unreachable_node_is_a_submission_error() {
    let ocean = Ocean::new(ganache_config(), "ganache", TEST_KEY).expect("Must open");
    let token = ocean.token(Address::from([0x44u8; 20])).expect("Must bind");
    let err = token.mint(U256::from(1)).expect_err("Unreachable");
    assert!(matches!(err, Error::Submission(_)));
}
