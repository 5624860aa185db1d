//! Typed facades over the factory and data-token contracts.
//!
//! Each facade is a stateless view over the chain: it owns nothing but a
//! shared execution context, a contract address and the loaded ABI. Every
//! operation is one independent round trip through the submitter; no token
//! state is cached locally.

use crate::address::Address;
use crate::error::{Error, Result};
use crate::network::Receipt;
use crate::session::Context;
use crate::submitter::build_and_send;
use bytes::Bytes;
use ethabi::{RawLog, Token};
use ethereum_types::U256;
use std::ops::Deref;
use std::sync::Arc;
use tracing::info;

/// Gas limit for a token deployment through the factory.
pub const GAS_LIMIT_CREATE_TOKEN: u64 = 4_000_000;
/// Gas limit for minting tokens.
pub const GAS_LIMIT_MINT: u64 = 600_000;
/// Gas limit for a token transfer.
pub const GAS_LIMIT_TRANSFER: u64 = 250_000;

const FACTORY_ABI_PATH: &str = "abi/Factory.abi";
const DATATOKEN_ABI_PATH: &str = "abi/DataTokenTemplate.abi";

/// One prepared contract call, with its fixed gas-limit policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractCall {
    /// Deploy a new data token carrying an opaque creation payload.
    CreateToken {
        /// Opaque metadata blob recorded with the token.
        blob: String,
    },
    /// Mint tokens to an account.
    Mint {
        /// Recipient of the minted tokens.
        to: Address,
        /// Amount to mint, in base units.
        amount: U256,
    },
    /// Transfer tokens to an account.
    Transfer {
        /// Recipient of the transfer.
        to: Address,
        /// Amount to transfer, in base units.
        amount: U256,
    },
}

impl ContractCall {
    pub fn function_name(&self) -> &'static str {
        //! Name of the ABI function this call targets.
        match self {
            Self::CreateToken { .. } => "createToken",
            Self::Mint { .. } => "mint",
            Self::Transfer { .. } => "transfer",
        }
    }

    pub const fn gas_limit(&self) -> u64 {
        //! Fixed, operation-specific gas limit.
        match self {
            Self::CreateToken { .. } => GAS_LIMIT_CREATE_TOKEN,
            Self::Mint { .. } => GAS_LIMIT_MINT,
            Self::Transfer { .. } => GAS_LIMIT_TRANSFER,
        }
    }

    fn tokens(&self) -> Vec<Token> {
        match self {
            Self::CreateToken { blob } => vec![Token::String(blob.clone())],
            Self::Mint { to, amount } => {
                vec![Token::Address(*to.deref()), Token::Uint(*amount)]
            }
            Self::Transfer { to, amount } => {
                vec![Token::Address(*to.deref()), Token::Uint(*amount)]
            }
        }
    }

    pub fn encode(&self, abi: &ethabi::Contract) -> Result<Bytes> {
        //! ABI-encode the call into transaction data.
        let name = self.function_name();
        let function = abi
            .function(name)
            .map_err(|e| Error::Configuration(format!("ABI has no function {name}: {e}")))?;
        let data = function
            .encode_input(&self.tokens())
            .map_err(|e| Error::Configuration(format!("cannot encode {name} call: {e}")))?;
        Ok(data.into())
    }
}

fn load_abi(path: &str) -> Result<ethabi::Contract> {
    let file = std::fs::File::open(path)
        .map_err(|e| Error::Configuration(format!("cannot read ABI {path}: {e}")))?;
    ethabi::Contract::load(file)
        .map_err(|e| Error::Configuration(format!("malformed ABI {path}: {e}")))
}

pub fn token_created_address(
    abi: &ethabi::Contract,
    factory: Address,
    receipt: &Receipt,
) -> Result<Address> {
    //! Extract the deployed token address from the first `TokenCreated`
    //! event the factory emitted in this receipt.
    //!
    //! An absent event means the factory did not behave as the loaded ABI
    //! promises; that is reported, never ignored.
    let event = abi
        .event("TokenCreated")
        .map_err(|e| Error::EventDecoding(format!("ABI has no TokenCreated event: {e}")))?;
    let signature = event.signature();
    let log = receipt
        .logs
        .iter()
        .find(|log| log.address == factory && log.topics.first() == Some(&signature))
        .ok_or_else(|| Error::EventDecoding("no TokenCreated event in receipt".to_string()))?;
    let parsed = event
        .parse_log(RawLog {
            topics: log.topics.clone(),
            data: log.data.to_vec(),
        })
        .map_err(|e| Error::EventDecoding(format!("malformed TokenCreated log: {e}")))?;
    let param = parsed
        .params
        .into_iter()
        .find(|p| p.name == "newTokenAddress")
        .ok_or_else(|| {
            Error::EventDecoding("TokenCreated log is missing newTokenAddress".to_string())
        })?;
    match param.value {
        Token::Address(address) => Ok(address.into()),
        other => Err(Error::EventDecoding(format!(
            "unexpected newTokenAddress value: {other:?}"
        ))),
    }
}

/// Facade over the on-chain data token factory.
pub struct Factory {
    context: Arc<Context>,
    address: Address,
    abi: ethabi::Contract,
}

impl Factory {
    pub fn new(context: Arc<Context>) -> Result<Self> {
        //! Bind the facade to the configured `FACTORY_ADDRESS`.
        let raw = context.config_value("FACTORY_ADDRESS")?;
        let address = raw.parse().map_err(|e| {
            Error::Configuration(format!("malformed FACTORY_ADDRESS {raw}: {e:?}"))
        })?;
        Ok(Self {
            context,
            address,
            abi: load_abi(FACTORY_ABI_PATH)?,
        })
    }

    pub fn address(&self) -> Address {
        //! Address of the factory contract.
        self.address
    }

    pub fn create_token(&self, blob: &str) -> Result<DataToken> {
        //! Deploy a new data token and return a facade bound to it.
        let call = ContractCall::CreateToken {
            blob: blob.to_string(),
        };
        let data = call.encode(&self.abi)?;
        info!(blob, "creating data token");
        let (_, receipt) = build_and_send(
            &self.context,
            self.address,
            data,
            call.gas_limit(),
            U256::zero(),
        )?;
        let token_address = token_created_address(&self.abi, self.address, &receipt)?;
        info!(token = %token_address, "data token created");
        DataToken::new(Arc::clone(&self.context), token_address)
    }
}

/// Facade over one deployed data token contract.
pub struct DataToken {
    context: Arc<Context>,
    address: Address,
    abi: ethabi::Contract,
}

impl DataToken {
    pub fn new(context: Arc<Context>, address: Address) -> Result<Self> {
        //! Bind a facade to an already deployed token.
        Ok(Self {
            context,
            address,
            abi: load_abi(DATATOKEN_ABI_PATH)?,
        })
    }

    pub fn address(&self) -> Address {
        //! Address of the token contract.
        self.address
    }

    pub fn mint(&self, amount: U256) -> Result<Receipt> {
        //! Mint tokens to the session's own account.
        let call = ContractCall::Mint {
            to: self.context.address,
            amount,
        };
        self.submit(&call)
    }

    pub fn transfer(&self, recipient: Address, amount: U256) -> Result<Receipt> {
        //! Transfer tokens to another account.
        let call = ContractCall::Transfer {
            to: recipient,
            amount,
        };
        self.submit(&call)
    }

    pub fn download(&self) -> Result<()> {
        //! Download the underlying data asset.
        //!
        //! Always fails with [`Error::NotImplemented`]: the provider service
        //! this depends on has no stable API yet.
        Err(Error::NotImplemented("data asset download"))
    }

    fn submit(&self, call: &ContractCall) -> Result<Receipt> {
        let data = call.encode(&self.abi)?;
        info!(token = %self.address, call = call.function_name(), "submitting token call");
        let (_, receipt) = build_and_send(
            &self.context,
            self.address,
            data,
            call.gas_limit(),
            U256::zero(),
        )?;
        Ok(receipt)
    }
}
