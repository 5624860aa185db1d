#![doc(html_root_url = "https://docs.rs/ocean-datatoken/0.1.0")]
#![warn(rust_2018_idioms, missing_docs)]
#![deny(dead_code, unused_imports, unused_mut)]

//! Rust client library for Ocean Protocol data tokens: network
//! configuration, local transaction signing and factory/token contract
//! interaction.
//!
//! This library is a thin binding over two deployed smart contracts, a data
//! token factory and the token template it instantiates. All business rules
//! live on-chain; the crate's job is to resolve configuration, derive the
//! caller account from a private key, assemble and sign legacy transactions
//! locally, submit them over JSON-RPC and decode the factory's
//! `TokenCreated` event to hand back a facade for the freshly deployed
//! token.
//!
//! ## Usage
//!
//! A session is opened from an injected configuration source, a network
//! name and a private key; everything else is method calls on facades.
//!
//! ```rust,no_run
//! use ocean_datatoken::config::FileConfig;
//! use ocean_datatoken::{Address, Ocean, U256};
//!
//! let config = FileConfig::load("ocean.conf").expect("Config must exist");
//! let ocean = Ocean::new(config, "ganache", "0x7582be841ca040aa940fff6c05773129e135623e41acce3e0b8ba520dc1ae26a")
//!     .expect("Must open a session");
//!
//! let token = ocean.create_token("my-data-blob").expect("Must deploy");
//! token.mint(U256::from(100)).expect("Must mint");
//! let recipient: Address = "0x7567d83b7b8d80addcb281a71d54fc7b3364ffed"
//!     .parse()
//!     .unwrap();
//! token.transfer(recipient, U256::from(10)).expect("Must transfer");
//! ```
//!
//! Every chain interaction is synchronous and blocks until the node
//! responds; a submission is only reported successful once its receipt
//! confirms on-chain execution did not revert.
//!
//! The configuration file is ini-style, see [`config`] for the expected
//! layout. The contract ABIs are loaded from the `abi/` directory relative
//! to the working directory.

mod address;
pub use address::{decode_private_key, Address, AddressConvertible, PrivateKey, PublicKey};
pub mod config;
pub mod contracts;
mod error;
pub use error::{Error, Result};
pub mod network;
pub mod session;
pub use session::{Context, Ocean};
pub mod submitter;
pub mod transactions;
mod utils;
pub use ethereum_types::{H160, H256, U256};
pub use utils::keccak;
