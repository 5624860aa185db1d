//! Execution context and the caller-facing `Ocean` session.

use crate::address::{decode_private_key, Address, AddressConvertible, PrivateKey};
use crate::config::{ConfigProvider, DEFAULT_SECTION};
use crate::contracts::{DataToken, Factory};
use crate::error::{Error, Result};
use crate::network::{infura_url, EthereumNode};
use ethereum_types::U256;
use std::sync::Arc;

/// Reserved name of the local test network.
pub const GANACHE_NETWORK: &str = "ganache";

fn chain_id_for(network: &str) -> Option<u64> {
    // Static table: context construction must not touch the network.
    match network {
        "mainnet" => Some(1),
        "ropsten" => Some(3),
        "rinkeby" => Some(4),
        "goerli" => Some(5),
        "kovan" => Some(42),
        "sepolia" => Some(11_155_111),
        GANACHE_NETWORK => Some(1337),
        _ => None,
    }
}

/// Everything a chain interaction needs: network identity, node handle and
/// the signing key with its derived account address.
///
/// Immutable after construction and shared via [`Arc`] with every facade
/// built from it. Facades never mutate the context.
pub struct Context {
    /// Network name, also the configuration section for network values.
    pub network: String,
    /// JSON-RPC node handle.
    pub node: EthereumNode,
    /// Chain id transactions are bound to.
    pub chain_id: u64,
    /// Account address derived from the signing key.
    pub address: Address,
    private_key: PrivateKey,
    config: Box<dyn ConfigProvider>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("network", &self.network)
            .field("node", &self.node)
            .field("chain_id", &self.chain_id)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl Context {
    pub fn new(
        config: Box<dyn ConfigProvider>,
        network: &str,
        private_key: &str,
    ) -> Result<Self> {
        //! Resolve the RPC endpoint for `network` and derive the account
        //! address from `private_key`.
        //!
        //! The local test network uses `GANACHE_URL` directly; public
        //! networks compose their endpoint from `WEB3_INFURA_PROJECT_ID`.
        //! Performs no network I/O.
        let chain_id = chain_id_for(network)
            .ok_or_else(|| Error::Configuration(format!("unrecognized network {network}")))?;
        let url = if network == GANACHE_NETWORK {
            config.value(DEFAULT_SECTION, "GANACHE_URL")?
        } else {
            let project_id = config.value(DEFAULT_SECTION, "WEB3_INFURA_PROJECT_ID")?;
            infura_url(&project_id, network)
        };
        let node = EthereumNode::connect(&url)?;
        let private_key = decode_private_key(private_key)?;
        Ok(Self {
            network: network.to_string(),
            node,
            chain_id,
            address: private_key.address(),
            private_key,
            config,
        })
    }

    pub(crate) fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn config_value(&self, key: &str) -> Result<String> {
        //! Look up a configuration value in this network's section.
        self.config.value(&self.network, key)
    }

    pub fn gas_price(&self) -> Result<U256> {
        //! Resolve the configured gas price (a decimal string, in wei).
        let raw = self.config_value("GAS_PRICE")?;
        U256::from_dec_str(raw.trim())
            .map_err(|e| Error::Configuration(format!("malformed GAS_PRICE {raw}: {e:?}")))
    }
}

/// A session against one network: the execution context plus the factory
/// facade, ready to create and operate data tokens.
pub struct Ocean {
    context: Arc<Context>,
    factory: Factory,
}

impl Ocean {
    pub fn new<C: ConfigProvider + 'static>(
        config: C,
        network: &str,
        private_key: &str,
    ) -> Result<Self> {
        //! Open a session: build the execution context and bind the factory
        //! facade to the configured `FACTORY_ADDRESS`.
        let context = Arc::new(Context::new(Box::new(config), network, private_key)?);
        let factory = Factory::new(Arc::clone(&context))?;
        Ok(Self { context, factory })
    }

    pub fn create_token(&self, blob: &str) -> Result<DataToken> {
        //! Deploy a new data token through the factory.
        self.factory.create_token(blob)
    }

    pub fn token(&self, address: Address) -> Result<DataToken> {
        //! Get a facade for an already deployed data token.
        DataToken::new(Arc::clone(&self.context), address)
    }

    pub fn address(&self) -> Address {
        //! The session's own account address.
        self.context.address
    }
}
