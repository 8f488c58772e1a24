pub mod check;
pub mod completions;
pub mod init;
pub mod read;
pub mod schema;
pub mod write;

use log::debug;
use simple_store::{
    config::{FileConfig, StoreConfig, DEPLOYED_ADDRESS, ENV_PRIVATE_KEY},
    LocalWallet,
};

use crate::{
    cli::GlobalOptions,
    error::{CliError, Result},
};

/// Configuration file, then environment, then command-line flags.
///
/// Without any configured address the commands target the known Sepolia
/// deployment.
pub fn load_config(options: &GlobalOptions) -> Result<StoreConfig> {
    let mut file = FileConfig::load_optional(&options.config)?.merge_env();

    if let Some(rpc_url) = &options.rpc_url {
        file.rpc_url = Some(rpc_url.clone());
    }
    if let Some(address) = &options.address {
        file.contract_address = Some(address.clone());
    }
    if file.contract_address.is_none() {
        file.contract_address = Some(DEPLOYED_ADDRESS.to_string());
    }

    let config = file.resolve()?;
    debug!("resolved configuration: {config:?}");
    Ok(config)
}

pub fn local_wallet(config: &StoreConfig) -> Result<LocalWallet> {
    let key = config.private_key.as_deref().ok_or_else(|| {
        CliError::Message(format!(
            "no signing key configured: set {ENV_PRIVATE_KEY} or private_key in the config file"
        ))
    })?;
    Ok(LocalWallet::from_hex_key(key, &config.network.rpc_url)?)
}
