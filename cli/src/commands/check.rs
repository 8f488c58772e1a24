use alloy_primitives::utils::format_ether;
use simple_store::{parse_address, StoreError, Wallet};

use crate::{
    cli::GlobalOptions,
    commands::{load_config, local_wallet},
    error::{CliError, Result},
    ui,
};

pub async fn run(options: &GlobalOptions) -> Result<()> {
    if options.config.exists() {
        ui::status(format!("Using {}", options.config.display()));
    } else {
        ui::warn(format!(
            "{} not found, using environment and flags only",
            options.config.display()
        ));
    }

    let config = load_config(options)?;
    let network = &config.network;
    let mut failures = 0;

    let address = parse_address(&config.contract_address);
    record(
        &format!("contract address {}", config.contract_address),
        matches!(&address, Ok(address) if !address.is_zero()),
        &mut failures,
    );
    if let Err(err) = &address {
        ui::error(err.to_string());
    }

    let wallet = local_wallet(&config)?;
    let account = wallet.address();
    println!("Account: {}", account.to_checksum(None));

    let chain_id = wallet.chain_id().await.map_err(StoreError::from)?;
    record(
        &format!(
            "RPC endpoint is on {} (chain id {})",
            network.chain_name, network.chain_id
        ),
        chain_id == network.chain_id,
        &mut failures,
    );

    let balance = wallet
        .balance(account)
        .await
        .map_err(StoreError::from)?;
    println!(
        "Balance: {} {}",
        format_ether(balance),
        network.native_currency.symbol
    );
    if balance.is_zero() {
        ui::warn("account has no funds to pay for gas");
    }

    if failures > 0 {
        return Err(CliError::Message(format!(
            "check failed with {failures} issue(s)"
        )));
    }

    ui::success("All checks passed");
    Ok(())
}

fn record(name: &str, ok: bool, failures: &mut usize) {
    if ok {
        ui::success(name);
    } else {
        *failures += 1;
        ui::error(name);
    }
}
