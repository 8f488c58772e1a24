use simple_store::{abi::parse_value, parse_address, SimpleStore};

use crate::{
    cli::{GlobalOptions, WriteArgs},
    commands::{load_config, local_wallet},
    error::Result,
    ui,
};

pub async fn run(options: &GlobalOptions, args: WriteArgs) -> Result<()> {
    // Nothing touches the network until the input and address are valid.
    let value = parse_value(&args.value)?;
    let config = load_config(options)?;
    parse_address(&config.contract_address)?;
    let wallet = local_wallet(&config)?;

    let store = SimpleStore::connect(Some(&wallet), &config).await?;

    ui::status(format!("Setting value = {value} in SimpleStore..."));
    let pending = store.set_value(value).await?;
    ui::success(format!("Transaction sent: {}", pending.hash()));
    ui::status(config.network.transaction_url(pending.hash()));

    let receipt = pending.wait().await?;
    match receipt.block_number {
        Some(block) => ui::success(format!("Transaction confirmed in block {block}")),
        None => ui::success("Transaction confirmed"),
    }

    let stored = store.get_value().await?;
    println!("New on-chain value: {stored}");
    Ok(())
}
