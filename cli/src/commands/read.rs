use simple_store::{parse_address, SimpleStore};

use crate::{
    cli::GlobalOptions,
    commands::{load_config, local_wallet},
    error::Result,
    ui,
};

pub async fn run(options: &GlobalOptions) -> Result<()> {
    let config = load_config(options)?;
    let address = parse_address(&config.contract_address)?;
    let wallet = local_wallet(&config)?;

    ui::status(format!("Reading SimpleStore at {}", address.to_checksum(None)));
    let store = SimpleStore::connect(Some(&wallet), &config).await?;
    let value = store.get_value().await?;

    println!("Current on-chain value: {value}");
    Ok(())
}
