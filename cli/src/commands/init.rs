use std::fs;

use simple_store::config::{config_template, FileConfig, ENV_PRIVATE_KEY};

use crate::{
    cli::{GlobalOptions, InitArgs},
    error::{CliError, Result},
    ui,
};

pub fn run(options: &GlobalOptions, args: InitArgs) -> Result<()> {
    let path = &options.config;
    if path.exists() && !args.force {
        return Err(CliError::PathAlreadyExists(path.clone()));
    }

    let content = config_template(options.rpc_url.as_deref());
    // Reject a --rpc-url that would not survive the round trip.
    let _: FileConfig = toml::from_str(&content)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;

    ui::success(format!("Wrote {}", path.display()));
    println!("Next steps:");
    println!("  export {ENV_PRIVATE_KEY}=0x...");
    println!("  simple-store check");
    println!("  simple-store read");

    Ok(())
}
