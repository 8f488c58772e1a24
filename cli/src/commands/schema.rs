use serde_json::json;
use simple_store::{config::DEPLOYED_ADDRESS, schema::SIMPLE_STORE};

use crate::{cli::SchemaArgs, error::Result};

pub fn run(args: SchemaArgs) -> Result<()> {
    let schema = json!({
        "name": SIMPLE_STORE.name,
        "address": DEPLOYED_ADDRESS,
        "functions": SIMPLE_STORE.functions,
    });

    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&schema)?);
    } else {
        println!("{}", serde_json::to_string(&schema)?);
    }

    Ok(())
}
