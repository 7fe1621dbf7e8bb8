use std::sync::Arc;

use dashgate::config::{load_config, print_schema};
use dashgate::startup::run;
use dashgate::utils::logger::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::args().any(|arg| arg == "--schema") {
        print_schema()?;
        return Ok(());
    }

    let config = load_config();
    init_logging(&config.logging)?;

    run(Arc::new(config)).await
}
