use anyhow::Result;
use dotenv::dotenv;
use std::env;

use contract_console::interactive;

#[tokio::main]
async fn main() -> Result<()> {
    if env::args().count() > 1 {
        eprintln!("This program only runs in interactive mode. Please run without any arguments.");
        eprintln!("Usage: contract-console");
        std::process::exit(1);
    }

    dotenv().ok();
    env_logger::init();

    interactive::start().await
}
