//! connectbox-info: Print the router's MAC address, versions and serial number.
//!
//! Part of the arris-connectbox CLI utilities.

use arris_connectbox::cli::args::{LogArgs, RouterArgs};
use arris_connectbox::cli::router_information_lines;
use clap::Parser;
use std::process::ExitCode;

/// Get router information.
#[derive(Debug, Parser)]
#[command(name = "connectbox-info", version, about)]
struct Args {
    #[command(flatten)]
    router: RouterArgs,

    #[command(flatten)]
    log: LogArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    args.log.init_tracing();

    let client = match args.router.connect() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = client.get_router_information().await;
    let logout = client.logout().await;

    match result {
        Ok(info) => {
            for line in router_information_lines(&info) {
                println!("{}", line);
            }
        }
        Err(e) => {
            eprintln!("Failed to retrieve information of router {}: {}", args.router.host, e);
            return ExitCode::FAILURE;
        }
    }

    if let Err(e) = logout {
        eprintln!("Error: logout failed: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
