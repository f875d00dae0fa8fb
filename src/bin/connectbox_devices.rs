//! connectbox-devices: List MAC addresses of all online devices.
//!
//! Part of the arris-connectbox CLI utilities.

use arris_connectbox::cli::args::{LogArgs, RouterArgs};
use arris_connectbox::cli::device_line;
use clap::Parser;
use std::process::ExitCode;

/// List MAC addresses and host names of all online devices.
#[derive(Debug, Parser)]
#[command(name = "connectbox-devices", version, about)]
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

    let result = client.online_devices().await;
    let logout = client.logout().await;

    let devices = match result {
        Ok(devices) => devices,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for device in &devices {
        println!("{}", device_line(device));
    }

    if let Err(e) = logout {
        eprintln!("Error: logout failed: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
