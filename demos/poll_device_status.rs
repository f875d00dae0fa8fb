//! Poll the online status of one device every five seconds.
//!
//! ```text
//! cargo run --example poll_device_status --features cli -- \
//!     --host 192.168.178.1 --password secret --mac 12:34:56:78:90:AB
//! ```

use arris_connectbox::cli::args::{LogArgs, RouterArgs};
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Poll device status.
#[derive(Debug, Parser)]
struct Args {
    #[command(flatten)]
    router: RouterArgs,

    #[command(flatten)]
    log: LogArgs,

    /// MAC address of the device to poll.
    #[arg(long = "mac")]
    mac: String,
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

    let mut interval = tokio::time::interval(POLL_INTERVAL);
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => break,
        }

        match client.get_connected_devices().await {
            Ok(devices) => {
                println!("matches:");
                for device in devices.iter().filter(|d| {
                    d.mac_address
                        .as_deref()
                        .is_some_and(|mac| mac.eq_ignore_ascii_case(&args.mac))
                }) {
                    println!("ip: {}, online: {}", device.address, device.online);
                }
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    if let Err(e) = client.logout().await {
        eprintln!("Error: logout failed: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
