use std::io::{self, BufRead, Write};

use log::{error, info};
use tracing_subscriber::EnvFilter;
use twin_relay::{config, Relay, RelayConfig};

fn init_logging() {
    // stdout queda reservado para los mensajes republicados
    let filter = EnvFilter::try_from_env("RELAY_LOG").unwrap_or_else(|_| EnvFilter::from_default_env());
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() {
    config::init_dotenv();
    init_logging();

    let cfg = match RelayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[twin-relay] {e}");
            std::process::exit(2);
        }
    };
    let relay = match Relay::from_config(&cfg) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("[twin-relay] {e}");
            std::process::exit(2);
        }
    };
    info!("relay ready for device {} (window={}, prefix={})", cfg.device_id, cfg.window_size, cfg.remap_prefix);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("stdin read failed: {e}");
                std::process::exit(5);
            }
        };
        match relay.handle_line(&line) {
            Ok(Some(published)) => {
                let written = serde_json::to_string(&published).map_err(io::Error::from)
                                                                .and_then(|json| writeln!(out, "{json}"));
                if let Err(e) = written {
                    error!("stdout write failed: {e}");
                    std::process::exit(5);
                }
            }
            Ok(None) => {}
            Err(e) => error!("{e}"),
        }
    }
}
