// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Acrostic-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Acrostic and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Acrostic relay entrypoint.
//!
//! Serves the websocket relay at `ws://127.0.0.1:<port>/ws` on top of a data
//! directory of games, players, and the daily puzzle rotation.

use std::error::Error;
use std::sync::Arc;

use acrostic::model::Dow;
use acrostic::puzzle;
use acrostic::relay::{router, RelayState, TrustingIdentity};
use acrostic::store::{DataDir, WriteDurability};

const DEFAULT_PORT: u16 = 27436;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<data-dir>] [--durable-writes] [--port <port>]\n  {program} [--data <dir>] [--durable-writes] [--port <port>]\n  {program} --demo [--port <port>]\n\nServes the realtime relay at `ws://127.0.0.1:<port>/ws`.\n--port selects the port (0 = ephemeral; default {DEFAULT_PORT}).\n\nIf data-dir/--data is omitted, the current working directory is used.\n--demo seeds a temporary data directory with built-in puzzles for every\nday of the week and cannot be combined with data-dir/--data.\n\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    data_dir: Option<String>,
    port: Option<u16>,
    durable_writes: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--data" => {
                if options.data_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.data_dir = Some(dir);
            }
            "--port" => {
                if options.port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.port = Some(port);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.data_dir.is_some() {
                    return Err(());
                }
                options.data_dir = Some(arg);
            }
        }
    }

    if options.demo && options.data_dir.is_some() {
        return Err(());
    }

    Ok(options)
}

/// Fills every day-of-week slot with a built-in puzzle.
fn seed_demo_puzzles(store: &DataDir) -> Result<(), Box<dyn Error>> {
    let rotation = [
        puzzle::compile(&puzzle::fixtures::mini_5x5())?,
        puzzle::compile(&puzzle::fixtures::open_15x15())?,
        puzzle::compile(&puzzle::fixtures::rebus_3x3())?,
    ];
    for (n, dow) in Dow::ALL.iter().enumerate() {
        store.save_puzzle(*dow, &rotation[n % rotation.len()])?;
    }
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        env_logger::init();

        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "acrostic".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let dir = if options.demo {
            let now_millis = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0);
            let demo_dir = std::env::temp_dir()
                .join(format!("acrostic-demo-data-{}-{now_millis}", std::process::id()));
            demo_dir.to_string_lossy().into_owned()
        } else {
            options.data_dir.unwrap_or_else(|| ".".to_owned())
        };

        let store = if options.durable_writes {
            DataDir::new(&dir).with_durability(WriteDurability::Durable)
        } else {
            DataDir::new(&dir)
        };
        if options.demo {
            seed_demo_puzzles(&store)?;
        }

        let port = options.port.unwrap_or(DEFAULT_PORT);
        let state = Arc::new(RelayState::new(store, Arc::new(TrustingIdentity)));

        let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
            let address = listener.local_addr()?;
            log::info!("acrostic relay listening on ws://{address}/ws (data dir: {dir})");
            axum::serve(listener, router(state)).await?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("acrostic: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_demo_flag() {
        let options = parse_options(["--demo".to_owned()].into_iter()).expect("parse options");
        assert!(options.demo);
        assert!(options.data_dir.is_none());
        assert_eq!(options.port, None);
    }

    #[test]
    fn parses_data_dir() {
        let options = parse_options(["--data".to_owned(), "some/dir".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.data_dir.as_deref(), Some("some/dir"));
        assert!(!options.demo);
    }

    #[test]
    fn parses_positional_data_dir() {
        let options = parse_options(["some/dir".to_owned()].into_iter()).expect("parse options");
        assert_eq!(options.data_dir.as_deref(), Some("some/dir"));
    }

    #[test]
    fn parses_port() {
        let options = parse_options(["--port".to_owned(), "1234".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.port, Some(1234));
    }

    #[test]
    fn parses_durable_writes() {
        let options =
            parse_options(["--durable-writes".to_owned()].into_iter()).expect("parse options");
        assert!(options.durable_writes);
    }

    #[test]
    fn rejects_demo_with_data_dir() {
        parse_options(["--demo".to_owned(), "--data".to_owned(), ".".to_owned()].into_iter())
            .unwrap_err();
    }

    #[test]
    fn rejects_unknown_args() {
        parse_options(["--nope".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(["--demo".to_owned(), "--demo".to_owned()].into_iter()).unwrap_err();

        parse_options(
            ["--data".to_owned(), ".".to_owned(), "--data".to_owned(), "other".to_owned()]
                .into_iter(),
        )
        .unwrap_err();
    }

    #[test]
    fn rejects_multiple_positional_data_dirs() {
        parse_options(["one".to_owned(), "two".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_bad_port() {
        parse_options(["--port".to_owned(), "not-a-port".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_missing_data_value() {
        parse_options(["--data".to_owned()].into_iter()).unwrap_err();
    }
}
