// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use pitaka::config::Config;
use pitaka::{cli, commands, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config = Config::load()?;

    match matches.subcommand() {
        Some(("config", _)) => commands::settings::handle(&config)?,
        Some((name, sub)) => {
            let mut dash = commands::open_dashboard(&config).await?;
            match name {
                "tx" => commands::transactions::handle(&mut dash, sub).await?,
                "report" => commands::reports::handle(&mut dash, sub).await?,
                "export" => commands::exporter::handle(&mut dash, sub).await?,
                "shell" => commands::shell::run(&mut dash).await?,
                _ => {}
            }
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
