// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::config::Config;

pub fn handle(config: &Config) -> Result<()> {
    match Config::path() {
        Ok(p) => println!("Config file: {}", p.display()),
        Err(e) => println!("Config file: unavailable ({})", e),
    }
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
