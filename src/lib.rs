// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod colors;
pub mod commands;
pub mod config;
pub mod coordinator;
pub mod dashboard;
pub mod db;
pub mod errors;
pub mod logging;
pub mod models;
pub mod notice;
pub mod remote;
pub mod session;
pub mod store;
pub mod utils;
