// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Month to show (defaults to the current month)")
}

fn output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

/// Form fields; `required` is false for edits, where missing fields keep
/// the record's current values.
fn form_args(cmd: Command, required: bool) -> Command {
    let mut kind = Arg::new("type")
        .long("type")
        .value_parser(["income", "expense"])
        .help("Transaction type");
    if required {
        kind = kind.default_value("expense");
    }
    cmd.arg(kind)
    .arg(
        Arg::new("category")
            .long("category")
            .required(required)
            .help("Category label, e.g. Food, Rent, Salary"),
    )
    .arg(
        Arg::new("amount")
            .long("amount")
            .required(required)
            .allow_hyphen_values(true)
            .help("Amount, non-negative"),
    )
    .arg(
        Arg::new("date")
            .long("date")
            .required(required)
            .value_name("YYYY-MM-DD"),
    )
}

fn color_arg() -> Arg {
    Arg::new("color")
        .required(true)
        .value_name("RRGGBB")
        .help("Hex color; a leading '#' must be quoted")
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Transaction id")
}

fn tx_command() -> Command {
    Command::new("tx")
        .about("Add, edit, delete and list transactions")
        .subcommand_required(true)
        .subcommand(form_args(Command::new("add").about("Record a transaction"), true))
        .subcommand(form_args(
            Command::new("edit")
                .about("Edit a transaction; omitted fields keep their value")
                .arg(id_arg()),
            false,
        ))
        .subcommand(
            Command::new("delete")
                .about("Delete a transaction")
                .arg(id_arg()),
        )
        .subcommand(output_flags(
            Command::new("list")
                .about("List transactions for a month")
                .arg(month_arg()),
        ))
}

fn report_command() -> Command {
    let report = |name: &'static str, about: &'static str| {
        output_flags(Command::new(name).about(about).arg(month_arg()))
    };
    Command::new("report")
        .about("Monthly summaries")
        .subcommand_required(true)
        .subcommand(report("summary", "Income, expense and balance"))
        .subcommand(report("categories", "Expenses by category"))
        .subcommand(report("trend", "Income and expense per day"))
}

fn export_command() -> Command {
    Command::new("export")
        .about("Export data to a file")
        .subcommand_required(true)
        .subcommand(
            Command::new("transactions")
                .about("Export a month's transactions")
                .arg(month_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["csv", "json"])
                        .default_value("csv"),
                )
                .arg(Arg::new("out").long("out").required(true).value_name("PATH")),
        )
}

pub fn build_cli() -> Command {
    Command::new("pitaka")
        .version(crate_version!())
        .about("Track income and expenses, with monthly summaries and trends")
        .subcommand(tx_command())
        .subcommand(report_command())
        .subcommand(export_command())
        .subcommand(Command::new("shell").about("Interactive dashboard session"))
        .subcommand(Command::new("config").about("Show the configuration in use"))
}

/// Commands accepted inside `pitaka shell`, one per input line.
pub fn build_shell() -> Command {
    Command::new("shell")
        .no_binary_name(true)
        .disable_version_flag(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("filter")
                .about("Select the month to show")
                .arg(Arg::new("month").required(true).value_name("YYYY-MM")),
        )
        .subcommand(Command::new("show").about("Summary, categories and trend"))
        .subcommand(Command::new("list").about("Transactions for the selected month"))
        .subcommand(Command::new("refresh").about("Reload from the ledger service"))
        .subcommand(form_args(
            Command::new("add").about("Submit a new transaction (cancels any edit)"),
            true,
        ))
        .subcommand(
            Command::new("edit")
                .about("Start editing a transaction")
                .arg(id_arg()),
        )
        .subcommand(form_args(
            Command::new("submit").about("Submit the form; given fields override it"),
            false,
        ))
        .subcommand(Command::new("cancel").about("Stop editing"))
        .subcommand(
            Command::new("delete")
                .about("Delete a transaction")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("color")
                .about("Set a category's chart color")
                .arg(Arg::new("category").required(true))
                .arg(color_arg()),
        )
        .subcommand(
            Command::new("trend-color")
                .about("Set the income or expense trend color")
                .arg(
                    Arg::new("kind")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(color_arg()),
        )
        .subcommand(Command::new("quit").alias("exit").about("Leave the shell"))
}
