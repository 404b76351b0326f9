// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
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

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Record id")
}

fn month_arg() -> Arg {
    Arg::new("month").long("month").help("Filter by month (YYYY-MM)")
}

/// Decimal input. Accepts a leading minus.
fn amount_arg(name: &'static str, long: &'static str) -> Arg {
    Arg::new(name).long(long).allow_negative_numbers(true)
}

fn limit_arg() -> Arg {
    Arg::new("limit")
        .long("limit")
        .value_parser(value_parser!(usize))
        .help("Maximum number of rows")
}

fn expense_cmd() -> Command {
    Command::new("expense")
        .about("Record and manage expenses")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add an expense; --amount is the pre-tax amount")
                .arg(Arg::new("date").long("date").required(true))
                .arg(Arg::new("description").long("description").required(true))
                .arg(amount_arg("amount", "amount").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(
                    Arg::new("taxable")
                        .long("taxable")
                        .action(ArgAction::SetTrue)
                        .help("Apply --tax-rate on top of the amount"),
                )
                .arg(
                    amount_arg("tax_rate", "tax-rate")
                        .default_value("0")
                        .help("Tax rate in percent"),
                )
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List expenses, newest first")
                .arg(month_arg())
                .arg(Arg::new("category").long("category"))
                .arg(limit_arg()),
        ))
        .subcommand(
            Command::new("edit")
                .about("Update an expense; omitted fields keep their value")
                .arg(id_arg())
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("description").long("description"))
                .arg(amount_arg("amount", "amount"))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("taxable")
                        .long("taxable")
                        .value_parser(value_parser!(bool)),
                )
                .arg(amount_arg("tax_rate", "tax-rate"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(Command::new("rm").about("Delete an expense").arg(id_arg()))
}

fn income_cmd() -> Command {
    Command::new("income")
        .about("Record and manage income")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(Arg::new("date").long("date").required(true))
                .arg(Arg::new("description").long("description").required(true))
                .arg(amount_arg("amount", "amount").required(true))
                .arg(Arg::new("source").long("source").required(true))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(json_args(
            Command::new("list")
                .arg(month_arg())
                .arg(Arg::new("source").long("source"))
                .arg(limit_arg()),
        ))
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("description").long("description"))
                .arg(amount_arg("amount", "amount"))
                .arg(Arg::new("source").long("source"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Monthly budget and Needs/Wants/Savings allocation")
        .subcommand_required(true)
        .subcommand(json_args(Command::new("show")))
        .subcommand(
            Command::new("set")
                .about("Set the total monthly budget")
                .arg(amount_arg("total", "total").required(true)),
        )
        .subcommand(
            Command::new("allocate")
                .about("Set allocation percentages; they must add up to 100")
                .arg(amount_arg("needs", "needs").required(true))
                .arg(amount_arg("wants", "wants").required(true))
                .arg(amount_arg("savings", "savings").required(true)),
        )
        .subcommand(Command::new("reset").about("Reset allocation to 50/30/20"))
        .subcommand(
            Command::new("category")
                .about("Set the budget ceiling of one category")
                .arg(Arg::new("category").long("category").required(true))
                .arg(amount_arg("amount", "amount").required(true)),
        )
        .subcommand(json_args(
            Command::new("report")
                .about("Budget vs actual per type and category")
                .arg(month_arg()),
        ))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Spending reports")
        .subcommand_required(true)
        .subcommand(json_args(
            Command::new("spend-by-category").arg(month_arg()),
        ))
        .subcommand(json_args(
            Command::new("cashflow").arg(
                Arg::new("months")
                    .long("months")
                    .value_parser(value_parser!(usize))
                    .default_value("12"),
            ),
        ))
}

fn export_cmd() -> Command {
    let target = |name: &'static str| {
        Command::new(name)
            .arg(
                Arg::new("format")
                    .long("format")
                    .default_value("csv")
                    .help("csv|json"),
            )
            .arg(Arg::new("out").long("out").required(true))
    };
    Command::new("export")
        .about("Export records to a file")
        .subcommand_required(true)
        .subcommand(target("expenses"))
        .subcommand(target("income"))
}

fn import_cmd() -> Command {
    Command::new("import")
        .about("Import records from CSV")
        .subcommand_required(true)
        .subcommand(
            Command::new("expenses")
                .about("CSV header: date,description,amount,category,taxable,tax_rate,notes")
                .arg(Arg::new("path").long("path").required(true)),
        )
}

fn settings_cmd() -> Command {
    Command::new("settings")
        .about("Display settings")
        .subcommand_required(true)
        .subcommand(
            Command::new("set-currency")
                .arg(Arg::new("currency").long("currency").required(true)),
        )
        .subcommand(Command::new("show"))
}

pub fn build_cli() -> Command {
    Command::new("budgetbuddy")
        .version(clap::crate_version!())
        .about("Track expenses and income against a Needs/Wants/Savings budget")
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(expense_cmd())
        .subcommand(income_cmd())
        .subcommand(budget_cmd())
        .subcommand(json_args(
            Command::new("dashboard").about("Balance, recent activity and budget progress"),
        ))
        .subcommand(report_cmd())
        .subcommand(export_cmd())
        .subcommand(import_cmd())
        .subcommand(settings_cmd())
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}
