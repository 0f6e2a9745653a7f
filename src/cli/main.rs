// SPDX-License-Identifier: Apache-2.0

mod compare;
mod diff;
mod error;
mod file;
mod filter;
mod merge;
mod ordering;

pub(crate) use self::error::CliError;
use self::{
    compare::CommandCompare, diff::CommandDiff, filter::CommandFilter,
    merge::CommandMerge, ordering::CommandOrdering,
};

fn main() -> Result<(), CliError> {
    let mut cli_cmd = clap::Command::new("ncd")
        .about("NETCONF config diff and merge")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            clap::Arg::new("quiet")
                .short('q')
                .action(clap::ArgAction::SetTrue)
                .help("Disable logging")
                .global(true),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .action(clap::ArgAction::Count)
                .help("Increase verbose level")
                .global(true),
        )
        .subcommand(CommandDiff::new_cmd())
        .subcommand(CommandMerge::new_cmd())
        .subcommand(CommandCompare::new_cmd())
        .subcommand(CommandFilter::new_cmd())
        .subcommand(CommandOrdering::new_cmd());

    let matches = cli_cmd.get_matches_mut();

    let (log_groups, log_level) = match matches.get_count("verbose") {
        0 => (vec!["ncdiff", "ncd"], log::LevelFilter::Info),
        1 => (vec!["ncdiff", "ncd"], log::LevelFilter::Debug),
        2 => (vec!["ncdiff", "ncd"], log::LevelFilter::Trace),
        _ => (vec![], log::LevelFilter::Trace),
    };

    if !matches.get_flag("quiet") {
        let mut log_builder = env_logger::Builder::new();
        if log_groups.is_empty() {
            log_builder.filter(None, log_level);
        } else {
            for log_group in log_groups {
                log_builder.filter(Some(log_group), log_level);
            }
        }
        log_builder.init();
    }

    log::debug!("ncd version: {}", clap::crate_version!());

    if let Err(e) = call_subcommand(&matches) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    Ok(())
}

fn call_subcommand(matches: &clap::ArgMatches) -> Result<(), CliError> {
    if let Some(matches) = matches.subcommand_matches(CommandDiff::CMD) {
        CommandDiff::handle(matches)
    } else if let Some(matches) = matches.subcommand_matches(CommandMerge::CMD)
    {
        CommandMerge::handle(matches)
    } else if let Some(matches) =
        matches.subcommand_matches(CommandCompare::CMD)
    {
        CommandCompare::handle(matches)
    } else if let Some(matches) =
        matches.subcommand_matches(CommandFilter::CMD)
    {
        CommandFilter::handle(matches)
    } else if let Some(matches) =
        matches.subcommand_matches(CommandOrdering::CMD)
    {
        CommandOrdering::handle(matches)
    } else {
        Err(CliError::from("Unknown command"))
    }
}
