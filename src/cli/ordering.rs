// SPDX-License-Identifier: Apache-2.0

use ncdiff::OrderingSolver;

use crate::{
    file::{required_arg, schema_from_file},
    CliError,
};

pub(crate) struct CommandOrdering;

impl CommandOrdering {
    pub(crate) const CMD: &str = "ordering";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new("ordering")
            .about("Print the ordering constraints of a schema as CSV")
            .arg(
                clap::Arg::new("SCHEMA")
                    .required(true)
                    .index(1)
                    .help("Schema description file"),
            )
    }

    pub(crate) fn handle(matches: &clap::ArgMatches) -> Result<(), CliError> {
        let schema = schema_from_file(required_arg(matches, "SCHEMA")?)?;
        let map = OrderingSolver::new(&schema).solve()?;
        log::info!("Found constraints for {} node pairs", map.len());
        print!("{}", map.to_csv());
        Ok(())
    }
}
