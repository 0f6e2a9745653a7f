// SPDX-License-Identifier: Apache-2.0

use crate::{
    file::{config_from_file, required_arg, schema_from_file},
    CliError,
};

pub(crate) struct CommandCompare;

impl CommandCompare {
    pub(crate) const CMD: &str = "compare";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new("compare")
            .alias("c")
            .about("Show the set relation between two configs")
            .arg(
                clap::Arg::new("SCHEMA")
                    .required(true)
                    .index(1)
                    .help("Schema description file"),
            )
            .arg(
                clap::Arg::new("CONFIG_A")
                    .required(true)
                    .index(2)
                    .help("First config XML file"),
            )
            .arg(
                clap::Arg::new("CONFIG_B")
                    .required(true)
                    .index(3)
                    .help("Second config XML file"),
            )
    }

    pub(crate) fn handle(matches: &clap::ArgMatches) -> Result<(), CliError> {
        let schema = schema_from_file(required_arg(matches, "SCHEMA")?)?;
        let a = config_from_file(&schema, required_arg(matches, "CONFIG_A")?)?;
        let b = config_from_file(&schema, required_arg(matches, "CONFIG_B")?)?;

        let relation = if a.is_equal(&b)? {
            "equal"
        } else if a.is_proper_subset_of(&b)? {
            "subset"
        } else if a.is_proper_superset_of(&b)? {
            "superset"
        } else {
            "incomparable"
        };
        println!("{relation}");
        Ok(())
    }
}
