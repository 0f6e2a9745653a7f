// SPDX-License-Identifier: Apache-2.0

use crate::{
    file::{config_from_file, required_arg, schema_from_file},
    CliError,
};

pub(crate) struct CommandFilter;

impl CommandFilter {
    pub(crate) const CMD: &str = "filter";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new("filter")
            .about("Show the part of a config selected by a path")
            .arg(
                clap::Arg::new("SCHEMA")
                    .required(true)
                    .index(1)
                    .help("Schema description file"),
            )
            .arg(
                clap::Arg::new("CONFIG")
                    .required(true)
                    .index(2)
                    .help("Config XML file"),
            )
            .arg(
                clap::Arg::new("PATH")
                    .required(true)
                    .index(3)
                    .help(
                        "Path like /oc-if:interfaces/oc-if:interface\
                         [oc-if:name='eth0']",
                    ),
            )
    }

    pub(crate) fn handle(matches: &clap::ArgMatches) -> Result<(), CliError> {
        let schema = schema_from_file(required_arg(matches, "SCHEMA")?)?;
        let config =
            config_from_file(&schema, required_arg(matches, "CONFIG")?)?;

        println!("{}", config.filter(required_arg(matches, "PATH")?)?);
        Ok(())
    }
}
