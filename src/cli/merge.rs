// SPDX-License-Identifier: Apache-2.0

use crate::{
    file::{config_from_file, read_file, required_arg, schema_from_file},
    CliError,
};

pub(crate) struct CommandMerge;

impl CommandMerge {
    pub(crate) const CMD: &str = "merge";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new("merge")
            .alias("m")
            .about("Apply a NETCONF edit-config delta onto a config")
            .arg(
                clap::Arg::new("SCHEMA")
                    .required(true)
                    .index(1)
                    .help("Schema description file"),
            )
            .arg(
                clap::Arg::new("BASE_CONFIG")
                    .required(true)
                    .index(2)
                    .help("Config XML file the delta applies to"),
            )
            .arg(
                clap::Arg::new("DELTA")
                    .required(true)
                    .index(3)
                    .help("edit-config XML file"),
            )
    }

    pub(crate) fn handle(matches: &clap::ArgMatches) -> Result<(), CliError> {
        let schema = schema_from_file(required_arg(matches, "SCHEMA")?)?;
        let base =
            config_from_file(&schema, required_arg(matches, "BASE_CONFIG")?)?;
        let delta_xml = read_file(required_arg(matches, "DELTA")?)?;

        println!("{}", base.apply_xml(&delta_xml)?);
        Ok(())
    }
}
