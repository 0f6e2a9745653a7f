// SPDX-License-Identifier: Apache-2.0

use ncdiff::{DiffOption, EditOperation};

use crate::{
    file::{config_from_file, read_file, required_arg, schema_from_file},
    CliError,
};

const FORMAT_NETCONF: &str = "netconf";
const FORMAT_RESTCONF: &str = "restconf";
const FORMAT_GNMI: &str = "gnmi";

pub(crate) struct CommandDiff;

impl CommandDiff {
    pub(crate) const CMD: &str = "diff";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new("diff")
            .alias("d")
            .about("Generate the delta turning old config into new config")
            .arg(
                clap::Arg::new("SCHEMA")
                    .required(true)
                    .index(1)
                    .help("Schema description file"),
            )
            .arg(
                clap::Arg::new("OLD_CONFIG")
                    .required(true)
                    .index(2)
                    .help("Old config XML file"),
            )
            .arg(
                clap::Arg::new("NEW_CONFIG")
                    .required(true)
                    .index(3)
                    .help("New config XML file"),
            )
            .arg(
                clap::Arg::new("FORMAT")
                    .long("format")
                    .short('f')
                    .value_parser([
                        FORMAT_NETCONF,
                        FORMAT_RESTCONF,
                        FORMAT_GNMI,
                    ])
                    .default_value(FORMAT_NETCONF)
                    .help("Output format of the delta"),
            )
            .arg(
                clap::Arg::new("OPTION_FILE")
                    .long("option")
                    .short('o')
                    .help("YAML file holding the diff options"),
            )
            .arg(
                clap::Arg::new("PREFERRED_CREATE")
                    .long("preferred-create")
                    .value_parser(["merge", "create", "replace"])
                    .help("Operation used for new nodes"),
            )
            .arg(
                clap::Arg::new("PREFERRED_REPLACE")
                    .long("preferred-replace")
                    .value_parser(["merge", "replace"])
                    .help("Operation used for changed leaves"),
            )
            .arg(
                clap::Arg::new("PREFERRED_DELETE")
                    .long("preferred-delete")
                    .value_parser(["delete", "remove"])
                    .help("Operation used for removed nodes"),
            )
    }

    pub(crate) fn handle(matches: &clap::ArgMatches) -> Result<(), CliError> {
        let schema = schema_from_file(required_arg(matches, "SCHEMA")?)?;
        let old_config =
            config_from_file(&schema, required_arg(matches, "OLD_CONFIG")?)?;
        let new_config =
            config_from_file(&schema, required_arg(matches, "NEW_CONFIG")?)?;

        let option = diff_option(matches)?;
        log::debug!("Using diff option {option}");

        let delta = new_config.diff_with_option(&old_config, option)?;
        let format = matches
            .get_one::<String>("FORMAT")
            .map(|s| s.as_str())
            .unwrap_or(FORMAT_NETCONF);
        match format {
            FORMAT_RESTCONF => {
                println!("{}", serde_yaml::to_string(&delta.restconf()?)?)
            }
            FORMAT_GNMI => {
                println!("{}", serde_yaml::to_string(&delta.gnmi()?)?)
            }
            _ => println!("{}", delta.nc_xml()?),
        }
        Ok(())
    }
}

fn diff_option(matches: &clap::ArgMatches) -> Result<DiffOption, CliError> {
    let mut option = match matches.get_one::<String>("OPTION_FILE") {
        Some(file_path) => DiffOption::new_from_yaml(&read_file(file_path)?)?,
        None => DiffOption::new(),
    };
    if let Some(op) = matches.get_one::<String>("PREFERRED_CREATE") {
        option = option.preferred_create(op.parse::<EditOperation>()?);
    }
    if let Some(op) = matches.get_one::<String>("PREFERRED_REPLACE") {
        option = option.preferred_replace(op.parse::<EditOperation>()?);
    }
    if let Some(op) = matches.get_one::<String>("PREFERRED_DELETE") {
        option = option.preferred_delete(op.parse::<EditOperation>()?);
    }
    option.validate()?;
    Ok(option)
}
