// SPDX-License-Identifier: Apache-2.0

use std::io::Read;
use std::sync::Arc;

use ncdiff::{Config, SchemaTree};

use super::CliError;

/// Read the whole file, `-` means stdin.
pub(crate) fn read_file(file_path: &str) -> Result<String, CliError> {
    let mut content = String::new();
    if file_path == "-" {
        std::io::stdin().read_to_string(&mut content)?;
    } else {
        std::fs::File::open(file_path)?.read_to_string(&mut content)?;
    }
    // Replace non-breaking space '\u{A0}'  to normal space
    Ok(content.replace('\u{A0}', " "))
}

pub(crate) fn schema_from_file(
    file_path: &str,
) -> Result<Arc<SchemaTree>, CliError> {
    let schema = SchemaTree::new_from_yaml(&read_file(file_path)?)?;
    log::debug!(
        "Loaded {} modules from {file_path}",
        schema.modules().len()
    );
    Ok(Arc::new(schema))
}

pub(crate) fn config_from_file(
    schema: &Arc<SchemaTree>,
    file_path: &str,
) -> Result<Config, CliError> {
    Ok(Config::new_from_xml(schema.clone(), &read_file(file_path)?)?)
}

pub(crate) fn required_arg<'a>(
    matches: &'a clap::ArgMatches,
    name: &str,
) -> Result<&'a str, CliError> {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| CliError::from(format!("Missing argument {name}")))
}
