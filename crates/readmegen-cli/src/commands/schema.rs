use clap::builder::PossibleValuesParser;
use clap::{Arg, Command};
use readmegen::SchemaKind;

use crate::commands::CommandResult;
use crate::error::{CliError, ExitStatus};

pub fn command() -> Command {
    Command::new("schema")
        .about("Print the JSON Schema of an input shape")
        .arg(
            Arg::new("kind")
                .required(true)
                .value_parser(PossibleValuesParser::new(
                    SchemaKind::ALL.map(SchemaKind::name),
                ))
                .help("Input shape to describe"),
        )
}

pub fn run(matches: &clap::ArgMatches) -> Result<CommandResult, CliError> {
    let name = matches
        .get_one::<String>("kind")
        .ok_or_else(|| CliError::new("schema kind is required", ExitStatus::Usage))?;
    let kind = SchemaKind::parse(name).ok_or_else(|| {
        CliError::new(format!("unknown schema kind '{name}'"), ExitStatus::Usage)
    })?;
    let schema = serde_json::to_value(kind.json_schema())?;
    Ok(CommandResult::SchemaPrinted {
        kind: kind.name().to_string(),
        schema,
    })
}
