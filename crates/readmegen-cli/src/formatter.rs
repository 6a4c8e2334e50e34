use std::io::{self, Write};
use std::process::ExitCode;

use serde_json::json;

use crate::commands::CommandResult;
use crate::error::CliError;

pub enum OutputFormat {
    Text,
    Json,
}

/// Writes a `CommandResult` to stdout as text or a single JSON object and maps it
/// to an exit code.
pub fn emit_result(result: CommandResult, format: OutputFormat) -> Result<ExitCode, CliError> {
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => write_text(&mut stdout, &result)?,
        OutputFormat::Json => writeln!(stdout, "{}", json!(result))?,
    };
    stdout.flush()?;
    Ok(ExitCode::from(result.exit_status().code()))
}

fn write_text(out: &mut impl Write, result: &CommandResult) -> Result<(), CliError> {
    match result {
        CommandResult::DocumentRendered { document, .. } => {
            out.write_all(document.as_bytes())?;
        }
        CommandResult::ReadmeChecked {
            path,
            package,
            up_to_date,
            exists,
        } => {
            if *up_to_date {
                writeln!(out, "{path} is up to date ({package})")?;
            } else if *exists {
                writeln!(
                    out,
                    "{path} is stale ({package}); regenerate it with `readmegen render > {path}`"
                )?;
            } else {
                writeln!(
                    out,
                    "{path} does not exist ({package}); generate it with `readmegen render > {path}`"
                )?;
            }
        }
        CommandResult::SchemaPrinted { schema, .. } => {
            writeln!(out, "{}", serde_json::to_string_pretty(schema)?)?;
        }
    }
    Ok(())
}
