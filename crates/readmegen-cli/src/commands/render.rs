use clap::Command;

use crate::commands::CommandResult;
use crate::context::CliSession;
use crate::error::CliError;

pub fn command() -> Command {
    Command::new("render").about("Run the pipeline and print the README to stdout")
}

pub fn run(session: &CliSession, _matches: &clap::ArgMatches) -> Result<CommandResult, CliError> {
    let generated = session.pipeline().run()?;
    Ok(CommandResult::DocumentRendered {
        package: generated.manifest.name,
        target: generated.target.name,
        document: generated.document.text,
    })
}
