use std::fs;
use std::io;

use clap::{Arg, Command};

use crate::commands::CommandResult;
use crate::context::CliSession;
use crate::error::CliError;
use crate::util;

pub fn command() -> Command {
    Command::new("check")
        .about("Regenerate the README and compare it with the file on disk")
        .arg(
            Arg::new("readme")
                .long("readme")
                .value_name("PATH")
                .default_value("README.md")
                .help("README to compare against, relative to the working directory"),
        )
}

pub fn run(session: &CliSession, matches: &clap::ArgMatches) -> Result<CommandResult, CliError> {
    let readme = matches
        .get_one::<String>("readme")
        .map(String::as_str)
        .unwrap_or("README.md");
    let path = util::resolve_against(&session.working_dir, readme);

    let generated = session.pipeline().run()?;

    let (exists, up_to_date) = match fs::read(&path) {
        Ok(current) => (true, current == generated.document.text.as_bytes()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => (false, false),
        Err(err) => return Err(err.into()),
    };
    tracing::debug!(path = %path.display(), exists, up_to_date, "compared readme");

    Ok(CommandResult::ReadmeChecked {
        path: readme.to_string(),
        package: generated.manifest.name,
        up_to_date,
        exists,
    })
}
