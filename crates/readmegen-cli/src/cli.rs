use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

use crate::commands;
use crate::context::CliSession;
use crate::error::{CliError, ExitStatus};
use crate::formatter::{OutputFormat, emit_result};
use crate::util::Verbosity;

const NAME: &str = "readmegen";

pub fn run() -> ExitCode {
    match run_cli(std::env::args()) {
        Ok(code) => code,
        Err(err) => {
            err.print();
            err.exit_code()
        }
    }
}

/// Parses CLI arguments, loads configuration, and dispatches to the requested
/// command. Returns a `sysexits`-compatible `ExitCode`.
pub fn run_cli<I, S>(args: I) -> Result<ExitCode, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    let command = build_cli();
    let matches = command.try_get_matches_from(args)?;

    let verbosity = Verbosity {
        json: matches.get_flag("json"),
        verbose: matches.get_flag("verbose"),
    };
    init_tracing(verbosity);
    let output = if verbosity.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    // Schema export never reads configuration or runs tools.
    if let Some(("schema", sub)) = matches.subcommand() {
        return emit_result(commands::schema::run(sub)?, output);
    }

    let session = CliSession::bootstrap(
        matches.get_one::<String>("dir").cloned(),
        matches.get_one::<String>("config").cloned(),
        verbosity,
    )?;
    if session.verbosity.verbose {
        tracing::info!(
            working_dir = %session.working_dir.display(),
            config = %session
                .config_path
                .as_deref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "<discovered>".into()),
            template = %session.config.template.display(),
            "resolved generation context"
        );
    }

    let result = dispatch(&session, &matches)?;
    emit_result(result, output)
}

// Logs go to stderr: stdout carries the generated document.
fn init_tracing(verbosity: Verbosity) {
    let default_level = if verbosity.verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn build_cli() -> Command {
    Command::new(NAME)
        .about("Generate a README from Cargo metadata, extracted docs, and the hosting platform")
        .arg(
            Arg::new("dir")
                .long("dir")
                .value_name("PATH")
                .global(true)
                .help("Directory the external tools run in. Defaults to the current directory."),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .global(true)
                .help("Configuration file. Defaults to readmegen.yaml in the working directory, if present."),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Emit a JSON object instead of human-readable text."),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log resolved paths and pipeline progress to stderr."),
        )
        .subcommand_required(true)
        .subcommand(commands::render::command())
        .subcommand(commands::check::command())
        .subcommand(commands::schema::command())
}

fn dispatch(
    session: &CliSession,
    matches: &ArgMatches,
) -> Result<commands::CommandResult, CliError> {
    match matches.subcommand() {
        Some(("render", sub)) => commands::render::run(session, sub),
        Some(("check", sub)) => commands::check::run(session, sub),
        _ => Err(CliError::new("missing command", ExitStatus::Usage)),
    }
}
