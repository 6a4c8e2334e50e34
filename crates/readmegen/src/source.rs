use std::path::{Path, PathBuf};

use serde_json::json;

use crate::config::{CommandLine, SourceCommands};
use crate::error::ReadmeError;
use crate::process;
use crate::template::{CommandTemplateEngine, TokenMap};

/// Which external source to query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceRequest<'a> {
    Manifest,
    PackageMetadata,
    DocBody {
        template: &'a Path,
        package: &'a str,
        target: &'a str,
    },
    Repository,
}

impl SourceRequest<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            SourceRequest::Manifest => "manifest",
            SourceRequest::PackageMetadata => "package-metadata",
            SourceRequest::DocBody { .. } => "doc-body",
            SourceRequest::Repository => "repository-info",
        }
    }
}

/// Unparsed standard output of a source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawOutput {
    pub stdout: Vec<u8>,
}

impl RawOutput {
    pub fn new(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: stdout.into(),
        }
    }
}

/// Abstraction over the external tools the pipeline reads from.
pub trait Sources {
    fn fetch(&self, request: SourceRequest<'_>) -> Result<RawOutput, ReadmeError>;
}

impl<T> Sources for &T
where
    T: Sources + ?Sized,
{
    fn fetch(&self, request: SourceRequest<'_>) -> Result<RawOutput, ReadmeError> {
        (**self).fetch(request)
    }
}

/// Production [`Sources`] backed by configured command lines.
pub struct CommandSources {
    working_dir: PathBuf,
    commands: SourceCommands,
    templates: CommandTemplateEngine,
}

impl CommandSources {
    pub fn new(working_dir: impl Into<PathBuf>, commands: SourceCommands) -> Self {
        Self {
            working_dir: working_dir.into(),
            commands,
            templates: CommandTemplateEngine::new(),
        }
    }

    fn command_for(&self, request: SourceRequest<'_>) -> Result<CommandLine, ReadmeError> {
        match request {
            SourceRequest::Manifest => Ok(self.commands.manifest.clone()),
            SourceRequest::PackageMetadata => Ok(self.commands.metadata.clone()),
            SourceRequest::Repository => Ok(self.commands.repository.clone()),
            SourceRequest::DocBody {
                template,
                package,
                target,
            } => {
                let mut tokens = TokenMap::new();
                tokens.insert("template".into(), json!(template.display().to_string()));
                tokens.insert("package".into(), json!(package));
                tokens.insert("target".into(), json!(target));
                self.templates
                    .render(&self.commands.docs, &tokens)
                    .map_err(|err| err.context("commands.docs"))
            }
        }
    }
}

impl Sources for CommandSources {
    fn fetch(&self, request: SourceRequest<'_>) -> Result<RawOutput, ReadmeError> {
        let command = self.command_for(request)?;
        let output = process::run(&command, &self.working_dir)?;
        Ok(RawOutput::new(output.stdout))
    }
}
