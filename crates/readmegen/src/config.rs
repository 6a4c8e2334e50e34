use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ReadmeError;

/// File picked up from the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "readmegen.yaml";

/// One external command. `args` may contain `{{template}}`, `{{target}}` and
/// `{{package}}` placeholders; `stdin`, when set, names a file (relative to the
/// working directory) streamed into the process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandLine {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdin: Option<PathBuf>,
}

impl CommandLine {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            stdin: None,
        }
    }

    pub fn with_stdin(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdin = Some(path.into());
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        if let Some(stdin) = &self.stdin {
            write!(f, " < {}", stdin.display())?;
        }
        Ok(())
    }
}

/// Command lines for the four sources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceCommands {
    pub manifest: CommandLine,
    pub metadata: CommandLine,
    pub docs: CommandLine,
    pub repository: CommandLine,
}

impl Default for SourceCommands {
    fn default() -> Self {
        Self {
            manifest: CommandLine::new("yj", ["-t"]).with_stdin("Cargo.toml"),
            metadata: CommandLine::new("cargo", ["metadata", "--format-version", "1"]),
            docs: CommandLine::new(
                "cargo",
                [
                    "doc2readme",
                    "--template",
                    "{{template}}",
                    "--target-name",
                    "{{target}}",
                    "--out",
                    "-",
                ],
            ),
            repository: CommandLine::new("gh", ["repo", "view", "--json", "url"]),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadmeConfig {
    /// Name written into the autogeneration banner.
    pub generator: String,
    /// Crate recommended alongside the package in the installation block.
    pub companion: String,
    /// Template handed to the documentation extractor.
    pub template: PathBuf,
    pub commands: SourceCommands,
}

impl Default for ReadmeConfig {
    fn default() -> Self {
        Self {
            generator: "readmegen".to_string(),
            companion: "tracing_error".to_string(),
            template: PathBuf::from("README.jl"),
            commands: SourceCommands::default(),
        }
    }
}

impl ReadmeConfig {
    pub fn from_yaml(raw: &str) -> Result<Self, ReadmeError> {
        let config: ReadmeConfig = serde_yaml::from_str(raw)?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ReadmeError> {
        let raw = fs::read_to_string(path).map_err(|source| ReadmeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw).map_err(|err| err.context(path.display()))
    }

    /// Uses `explicit` when given, otherwise `{dir}/readmegen.yaml` if it exists,
    /// otherwise the built-in defaults.
    pub fn discover(dir: &Path, explicit: Option<&Path>) -> Result<Self, ReadmeError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading configuration");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    fn check(&self) -> Result<(), ReadmeError> {
        if self.generator.trim().is_empty() {
            return Err(ReadmeError::Config("generator must not be empty".into()));
        }
        if self.companion.trim().is_empty() {
            return Err(ReadmeError::Config("companion must not be empty".into()));
        }
        for (label, command) in [
            ("manifest", &self.commands.manifest),
            ("metadata", &self.commands.metadata),
            ("docs", &self.commands.docs),
            ("repository", &self.commands.repository),
        ] {
            if command.program.trim().is_empty() {
                return Err(ReadmeError::Config(format!(
                    "commands.{label}.program must not be empty"
                )));
            }
        }
        Ok(())
    }
}
