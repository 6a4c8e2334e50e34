use std::env;
use std::path::PathBuf;

use readmegen::{CommandSources, Pipeline, ReadmeConfig};

use crate::error::{CliError, ExitStatus};
use crate::util::{self, Verbosity};

pub struct CliSession {
    /// Directory every external command runs in.
    pub working_dir: PathBuf,
    pub config: ReadmeConfig,
    pub config_path: Option<PathBuf>,
    pub verbosity: Verbosity,
}

impl CliSession {
    pub fn bootstrap(
        dir_override: Option<String>,
        config_override: Option<String>,
        verbosity: Verbosity,
    ) -> Result<Self, CliError> {
        let cwd = env::current_dir()?;
        let working_dir = match dir_override {
            Some(dir) => {
                let dir = util::resolve_against(&cwd, &dir);
                if !dir.is_dir() {
                    return Err(CliError::new(
                        format!("--dir {} is not a directory", dir.display()),
                        ExitStatus::Usage,
                    ));
                }
                dir
            }
            None => cwd.clone(),
        };

        let config_path = config_override.map(|path| util::resolve_against(&cwd, &path));
        let config = ReadmeConfig::discover(&working_dir, config_path.as_deref())?;

        Ok(Self {
            working_dir,
            config,
            config_path,
            verbosity,
        })
    }

    pub fn pipeline(&self) -> Pipeline<CommandSources> {
        let sources = CommandSources::new(self.working_dir.clone(), self.config.commands.clone());
        Pipeline::from_config(sources, &self.config)
    }
}
