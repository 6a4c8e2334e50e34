use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::CommandLine;
use crate::error::ReadmeError;

/// Captured result of a successful external command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: Vec<u8>,
    pub exit_code: i32,
}

/// Runs `command` in `working_dir` and waits for it to exit.
///
/// A spawn failure or a non-zero exit becomes [`ReadmeError::Process`] carrying the
/// rendered command line, the exit code when one exists, and captured stderr.
pub fn run(command: &CommandLine, working_dir: &Path) -> Result<ProcessOutput, ReadmeError> {
    let rendered = command.to_string();
    tracing::debug!(command = %rendered, cwd = %working_dir.display(), "spawning process");

    let stdin = match &command.stdin {
        Some(path) => {
            let path = working_dir.join(path);
            let file = File::open(&path).map_err(|err| ReadmeError::Process {
                command: rendered.clone(),
                exit_code: None,
                stderr: format!("unable to open {}: {err}", path.display()),
            })?;
            Stdio::from(file)
        }
        None => Stdio::null(),
    };

    let output = Command::new(&command.program)
        .args(&command.args)
        .current_dir(working_dir)
        .stdin(stdin)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|err| ReadmeError::Process {
            command: rendered.clone(),
            exit_code: None,
            stderr: format!("failed to execute {}: {err}", command.program),
        })?;

    if !output.status.success() {
        tracing::debug!(command = %rendered, status = ?output.status.code(), "process failed");
        return Err(ReadmeError::Process {
            command: rendered,
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    tracing::debug!(
        command = %rendered,
        stdout_bytes = output.stdout.len(),
        "process finished"
    );
    Ok(ProcessOutput {
        stdout: output.stdout,
        exit_code: output.status.code().unwrap_or_default(),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn captures_stdout_in_working_directory() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("hello.txt"), "hello\n").unwrap();

        let output = run(&CommandLine::new("cat", ["hello.txt"]), temp.path()).unwrap();
        assert_eq!(output.stdout, b"hello\n");
        assert_eq!(output.exit_code, 0);
    }

    #[test]
    fn streams_stdin_file() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("input.json"), "{\"url\":\"x\"}").unwrap();

        let command = CommandLine::new("cat", Vec::<String>::new()).with_stdin("input.json");
        let output = run(&command, temp.path()).unwrap();
        assert_eq!(output.stdout, b"{\"url\":\"x\"}");
    }

    #[test]
    fn non_zero_exit_carries_code_and_stderr() {
        let temp = tempdir().unwrap();
        let command = CommandLine::new("sh", ["-c", "echo broken >&2; exit 3"]);
        match run(&command, temp.path()) {
            Err(ReadmeError::Process {
                command,
                exit_code,
                stderr,
            }) => {
                assert_eq!(command, "sh -c echo broken >&2; exit 3");
                assert_eq!(exit_code, Some(3));
                assert_eq!(stderr.trim(), "broken");
            }
            other => panic!("expected process error, got {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_a_process_error() {
        let temp = tempdir().unwrap();
        let command = CommandLine::new("readmegen-test-no-such-tool", ["--json"]);
        let err = run(&command, temp.path()).expect_err("program does not exist");
        assert!(matches!(
            err,
            ReadmeError::Process {
                exit_code: None,
                ..
            }
        ));
    }

    #[test]
    fn missing_stdin_file_is_a_process_error() {
        let temp = tempdir().unwrap();
        let command = CommandLine::new("cat", Vec::<String>::new()).with_stdin("Cargo.toml");
        let err = run(&command, temp.path()).expect_err("no manifest");
        assert!(err.to_string().contains("Cargo.toml"), "{err}");
    }
}
