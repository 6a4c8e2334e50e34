use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_readmegen"))
}

#[test]
fn schema_prints_manifest_shape() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    let mut cmd = cli();
    cmd.current_dir(temp.path()).args(["--json", "schema", "manifest"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let payload: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(payload["type"], "schema_printed");
    assert_eq!(payload["kind"], "manifest");
    assert_eq!(payload["schema"]["title"], "CargoManifestDocument");
    assert!(
        payload["schema"]["required"]
            .as_array()
            .is_some_and(|required| required.iter().any(|field| field == "package"))
    );
    Ok(())
}

#[test]
fn schema_text_output_is_pretty_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    let mut cmd = cli();
    cmd.current_dir(temp.path()).args(["schema", "repository-info"]);

    cmd.assert()
        .success()
        .stdout(contains("\"title\": \"RepositoryInfo\""))
        .stdout(contains("\"url\""));
    Ok(())
}

#[test]
fn schema_rejects_unknown_kind() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cli();
    cmd.args(["schema", "lockfile"]);

    cmd.assert().failure().code(64);
    Ok(())
}

#[test]
fn schema_export_carries_length_and_url_constraints() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    let mut cmd = cli();
    cmd.current_dir(temp.path()).args(["schema", "manifest"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let schema: serde_json::Value = serde_json::from_slice(&output)?;
    let package = &schema["$defs"]["ManifestPackage"]["properties"];
    assert_eq!(package["name"]["minLength"], 1);
    assert_eq!(package["repository"]["minLength"], 1);
    assert_eq!(package["repository"]["format"], "uri");
    Ok(())
}

#[test]
fn schema_ignores_broken_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("readmegen.yaml"), "generater: typo\n")?;

    let mut cmd = cli();
    cmd.current_dir(temp.path()).args(["schema", "repository-info"]);

    cmd.assert().success().stdout(contains("\"url\""));
    Ok(())
}
