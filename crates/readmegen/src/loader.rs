use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ReadmeError;
use crate::model::{
    BuildTarget, CargoManifestDocument, DocBody, ManifestInfo, PackageMetadata, RepositoryInfo,
};
use crate::schema::{self, SchemaKind, ValidationError};
use crate::source::{RawOutput, SourceRequest, Sources};

pub fn load_manifest<S: Sources>(sources: &S) -> Result<ManifestInfo, ReadmeError> {
    let raw = sources.fetch(SourceRequest::Manifest)?;
    let document: CargoManifestDocument = decode(SchemaKind::Manifest, &raw)?;
    Ok(document.into())
}

pub fn load_package_metadata<S: Sources>(sources: &S) -> Result<PackageMetadata, ReadmeError> {
    let raw = sources.fetch(SourceRequest::PackageMetadata)?;
    Ok(decode(SchemaKind::PackageMetadata, &raw)?)
}

/// Picks the first build target of the package called `name`.
pub fn resolve_target(metadata: &PackageMetadata, name: &str) -> Result<BuildTarget, ReadmeError> {
    let package = metadata
        .find_package(name)
        .ok_or_else(|| ReadmeError::Lookup("package metadata not found".into()))
        .map_err(|err| err.context(format!("package `{name}`")))?;
    package
        .targets
        .first()
        .cloned()
        .ok_or_else(|| ReadmeError::Lookup("no build target found".into()))
        .map_err(|err| err.context(format!("package `{name}`")))
}

pub fn load_doc_body<S: Sources>(
    sources: &S,
    template: &Path,
    package: &str,
    target: &BuildTarget,
) -> Result<DocBody, ReadmeError> {
    let raw = sources.fetch(SourceRequest::DocBody {
        template,
        package,
        target: &target.name,
    })?;
    let text = String::from_utf8(raw.stdout)
        .map_err(|err| ValidationError::unparseable("doc-body", err.to_string()))?;
    Ok(DocBody(text))
}

pub fn load_repository<S: Sources>(sources: &S) -> Result<RepositoryInfo, ReadmeError> {
    let raw = sources.fetch(SourceRequest::Repository)?;
    Ok(decode(SchemaKind::RepositoryInfo, &raw)?)
}

/// Parses `raw` as JSON, validates it against `kind`, then deserializes it.
pub fn decode<T: DeserializeOwned>(kind: SchemaKind, raw: &RawOutput) -> Result<T, ValidationError> {
    let value = parse_json(kind, raw)?;
    schema::validate(&kind.schema(), &value)?;
    serde_json::from_value(value)
        .map_err(|err| ValidationError::unparseable(kind.name(), err.to_string()))
}

fn parse_json(kind: SchemaKind, raw: &RawOutput) -> Result<Value, ValidationError> {
    let text = std::str::from_utf8(&raw.stdout)
        .map_err(|err| ValidationError::unparseable(kind.name(), err.to_string()))?;
    serde_json::from_str(text)
        .map_err(|err| ValidationError::unparseable(kind.name(), err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::IssueReason;

    fn metadata(packages: &[(&str, Vec<&str>)]) -> PackageMetadata {
        let raw = serde_json::json!({
            "packages": packages
                .iter()
                .map(|(name, targets)| serde_json::json!({
                    "name": name,
                    "targets": targets.iter().map(|t| serde_json::json!({ "name": t, "kind": ["lib"] })).collect::<Vec<_>>(),
                    "version": "0.1.0",
                }))
                .collect::<Vec<_>>(),
            "workspace_root": "/tmp/ws",
        });
        decode(
            SchemaKind::PackageMetadata,
            &RawOutput::new(raw.to_string()),
        )
        .expect("metadata decodes")
    }

    #[test]
    fn resolve_target_selects_first_target_of_matching_package() {
        let metadata = metadata(&[("serde", vec!["serde"]), ("foo", vec!["foo_lib", "foo_cli"])]);
        let target = resolve_target(&metadata, "foo").unwrap();
        assert_eq!(target.name, "foo_lib");
    }

    #[test]
    fn resolve_target_reports_missing_package() {
        let metadata = metadata(&[("serde", vec!["serde"])]);
        let err = resolve_target(&metadata, "foo").expect_err("no foo");
        assert!(matches!(err, ReadmeError::Lookup(_)));
        assert!(err.to_string().contains("package metadata not found"), "{err}");
    }

    #[test]
    fn resolve_target_reports_empty_target_list() {
        let metadata = metadata(&[("foo", Vec::new())]);
        let err = resolve_target(&metadata, "foo").expect_err("no targets");
        assert!(matches!(err, ReadmeError::Lookup(_)));
        assert!(err.to_string().contains("no build target found"), "{err}");
    }

    #[test]
    fn decode_flags_invalid_json_as_unparseable() {
        let err = decode::<RepositoryInfo>(
            SchemaKind::RepositoryInfo,
            &RawOutput::new("gh: not logged in"),
        )
        .expect_err("not json");
        assert_eq!(err.schema, "repository-info");
        assert!(matches!(err.issues[0].reason, IssueReason::Unparseable(_)));
    }

    #[test]
    fn decode_flags_non_utf8_output() {
        let err = decode::<RepositoryInfo>(
            SchemaKind::RepositoryInfo,
            &RawOutput::new(vec![0xff, 0xfe, b'{']),
        )
        .expect_err("not utf-8");
        assert!(matches!(err.issues[0].reason, IssueReason::Unparseable(_)));
    }
}
