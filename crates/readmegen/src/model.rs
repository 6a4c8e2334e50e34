use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `Cargo.toml` as emitted by the TOML-to-JSON converter. Only the fields the
/// README needs are modelled; everything else is ignored.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct CargoManifestDocument {
    pub package: ManifestPackage,
}

#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct ManifestPackage {
    #[schemars(length(min = 1))]
    pub name: String,
    #[schemars(length(min = 1))]
    pub description: String,
    #[schemars(length(min = 1), url)]
    pub repository: String,
    pub metadata: ManifestMetadata,
}

#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct ManifestMetadata {
    pub details: ManifestDetails,
}

/// `[package.metadata.details]` table.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
pub struct ManifestDetails {
    #[schemars(length(min = 1))]
    pub title: String,
    pub tagline: String,
    pub summary: String,
}

/// Declared package identity, flattened from the manifest document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestInfo {
    pub name: String,
    pub description: String,
    pub repository: String,
    pub title: String,
    pub tagline: String,
    pub summary: String,
}

impl From<CargoManifestDocument> for ManifestInfo {
    fn from(document: CargoManifestDocument) -> Self {
        let ManifestPackage {
            name,
            description,
            repository,
            metadata: ManifestMetadata { details },
        } = document.package;
        Self {
            name,
            description,
            repository,
            title: details.title,
            tagline: details.tagline,
            summary: details.summary,
        }
    }
}

/// Output of `cargo metadata --format-version 1`, reduced to packages and targets.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct PackageMetadata {
    pub packages: Vec<PackageEntry>,
}

impl PackageMetadata {
    pub fn find_package(&self, name: &str) -> Option<&PackageEntry> {
        self.packages.iter().find(|package| package.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct PackageEntry {
    pub name: String,
    pub targets: Vec<BuildTarget>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct BuildTarget {
    #[schemars(length(min = 1))]
    pub name: String,
}

/// Identity reported by the hosting platform (`gh repo view --json url`).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct RepositoryInfo {
    #[schemars(url)]
    pub url: String,
}

/// Pre-rendered documentation for the selected target. Never inspected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocBody(pub String);

impl DocBody {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The final README text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedDocument {
    pub text: String,
}

impl ComposedDocument {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}
