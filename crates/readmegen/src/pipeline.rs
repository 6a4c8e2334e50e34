use std::fmt;
use std::path::PathBuf;

use crate::compose::{ComposeOptions, compose};
use crate::config::ReadmeConfig;
use crate::consistency;
use crate::error::ReadmeError;
use crate::loader;
use crate::model::{BuildTarget, ComposedDocument, ManifestInfo, RepositoryInfo};
use crate::source::Sources;

/// Steps of a generation run, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    LoadManifest,
    LoadPackageMetadata,
    ResolveTarget,
    LoadDocBody,
    LoadRepoInfo,
    CheckConsistency,
    Compose,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::LoadManifest => "load-manifest",
            Stage::LoadPackageMetadata => "load-package-metadata",
            Stage::ResolveTarget => "resolve-target",
            Stage::LoadDocBody => "load-doc-body",
            Stage::LoadRepoInfo => "load-repo-info",
            Stage::CheckConsistency => "check-consistency",
            Stage::Compose => "compose",
        };
        write!(f, "{label}")
    }
}

/// Everything a successful run produced.
#[derive(Clone, Debug)]
pub struct Generated {
    pub manifest: ManifestInfo,
    pub target: BuildTarget,
    pub repository: RepositoryInfo,
    pub document: ComposedDocument,
}

/// Linear README generation over a set of [`Sources`].
pub struct Pipeline<S> {
    sources: S,
    template: PathBuf,
    options: ComposeOptions,
}

impl<S: Sources> Pipeline<S> {
    pub fn new(sources: S, template: impl Into<PathBuf>, options: ComposeOptions) -> Self {
        Self {
            sources,
            template: template.into(),
            options,
        }
    }

    pub fn from_config(sources: S, config: &ReadmeConfig) -> Self {
        Self::new(sources, config.template.clone(), config.into())
    }

    /// Runs every stage in order; the first failure aborts the run.
    pub fn run(&self) -> Result<Generated, ReadmeError> {
        let span = tracing::debug_span!("pipeline", template = %self.template.display());
        let _guard = span.enter();

        let manifest = stage(Stage::LoadManifest, || loader::load_manifest(&self.sources))?;
        let metadata = stage(Stage::LoadPackageMetadata, || {
            loader::load_package_metadata(&self.sources)
        })?;
        let target = stage(Stage::ResolveTarget, || {
            loader::resolve_target(&metadata, &manifest.name)
        })?;
        let doc_body = stage(Stage::LoadDocBody, || {
            loader::load_doc_body(&self.sources, &self.template, &manifest.name, &target)
        })?;
        let repository = stage(Stage::LoadRepoInfo, || loader::load_repository(&self.sources))?;
        stage(Stage::CheckConsistency, || {
            consistency::check(&manifest.repository, &repository.url)
        })?;
        let document = stage(Stage::Compose, || {
            Ok(compose(&manifest, &doc_body, &repository.url, &self.options))
        })?;

        tracing::info!(
            package = %manifest.name,
            target = %target.name,
            bytes = document.text.len(),
            "readme composed"
        );
        Ok(Generated {
            manifest,
            target,
            repository,
            document,
        })
    }
}

fn stage<T, F>(stage: Stage, step: F) -> Result<T, ReadmeError>
where
    F: FnOnce() -> Result<T, ReadmeError>,
{
    tracing::debug!(%stage, "stage started");
    step().inspect_err(|err| tracing::debug!(%stage, error = %err, "stage failed"))
}
