pub mod compose;
pub mod config;
pub mod consistency;
pub mod error;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod process;
pub mod schema;
pub mod source;
pub mod template;

pub use compose::{ComposeOptions, compose};
pub use config::{CONFIG_FILE_NAME, CommandLine, ReadmeConfig, SourceCommands};
pub use error::ReadmeError;
pub use model::{
    BuildTarget, CargoManifestDocument, ComposedDocument, DocBody, ManifestInfo, PackageEntry,
    PackageMetadata, RepositoryInfo,
};
pub use pipeline::{Generated, Pipeline, Stage};
pub use process::{ProcessOutput, run as run_process};
pub use schema::{
    FieldIssue, IssueReason, Rule, Schema, SchemaKind, StringRule, ValidationError, validate,
};
pub use source::{CommandSources, RawOutput, SourceRequest, Sources};
pub use template::{CommandTemplateEngine, TokenMap};
