//! Declarative schemas for the JSON shapes produced by external tools.
//!
//! A [`Schema`] is a tree of [`Rule`]s keyed by field name. [`validate`] walks a
//! parsed `serde_json::Value` against it and reports every failing field with its
//! full path, so a caller can tell exactly which part of a tool's output was wrong.

use std::fmt;

use schemars::Schema as JsonSchemaDocument;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::model::{CargoManifestDocument, PackageMetadata, RepositoryInfo};

/// Constraint applied to a string leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringRule {
    Any,
    NonEmpty,
    Url,
    NonEmptyUrl,
}

/// Structural predicate for one node of a JSON document.
#[derive(Clone, Debug)]
pub enum Rule {
    String(StringRule),
    Object(Vec<Field>),
    Array(Box<Rule>),
}

#[derive(Clone, Debug)]
pub struct Field {
    pub name: &'static str,
    pub rule: Rule,
}

impl Rule {
    pub fn string() -> Self {
        Rule::String(StringRule::Any)
    }

    pub fn non_empty() -> Self {
        Rule::String(StringRule::NonEmpty)
    }

    pub fn url() -> Self {
        Rule::String(StringRule::Url)
    }

    pub fn non_empty_url() -> Self {
        Rule::String(StringRule::NonEmptyUrl)
    }

    pub fn object<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        Rule::Object(fields.into_iter().collect())
    }

    pub fn array(items: Rule) -> Self {
        Rule::Array(Box::new(items))
    }
}

pub fn field(name: &'static str, rule: Rule) -> Field {
    Field { name, rule }
}

/// A named root rule.
#[derive(Clone, Debug)]
pub struct Schema {
    pub name: &'static str,
    pub root: Rule,
}

/// The input shapes known to the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaKind {
    Manifest,
    PackageMetadata,
    RepositoryInfo,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 3] = [
        SchemaKind::Manifest,
        SchemaKind::PackageMetadata,
        SchemaKind::RepositoryInfo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SchemaKind::Manifest => "manifest",
            SchemaKind::PackageMetadata => "package-metadata",
            SchemaKind::RepositoryInfo => "repository-info",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn schema(self) -> Schema {
        match self {
            SchemaKind::Manifest => manifest_schema(),
            SchemaKind::PackageMetadata => package_metadata_schema(),
            SchemaKind::RepositoryInfo => repository_info_schema(),
        }
    }

    /// JSON Schema rendition of the typed record this shape deserializes into.
    pub fn json_schema(self) -> JsonSchemaDocument {
        match self {
            SchemaKind::Manifest => schemars::schema_for!(CargoManifestDocument),
            SchemaKind::PackageMetadata => schemars::schema_for!(PackageMetadata),
            SchemaKind::RepositoryInfo => schemars::schema_for!(RepositoryInfo),
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub fn manifest_schema() -> Schema {
    Schema {
        name: SchemaKind::Manifest.name(),
        root: Rule::object([field(
            "package",
            Rule::object([
                field("name", Rule::non_empty()),
                field("description", Rule::non_empty()),
                field("repository", Rule::non_empty_url()),
                field(
                    "metadata",
                    Rule::object([field(
                        "details",
                        Rule::object([
                            field("title", Rule::non_empty()),
                            field("tagline", Rule::string()),
                            field("summary", Rule::string()),
                        ]),
                    )]),
                ),
            ]),
        )]),
    }
}

pub fn package_metadata_schema() -> Schema {
    Schema {
        name: SchemaKind::PackageMetadata.name(),
        root: Rule::object([field(
            "packages",
            Rule::array(Rule::object([
                field("name", Rule::string()),
                field(
                    "targets",
                    Rule::array(Rule::object([field("name", Rule::non_empty())])),
                ),
            ])),
        )]),
    }
}

pub fn repository_info_schema() -> Schema {
    Schema {
        name: SchemaKind::RepositoryInfo.name(),
        root: Rule::object([field("url", Rule::url())]),
    }
}

/// Why a single field failed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssueReason {
    Missing,
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    Empty,
    MalformedUrl(String),
    Unparseable(String),
}

impl fmt::Display for IssueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueReason::Missing => write!(f, "missing required field"),
            IssueReason::WrongType { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            IssueReason::Empty => write!(f, "must not be empty"),
            IssueReason::MalformedUrl(detail) => write!(f, "malformed URL ({detail})"),
            IssueReason::Unparseable(detail) => write!(f, "unparseable output ({detail})"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldIssue {
    /// Dotted path to the field, `packages[0].targets[1].name` style. Empty for the root.
    pub path: String,
    pub reason: IssueReason,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "<root>"
        } else {
            &self.path
        };
        write!(f, "`{path}` {}", self.reason)
    }
}

/// Raised when a tool's output does not conform to its schema.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("validation error in {schema} output: {}", join_issues(.issues))]
pub struct ValidationError {
    pub schema: &'static str,
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn unparseable(schema: &'static str, detail: impl Into<String>) -> Self {
        Self {
            schema,
            issues: vec![FieldIssue {
                path: String::new(),
                reason: IssueReason::Unparseable(detail.into()),
            }],
        }
    }

    /// Returns the issue recorded for `path`, if any.
    pub fn issue_at(&self, path: &str) -> Option<&FieldIssue> {
        self.issues.iter().find(|issue| issue.path == path)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Checks `value` against `schema`, collecting every failing field.
pub fn validate(schema: &Schema, value: &Value) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    check(&schema.root, value, &mut String::new(), &mut issues);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError {
            schema: schema.name,
            issues,
        })
    }
}

fn check(rule: &Rule, value: &Value, path: &mut String, issues: &mut Vec<FieldIssue>) {
    match (rule, value) {
        (Rule::String(string_rule), Value::String(text)) => {
            if let Some(reason) = check_string(*string_rule, text) {
                issues.push(FieldIssue {
                    path: path.clone(),
                    reason,
                });
            }
        }
        (Rule::Object(fields), Value::Object(map)) => {
            for field in fields {
                let restore = path.len();
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(field.name);
                match map.get(field.name) {
                    Some(child) => check(&field.rule, child, path, issues),
                    None => issues.push(FieldIssue {
                        path: path.clone(),
                        reason: IssueReason::Missing,
                    }),
                }
                path.truncate(restore);
            }
        }
        (Rule::Array(items), Value::Array(values)) => {
            for (index, child) in values.iter().enumerate() {
                let restore = path.len();
                path.push_str(&format!("[{index}]"));
                check(items, child, path, issues);
                path.truncate(restore);
            }
        }
        (rule, other) => issues.push(FieldIssue {
            path: path.clone(),
            reason: IssueReason::WrongType {
                expected: expected_type(rule),
                found: value_type(other),
            },
        }),
    }
}

fn check_string(rule: StringRule, text: &str) -> Option<IssueReason> {
    match rule {
        StringRule::Any => None,
        StringRule::NonEmpty => text.is_empty().then_some(IssueReason::Empty),
        StringRule::Url => Url::parse(text)
            .err()
            .map(|err| IssueReason::MalformedUrl(err.to_string())),
        StringRule::NonEmptyUrl => {
            if text.is_empty() {
                Some(IssueReason::Empty)
            } else {
                check_string(StringRule::Url, text)
            }
        }
    }
}

fn expected_type(rule: &Rule) -> &'static str {
    match rule {
        Rule::String(_) => "string",
        Rule::Object(_) => "object",
        Rule::Array(_) => "array",
    }
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
