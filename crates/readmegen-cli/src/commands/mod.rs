use serde::Serialize;

use crate::error::ExitStatus;

pub mod check;
pub mod render;
pub mod schema;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandResult {
    DocumentRendered {
        package: String,
        target: String,
        document: String,
    },
    ReadmeChecked {
        path: String,
        package: String,
        up_to_date: bool,
        exists: bool,
    },
    SchemaPrinted {
        kind: String,
        schema: serde_json::Value,
    },
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            CommandResult::ReadmeChecked { up_to_date, .. } => {
                if *up_to_date {
                    ExitStatus::Ok
                } else {
                    ExitStatus::Data
                }
            }
            _ => ExitStatus::Ok,
        }
    }
}
