use std::collections::BTreeMap;

use handlebars::Handlebars;

use crate::config::CommandLine;
use crate::error::ReadmeError;

pub type TokenMap = BTreeMap<String, serde_json::Value>;

/// Expands `{{token}}` placeholders in command arguments.
///
/// Runs in strict mode so a misspelled placeholder in a configuration file fails
/// instead of silently expanding to an empty argument.
pub struct CommandTemplateEngine {
    registry: Handlebars<'static>,
}

impl Default for CommandTemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandTemplateEngine {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(true);
        Self { registry }
    }

    pub fn render(
        &self,
        command: &CommandLine,
        tokens: &TokenMap,
    ) -> Result<CommandLine, ReadmeError> {
        let args = command
            .args
            .iter()
            .map(|arg| {
                self.registry.render_template(arg, tokens).map_err(|err| {
                    ReadmeError::Config(format!("invalid argument template `{arg}`: {err}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CommandLine {
            program: command.program.clone(),
            args,
            stdin: command.stdin.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tokens() -> TokenMap {
        let mut tokens = TokenMap::new();
        tokens.insert("template".into(), json!("README.jl"));
        tokens.insert("target".into(), json!("foo_bar"));
        tokens
    }

    #[test]
    fn substitutes_placeholders_without_escaping() {
        let engine = CommandTemplateEngine::new();
        let command = CommandLine::new(
            "cargo",
            ["doc2readme", "--template", "{{template}}", "--target-name", "{{target}}", "a&b"],
        );
        let rendered = engine.render(&command, &tokens()).expect("renders");
        assert_eq!(
            rendered.args,
            vec!["doc2readme", "--template", "README.jl", "--target-name", "foo_bar", "a&b"]
        );
        assert_eq!(rendered.program, "cargo");
    }

    #[test]
    fn unknown_placeholder_is_a_config_error() {
        let engine = CommandTemplateEngine::new();
        let command = CommandLine::new("cargo", ["{{targt}}"]);
        let err = engine.render(&command, &tokens()).expect_err("strict mode");
        assert!(matches!(err, ReadmeError::Config(_)));
        assert!(err.to_string().contains("{{targt}}"), "{err}");
    }
}
