use crate::config::ReadmeConfig;
use crate::model::{ComposedDocument, DocBody, ManifestInfo};

const LICENSE_BLOCK: &str = "\
## License

[Apache License 2.0](LICENSE-APACHE) or [MIT License](LICENSE-MIT) at your option.

Unless you explicitly state otherwise, any contribution intentionally submitted for inclusion in this crate by you, as defined in the Apache-2.0 license, shall be dual licensed as above, without any additional terms or conditions.";

/// Fixed-template parameters that come from configuration rather than sources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposeOptions {
    pub generator: String,
    pub companion: String,
}

impl From<&ReadmeConfig> for ComposeOptions {
    fn from(config: &ReadmeConfig) -> Self {
        Self {
            generator: config.generator.clone(),
            companion: config.companion.clone(),
        }
    }
}

impl Default for ComposeOptions {
    fn default() -> Self {
        (&ReadmeConfig::default()).into()
    }
}

/// Assembles the README. Pure: the same inputs always give the same bytes.
pub fn compose(
    manifest: &ManifestInfo,
    doc_body: &DocBody,
    repository_url: &str,
    options: &ComposeOptions,
) -> ComposedDocument {
    let name = &manifest.name;
    let sections = [
        banner(&options.generator),
        format!("# {}", manifest.title),
        badges(repository_url, name),
        doc_body.as_str().to_string(),
        installation(name, &options.companion),
        gratitude(repository_url),
        LICENSE_BLOCK.to_string(),
    ];
    let joined = sections.join("\n\n");
    ComposedDocument {
        text: format!("{}\n", joined.trim()),
    }
}

fn banner(generator: &str) -> String {
    format!(
        "<!-- DO NOT EDIT -->\n\
         <!-- This file is automatically generated by {generator}. -->\n\
         <!-- Edit {generator} if you want to make changes. -->"
    )
}

fn badges(repository_url: &str, name: &str) -> String {
    format!(
        "[![Build]({repository_url}/actions/workflows/ci.yml/badge.svg)]({repository_url})\n\
         [![Documentation](https://docs.rs/{name}/badge.svg)](https://docs.rs/{name})"
    )
}

fn installation(name: &str, companion: &str) -> String {
    format!(
        "## Installation\n\n\
         ```shell\n\
         cargo add {name} {companion}\n\
         ```\n\n\
         **Important:** add the `{companion}` crate too."
    )
}

fn gratitude(repository_url: &str) -> String {
    format!(
        "## Gratitude\n\n\
         Like the project? [Say thanks!]({repository_url}/discussions/new?category=gratitude) ❤️"
    )
}
