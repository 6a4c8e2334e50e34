use crate::error::ReadmeError;

/// Requires the manifest's repository URL to equal the hosting platform's URL
/// byte for byte. No normalization is applied.
pub fn check(manifest_repo_url: &str, hosting_repo_url: &str) -> Result<(), ReadmeError> {
    if manifest_repo_url == hosting_repo_url {
        return Ok(());
    }
    tracing::debug!(
        manifest = manifest_repo_url,
        hosting = hosting_repo_url,
        "repository url mismatch"
    );
    Err(ReadmeError::Mismatch {
        manifest: manifest_repo_url.to_string(),
        hosting: hosting_repo_url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_urls_pass() {
        check("https://example.com/x/foo", "https://example.com/x/foo").unwrap();
    }

    #[test]
    fn near_misses_are_rejected() {
        for hosting in [
            "https://example.com/x/foo/",
            "http://example.com/x/foo",
            "https://Example.com/x/foo",
            "https://example.com/x/fo",
        ] {
            match check("https://example.com/x/foo", hosting) {
                Err(ReadmeError::Mismatch { manifest, hosting: reported }) => {
                    assert_eq!(manifest, "https://example.com/x/foo");
                    assert_eq!(reported, hosting);
                }
                other => panic!("expected mismatch for {hosting}, got {other:?}"),
            }
        }
    }
}
