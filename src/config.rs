use serde::Deserialize;
use std::path::Path;

/// Host-side validation policy.
///
/// Every knob defaults to off, matching the permissive reading of the
/// protocol; hosts that want the stricter interpretation opt in per check.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ValidationConfig {
    /// Reject requests whose `inputs` list is not exactly one element.
    #[serde(default)]
    pub single_input: bool,
    /// Reject responses whose speech payload is not pure ASCII.
    #[serde(default)]
    pub ascii_speech: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            single_input: false,
            ascii_speech: false,
        }
    }
}

/// Load a [`ValidationConfig`] from a TOML file.
///
/// # Examples
///
/// ```no_run
/// # tokio_test::block_on(async {
/// let cfg = parley::config::load("parley.toml").await.unwrap();
/// assert!(!cfg.single_input);
/// # });
/// ```
pub async fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<ValidationConfig> {
    let text = tokio::fs::read_to_string(path).await?;
    Ok(toml::from_str(&text)?)
}
