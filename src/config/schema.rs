use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Example YAML:
/// ```yaml
/// sources:
///   - name: easy
///     url: https://list.example.com/data/easydemons
///   - url: https://list.example.com/data/mediumdemons
/// policy: merge-all-sources
/// timeout: 10s
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Locations that publish a `_list.json` manifest plus one JSON document
    /// per level. Order matters: it decides rank when sources are merged.
    pub sources: Vec<SourceConfig>,

    /// How levels are resolved when more than one source is configured.
    #[serde(default)]
    pub policy: SourcePolicy,

    /// HTTP request timeout as a humantime string (e.g. "10s", "1min").
    /// Bounds the fan-in wait on a hung fetch.
    #[serde(default)]
    pub timeout: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Optional display name used in diagnostics and failure reports.
    #[serde(default)]
    pub name: Option<String>,

    /// Base URL of the source, without a trailing slash.
    pub url: String,
}

impl SourceConfig {
    /// Name for diagnostics: the configured name, or the URL itself.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.url)
    }
}

/// Fallback policy when levels can come from more than one source.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SourcePolicy {
    /// Exactly one source; a level fails if that source's fetch fails.
    FixedSource,
    /// Every source contributes its own manifest-ordered sublist,
    /// concatenated in configured order. Effective rank is the position in
    /// the concatenated result.
    #[default]
    MergeAllSources,
    /// One manifest from the first source that yields one; each level is
    /// tried against every source in order and only fails if all do.
    FallbackChain,
}
