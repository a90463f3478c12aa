use anyhow::{Context, Result};
use futures::future::join_all;
use reqwest::Client;
use std::collections::HashSet;

use crate::config::{SourceConfig, SourcePolicy};

use super::types::{Editor, Level, LevelDocument, LoadOutcome};

/// Everything the level loader produced for one run: the ordered level
/// outcomes plus the sources whose manifest could not be read at all.
#[derive(Debug, Default)]
pub struct ListOutcome {
    pub levels: Vec<LoadOutcome>,
    pub failed_sources: Vec<String>,
}

/// Fetch the ordered level list from the configured sources.
///
/// Failures never propagate past this boundary: a broken source lands in
/// `failed_sources`, a broken level keeps its slot as a failed outcome, and
/// both are logged to stderr. Within one manifest the per-level fetches run
/// concurrently and are joined in manifest order, so the returned sequence
/// is deterministic and defines each level's effective rank.
pub async fn fetch_list(
    client: &Client,
    sources: &[SourceConfig],
    policy: SourcePolicy,
) -> ListOutcome {
    match policy {
        // Validation guarantees a single source for fixed-source; the slice
        // cap keeps the guarantee local.
        SourcePolicy::FixedSource => {
            merge_sources(client, &sources[..sources.len().min(1)]).await
        }
        SourcePolicy::MergeAllSources => merge_sources(client, sources).await,
        SourcePolicy::FallbackChain => fallback_chain(client, sources).await,
    }
}

/// Each source contributes its own manifest-ordered sublist, concatenated in
/// configured order.
async fn merge_sources(client: &Client, sources: &[SourceConfig]) -> ListOutcome {
    let mut levels = Vec::new();
    let mut failed_sources = Vec::new();

    for source in sources {
        let manifest = match fetch_manifest(client, source).await {
            Ok(manifest) => manifest,
            Err(e) => {
                eprintln!("Failed to load list from {}: {:#}", source.display_name(), e);
                failed_sources.push(source.display_name().to_string());
                continue;
            }
        };

        let fetches = manifest.iter().enumerate().map(|(rank, path)| async move {
            match fetch_level(client, source, path).await {
                Ok(level) => LoadOutcome::Loaded(level),
                Err(e) => {
                    eprintln!(
                        "Failed to load level #{} {} from {}: {:#}",
                        rank + 1,
                        path,
                        source.display_name(),
                        e
                    );
                    LoadOutcome::Failed { path: path.clone() }
                }
            }
        });

        levels.extend(join_all(fetches).await);
    }

    ListOutcome {
        levels,
        failed_sources,
    }
}

/// One manifest from the first source that yields one; each level is tried
/// against every source in configured order and only fails if all do.
async fn fallback_chain(client: &Client, sources: &[SourceConfig]) -> ListOutcome {
    let mut failed_sources = Vec::new();
    let mut manifest = None;

    for source in sources {
        match fetch_manifest(client, source).await {
            Ok(found) => {
                manifest = Some(found);
                break;
            }
            Err(e) => {
                eprintln!("Failed to load list from {}: {:#}", source.display_name(), e);
                failed_sources.push(source.display_name().to_string());
            }
        }
    }

    let Some(manifest) = manifest else {
        return ListOutcome {
            levels: Vec::new(),
            failed_sources,
        };
    };

    let fetches = manifest.iter().enumerate().map(|(rank, path)| async move {
        for source in sources {
            match fetch_level(client, source, path).await {
                Ok(level) => return LoadOutcome::Loaded(level),
                Err(e) => {
                    eprintln!(
                        "Failed to load level #{} {} from {}: {:#}",
                        rank + 1,
                        path,
                        source.display_name(),
                        e
                    );
                }
            }
        }
        LoadOutcome::Failed { path: path.clone() }
    });

    ListOutcome {
        levels: join_all(fetches).await,
        failed_sources,
    }
}

/// Fetch the optional maintainer document.
///
/// Under merge-all-sources every source is read and the result de-duplicated
/// case-insensitively by name (first occurrence wins); otherwise the first
/// source with a document wins. Never fails the run: no document anywhere
/// yields an empty list.
pub async fn fetch_editors(
    client: &Client,
    sources: &[SourceConfig],
    policy: SourcePolicy,
) -> Vec<Editor> {
    match policy {
        SourcePolicy::MergeAllSources => {
            let mut all = Vec::new();
            for source in sources {
                match fetch_editor_document(client, source).await {
                    Ok(editors) => all.extend(editors),
                    Err(e) => {
                        eprintln!("No editors document at {}: {:#}", source.display_name(), e);
                    }
                }
            }
            dedup_editors(all)
        }
        SourcePolicy::FixedSource | SourcePolicy::FallbackChain => {
            for source in sources {
                match fetch_editor_document(client, source).await {
                    Ok(editors) => return editors,
                    Err(e) => {
                        eprintln!("No editors document at {}: {:#}", source.display_name(), e);
                    }
                }
            }
            Vec::new()
        }
    }
}

async fn fetch_manifest(client: &Client, source: &SourceConfig) -> Result<Vec<String>> {
    get_json(client, &format!("{}/_list.json", source.url)).await
}

async fn fetch_level(client: &Client, source: &SourceConfig, path: &str) -> Result<Level> {
    let doc: LevelDocument = get_json(client, &format!("{}/{}.json", source.url, path)).await?;
    Ok(Level::from_document(doc, path))
}

async fn fetch_editor_document(client: &Client, source: &SourceConfig) -> Result<Vec<Editor>> {
    get_json(client, &format!("{}/_editors.json", source.url)).await
}

/// GET a JSON document. A transport error, a non-success status, and a body
/// that fails to parse are all the same failure class to callers.
async fn get_json<T: serde::de::DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    let body = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Request failed for {}", url))?
        .error_for_status()
        .with_context(|| format!("Unexpected status for {}", url))?
        .text()
        .await
        .with_context(|| format!("Failed to read body from {}", url))?;

    serde_json::from_str(&body).with_context(|| format!("Invalid JSON at {}", url))
}

fn dedup_editors(editors: Vec<Editor>) -> Vec<Editor> {
    let mut seen = HashSet::new();
    editors
        .into_iter()
        .filter(|editor| seen.insert(editor.name.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(name: &str, role: Option<&str>) -> Editor {
        Editor {
            name: name.to_string(),
            role: role.map(str::to_string),
            link: None,
        }
    }

    #[test]
    fn test_dedup_editors_is_case_insensitive_and_keeps_first() {
        let deduped = dedup_editors(vec![
            editor("Alice", Some("owner")),
            editor("bob", None),
            editor("ALICE", Some("helper")),
        ]);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].name, "Alice");
        assert_eq!(deduped[0].role.as_deref(), Some("owner"));
        assert_eq!(deduped[1].name, "bob");
    }

    #[test]
    fn test_dedup_editors_empty() {
        assert!(dedup_editors(Vec::new()).is_empty());
    }
}
