use super::schema::{Config, SourcePolicy};

/// Validate the configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.sources.is_empty() {
        errors.push("sources: at least one source must be configured".to_string());
    }

    for (i, source) in config.sources.iter().enumerate() {
        if source.url.trim().is_empty() {
            errors.push(format!("sources[{}].url: must not be empty", i));
        } else if !source.url.starts_with("http://") && !source.url.starts_with("https://") {
            errors.push(format!(
                "sources[{}].url: '{}' must be an http(s) URL",
                i, source.url
            ));
        }
        if source.url.ends_with('/') {
            errors.push(format!(
                "sources[{}].url: '{}' must not end with a slash",
                i, source.url
            ));
        }
    }

    if config.policy == SourcePolicy::FixedSource && config.sources.len() > 1 {
        errors.push(format!(
            "policy: fixed-source allows exactly one source, {} configured",
            config.sources.len()
        ));
    }

    if let Some(ref timeout) = config.timeout {
        if let Err(e) = humantime::parse_duration(timeout) {
            errors.push(format!("timeout: invalid duration '{}' - {}", timeout, e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
