use toonstudio_core::config::ClientConfig;

pub const ENV_API_BASE_URL: &str = "TOON_STUDIO_API_BASE_URL";

/// Applies environment overrides on top of `cfg`. Blank values are ignored.
pub fn apply_env_overrides(cfg: ClientConfig) -> ClientConfig {
    apply_overrides(cfg, |key| std::env::var(key).ok())
}

fn apply_overrides(cfg: ClientConfig, get: impl Fn(&str) -> Option<String>) -> ClientConfig {
    match get(ENV_API_BASE_URL) {
        Some(url) if !url.trim().is_empty() => {
            log::debug!("api base url from {ENV_API_BASE_URL}: {url}");
            cfg.with_api_base_url(url.trim())
        }
        _ => cfg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toonstudio_core::config::DEFAULT_API_BASE_URL;

    #[test]
    fn override_replaces_base_url() {
        let cfg = apply_overrides(ClientConfig::default(), |k| {
            (k == ENV_API_BASE_URL).then(|| "https://toon.example.com".to_string())
        });
        assert_eq!(cfg.api_base_url, "https://toon.example.com");
    }

    #[test]
    fn blank_or_missing_keeps_default() {
        let cfg = apply_overrides(ClientConfig::default(), |_| Some("  ".into()));
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);

        let cfg = apply_overrides(ClientConfig::default(), |_| None);
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    }
}
