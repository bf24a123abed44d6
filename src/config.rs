use anyhow::{Context, Result, anyhow};
use std::{env, fs, path::Path};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/tubefetch-env";
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_TRANSCRIPT_API_URL: &str = "http://127.0.0.1:8085";

/// Key used both in the env file and as a process environment fallback.
pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";

/// Raw values read from the env file; everything optional until validated.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub transcript_api_url: Option<String>,
}

/// Validated configuration handed to the batch driver. The credential is
/// resolved up front so a missing key aborts before any video is touched.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub transcript_api_url: String,
}

pub fn read_env_config(path: &Path) -> Result<Option<EnvConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    let mut cfg = EnvConfig::default();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some((key, value_raw)) = trimmed.split_once('=') {
            let value = value_raw.trim().trim_matches('"');
            if value.is_empty() {
                continue;
            }
            match key {
                API_KEY_VAR => cfg.api_key = Some(value.to_string()),
                "API_BASE_URL" => cfg.api_base_url = Some(value.to_string()),
                "TRANSCRIPT_API_URL" => cfg.transcript_api_url = Some(value.to_string()),
                _ => {}
            }
        }
    }
    Ok(Some(cfg))
}

pub fn load_config() -> Result<FetcherConfig> {
    load_config_from(Path::new(DEFAULT_CONFIG_PATH))
}

pub fn load_config_from(path: impl AsRef<Path>) -> Result<FetcherConfig> {
    let path = path.as_ref();
    let cfg = read_env_config(path)?.unwrap_or_default();
    let api_key = cfg
        .api_key
        .or_else(|| env::var(API_KEY_VAR).ok().filter(|value| !value.is_empty()))
        .ok_or_else(|| {
            anyhow!(
                "{API_KEY_VAR} not set; add it to {} or export it in the environment",
                path.display()
            )
        })?;
    let api_base_url = cfg
        .api_base_url
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    let transcript_api_url = cfg
        .transcript_api_url
        .unwrap_or_else(|| DEFAULT_TRANSCRIPT_API_URL.to_string());
    Ok(FetcherConfig {
        api_key,
        api_base_url,
        transcript_api_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn make_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn read_env_config_extracts_key_and_endpoints() {
        let cfg = make_config(
            "# credentials\nYOUTUBE_API_KEY=\"abc123\"\nTRANSCRIPT_API_URL=\"http://transcripts.local\"\n",
        );
        let parsed = read_env_config(cfg.path()).unwrap().unwrap();
        assert_eq!(parsed.api_key.as_deref(), Some("abc123"));
        assert_eq!(
            parsed.transcript_api_url.as_deref(),
            Some("http://transcripts.local")
        );
        assert!(parsed.api_base_url.is_none());
    }

    #[test]
    fn load_config_defaults_endpoints() {
        let cfg = make_config("YOUTUBE_API_KEY=\"abc123\"\n");
        let loaded = load_config_from(cfg.path()).unwrap();
        assert_eq!(loaded.api_key, "abc123");
        assert_eq!(loaded.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(loaded.transcript_api_url, DEFAULT_TRANSCRIPT_API_URL);
    }

    #[test]
    fn load_config_overrides_api_base() {
        let cfg = make_config("YOUTUBE_API_KEY=\"k\"\nAPI_BASE_URL=\"http://127.0.0.1:9000/v3\"\n");
        let loaded = load_config_from(cfg.path()).unwrap();
        assert_eq!(loaded.api_base_url, "http://127.0.0.1:9000/v3");
    }

    #[test]
    fn blank_values_are_ignored() {
        let cfg = make_config("YOUTUBE_API_KEY=\"\"\nAPI_BASE_URL=\n");
        let parsed = read_env_config(cfg.path()).unwrap().unwrap();
        assert!(parsed.api_key.is_none());
        assert!(parsed.api_base_url.is_none());
    }
}
