use anyhow::{Context, Result};
use autotitle::{ApiKey, Settings};
use std::env;
use std::path::{Path, PathBuf};

/// Settings file looked up in the vault when `--settings` is not given.
pub const SETTINGS_FILE: &str = ".autotitle.json";

/// Where to read settings from.
pub fn settings_path(vault: &Path, explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| vault.join(SETTINGS_FILE))
}

/// Load settings from a JSON file, then apply environment overrides.
///
/// A missing file means defaults. `OPENAI_API_KEY` and `AUTOTITLE_MODEL`
/// override the file; `.env` is loaded before this is called.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let settings = read_settings_file(path)?;
    Ok(apply_overrides(
        settings,
        env::var("OPENAI_API_KEY").ok(),
        env::var("AUTOTITLE_MODEL").ok(),
    ))
}

fn read_settings_file(path: &Path) -> Result<Settings> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No settings file, using defaults");
        return Ok(Settings::default());
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid settings file {}", path.display()))?;
    Ok(settings)
}

fn apply_overrides(
    mut settings: Settings,
    api_key: Option<String>,
    model: Option<String>,
) -> Settings {
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        settings.api_key = ApiKey::from(key);
    }
    if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
        settings.model_id = model;
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = read_settings_file(&dir.path().join(SETTINGS_FILE)).unwrap();
        assert_eq!(settings.number_of_sentences, 5);
        assert!(settings.api_key.is_blank());
    }

    #[test]
    fn test_reads_camel_case_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(
            &path,
            r#"{"apiKey": "sk-file", "modelId": "gpt-4o", "numberOfSentences": 3, "autoUpdateUntitledNotes": true}"#,
        )
        .unwrap();

        let settings = read_settings_file(&path).unwrap();
        assert_eq!(settings.api_key.expose(), "sk-file");
        assert_eq!(settings.model_id, "gpt-4o");
        assert_eq!(settings.number_of_sentences, 3);
        assert!(settings.auto_update_untitled_notes);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let err = read_settings_file(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid settings file"));
    }

    #[test]
    fn test_env_overrides_win() {
        let settings = apply_overrides(
            Settings::new("sk-file").with_model("gpt-4o"),
            Some("sk-env".into()),
            Some("".into()),
        );
        assert_eq!(settings.api_key.expose(), "sk-env");
        assert_eq!(settings.model_id, "gpt-4o");
    }

    #[test]
    fn test_explicit_path_wins() {
        let vault = Path::new("/notes");
        assert_eq!(settings_path(vault, None), PathBuf::from("/notes/.autotitle.json"));
        assert_eq!(
            settings_path(vault, Some(Path::new("/etc/at.json"))),
            PathBuf::from("/etc/at.json")
        );
    }
}
