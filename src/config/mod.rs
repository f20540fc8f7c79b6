use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the Supadata API credential.
pub const API_KEY_VAR: &str = "SUPADATA_API_KEY";

const SETTINGS_FILE: &str = "yt-transcriber.yaml";

/// Runtime settings. Every field has a default matching the stock
/// invocation; a YAML settings file can override any subset.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub input: InputSettings,
    pub output: OutputSettings,
    pub ledger: LedgerSettings,
    pub fetch: FetchSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// CSV file with one `video_id,url[,description]` row per video
    pub csv_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory for transcript artifacts
    pub transcripts_dir: PathBuf,

    /// Tried once if the primary directory cannot be created
    pub fallback_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSettings {
    /// One successfully fetched URL per line
    pub completed_file: PathBuf,

    /// `url<TAB>reason` per line
    pub failed_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Pause between requests, in seconds; 0 disables the pause
    pub request_delay_secs: u64,

    /// Language requested when --language is not given
    pub default_language: String,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("youtube_url.csv"),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            transcripts_dir: PathBuf::from("transcripts"),
            fallback_dir: PathBuf::from("transcripts_fallback"),
        }
    }
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            completed_file: PathBuf::from("youtube_url_completed.txt"),
            failed_file: PathBuf::from("youtube_url_failed.txt"),
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            request_delay_secs: 5,
            default_language: "en".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the working directory or the user config
    /// directory, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        match Self::settings_path() {
            Some(path) => {
                let content = fs_err::read_to_string(&path)
                    .with_context(|| format!("Failed to read settings file {}", path.display()))?;
                serde_yaml::from_str(&content)
                    .with_context(|| format!("Failed to parse settings file {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    fn settings_path() -> Option<PathBuf> {
        let local = PathBuf::from(SETTINGS_FILE);
        if local.exists() {
            return Some(local);
        }

        let global = dirs::config_dir()?.join("yt-transcriber").join(SETTINGS_FILE);
        global.exists().then_some(global)
    }

    /// Read the API credential from the environment, picking up a local
    /// `.env` file first when one exists.
    pub fn api_key() -> Result<String> {
        let _ = dotenvy::dotenv();

        std::env::var(API_KEY_VAR).map_err(|_| {
            anyhow::anyhow!(
                "{API_KEY_VAR} not found in environment variables.\n\
                 Please create a .env file with your API key:\n\
                 {API_KEY_VAR}=your_actual_api_key_here\n\n\
                 Or set the environment variable:\n\
                 export {API_KEY_VAR}=your_actual_api_key_here\n\n\
                 Get your API key from: https://supadata.ai/"
            )
        })
    }
}
