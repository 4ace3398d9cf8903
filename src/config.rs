use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

use crate::capture::QualityPreset;
use crate::recorder::ArchiveMode;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub audio: AudioConfig,
    #[serde(default)]
    pub events: EventsConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    pub recordings_path: String,
    pub quality: QualityPreset,
    pub archive: ArchiveMode,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventsConfig {
    /// NATS server URL; event publishing is disabled when unset
    pub nats_url: Option<String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Recordings directory with `~` expanded
    pub fn recordings_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.audio.recordings_path).as_ref())
    }
}
