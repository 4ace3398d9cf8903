use anyhow::Result;

/// Audio playback backend trait
#[async_trait::async_trait]
pub trait PlaybackBackend: Send + Sync {
    /// Load a playable resource from a locator produced by a capture
    async fn load(&self, uri: &str) -> Result<Box<dyn PlaybackHandle>>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Handle to one loaded, playable audio resource
///
/// At most one handle should be live at a time; `release` consumes the
/// handle so a resource cannot be released twice.
#[async_trait::async_trait]
pub trait PlaybackHandle: Send {
    /// Begin playback; returns once playback has started
    async fn play(&mut self) -> Result<()>;

    /// Duration of the loaded resource in seconds
    fn duration_secs(&self) -> f64;

    /// Locator this handle was loaded from
    fn uri(&self) -> &str;

    /// Release the resource
    async fn release(self: Box<Self>) -> Result<()>;
}
