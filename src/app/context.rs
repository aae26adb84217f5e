use crate::app::Result;
use crate::config::Config;
use crate::probe::ImageProbe;

/// Wires together the pieces a command needs: configuration and the image
/// probe. The browser fetcher is launched per command since it owns an OS
/// process.
pub struct AppContext {
    pub config: Config,
    pub probe: ImageProbe,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            probe: ImageProbe::new(),
        }
    }

    /// Build a context from the on-disk configuration file.
    pub fn from_default_config() -> Result<Self> {
        Ok(Self::new(Config::load()?))
    }
}
