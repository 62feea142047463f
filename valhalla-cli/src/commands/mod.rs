pub mod batch;
pub mod request;

use anyhow::{Context, Result};
use std::path::PathBuf;
use valhalla::{Actor, ActorBuilder, Backend};

/// Engine selection shared by every subcommand.
pub struct EngineArgs {
    pub config: Option<String>,
    pub engine: Option<String>,
    pub bin: Option<PathBuf>,
    pub url: Option<String>,
}

impl EngineArgs {
    /// Build the actor described by these arguments.
    pub fn build(self) -> Result<Actor<Backend>> {
        let config = self.config.context(
            "VALHALLA_CONFIG environment variable not set. Use --config or set VALHALLA_CONFIG",
        )?;

        let mut builder = ActorBuilder::new(config);

        if let Some(engine) = self.engine {
            builder = builder.engine(engine.parse()?);
        }
        if let Some(bin) = self.bin {
            builder = builder.service_bin(bin);
        }
        if let Some(url) = self.url {
            builder = builder.url(url);
        }

        builder.build().context("Failed to create Valhalla actor")
    }
}
