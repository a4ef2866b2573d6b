//! The setup for the CLI REPL

use std::path::{Path, PathBuf};

use clap::Args;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{logging::LoggingConfig, Graphic};

/// Name of the setup files searched in the home and current directory
const SETUP_FILE: &str = "Dndcm.toml";

#[derive(Debug, Clone, Args, Deserialize, Serialize, Default)]
pub struct Setup {
    /// The graphic level of the REPL
    #[clap(long, short)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) graphic: Option<Graphic>,

    /// The seed to use to initialize the random number generator
    #[clap(long, short)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) seed: Option<u64>,

    /// The prompt shown before each line
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) prompt: Option<String>,

    /// File where the line history is kept between sessions
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) history: Option<PathBuf>,

    /// The minimum log level
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) log_level: Option<String>,

    /// Use the pretty format for the logs
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) log_pretty: Option<bool>,
}

impl Setup {
    /// Extract the setup from the possible configuration sources
    pub fn extract_setups(file: Option<&Path>, cli: &Self) -> Result<Self, figment::Error> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(home) = home::home_dir() {
            let home_file = home.join(SETUP_FILE);
            if home_file.exists() {
                figment = figment.merge(Toml::file_exact(home_file));
            }
        }
        // any file in this directory or the ones above
        figment = figment.merge(Toml::file(SETUP_FILE));
        if let Some(file) = file {
            figment = figment.merge(Toml::file_exact(file));
        }
        figment
            .merge(Env::prefixed("DNDCM_"))
            .merge(Serialized::defaults(cli))
            .extract()
    }

    pub(crate) fn logging(&self) -> LoggingConfig {
        let mut config = LoggingConfig::default();
        if let Some(level) = &self.log_level {
            config.level.clone_from(level);
        }
        if let Some(pretty) = self.log_pretty {
            config.pretty = pretty;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::Setup;
    use crate::Graphic;

    #[test]
    fn sources_are_layered() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "Dndcm.toml",
                r#"
                    graphic = "fancy"
                    seed = 12
                    prompt = "roll> "
                "#,
            )?;
            jail.create_file("extra.toml", "seed = 24")?;
            jail.set_env("DNDCM_LOG_LEVEL", "debug");

            let cli = Setup {
                graphic: Some(Graphic::Ascii),
                ..Setup::default()
            };
            let setup = Setup::extract_setups(Some("extra.toml".as_ref()), &cli)?;

            assert_eq!(setup.graphic, Some(Graphic::Ascii));
            assert_eq!(setup.seed, Some(24));
            assert_eq!(setup.prompt.as_deref(), Some("roll> "));
            assert_eq!(setup.logging().level, "debug");
            assert!(!setup.logging().pretty);
            Ok(())
        });
    }

    #[test]
    fn missing_setup_file_is_an_error() {
        Jail::expect_with(|_| {
            assert!(
                Setup::extract_setups(Some("missing.toml".as_ref()), &Setup::default()).is_err()
            );
            Ok(())
        });
    }
}
