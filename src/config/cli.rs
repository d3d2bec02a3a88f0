use crate::core::catalog::DEFAULT_ENDPOINT;
use crate::core::{AnchorPolicy, ConfigProvider};
use crate::template::{MarkerConfig, ProductFormat};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "catalog-populate")]
#[command(about = "Populate a filtered product list from a remote catalog")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, help = "TOML file overriding every other option")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Directory for catalog.html; prints to stdout when omitted")]
    pub output_path: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Log missing page anchors at debug level only")]
    pub quiet_anchors: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn product_format(&self) -> ProductFormat {
        ProductFormat::default()
    }

    fn markers(&self) -> MarkerConfig {
        MarkerConfig::default()
    }

    fn anchor_policy(&self) -> AnchorPolicy {
        if self.quiet_anchors {
            AnchorPolicy::Silent
        } else {
            AnchorPolicy::Warn
        }
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        if let Some(path) = &self.output_path {
            validation::validate_path("output_path", path)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}
