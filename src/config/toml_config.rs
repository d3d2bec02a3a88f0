use crate::core::{AnchorPolicy, ConfigProvider};
use crate::template::{MarkerConfig, ProductFormat};
use crate::utils::error::{PopulateError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub render: ProductFormat,
    #[serde(default)]
    pub markers: MarkerConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    #[serde(default = "default_warn_on_missing_anchors")]
    pub warn_on_missing_anchors: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            warn_on_missing_anchors: default_warn_on_missing_anchors(),
        }
    }
}

fn default_warn_on_missing_anchors() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PopulateError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PopulateError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PopulateError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.source.endpoint)?;

        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }

        validation::validate_non_empty_string("markers.attribute", &self.markers.attribute)?;
        validation::validate_non_empty_string(
            "markers.filter_marker",
            &self.markers.filter_marker,
        )?;
        validation::validate_selector("markers.filter_label", &self.markers.filter_label)?;
        validation::validate_selector("markers.filter_control", &self.markers.filter_control)?;

        if let Some(output) = &self.output {
            validation::validate_path("output.path", &output.path)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }

    fn product_format(&self) -> ProductFormat {
        self.render.clone()
    }

    fn markers(&self) -> MarkerConfig {
        self.markers.clone()
    }

    fn anchor_policy(&self) -> AnchorPolicy {
        if self.diagnostics.warn_on_missing_anchors {
            AnchorPolicy::Warn
        } else {
            AnchorPolicy::Silent
        }
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_ref().map(|o| o.path.as_str())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
