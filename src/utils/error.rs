use crate::domain::model::Anchor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PopulateError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Page is missing the {0}")]
    MissingAnchor(Anchor),

    #[error("Host library error: {message}")]
    HostError { message: String },
}

impl PopulateError {
    /// Short message for terminal output, without the nested source chain.
    pub fn user_friendly_message(&self) -> String {
        match self {
            PopulateError::ApiError(_) => "無法連線至商品 API，請檢查網路或端點設定".to_string(),
            PopulateError::IoError(e) => format!("檔案讀寫失敗: {}", e),
            PopulateError::SerializationError(_) => "API 回應格式無法解析".to_string(),
            PopulateError::ConfigValidationError { field, .. }
            | PopulateError::InvalidConfigValueError { field, .. } => {
                format!("配置錯誤: 請檢查 {}", field)
            }
            PopulateError::InvalidSelector { selector, .. } => {
                format!("選擇器格式錯誤: {}", selector)
            }
            PopulateError::MissingAnchor(anchor) => format!("頁面缺少必要元素: {}", anchor),
            PopulateError::HostError { message } => format!("列表元件錯誤: {}", message),
        }
    }
}

pub type Result<T> = std::result::Result<T, PopulateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_anchor_display() {
        let err = PopulateError::MissingAnchor(Anchor::ItemTemplate);
        assert_eq!(err.to_string(), "Page is missing the item template");
    }

    #[test]
    fn test_config_errors_share_friendly_message() {
        let err = PopulateError::InvalidConfigValueError {
            field: "source.endpoint".to_string(),
            value: "not a url".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(err.user_friendly_message().contains("source.endpoint"));
    }
}
