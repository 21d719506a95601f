//! 설정 파일 (TOML)
//!
//! ```toml
//! image_extensions = ["dcm", "png", "jpg", "nii", "gz", "jpeg", "tiff"]
//!
//! [icons]
//! csv = "text"
//!
//! [viewer_modes]
//! mnc = "volume"
//! ```
//!
//! `icons`, `viewer_modes`는 내장 테이블에 덧붙고, `image_extensions`는
//! 지정하면 내장 집합을 대체한다.

use crate::core::formats::{FileFormats, IconClass, ViewerMode};
use crate::utils::error::{FeedBrowserError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// 설정 파일 경로를 덮어쓰는 환경 변수
pub const CONFIG_ENV_VAR: &str = "FEEDBROWSER_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowserConfig {
    pub image_extensions: Option<Vec<String>>,
    pub icons: BTreeMap<String, IconClass>,
    pub viewer_modes: BTreeMap<String, ViewerMode>,
}

impl BrowserConfig {
    /// TOML 문자열에서 설정 파싱
    pub fn from_toml(data: &str) -> Result<Self> {
        let config: BrowserConfig = toml::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정 로드
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// 기본 위치에서 설정 로드. 파일이 없으면 기본값.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        tracing::info!(path = %path.display(), "loading config");
        Self::from_file(&path)
    }

    /// 설정 파일 경로: 환경 변수 우선, 없으면 `<config_dir>/feedbrowser/config.toml`
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(custom) = env::var(CONFIG_ENV_VAR) {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        dirs::config_dir().map(|dir| dir.join("feedbrowser").join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        let keys = self
            .image_extensions
            .iter()
            .flatten()
            .chain(self.icons.keys())
            .chain(self.viewer_modes.keys());
        for key in keys {
            if key.trim().is_empty() || key.contains('.') || key.contains('/') {
                return Err(FeedBrowserError::Config(format!(
                    "invalid extension key: {:?}",
                    key
                )));
            }
        }
        Ok(())
    }

    /// 내장 테이블에 설정을 반영한 형식 테이블
    pub fn file_formats(&self) -> FileFormats {
        let mut formats = FileFormats::new();
        if let Some(extensions) = &self.image_extensions {
            formats.set_image_extensions(extensions);
        }
        for (extension, icon) in &self.icons {
            formats.set_icon(extension, *icon);
        }
        for (extension, mode) in &self.viewer_modes {
            formats.set_viewer_mode(extension, *mode);
        }
        formats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileDescriptor, ListItem};
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_matches_builtin() {
        let config = BrowserConfig::from_toml("").unwrap();
        assert_eq!(config, BrowserConfig::default());
        assert_eq!(&config.file_formats(), FileFormats::builtin());
    }

    #[test]
    fn test_config_extends_tables() {
        let config = BrowserConfig::from_toml(
            r#"
            image_extensions = ["tiff", "DCM"]

            [icons]
            csv = "text"

            [viewer_modes]
            mnc = "volume"
            "#,
        )
        .unwrap();
        let formats = config.file_formats();

        let csv = FileDescriptor::new("/out/t.csv", 1);
        assert_eq!(formats.classify(&ListItem::File(&csv)).icon, IconClass::Text);
        // 내장 아이콘 매핑은 유지
        let json = FileDescriptor::new("/out/t.json", 1);
        assert_eq!(formats.classify(&ListItem::File(&json)).icon, IconClass::Code);

        assert!(formats.is_image_extension("dcm"));
        assert!(formats.is_image_extension("tiff"));
        assert!(!formats.is_image_extension("png"));
        assert_eq!(formats.viewer_mode("mnc"), Some(ViewerMode::Volume));
        assert_eq!(formats.viewer_mode("trk"), Some(ViewerMode::Fibers));
    }

    #[test]
    fn test_config_rejects_unknown_icon() {
        let result = BrowserConfig::from_toml("[icons]\ncsv = \"spreadsheet\"\n");
        assert!(matches!(result, Err(FeedBrowserError::TomlParse(_))));
    }

    #[test]
    fn test_config_rejects_unknown_key() {
        assert!(BrowserConfig::from_toml("theme = \"dark\"\n").is_err());
    }

    #[test]
    fn test_config_rejects_dotted_extension() {
        let result = BrowserConfig::from_toml("[viewer_modes]\n\"nii.gz\" = \"volume\"\n");
        assert!(matches!(result, Err(FeedBrowserError::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[viewer_modes]\nply = \"mesh\"\n").unwrap();

        let config = BrowserConfig::from_file(&path).unwrap();
        assert_eq!(config.viewer_modes.get("ply"), Some(&ViewerMode::Mesh));
    }

    #[test]
    fn test_from_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let result = BrowserConfig::from_file(&temp.path().join("missing.toml"));
        assert!(matches!(result, Err(FeedBrowserError::Io(_))));
    }
}
