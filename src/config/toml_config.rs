use crate::config::DEFAULT_DISTANCE_KM;
use crate::core::{ConfigProvider, DuplicatePolicy, GeoPoint};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_coordinates, validate_non_empty_string, validate_path, validate_positive_distance,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub office: Option<OfficeConfig>,
    pub input: InputConfig,
    pub filter: Option<FilterConfig>,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficeConfig {
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    pub on_duplicate_id: Option<DuplicatePolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub debug: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OFFICE_LATITUDE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("input.path", &self.input.path)?;
        validate_path("input.path", &self.input.path)?;
        validate_non_empty_string("output.path", &self.output.path)?;
        validate_path("output.path", &self.output.path)?;
        validate_positive_distance("filter.distance_km", self.distance_km())?;
        validate_coordinates("office", &self.office())?;

        if let Some(name) = self.office.as_ref().and_then(|o| o.name.as_deref()) {
            validate_non_empty_string("office.name", name)?;
        }

        Ok(())
    }

    pub fn office_name(&self) -> &str {
        self.office
            .as_ref()
            .and_then(|o| o.name.as_deref())
            .unwrap_or("Dublin office")
    }

    pub fn debug_enabled(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.debug)
            .unwrap_or(false)
    }

    pub fn set_distance_km(&mut self, distance_km: f64) {
        self.filter = Some(FilterConfig {
            distance_km: Some(distance_km),
        });
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn office(&self) -> GeoPoint {
        self.office
            .as_ref()
            .map(|o| GeoPoint::new(o.latitude, o.longitude))
            .unwrap_or(GeoPoint::DEFAULT_OFFICE)
    }

    fn distance_km(&self) -> f64 {
        self.filter
            .as_ref()
            .and_then(|f| f.distance_km)
            .unwrap_or(DEFAULT_DISTANCE_KM)
    }

    fn duplicate_policy(&self) -> DuplicatePolicy {
        self.input.on_duplicate_id.unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
