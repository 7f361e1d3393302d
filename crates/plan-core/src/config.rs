//! 系統配置模型

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 資料目錄環境變數
pub const ENV_DATA_DIR: &str = "PLAN_DATA_DIR";

/// 預設進位環境變數
pub const ENV_ROUND_UP: &str = "PLAN_ROUND_UP";

/// 日誌過濾環境變數
pub const ENV_LOG_FILTER: &str = "RUST_LOG";

/// 生產計劃系統配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// CSV 資料目錄
    pub data_dir: PathBuf,

    /// 產品檔名
    pub products_file: String,

    /// 原物料檔名
    pub raw_materials_file: String,

    /// BOM 檔名
    pub bom_file: String,

    /// 庫存檔名
    pub inventory_file: String,

    /// 請求未指定時的進位預設值
    pub default_round_up: bool,

    /// 日誌過濾條件（tracing EnvFilter 語法）
    pub log_filter: String,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            products_file: "products.csv".to_string(),
            raw_materials_file: "raw_materials.csv".to_string(),
            bom_file: "bom.csv".to_string(),
            inventory_file: "inventory.csv".to_string(),
            default_round_up: false,
            log_filter: "info".to_string(),
        }
    }
}

impl PlanConfig {
    /// 創建指定資料目錄的配置
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// 從環境變數讀取配置，未設定者使用預設值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 以自訂查詢函式讀取配置
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup(ENV_ROUND_UP) {
            config.default_round_up = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Some(filter) = lookup(ENV_LOG_FILTER) {
            config.log_filter = filter;
        }
        config
    }

    /// 建構器模式：設置資料目錄
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// 建構器模式：設置預設進位
    pub fn with_default_round_up(mut self, round_up: bool) -> Self {
        self.default_round_up = round_up;
        self
    }

    /// 建構器模式：設置日誌過濾條件
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// 請求的進位設定，未指定時使用預設值
    pub fn round_up_or_default(&self, requested: Option<bool>) -> bool {
        requested.unwrap_or(self.default_round_up)
    }

    pub fn products_path(&self) -> PathBuf {
        self.resolve(&self.products_file)
    }

    pub fn raw_materials_path(&self) -> PathBuf {
        self.resolve(&self.raw_materials_file)
    }

    pub fn bom_path(&self) -> PathBuf {
        self.resolve(&self.bom_file)
    }

    pub fn inventory_path(&self) -> PathBuf {
        self.resolve(&self.inventory_file)
    }

    fn resolve(&self, file: &str) -> PathBuf {
        Path::new(&self.data_dir).join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = PlanConfig::default();

        assert_eq!(config.products_path(), PathBuf::from("./products.csv"));
        assert_eq!(config.inventory_path(), PathBuf::from("./inventory.csv"));
        assert!(!config.default_round_up);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_config_builder() {
        let config = PlanConfig::new("/var/lib/plan")
            .with_default_round_up(true)
            .with_log_filter("debug");

        assert_eq!(config.bom_path(), PathBuf::from("/var/lib/plan/bom.csv"));
        assert!(config.default_round_up);
        assert_eq!(config.log_filter, "debug");
    }

    #[rstest]
    #[case(false, None, false)]
    #[case(true, None, true)]
    #[case(true, Some(false), false)]
    #[case(false, Some(true), true)]
    fn test_round_up_or_default(
        #[case] default_round_up: bool,
        #[case] requested: Option<bool>,
        #[case] expected: bool,
    ) {
        let config = PlanConfig::default().with_default_round_up(default_round_up);
        assert_eq!(config.round_up_or_default(requested), expected);
    }

    #[rstest]
    #[case("true", true)]
    #[case("1", true)]
    #[case("ON", true)]
    #[case("false", false)]
    #[case("nope", false)]
    fn test_round_up_from_env(#[case] raw: &str, #[case] expected: bool) {
        let vars: HashMap<&str, String> = [(ENV_ROUND_UP, raw.to_string())].into_iter().collect();
        let config = PlanConfig::from_lookup(|key| vars.get(key).cloned());

        assert_eq!(config.default_round_up, expected);
    }

    #[test]
    fn test_data_dir_from_env() {
        let config = PlanConfig::from_lookup(|key| match key {
            ENV_DATA_DIR => Some("/data".to_string()),
            _ => None,
        });

        assert_eq!(
            config.raw_materials_path(),
            PathBuf::from("/data/raw_materials.csv")
        );
        assert_eq!(config.log_filter, "info");
    }
}
