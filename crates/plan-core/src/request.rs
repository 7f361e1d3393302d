//! 生產計劃請求

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PlanError;

/// 生產計劃請求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRequest {
    /// 產品名稱
    pub product: String,

    /// 計劃（淨）產量
    pub plan_qty: u64,

    /// 預計開工日期
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// 原料不良率 [0, 1)
    #[serde(default)]
    pub raw_defect_rate: Decimal,

    /// 製程不良率 [0, 1)
    #[serde(default)]
    pub process_defect_rate: Decimal,

    /// 毛產量是否無條件進位
    #[serde(default, alias = "rounding")]
    pub round_up: bool,
}

impl ProductionRequest {
    /// 創建新的請求（不良率為 0，不進位）
    pub fn new(product: impl Into<String>, plan_qty: u64) -> Self {
        Self {
            product: product.into(),
            plan_qty,
            start_date: None,
            raw_defect_rate: Decimal::ZERO,
            process_defect_rate: Decimal::ZERO,
            round_up: false,
        }
    }

    /// 建構器模式：設置原料不良率
    pub fn with_raw_defect_rate(mut self, rate: Decimal) -> Self {
        self.raw_defect_rate = rate;
        self
    }

    /// 建構器模式：設置製程不良率
    pub fn with_process_defect_rate(mut self, rate: Decimal) -> Self {
        self.process_defect_rate = rate;
        self
    }

    /// 建構器模式：設置是否進位
    pub fn with_round_up(mut self, round_up: bool) -> Self {
        self.round_up = round_up;
        self
    }

    /// 建構器模式：設置開工日期
    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// 基本欄位檢查（不良率由良率計算器檢查）
    pub fn validate(&self) -> crate::Result<()> {
        if self.product.trim().is_empty() {
            return Err(PlanError::Domain("產品名稱不可為空".to_string()));
        }
        if self.plan_qty == 0 {
            return Err(PlanError::Domain("計劃數量必須大於 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_request_builder() {
        let request = ProductionRequest::new("CAKE", 100)
            .with_raw_defect_rate(Decimal::from_str("0.05").unwrap())
            .with_process_defect_rate(Decimal::from_str("0.03").unwrap())
            .with_round_up(true)
            .with_start_date(NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());

        assert_eq!(request.product, "CAKE");
        assert_eq!(request.plan_qty, 100);
        assert_eq!(request.raw_defect_rate, Decimal::from_str("0.05").unwrap());
        assert!(request.round_up);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_qty() {
        let request = ProductionRequest::new("CAKE", 0);
        assert!(matches!(request.validate(), Err(PlanError::Domain(_))));
    }

    #[test]
    fn test_validate_rejects_blank_product() {
        let request = ProductionRequest::new("  ", 10);
        assert!(matches!(request.validate(), Err(PlanError::Domain(_))));
    }

    #[test]
    fn test_deserialize_with_rounding_alias() {
        let json = r#"{
            "product": "CAKE",
            "plan_qty": 100,
            "start_date": "2025-11-01",
            "raw_defect_rate": 0.05,
            "process_defect_rate": 0.05,
            "rounding": true
        }"#;

        let request: ProductionRequest = serde_json::from_str(json).unwrap();
        assert!(request.round_up);
        assert_eq!(request.raw_defect_rate, Decimal::from_str("0.05").unwrap());
        assert_eq!(
            request.start_date,
            Some(NaiveDate::from_ymd_opt(2025, 11, 1).unwrap())
        );
    }
}
