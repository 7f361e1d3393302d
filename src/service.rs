//! 生產計劃服務端點
//!
//! 以目錄來源取得快照後呼叫 [`PlanCalculator`]，並提供 JSON 請求/回應介面。

use std::collections::BTreeMap;

use plan_calc::PlanCalculator;
use plan_core::{
    CatalogSource, FeasiblePlan, PlanConfig, PlanError, PlanResult, ProductionRequest, Shortfall,
};
use serde::Serialize;
use serde_json::Value;

/// JSON 回應
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanResponse {
    Success(FeasiblePlan),

    InsufficientInventory {
        message: String,
        insufficient_materials: BTreeMap<String, Shortfall>,
    },

    Error { kind: String, message: String },
}

impl PlanResponse {
    fn invalid_request(message: impl Into<String>) -> Self {
        PlanResponse::Error {
            kind: "invalid_request".to_string(),
            message: message.into(),
        }
    }
}

impl From<plan_core::Result<PlanResult>> for PlanResponse {
    fn from(result: plan_core::Result<PlanResult>) -> Self {
        match result {
            Ok(PlanResult::Feasible(plan)) => PlanResponse::Success(plan),
            Ok(PlanResult::Infeasible { shortfalls }) => PlanResponse::InsufficientInventory {
                message: "庫存不足，無法建立生產計劃".to_string(),
                insufficient_materials: shortfalls,
            },
            Err(err) => PlanResponse::Error {
                kind: err.kind().to_string(),
                message: err.to_string(),
            },
        }
    }
}

/// 生產計劃服務
pub struct PlanService<S> {
    source: S,
    config: PlanConfig,
}

impl<S: CatalogSource> PlanService<S> {
    /// 以預設配置創建服務
    pub fn new(source: S) -> Self {
        Self::with_config(source, PlanConfig::default())
    }

    pub fn with_config(source: S, config: PlanConfig) -> Self {
        Self { source, config }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 計算生產計劃（每次請求重新讀取目錄快照）
    pub fn calculate_plan(&self, request: &ProductionRequest) -> plan_core::Result<PlanResult> {
        let snapshot = self.source.snapshot()?;
        PlanCalculator::new(snapshot).calculate(request)
    }

    /// JSON 端點：解析請求、計算並序列化回應
    ///
    /// 請求未帶 `round_up`/`rounding` 時使用配置中的預設值。
    pub fn handle_json(&self, body: &str) -> String {
        let response = match self.parse_request(body) {
            Ok(request) => PlanResponse::from(self.calculate_plan(&request)),
            Err(response) => response,
        };

        serde_json::to_string(&response).unwrap_or_else(|err| {
            tracing::error!("回應序列化失敗: {}", err);
            r#"{"status":"error","kind":"internal","message":"回應序列化失敗"}"#.to_string()
        })
    }

    /// 目錄設定內容（產品、原物料、BOM、庫存）
    pub fn settings_json(&self) -> plan_core::Result<Value> {
        let snapshot = self.source.snapshot()?;
        serde_json::to_value(&snapshot).map_err(|err| PlanError::Catalog(err.to_string()))
    }

    fn parse_request(&self, body: &str) -> Result<ProductionRequest, PlanResponse> {
        let mut value: Value = serde_json::from_str(body).map_err(|err| {
            tracing::warn!("無法解析請求: {}", err);
            PlanResponse::invalid_request(format!("無法解析請求: {}", err))
        })?;

        if let Value::Object(fields) = &mut value {
            if !fields.contains_key("round_up") && !fields.contains_key("rounding") {
                fields.insert(
                    "round_up".to_string(),
                    Value::Bool(self.config.default_round_up),
                );
            }
        }

        serde_json::from_value(value)
            .map_err(|err| PlanResponse::invalid_request(format!("請求欄位錯誤: {}", err)))
    }
}
