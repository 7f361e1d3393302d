//! 良率計算（淨產量 → 毛產量）

use plan_core::{DefectBreakdown, PlanError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 良率計算結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YieldBreakdown {
    /// 綜合良率 (1 - 原料不良率) × (1 - 製程不良率)
    pub combined_yield: Decimal,

    /// 需生產的毛產量
    pub gross_qty: u64,

    /// 不良數量明細
    pub defects: DefectBreakdown,
}

/// 良率計算器
pub struct YieldCalculator;

impl YieldCalculator {
    /// 計算毛產量與不良數
    ///
    /// * `round_up` - true 時毛產量無條件進位，false 時無條件捨去
    ///
    /// 原料/製程不良數各自以 `net_qty × rate / yield` 捨去計算，
    /// 不會調整成兩者相加等於總不良數。
    pub fn compute_gross(
        net_qty: u64,
        raw_rate: Decimal,
        process_rate: Decimal,
        round_up: bool,
    ) -> plan_core::Result<YieldBreakdown> {
        if net_qty == 0 {
            return Err(PlanError::Domain("計劃數量必須大於 0".to_string()));
        }
        Self::check_rate("原料不良率", raw_rate)?;
        Self::check_rate("製程不良率", process_rate)?;

        let combined_yield = Self::combined_yield(raw_rate, process_rate)
            .ok_or_else(|| PlanError::Domain("綜合良率無法計算".to_string()))?;
        if combined_yield <= Decimal::ZERO {
            return Err(PlanError::Domain(format!(
                "綜合良率必須大於 0，實際為 {}",
                combined_yield
            )));
        }

        let net = Decimal::from(net_qty);
        let exact = Self::divide(net, combined_yield)?;
        let gross = if round_up { exact.ceil() } else { exact.trunc() };
        let gross_qty = Self::to_count(gross)?;

        let raw_defect_qty =
            Self::to_count(Self::stage_defects(net, raw_rate, combined_yield)?)?;
        let process_defect_qty =
            Self::to_count(Self::stage_defects(net, process_rate, combined_yield)?)?;

        tracing::debug!(
            "良率 {}：淨產量 {} → 毛產量 {}（{}）",
            combined_yield,
            net_qty,
            gross_qty,
            if round_up { "進位" } else { "捨去" }
        );

        Ok(YieldBreakdown {
            combined_yield,
            gross_qty,
            defects: DefectBreakdown {
                defect_qty: gross_qty - net_qty,
                raw_defect_qty,
                process_defect_qty,
            },
        })
    }

    /// 綜合良率
    pub fn combined_yield(raw_rate: Decimal, process_rate: Decimal) -> Option<Decimal> {
        (Decimal::ONE - raw_rate).checked_mul(Decimal::ONE - process_rate)
    }

    fn check_rate(label: &str, rate: Decimal) -> plan_core::Result<()> {
        if rate < Decimal::ZERO || rate >= Decimal::ONE {
            return Err(PlanError::Domain(format!(
                "{} 必須介於 [0, 1)，實際為 {}",
                label, rate
            )));
        }
        Ok(())
    }

    fn stage_defects(
        net: Decimal,
        rate: Decimal,
        combined_yield: Decimal,
    ) -> plan_core::Result<Decimal> {
        let scaled = net
            .checked_mul(rate)
            .ok_or_else(|| PlanError::Domain("不良數計算溢位".to_string()))?;
        Ok(Self::divide(scaled, combined_yield)?.floor())
    }

    fn divide(numerator: Decimal, combined_yield: Decimal) -> plan_core::Result<Decimal> {
        numerator
            .checked_div(combined_yield)
            .ok_or_else(|| PlanError::Domain(format!("良率 {} 過小，無法計算", combined_yield)))
    }

    fn to_count(value: Decimal) -> plan_core::Result<u64> {
        value
            .to_u64()
            .ok_or_else(|| PlanError::Domain(format!("數量 {} 超出範圍", value)))
    }
}
