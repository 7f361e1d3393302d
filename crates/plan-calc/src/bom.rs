//! BOM 展開（毛產量 → 原物料需求）

use plan_core::catalog::BomMap;
use plan_core::PlanError;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// BOM 展開器
pub struct BomResolver;

impl BomResolver {
    /// 展開單一產品的原物料需求
    ///
    /// 需求數量 = 單位用量 × 毛產量。產品不在 BOM 中或沒有任何項目時
    /// 回傳 `BomNotFound`；用量全為 0 的 BOM 仍是有效結果。
    pub fn resolve(
        product: &str,
        gross_qty: u64,
        bom: &BomMap,
    ) -> plan_core::Result<BTreeMap<String, Decimal>> {
        let entries = bom
            .get(product)
            .filter(|entries| !entries.is_empty())
            .ok_or_else(|| PlanError::BomNotFound(product.to_string()))?;

        let gross = Decimal::from(gross_qty);
        let mut required = BTreeMap::new();

        for (material, per_unit) in entries {
            let quantity = per_unit.checked_mul(gross).ok_or_else(|| {
                PlanError::Domain(format!("原物料 {} 需求數量溢位", material))
            })?;

            tracing::debug!(
                "BOM 展開: {} → {} (單位用量: {}, 需求: {})",
                product,
                material,
                per_unit,
                quantity
            );

            required.insert(material.clone(), quantity);
        }

        Ok(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn cake_bom() -> BomMap {
        let mut entries = HashMap::new();
        entries.insert("flour".to_string(), Decimal::from_str("2.0").unwrap());
        entries.insert("sugar".to_string(), Decimal::from_str("1.0").unwrap());

        let mut bom = HashMap::new();
        bom.insert("CAKE".to_string(), entries);
        bom
    }

    #[test]
    fn test_resolve_single_level() {
        let required = BomResolver::resolve("CAKE", 111, &cake_bom()).unwrap();

        assert_eq!(required.len(), 2);
        assert_eq!(required["flour"], Decimal::from(222));
        assert_eq!(required["sugar"], Decimal::from(111));
    }

    #[test]
    fn test_fractional_per_unit() {
        let mut bom = cake_bom();
        bom.get_mut("CAKE")
            .unwrap()
            .insert("butter".to_string(), Decimal::from_str("0.25").unwrap());

        let required = BomResolver::resolve("CAKE", 10, &bom).unwrap();
        assert_eq!(required["butter"], Decimal::from_str("2.5").unwrap());
    }

    #[test]
    fn test_unknown_product() {
        let result = BomResolver::resolve("PIE", 10, &cake_bom());
        assert!(matches!(result, Err(PlanError::BomNotFound(p)) if p == "PIE"));
    }

    #[test]
    fn test_product_with_empty_bom() {
        let mut bom = cake_bom();
        bom.insert("COOKIE".to_string(), HashMap::new());

        let result = BomResolver::resolve("COOKIE", 10, &bom);
        assert!(matches!(result, Err(PlanError::BomNotFound(_))));
    }

    #[test]
    fn test_all_zero_quantities_is_valid() {
        let mut entries = HashMap::new();
        entries.insert("water".to_string(), Decimal::ZERO);
        let mut bom = HashMap::new();
        bom.insert("ICE".to_string(), entries);

        let required = BomResolver::resolve("ICE", 50, &bom).unwrap();
        assert_eq!(required.len(), 1);
        assert_eq!(required["water"], Decimal::ZERO);
    }
}
