//! 庫存可用性檢查

use plan_core::catalog::{self, InventoryMap};
use plan_core::Shortfall;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// 庫存檢查結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// 所有原物料庫存足夠
    Sufficient,

    /// 有原物料不足（包含所有缺料，而非第一筆）
    Insufficient(BTreeMap<String, Shortfall>),
}

impl Availability {
    pub fn is_sufficient(&self) -> bool {
        matches!(self, Availability::Sufficient)
    }
}

/// 庫存檢查器
pub struct InventoryValidator;

impl InventoryValidator {
    /// 比對需求與現有庫存
    ///
    /// 庫存中不存在的原物料視為 0。
    pub fn validate(
        required: &BTreeMap<String, Decimal>,
        inventory: &InventoryMap,
    ) -> Availability {
        let mut shortfalls = BTreeMap::new();

        for (material, &required_qty) in required {
            let available = Decimal::from(catalog::on_hand(inventory, material));

            if available < required_qty {
                let shortfall = Shortfall::new(required_qty, available);
                tracing::debug!(
                    "庫存不足: {} 需要 {}, 可用 {}, 缺少 {}",
                    material,
                    shortfall.required,
                    shortfall.available,
                    shortfall.shortage
                );
                shortfalls.insert(material.clone(), shortfall);
            }
        }

        if shortfalls.is_empty() {
            Availability::Sufficient
        } else {
            Availability::Insufficient(shortfalls)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn required() -> BTreeMap<String, Decimal> {
        let mut required = BTreeMap::new();
        required.insert("flour".to_string(), Decimal::from(222));
        required.insert("sugar".to_string(), Decimal::from(111));
        required
    }

    #[test]
    fn test_collects_every_shortfall() {
        // sugar 不在庫存中，視為 0
        let inventory: InventoryMap = [("flour".to_string(), 100)].into_iter().collect();

        let result = InventoryValidator::validate(&required(), &inventory);
        let Availability::Insufficient(shortfalls) = result else {
            panic!("expected insufficient inventory");
        };

        assert_eq!(shortfalls.len(), 2);
        assert_eq!(shortfalls["flour"].shortage, Decimal::from(122));
        assert_eq!(shortfalls["flour"].available, Decimal::from(100));
        assert_eq!(shortfalls["sugar"].shortage, Decimal::from(111));
        assert_eq!(shortfalls["sugar"].available, Decimal::ZERO);
    }

    #[test]
    fn test_sufficient_inventory() {
        let inventory: InventoryMap = [("flour".to_string(), 300), ("sugar".to_string(), 200)]
            .into_iter()
            .collect();

        assert!(InventoryValidator::validate(&required(), &inventory).is_sufficient());
    }

    #[test]
    fn test_exact_stock_is_enough() {
        let inventory: InventoryMap = [("flour".to_string(), 222), ("sugar".to_string(), 111)]
            .into_iter()
            .collect();

        assert!(InventoryValidator::validate(&required(), &inventory).is_sufficient());
    }

    #[test]
    fn test_only_deficient_materials_listed() {
        let inventory: InventoryMap = [("flour".to_string(), 500), ("sugar".to_string(), 110)]
            .into_iter()
            .collect();

        let result = InventoryValidator::validate(&required(), &inventory);
        let Availability::Insufficient(shortfalls) = result else {
            panic!("expected insufficient inventory");
        };
        assert_eq!(shortfalls.len(), 1);
        assert_eq!(shortfalls["sugar"].shortage, Decimal::ONE);
    }

    #[test]
    fn test_zero_requirement_without_stock() {
        let mut required = BTreeMap::new();
        required.insert("water".to_string(), Decimal::ZERO);

        assert!(InventoryValidator::validate(&required, &HashMap::new()).is_sufficient());
    }
}
