//! CSV 記錄格式與實體轉換

use plan_core::{BomEntry, InventoryEntry, Product, RawMaterial};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// CSV 記錄：可寫入檔案並轉換為目錄實體
pub trait Record: Serialize + for<'de> Deserialize<'de> {
    /// 檔案標頭
    const HEADERS: &'static [&'static str];

    /// 實體名稱（錯誤訊息用）
    const ENTITY: &'static str;

    /// 記錄的唯一鍵（BOM 為複合鍵）
    fn key(&self) -> Vec<&str>;

    /// 顯示用的鍵
    fn key_label(&self) -> String {
        self.key().join("/")
    }

    /// 欄位檢查
    fn validate(&self) -> crate::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_name: String,
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMaterialRecord {
    pub material_name: String,
    pub unit: String,
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomRecord {
    pub product_name: String,
    pub material_name: String,
    pub quantity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub material_name: String,
    pub quantity: u64,
}

fn require_name(field: &str, value: &str) -> crate::Result<()> {
    if value.trim().is_empty() {
        return Err(StoreError::Invalid(format!("{} 不可為空", field)));
    }
    Ok(())
}

impl Record for ProductRecord {
    const HEADERS: &'static [&'static str] = &["product_name", "price"];
    const ENTITY: &'static str = "product";

    fn key(&self) -> Vec<&str> {
        vec![self.product_name.as_str()]
    }

    fn validate(&self) -> crate::Result<()> {
        require_name("product_name", &self.product_name)
    }
}

impl Record for RawMaterialRecord {
    const HEADERS: &'static [&'static str] = &["material_name", "unit", "price"];
    const ENTITY: &'static str = "raw_material";

    fn key(&self) -> Vec<&str> {
        vec![self.material_name.as_str()]
    }

    fn validate(&self) -> crate::Result<()> {
        require_name("material_name", &self.material_name)
    }
}

impl Record for BomRecord {
    const HEADERS: &'static [&'static str] = &["product_name", "material_name", "quantity"];
    const ENTITY: &'static str = "bom";

    fn key(&self) -> Vec<&str> {
        vec![self.product_name.as_str(), self.material_name.as_str()]
    }

    fn validate(&self) -> crate::Result<()> {
        require_name("product_name", &self.product_name)?;
        require_name("material_name", &self.material_name)?;
        if self.quantity < Decimal::ZERO {
            return Err(StoreError::Invalid(format!(
                "BOM 用量不可為負數: {} = {}",
                self.key_label(),
                self.quantity
            )));
        }
        Ok(())
    }
}

impl Record for InventoryRecord {
    const HEADERS: &'static [&'static str] = &["material_name", "quantity"];
    const ENTITY: &'static str = "inventory";

    fn key(&self) -> Vec<&str> {
        vec![self.material_name.as_str()]
    }

    fn validate(&self) -> crate::Result<()> {
        require_name("material_name", &self.material_name)
    }
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Product::new(record.product_name, record.price)
    }
}

impl From<RawMaterialRecord> for RawMaterial {
    fn from(record: RawMaterialRecord) -> Self {
        RawMaterial::new(record.material_name, record.unit, record.price)
    }
}

impl From<BomRecord> for BomEntry {
    fn from(record: BomRecord) -> Self {
        BomEntry::new(record.product_name, record.material_name, record.quantity)
    }
}

impl From<InventoryRecord> for InventoryEntry {
    fn from(record: InventoryRecord) -> Self {
        InventoryEntry::new(record.material_name, record.quantity)
    }
}
