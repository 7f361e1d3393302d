//! 目錄模型（產品、原物料、BOM、庫存）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 產品 → (原物料 → 單位用量)
pub type BomMap = HashMap<String, HashMap<String, Decimal>>;

/// 原物料 → 現有庫存
pub type InventoryMap = HashMap<String, u64>;

/// 查詢庫存（不存在視為 0）
pub fn on_hand(inventory: &InventoryMap, material_name: &str) -> u64 {
    inventory.get(material_name).copied().unwrap_or(0)
}

/// 產品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// 產品名稱（唯一）
    pub name: String,

    /// 單位售價
    pub price: u64,
}

impl Product {
    pub fn new(name: impl Into<String>, price: u64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// 原物料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMaterial {
    /// 原物料名稱（唯一）
    pub name: String,

    /// 計量單位（僅作標籤，不做換算）
    pub unit: String,

    /// 單價
    pub price: u64,
}

impl RawMaterial {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, price: u64) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            price,
        }
    }
}

/// BOM 項目：生產一單位產品所需的原物料數量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomEntry {
    pub product_name: String,
    pub material_name: String,

    /// 單位用量（非負）
    pub quantity: Decimal,
}

impl BomEntry {
    pub fn new(
        product_name: impl Into<String>,
        material_name: impl Into<String>,
        quantity: Decimal,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            material_name: material_name.into(),
            quantity,
        }
    }
}

/// 庫存項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub material_name: String,

    /// 現有庫存
    pub quantity: u64,
}

impl InventoryEntry {
    pub fn new(material_name: impl Into<String>, quantity: u64) -> Self {
        Self {
            material_name: material_name.into(),
            quantity,
        }
    }
}

/// 目錄快照（請求當下讀取的唯讀資料）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub products: HashMap<String, Product>,
    pub raw_materials: HashMap<String, RawMaterial>,
    pub bom: BomMap,
    pub inventory: InventoryMap,
}

impl CatalogSnapshot {
    /// 創建空的快照
    pub fn new() -> Self {
        Self::default()
    }

    /// 由記錄列表建立快照
    ///
    /// 同一 (產品, 原物料) 出現多次時，以後出現者為準。
    pub fn from_records(
        products: Vec<Product>,
        raw_materials: Vec<RawMaterial>,
        bom_entries: Vec<BomEntry>,
        inventory: Vec<InventoryEntry>,
    ) -> Self {
        let mut snapshot = Self::new();
        for product in products {
            snapshot = snapshot.with_product(product);
        }
        for material in raw_materials {
            snapshot = snapshot.with_raw_material(material);
        }
        for entry in bom_entries {
            snapshot = snapshot.with_bom_entry(entry);
        }
        for entry in inventory {
            snapshot = snapshot.with_inventory(entry);
        }
        snapshot
    }

    /// 建構器模式：新增或取代產品
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.insert(product.name.clone(), product);
        self
    }

    /// 建構器模式：新增或取代原物料
    pub fn with_raw_material(mut self, material: RawMaterial) -> Self {
        self.raw_materials.insert(material.name.clone(), material);
        self
    }

    /// 建構器模式：新增或取代 BOM 項目
    pub fn with_bom_entry(mut self, entry: BomEntry) -> Self {
        self.bom
            .entry(entry.product_name)
            .or_default()
            .insert(entry.material_name, entry.quantity);
        self
    }

    /// 建構器模式：新增或取代庫存
    pub fn with_inventory(mut self, entry: InventoryEntry) -> Self {
        self.inventory.insert(entry.material_name, entry.quantity);
        self
    }

    /// 查詢庫存（不存在視為 0）
    pub fn on_hand(&self, material_name: &str) -> u64 {
        on_hand(&self.inventory, material_name)
    }
}

/// 目錄資料來源（唯讀）
///
/// 計劃核心只透過這個介面讀取資料，永遠不寫入。
pub trait CatalogSource {
    fn products(&self) -> crate::Result<HashMap<String, Product>>;

    fn raw_materials(&self) -> crate::Result<HashMap<String, RawMaterial>>;

    fn bom(&self) -> crate::Result<BomMap>;

    fn inventory(&self) -> crate::Result<InventoryMap>;

    /// 一次讀取四份資料，組成快照
    fn snapshot(&self) -> crate::Result<CatalogSnapshot> {
        Ok(CatalogSnapshot {
            products: self.products()?,
            raw_materials: self.raw_materials()?,
            bom: self.bom()?,
            inventory: self.inventory()?,
        })
    }
}

impl CatalogSource for CatalogSnapshot {
    fn products(&self) -> crate::Result<HashMap<String, Product>> {
        Ok(self.products.clone())
    }

    fn raw_materials(&self) -> crate::Result<HashMap<String, RawMaterial>> {
        Ok(self.raw_materials.clone())
    }

    fn bom(&self) -> crate::Result<BomMap> {
        Ok(self.bom.clone())
    }

    fn inventory(&self) -> crate::Result<InventoryMap> {
        Ok(self.inventory.clone())
    }

    fn snapshot(&self) -> crate::Result<CatalogSnapshot> {
        Ok(self.clone())
    }
}
