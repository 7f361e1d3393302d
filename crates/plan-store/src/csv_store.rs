//! CSV 目錄儲存

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use plan_core::catalog::{BomMap, InventoryMap};
use plan_core::{CatalogSource, PlanConfig, Product, RawMaterial};
use rust_decimal::Decimal;

use crate::records::{BomRecord, InventoryRecord, ProductRecord, RawMaterialRecord, Record};
use crate::StoreError;

/// CSV 目錄儲存
///
/// 每種實體一個檔案，每次寫入都重寫整個檔案。檔案不存在時視為空。
#[derive(Debug, Clone)]
pub struct CsvCatalogStore {
    config: PlanConfig,
}

impl CsvCatalogStore {
    /// 以配置中的資料目錄開啟儲存
    pub fn open(config: PlanConfig) -> Self {
        tracing::debug!("開啟 CSV 目錄: {}", config.data_dir.display());
        Self { config }
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    pub fn product_records(&self) -> crate::Result<Vec<ProductRecord>> {
        read_records(&self.config.products_path())
    }

    pub fn raw_material_records(&self) -> crate::Result<Vec<RawMaterialRecord>> {
        read_records(&self.config.raw_materials_path())
    }

    pub fn bom_records(&self) -> crate::Result<Vec<BomRecord>> {
        read_records(&self.config.bom_path())
    }

    pub fn inventory_records(&self) -> crate::Result<Vec<InventoryRecord>> {
        read_records(&self.config.inventory_path())
    }

    /// 新增或更新產品（不會自動建立 BOM）
    pub fn upsert_product(&self, name: &str, price: u64) -> crate::Result<()> {
        upsert(
            &self.config.products_path(),
            ProductRecord {
                product_name: name.to_string(),
                price,
            },
        )?;
        tracing::info!("產品 {} 已儲存，請於 BOM 管理中設定構成", name);
        Ok(())
    }

    /// 新增或更新原物料
    pub fn upsert_raw_material(&self, name: &str, unit: &str, price: u64) -> crate::Result<()> {
        upsert(
            &self.config.raw_materials_path(),
            RawMaterialRecord {
                material_name: name.to_string(),
                unit: unit.to_string(),
                price,
            },
        )?;
        tracing::info!("原物料 {} 已儲存", name);
        Ok(())
    }

    /// 新增或取代 (產品, 原物料) 的 BOM 用量
    pub fn upsert_bom_entry(
        &self,
        product: &str,
        material: &str,
        quantity: Decimal,
    ) -> crate::Result<()> {
        upsert(
            &self.config.bom_path(),
            BomRecord {
                product_name: product.to_string(),
                material_name: material.to_string(),
                quantity,
            },
        )?;
        tracing::info!("BOM 已儲存: {} → {} x {}", product, material, quantity);
        Ok(())
    }

    /// 更新庫存（不存在則新增）
    pub fn update_inventory(&self, material: &str, quantity: u64) -> crate::Result<()> {
        upsert(
            &self.config.inventory_path(),
            InventoryRecord {
                material_name: material.to_string(),
                quantity,
            },
        )?;
        tracing::info!("庫存已更新: {} = {}", material, quantity);
        Ok(())
    }

    /// 新增庫存記錄，已存在時回傳 `Duplicate`
    pub fn add_inventory(&self, material: &str, quantity: u64) -> crate::Result<()> {
        let path = self.config.inventory_path();
        let record = InventoryRecord {
            material_name: material.to_string(),
            quantity,
        };
        record.validate()?;

        let mut records: Vec<InventoryRecord> = read_records(&path)?;
        if records.iter().any(|r| r.key() == record.key()) {
            return Err(StoreError::Duplicate {
                entity: InventoryRecord::ENTITY,
                key: record.key_label(),
            });
        }
        records.push(record);
        write_records(&path, &records)?;

        tracing::info!("庫存已新增: {} = {}", material, quantity);
        Ok(())
    }

    /// 刪除庫存記錄，回傳是否有記錄被刪除
    pub fn delete_inventory(&self, material: &str) -> crate::Result<bool> {
        let path = self.config.inventory_path();
        let mut records: Vec<InventoryRecord> = read_records(&path)?;
        let before = records.len();
        records.retain(|r| r.material_name != material);

        let removed = records.len() != before;
        if removed {
            write_records(&path, &records)?;
            tracing::info!("庫存已刪除: {}", material);
        } else {
            tracing::debug!("庫存 {} 不存在，略過刪除", material);
        }
        Ok(removed)
    }
}

impl CatalogSource for CsvCatalogStore {
    fn products(&self) -> plan_core::Result<HashMap<String, Product>> {
        Ok(self
            .product_records()?
            .into_iter()
            .map(|r| (r.product_name.clone(), Product::from(r)))
            .collect())
    }

    fn raw_materials(&self) -> plan_core::Result<HashMap<String, RawMaterial>> {
        Ok(self
            .raw_material_records()?
            .into_iter()
            .map(|r| (r.material_name.clone(), RawMaterial::from(r)))
            .collect())
    }

    fn bom(&self) -> plan_core::Result<BomMap> {
        let mut bom = BomMap::new();
        for record in self.bom_records()? {
            bom.entry(record.product_name)
                .or_default()
                .insert(record.material_name, record.quantity);
        }
        Ok(bom)
    }

    fn inventory(&self) -> plan_core::Result<InventoryMap> {
        Ok(self
            .inventory_records()?
            .into_iter()
            .map(|r| (r.material_name, r.quantity))
            .collect())
    }
}

fn read_records<R: Record>(path: &Path) -> crate::Result<Vec<R>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: R = result?;
        record.validate()?;
        records.push(record);
    }

    tracing::debug!("讀取 {} 筆 {} 記錄", records.len(), R::ENTITY);
    Ok(records)
}

fn write_records<R: Record>(path: &Path, records: &[R]) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    // 先寫暫存檔再改名，避免寫到一半的檔案被讀取
    let tmp_path = tmp_path_for(path);
    let result = write_tmp(&tmp_path, records).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    });

    if result.is_err() && tmp_path.exists() {
        if let Err(err) = fs::remove_file(&tmp_path) {
            tracing::warn!("無法移除暫存檔 {}: {}", tmp_path.display(), err);
        }
    }
    result
}

fn write_tmp<R: Record>(tmp_path: &Path, records: &[R]) -> crate::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(tmp_path)?;
    writer.write_record(R::HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(|source| StoreError::Io {
        path: tmp_path.to_path_buf(),
        source,
    })
}

fn upsert<R: Record>(path: &Path, record: R) -> crate::Result<()> {
    record.validate()?;
    let mut records: Vec<R> = read_records(path)?;
    records.retain(|r| r.key() != record.key());
    records.push(record);
    write_records(path, &records)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
