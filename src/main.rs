use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use production_plan::{
    logging, CsvCatalogStore, PlanConfig, PlanResponse, PlanService, ProductionRequest,
};
use rust_decimal::Decimal;

/// 生產計劃計算工具
#[derive(Debug, Parser)]
#[command(name = "production-plan", version, about)]
struct Cli {
    /// CSV 資料目錄
    #[arg(long, global = true, env = "PLAN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// 計算生產計劃
    Plan {
        #[arg(long)]
        product: String,

        /// 計劃（淨）產量
        #[arg(long)]
        qty: u64,

        /// 原料不良率 [0, 1)
        #[arg(long, default_value = "0")]
        raw_defect: Decimal,

        /// 製程不良率 [0, 1)
        #[arg(long, default_value = "0")]
        process_defect: Decimal,

        /// 毛產量無條件進位，`--round-up false` 為捨去（未指定時使用 PLAN_ROUND_UP）
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        round_up: Option<bool>,

        /// 預計開工日期 (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },

    /// 從 stdin 讀取一筆 JSON 請求，輸出 JSON 回應
    ServeJson,

    /// 顯示目錄設定
    Show,

    /// 新增或更新產品
    Product { name: String, price: u64 },

    /// 新增或更新原物料
    Material { name: String, unit: String, price: u64 },

    /// 新增或更新 BOM 用量
    Bom {
        product: String,
        material: String,
        quantity: Decimal,
    },

    /// 庫存管理
    #[command(subcommand)]
    Inventory(InventoryCommands),
}

#[derive(Debug, Subcommand)]
enum InventoryCommands {
    /// 新增庫存（已存在時失敗）
    Add { material: String, quantity: u64 },

    /// 更新庫存
    Update { material: String, quantity: u64 },

    /// 刪除庫存
    Delete { material: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = PlanConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    logging::init(&config.log_filter);

    let store = CsvCatalogStore::open(config.clone());

    match cli.command {
        Commands::Plan {
            product,
            qty,
            raw_defect,
            process_defect,
            round_up,
            start_date,
        } => {
            let mut request = ProductionRequest::new(product, qty)
                .with_raw_defect_rate(raw_defect)
                .with_process_defect_rate(process_defect)
                .with_round_up(config.round_up_or_default(round_up));
            if let Some(date) = start_date {
                request = request.with_start_date(date);
            }

            let service = PlanService::with_config(store, config);
            let response = PlanResponse::from(service.calculate_plan(&request));
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::ServeJson => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("無法讀取 stdin")?;
            let service = PlanService::with_config(store, config);
            println!("{}", service.handle_json(&body));
        }
        Commands::Show => {
            let service = PlanService::with_config(store, config);
            let settings = service.settings_json()?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Commands::Product { name, price } => store.upsert_product(&name, price)?,
        Commands::Material { name, unit, price } => {
            store.upsert_raw_material(&name, &unit, price)?
        }
        Commands::Bom {
            product,
            material,
            quantity,
        } => store.upsert_bom_entry(&product, &material, quantity)?,
        Commands::Inventory(InventoryCommands::Add { material, quantity }) => {
            store.add_inventory(&material, quantity)?
        }
        Commands::Inventory(InventoryCommands::Update { material, quantity }) => {
            store.update_inventory(&material, quantity)?
        }
        Commands::Inventory(InventoryCommands::Delete { material }) => {
            if !store.delete_inventory(&material)? {
                eprintln!("庫存 {} 不存在", material);
            }
        }
    }

    Ok(())
}
