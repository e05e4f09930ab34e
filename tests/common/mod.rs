#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use recordquery::{FieldType, Record, Schema};
use std::sync::LazyLock;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Draft,
    Active,
    Discontinued,
}

impl Status {
    pub const NAMES: &'static [&'static str] = &["Draft", "Active", "Discontinued"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Active => "Active",
            Self::Discontinued => "Discontinued",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub margin_percent: Option<f64>,
    pub is_stock_managed: bool,
    pub stock_quantity: Option<i64>,
    pub is_active: bool,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

static PRODUCT: LazyLock<Schema<Product>> = LazyLock::new(|| {
    Schema::builder("Product")
        .field("Id", FieldType::Uuid, |p: &Product| p.id.into())
        .field("Code", FieldType::Text, |p: &Product| p.code.as_str().into())
        .field("Name", FieldType::Text, |p: &Product| p.name.as_str().into())
        .nullable("Description", FieldType::Text, |p: &Product| p.description.clone().into())
        .nullable("CategoryId", FieldType::Uuid, |p: &Product| p.category_id.into())
        .nullable("BrandId", FieldType::Uuid, |p: &Product| p.brand_id.into())
        .field("PurchasePrice", FieldType::Float, |p: &Product| p.purchase_price.into())
        .field("SalePrice", FieldType::Float, |p: &Product| p.sale_price.into())
        .nullable("MarginPercent", FieldType::Float, |p: &Product| p.margin_percent.into())
        .field("IsStockManaged", FieldType::Bool, |p: &Product| p.is_stock_managed.into())
        .nullable("StockQuantity", FieldType::Int, |p: &Product| p.stock_quantity.into())
        .field("IsActive", FieldType::Bool, |p: &Product| p.is_active.into())
        .field("Status", FieldType::Enum(Status::NAMES), |p: &Product| p.status.as_str().into())
        .field("CreatedAt", FieldType::DateTime, |p: &Product| p.created_at.into())
        .build()
});

impl Record for Product {
    fn schema() -> &'static Schema<Self> {
        &PRODUCT
    }
}

pub const CATEGORY: Uuid = Uuid::from_u128(0xC0FFEE);

/// Deterministic id so tests can refer to products by a small number.
pub const fn pid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn product(n: u128, name: &str, sale_price: f64) -> Product {
    Product {
        id: pid(n),
        code: format!("P-{n:03}"),
        name: name.to_owned(),
        description: None,
        category_id: None,
        brand_id: None,
        purchase_price: sale_price / 2.0,
        sale_price,
        margin_percent: None,
        is_stock_managed: false,
        stock_quantity: None,
        is_active: true,
        status: Status::Active,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::days(n as i64),
    }
}

/// Five products with a mix of nulls, categories and statuses.
pub fn catalog() -> Vec<Product> {
    let mut p1 = product(1, "Blue Widget", 50.0);
    p1.category_id = Some(CATEGORY);
    p1.stock_quantity = Some(10);
    p1.is_stock_managed = true;
    let mut p2 = product(2, "Red Widget", 150.0);
    p2.category_id = Some(CATEGORY);
    p2.margin_percent = Some(40.0);
    p2.description = Some("bright and shiny".to_owned());
    let mut p3 = product(3, "Service Plan", 100.0);
    p3.status = Status::Draft;
    p3.stock_quantity = Some(0);
    let mut p4 = product(4, "Gadget", 100.0);
    p4.is_active = false;
    p4.status = Status::Discontinued;
    let p5 = product(5, "widget mini", 20.0);
    vec![p1, p2, p3, p4, p5]
}

pub fn ids(products: &[&Product]) -> Vec<u128> {
    products.iter().map(|p| p.id.as_u128()).collect()
}
