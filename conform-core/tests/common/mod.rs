//! Shared fixtures for conform-core tests.

#![allow(dead_code)]

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use conform_core::{
    BasicType, Binding, ConversionRule, Custom, EnumSpec, Model, Parsed, Schema, Validator,
};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnitOfSale {
    #[default]
    Bunch,
    Piece,
    Kilogram,
    Pack,
}

impl FromStr for UnitOfSale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bunch" => Ok(Self::Bunch),
            "Piece" => Ok(Self::Piece),
            "Kilogram" => Ok(Self::Kilogram),
            "Pack" => Ok(Self::Pack),
            other => Err(format!("unknown unit '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreCatalogueItem {
    pub display_name: String,
    pub price_per_unit: f64,
    pub unit: UnitOfSale,
    pub in_stock: bool,
    pub date_added: DateTime<Utc>,
}

pub fn unit_spec() -> EnumSpec {
    EnumSpec::mapped([("0", "Bunch"), ("1", "Piece"), ("2", "Kilogram"), ("3", "Pack")])
        .expect("valid unit mapping")
}

pub fn catalogue_schema() -> Schema {
    Schema::builder()
        .rule("DisplayName", BasicType::String)
        .rule("PricePerUnit", BasicType::Number)
        .rule("Unit", unit_spec())
        .rule("InStock", BasicType::Boolean)
        .rule("DateAdded", BasicType::Date)
        .build()
        .expect("valid catalogue schema")
}

pub fn catalogue_binding() -> Binding<StoreCatalogueItem> {
    Binding::new()
        .field("DisplayName", |item: &mut StoreCatalogueItem, name: String| {
            item.display_name = name;
        })
        .field("PricePerUnit", |item: &mut StoreCatalogueItem, price: f64| {
            item.price_per_unit = price;
        })
        .field(
            "Unit",
            |item: &mut StoreCatalogueItem, Parsed(unit): Parsed<UnitOfSale>| {
                item.unit = unit;
            },
        )
        .field("InStock", |item: &mut StoreCatalogueItem, in_stock: bool| {
            item.in_stock = in_stock;
        })
        .field(
            "DateAdded",
            |item: &mut StoreCatalogueItem, added: DateTime<Utc>| {
                item.date_added = added;
            },
        )
}

pub fn onion() -> Value {
    json!({
        "DisplayName": "Onion",
        "PricePerUnit": 380,
        "Unit": "2",
        "InStock": true,
        "DateAdded": "2002-01-17"
    })
}

pub fn lemon() -> Value {
    json!({
        "DisplayName": "Lemon",
        "PricePerUnit": "75",
        "Unit": "1",
        "InStock": "false",
        "DateAdded": "2005-10-31"
    })
}

pub fn celery() -> Value {
    json!({
        "DisplayName": "Celery",
        "PricePerUnit": 490,
        "Unit": "0",
        "InStock": "TRUE",
        "DateAdded": "2001-11-09"
    })
}

// ── Nested models ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockPrice {
    pub date: DateTime<Utc>,
    pub price: f64,
}

impl Model for StockPrice {
    fn binding() -> &'static Binding<Self> {
        static BINDING: LazyLock<Binding<StockPrice>> = LazyLock::new(|| {
            Binding::new()
                .field("date", |p: &mut StockPrice, date: DateTime<Utc>| p.date = date)
                .field("price", |p: &mut StockPrice, price: f64| p.price = price)
        });
        &BINDING
    }

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::builder()
                .rule("date", BasicType::Date)
                .rule("price", BasicType::Number)
                .build()
                .expect("valid stock price schema")
        });
        &SCHEMA
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stock {
    pub company_name: String,
    pub ticker: String,
    pub prices: Vec<StockPrice>,
}

impl Model for Stock {
    fn binding() -> &'static Binding<Self> {
        static BINDING: LazyLock<Binding<Stock>> = LazyLock::new(|| {
            Binding::new()
                .field("companyName", |s: &mut Stock, name: String| s.company_name = name)
                .field("ticker", |s: &mut Stock, ticker: String| s.ticker = ticker)
                .field(
                    "prices",
                    |s: &mut Stock, Custom(prices): Custom<Vec<StockPrice>>| s.prices = prices,
                )
        });
        &BINDING
    }

    fn schema() -> &'static Schema {
        static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
            Schema::builder()
                .rule("companyName", BasicType::String)
                .rule("ticker", BasicType::String)
                .rule(
                    "prices",
                    ConversionRule::nested_array::<StockPrice>(Validator::new()),
                )
                .build()
                .expect("valid stock schema")
        });
        &SCHEMA
    }
}

pub fn bhp() -> Value {
    json!({
        "companyName": "BHP Billiton Limited",
        "ticker": "BHP.AX",
        "prices": [
            { "date": "2019-09-24T00:00:00", "price": "37.5" },
            { "date": "2019-09-25T00:00:00", "price": "36.42" },
            { "date": "2019-09-26T00:00:00", "price": "36.82" }
        ]
    })
}
