//! The fundraiser configuration singleton.
//!
//! One row describes the whole campaign: the product catalog, scheduled
//! delivery events, and (after closeout) the final money figures. The
//! structured parts are JSON-shaped columns; clients poll
//! `lastModifiedTime` to decide when to re-download, which is why every
//! related write touches the timestamp.

use sea_orm::QueryResult;
use serde::{Deserialize, Serialize};

use crate::ResultEngine;
use crate::fields::{FieldSpec, RowReader};
use crate::query::WriteRow;
use crate::util;

pub(crate) const TABLE: &str = "fundraiser_config";

/// One scheduled delivery event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryEvent {
    pub id: i64,
    pub date: String,
    pub new_order_cutoff_date: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreak {
    pub gt: i64,
    pub unit_price: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub label: String,
    pub min_units: i64,
    pub unit_price: String,
    #[serde(default)]
    pub price_breaks: Vec<PriceBreak>,
}

/// Final money figures recorded when the campaign is closed out.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseoutFigures {
    pub bank_deposited: String,
    pub product_cost: String,
    pub per_unit_cost: String,
    pub profits_from_units: String,
    pub sales_gross: String,
    pub money_pool_for_troop: String,
    pub money_pool_for_sellers_sub_pools: String,
    pub money_pool_for_sellers_sales: String,
    pub money_pool_for_sellers_delivery: String,
    pub per_unit_avg_earnings: String,
    pub delivery_earnings_per_minute: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FundraiserConfig {
    pub kind: String,
    pub description: String,
    pub last_modified_time: Option<String>,
    pub is_locked: Option<bool>,
    pub delivery_events: Option<Vec<DeliveryEvent>>,
    pub products: Vec<Product>,
    pub closeout: Option<CloseoutFigures>,
}

pub(crate) const FIELDS: &[FieldSpec] = &[
    FieldSpec::map("kind", &["kind"]),
    FieldSpec::map("description", &["description"]),
    FieldSpec::map("lastModifiedTime", &["last_modified_time"]),
    FieldSpec::map("deliveryEvents", &["delivery_events"]),
    FieldSpec::map("products", &["products"]),
    FieldSpec::map("closeoutFigures", &["closeout_figures"]),
    FieldSpec::map("isLocked", &["is_locked"]),
    // Resolved by their own operations, not from this row.
    FieldSpec::skipped("users"),
    FieldSpec::skipped("neighborhoods"),
];

pub(crate) fn from_row(
    fields: &[&'static str],
    row: &QueryResult,
) -> ResultEngine<FundraiserConfig> {
    let mut reader = RowReader::new(row);
    let mut config = FundraiserConfig::default();
    for field in fields {
        match *field {
            "kind" => config.kind = reader.next::<Option<String>>()?.unwrap_or_default(),
            "description" => {
                config.description = reader.next::<Option<String>>()?.unwrap_or_default();
            }
            "lastModifiedTime" => config.last_modified_time = reader.next()?,
            "deliveryEvents" => {
                config.delivery_events = match reader.next::<Option<String>>()? {
                    Some(text) => Some(util::decode_json(&text, "delivery_events")?),
                    None => None,
                };
            }
            "products" => {
                config.products = match reader.next::<Option<String>>()? {
                    Some(text) => util::decode_json(&text, "products")?,
                    None => Vec::new(),
                };
            }
            "closeoutFigures" => {
                config.closeout = match reader.next::<Option<String>>()? {
                    Some(text) => Some(util::decode_json(&text, "closeout_figures")?),
                    None => None,
                };
            }
            "isLocked" => config.is_locked = reader.next()?,
            other => unreachable!("unmapped config field {other}"),
        }
    }
    Ok(config)
}

/// Columns and bind values for writing the config row. A fresh
/// `last_modified_time` is always included, even when nothing else is set;
/// that is how the touch path works.
pub(crate) fn write_row(config: &FundraiserConfig) -> ResultEngine<WriteRow> {
    let mut row = WriteRow::new();
    row.set_text_if("kind", &config.kind);
    row.set_text_if("description", &config.description);
    if !config.products.is_empty() {
        row.set("products", util::encode_json(&config.products, "products")?);
    }
    if let Some(events) = &config.delivery_events {
        row.set(
            "delivery_events",
            util::encode_json(events, "delivery_events")?,
        );
    }
    if let Some(closeout) = &config.closeout {
        row.set(
            "closeout_figures",
            util::encode_json(closeout, "closeout_figures")?,
        );
    }
    row.set_opt_bool("is_locked", config.is_locked);
    row.set("last_modified_time", util::now_rfc3339());
    Ok(row)
}
