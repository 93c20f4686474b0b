//! Order records and their field/column mapping.
//!
//! An order is one customer's purchase, owned by the seller who took it.
//! Monetary columns are stored as text and parsed into [`Decimal`] on read;
//! the purchase list and the spreader list are JSON-shaped columns.

use rust_decimal::Decimal;
use sea_orm::QueryResult;
use serde::{Deserialize, Serialize};

use crate::ResultEngine;
use crate::fields::{FieldSpec, RowReader};
use crate::query::WriteRow;
use crate::util;

pub(crate) const TABLE: &str = "orders";

/// The customer composite. Selecting `customer` expands to all of these
/// columns at once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Customer {
    pub name: String,
    pub addr1: String,
    pub addr2: Option<String>,
    pub city: Option<String>,
    pub zipcode: Option<i64>,
    pub phone: String,
    pub email: Option<String>,
    pub neighborhood: String,
}

/// One purchase line inside an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductSale {
    #[serde(rename = "productId")]
    pub product_id: String,
    #[serde(rename = "numSold")]
    pub num_sold: i64,
    #[serde(rename = "amountCharged", default)]
    pub amount_charged: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub owner_id: String,
    pub last_modified_time: Option<String>,
    pub comments: Option<String>,
    pub special_instructions: Option<String>,
    pub amount_from_donations: Option<Decimal>,
    pub amount_from_purchases: Option<Decimal>,
    pub amount_from_cash_collected: Option<Decimal>,
    pub amount_from_checks_collected: Option<Decimal>,
    pub amount_total_collected: Option<Decimal>,
    pub check_numbers: Option<String>,
    pub delivery_id: Option<i64>,
    pub will_collect_money_later: Option<bool>,
    pub is_verified: Option<bool>,
    pub spreaders: Vec<String>,
    pub customer: Customer,
    pub purchases: Vec<ProductSale>,
}

/// Grouped money rollup per (owner, delivery).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoneyCollected {
    pub owner_id: String,
    pub delivery_id: Option<i64>,
    pub total_collected: Decimal,
    pub from_cash_collected: Decimal,
    pub from_checks_collected: Decimal,
}

pub(crate) const SPREADERS_JOIN: &str =
    "LEFT JOIN order_spreaders ON orders.order_id = order_spreaders.order_id";

pub(crate) const FIELDS: &[FieldSpec] = &[
    FieldSpec::map("orderId", &["orders.order_id"]),
    FieldSpec::map("ownerId", &["order_owner_id"]),
    FieldSpec::map("lastModifiedTime", &["last_modified_time"]),
    FieldSpec::map("comments", &["comments"]),
    FieldSpec::map("specialInstructions", &["special_instructions"]),
    FieldSpec::map(
        "amountFromDonations",
        &["CAST(amount_from_donations AS TEXT)"],
    ),
    FieldSpec::map(
        "amountFromPurchases",
        &["CAST(amount_from_purchases AS TEXT)"],
    ),
    FieldSpec::map(
        "amountFromCashCollected",
        &["CAST(cash_amount_collected AS TEXT)"],
    ),
    FieldSpec::map(
        "amountFromChecksCollected",
        &["CAST(check_amount_collected AS TEXT)"],
    ),
    FieldSpec::map(
        "amountTotalCollected",
        &["CAST(total_amount_collected AS TEXT)"],
    ),
    FieldSpec::map("checkNumbers", &["check_numbers"]),
    FieldSpec::map("deliveryId", &["delivery_id"]),
    FieldSpec::map("willCollectMoneyLater", &["will_collect_money_later"]),
    FieldSpec::map("isVerified", &["is_verified"]),
    FieldSpec::map("purchases", &["purchases"]),
    FieldSpec::joined("spreaders", &["order_spreaders.spreaders"], SPREADERS_JOIN),
    FieldSpec::map(
        "customer",
        &[
            "customer_name",
            "customer_addr1",
            "customer_addr2",
            "customer_city",
            "customer_zipcode",
            "customer_phone",
            "customer_email",
            "customer_neighborhood",
        ],
    ),
];

/// Builds one order from a result row, consuming columns in the same order
/// the projection listed them.
pub(crate) fn from_row(fields: &[&'static str], row: &QueryResult) -> ResultEngine<Order> {
    let mut reader = RowReader::new(row);
    let mut order = Order::default();
    for field in fields {
        match *field {
            "orderId" => order.order_id = reader.next()?,
            "ownerId" => order.owner_id = reader.next()?,
            "lastModifiedTime" => order.last_modified_time = reader.next()?,
            "comments" => order.comments = reader.next()?,
            "specialInstructions" => order.special_instructions = reader.next()?,
            "amountFromDonations" => {
                order.amount_from_donations =
                    util::decimal_col(reader.next()?, "amount_from_donations")?;
            }
            "amountFromPurchases" => {
                order.amount_from_purchases =
                    util::decimal_col(reader.next()?, "amount_from_purchases")?;
            }
            "amountFromCashCollected" => {
                order.amount_from_cash_collected =
                    util::decimal_col(reader.next()?, "cash_amount_collected")?;
            }
            "amountFromChecksCollected" => {
                order.amount_from_checks_collected =
                    util::decimal_col(reader.next()?, "check_amount_collected")?;
            }
            "amountTotalCollected" => {
                order.amount_total_collected =
                    util::decimal_col(reader.next()?, "total_amount_collected")?;
            }
            "checkNumbers" => order.check_numbers = reader.next()?,
            "deliveryId" => order.delivery_id = reader.next()?,
            "willCollectMoneyLater" => order.will_collect_money_later = reader.next()?,
            "isVerified" => order.is_verified = reader.next()?,
            "purchases" => {
                order.purchases = match reader.next::<Option<String>>()? {
                    Some(text) => util::decode_json(&text, "purchases")?,
                    None => Vec::new(),
                };
            }
            "spreaders" => {
                order.spreaders = match reader.next::<Option<String>>()? {
                    Some(text) => util::decode_json(&text, "spreaders")?,
                    None => Vec::new(),
                };
            }
            "customer" => {
                order.customer = Customer {
                    name: reader.next::<Option<String>>()?.unwrap_or_default(),
                    addr1: reader.next::<Option<String>>()?.unwrap_or_default(),
                    addr2: reader.next()?,
                    city: reader.next()?,
                    zipcode: reader.next()?,
                    phone: reader.next::<Option<String>>()?.unwrap_or_default(),
                    email: reader.next()?,
                    neighborhood: reader.next::<Option<String>>()?.unwrap_or_default(),
                };
            }
            // FIELDS and this match must stay in sync.
            other => unreachable!("unmapped order field {other}"),
        }
    }
    Ok(order)
}

/// Columns and bind values for writing one order.
///
/// The identifier and a fresh `last_modified_time` are always written;
/// everything else only when set.
pub(crate) fn write_row(order: &Order) -> ResultEngine<WriteRow> {
    let mut row = WriteRow::new();
    row.set("order_id", order.order_id.as_str());
    row.set("last_modified_time", util::now_rfc3339());
    row.set_text_if("order_owner_id", &order.owner_id);
    if !order.purchases.is_empty() {
        row.set("purchases", util::encode_json(&order.purchases, "purchases")?);
    }
    row.set_opt_text("comments", order.comments.as_deref());
    row.set_opt_text("special_instructions", order.special_instructions.as_deref());
    row.set_money("amount_from_donations", order.amount_from_donations);
    row.set_money("amount_from_purchases", order.amount_from_purchases);
    row.set_money("cash_amount_collected", order.amount_from_cash_collected);
    row.set_money("check_amount_collected", order.amount_from_checks_collected);
    row.set_money("total_amount_collected", order.amount_total_collected);
    row.set_opt_text("check_numbers", order.check_numbers.as_deref());
    row.set_opt_i64("delivery_id", order.delivery_id);
    row.set_opt_bool("will_collect_money_later", order.will_collect_money_later);
    row.set_opt_bool("is_verified", order.is_verified);
    row.set_text_if("customer_name", &order.customer.name);
    row.set_text_if("customer_addr1", &order.customer.addr1);
    row.set_opt_text("customer_addr2", order.customer.addr2.as_deref());
    row.set_opt_text("customer_city", order.customer.city.as_deref());
    row.set_opt_i64("customer_zipcode", order.customer.zipcode);
    row.set_text_if("customer_phone", &order.customer.phone);
    row.set_opt_text("customer_email", order.customer.email.as_deref());
    row.set_text_if("customer_neighborhood", &order.customer.neighborhood);
    Ok(row)
}
