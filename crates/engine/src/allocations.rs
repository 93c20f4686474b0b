//! Closeout allocation rows.
//!
//! After the campaign closes, an allocation row per seller records how the
//! final money pools were split. The table is only ever replaced as a
//! whole.

use rust_decimal::Decimal;

use crate::query::WriteRow;

pub(crate) const TABLE: &str = "allocation_summary";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Allocation {
    pub uid: String,
    pub bags_sold: Option<i64>,
    pub bags_spread: Option<Decimal>,
    pub delivery_minutes: Option<Decimal>,
    pub total_donations: Option<Decimal>,
    pub from_bags_sold: Option<Decimal>,
    pub from_bags_spread: Option<Decimal>,
    pub from_delivery: Option<Decimal>,
    pub total: Decimal,
}

pub(crate) fn write_row(item: &Allocation) -> WriteRow {
    let mut row = WriteRow::new();
    row.set("uid", item.uid.as_str());
    row.set("allocation_total", item.total.to_string());
    row.set_opt_i64("bags_sold", item.bags_sold);
    if let Some(v) = item.bags_spread {
        row.set("bags_spread", v.to_string());
    }
    if let Some(v) = item.delivery_minutes {
        row.set("delivery_minutes", v.to_string());
    }
    if let Some(v) = item.total_donations {
        row.set("total_donations", v.to_string());
    }
    if let Some(v) = item.from_bags_sold {
        row.set("allocation_from_bags_sold", v.to_string());
    }
    if let Some(v) = item.from_bags_spread {
        row.set("allocation_from_bags_spread", v.to_string());
    }
    if let Some(v) = item.from_delivery {
        row.set("allocation_from_delivery", v.to_string());
    }
    row
}
