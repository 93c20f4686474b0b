//! Aggregation result types and their accumulation rules.
//!
//! All monetary accumulation happens here in [`Decimal`] arithmetic; none
//! of it is delegated to SQL aggregate functions, which would go through
//! floating point on the backing store.

use rust_decimal::Decimal;

use crate::ResultEngine;
use crate::orders::ProductSale;
use crate::util;

/// Product id whose purchase lines count as bags sold.
pub(crate) const PRODUCT_BAGS: &str = "bags";
/// Product id whose purchase lines count as bags to spread.
pub(crate) const PRODUCT_SPREADING: &str = "spreading";

/// Per-seller rollup across orders, timecards, and the allocation row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OwnerSummary {
    pub total_delivery_minutes: i64,
    pub total_num_bags_sold: i64,
    pub total_num_bags_to_spread: i64,
    pub amount_from_donations: Decimal,
    pub amount_from_bags: Decimal,
    pub amount_from_bags_to_spread: Decimal,
    pub amount_total_collected: Decimal,
    pub allocations_from_delivery: Decimal,
    pub allocations_from_bags_sold: Decimal,
    pub allocations_from_bags_spread: Decimal,
    pub allocations_total: Decimal,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TroopSummary {
    pub total_amount_collected: Decimal,
    pub group_totals: Vec<GroupTotal>,
    pub top_sellers: Vec<TopSeller>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroupTotal {
    pub group: String,
    pub total_amount_collected: Decimal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TopSeller {
    pub name: String,
    pub total_amount_collected: Decimal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NeighborhoodCount {
    /// `None` groups the orders whose customer has no neighborhood set.
    pub neighborhood: Option<String>,
    pub num_orders: i64,
}

/// Running totals over one seller's orders.
#[derive(Debug, Default)]
pub(crate) struct OwnerTally {
    pub total_collected: Decimal,
    pub donations: Decimal,
    pub bags_amount: Decimal,
    pub spreading_amount: Decimal,
    pub num_bags: i64,
    pub num_to_spread: i64,
}

impl OwnerTally {
    /// Folds one order in. Orders with no collected total are not yet
    /// settled and contribute nothing, purchase lines included.
    pub(crate) fn add_order(
        &mut self,
        total: Option<Decimal>,
        donations: Option<Decimal>,
        purchases: &[ProductSale],
    ) -> ResultEngine<()> {
        let Some(total) = total else {
            return Ok(());
        };
        self.total_collected += total;
        if let Some(amount) = donations {
            self.donations += amount;
        }
        for sale in purchases {
            let amount = util::parse_decimal(&sale.amount_charged, "amount_charged")?;
            match sale.product_id.as_str() {
                PRODUCT_BAGS => {
                    self.num_bags += sale.num_sold;
                    self.bags_amount += amount;
                }
                PRODUCT_SPREADING => {
                    self.num_to_spread += sale.num_sold;
                    self.spreading_amount += amount;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Sorts descending by total and keeps the first `top_n`. The sort is
/// stable, so sellers tied on total keep their incoming order.
pub(crate) fn rank_top_sellers(mut sellers: Vec<TopSeller>, top_n: usize) -> Vec<TopSeller> {
    sellers.sort_by(|a, b| b.total_amount_collected.cmp(&a.total_amount_collected));
    sellers.truncate(top_n);
    sellers
}
