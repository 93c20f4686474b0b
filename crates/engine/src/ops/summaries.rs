use std::collections::BTreeMap;

use rust_decimal::Decimal;
use sea_orm::ConnectionTrait;
use tracing::debug;

use crate::orders::ProductSale;
use crate::summaries::{
    GroupTotal, NeighborhoodCount, OwnerSummary, OwnerTally, TopSeller, TroopSummary,
    rank_top_sellers,
};
use crate::util;
use crate::{Identity, ResultEngine};

use super::{Engine, access, required_text};

impl Engine {
    /// Rolls up one seller's orders, delivery time, and allocation row.
    /// Visible to the seller themselves and to admins.
    pub async fn summary_by_owner(
        &self,
        identity: &Identity,
        owner_id: &str,
    ) -> ResultEngine<OwnerSummary> {
        required_text(owner_id, "ownerId")?;
        access::require_owner_or_admin(identity, owner_id)?;
        debug!(owner_id, "computing owner summary");

        let stmt = self.stmt(
            "select purchases, CAST(amount_from_donations AS TEXT), \
             CAST(total_amount_collected AS TEXT) from orders where order_owner_id = ?"
                .to_string(),
            vec![owner_id.into()],
        );
        let mut tally = OwnerTally::default();
        for row in self.database.query_all(stmt).await? {
            let purchases: Vec<ProductSale> = match row.try_get_by_index::<Option<String>>(0)? {
                Some(text) => util::decode_json(&text, "purchases")?,
                None => Vec::new(),
            };
            let donations = util::decimal_col(row.try_get_by_index(1)?, "amount_from_donations")?;
            let total = util::decimal_col(row.try_get_by_index(2)?, "total_amount_collected")?;
            tally.add_order(total, donations, &purchases)?;
        }

        let cards = self
            .timecards(Some(owner_id), None, &["timeTotal".to_string()])
            .await?;
        let mut delivery_seconds = 0i64;
        for card in cards {
            delivery_seconds += util::duration_seconds(&card.time_total, "time_total")?;
        }

        let stmt = self.stmt(
            "select CAST(allocation_from_delivery AS TEXT), \
             CAST(allocation_from_bags_sold AS TEXT), \
             CAST(allocation_from_bags_spread AS TEXT), \
             CAST(allocation_total AS TEXT) from allocation_summary where uid = ?"
                .to_string(),
            vec![owner_id.into()],
        );
        let mut summary = OwnerSummary {
            total_delivery_minutes: delivery_seconds / 60,
            total_num_bags_sold: tally.num_bags,
            total_num_bags_to_spread: tally.num_to_spread,
            amount_from_donations: tally.donations,
            amount_from_bags: tally.bags_amount,
            amount_from_bags_to_spread: tally.spreading_amount,
            amount_total_collected: tally.total_collected,
            ..OwnerSummary::default()
        };
        if let Some(row) = self.database.query_one(stmt).await? {
            summary.allocations_from_delivery =
                util::decimal_col(row.try_get_by_index(0)?, "allocation_from_delivery")?
                    .unwrap_or_default();
            summary.allocations_from_bags_sold =
                util::decimal_col(row.try_get_by_index(1)?, "allocation_from_bags_sold")?
                    .unwrap_or_default();
            summary.allocations_from_bags_spread =
                util::decimal_col(row.try_get_by_index(2)?, "allocation_from_bags_spread")?
                    .unwrap_or_default();
            summary.allocations_total =
                util::decimal_col(row.try_get_by_index(3)?, "allocation_total")?
                    .unwrap_or_default();
        }
        Ok(summary)
    }

    /// Troop-wide rollup: grand total, per-group totals, and the stable
    /// top-N seller list. Unsettled orders (NULL total) are excluded.
    pub async fn troop_summary(&self, top_n: usize) -> ResultEngine<TroopSummary> {
        debug!(top_n, "computing troop summary");
        let stmt = self.stmt(
            "select orders.order_owner_id, users.first_name, users.last_name, users.group_id, \
             CAST(total_amount_collected AS TEXT) from orders \
             inner join users on orders.order_owner_id = users.id \
             where total_amount_collected is not null \
             order by orders.order_owner_id"
                .to_string(),
            Vec::new(),
        );

        // Rows arrive grouped per owner; fold them into one seller entry
        // each, keeping owner-id order for tie stability later.
        let mut sellers: Vec<(String, String, String, Decimal)> = Vec::new();
        for row in self.database.query_all(stmt).await? {
            let owner_id: String = row.try_get_by_index(0)?;
            let first_name: String = row.try_get_by_index(1)?;
            let last_name: String = row.try_get_by_index(2)?;
            let group: String = row
                .try_get_by_index::<Option<String>>(3)?
                .unwrap_or_default();
            let total = util::parse_decimal(
                &row.try_get_by_index::<String>(4)?,
                "total_amount_collected",
            )?;

            match sellers.last_mut() {
                Some(entry) if entry.0 == owner_id => entry.3 += total,
                _ => sellers.push((owner_id, format!("{first_name} {last_name}"), group, total)),
            }
        }

        let mut troop_total = Decimal::ZERO;
        let mut group_totals: BTreeMap<String, Decimal> = BTreeMap::new();
        let mut top: Vec<TopSeller> = Vec::with_capacity(sellers.len());
        for (_, name, group, total) in sellers {
            troop_total += total;
            *group_totals.entry(group).or_default() += total;
            top.push(TopSeller {
                name,
                total_amount_collected: total,
            });
        }

        Ok(TroopSummary {
            total_amount_collected: troop_total,
            group_totals: group_totals
                .into_iter()
                .map(|(group, total_amount_collected)| GroupTotal {
                    group,
                    total_amount_collected,
                })
                .collect(),
            top_sellers: rank_top_sellers(top, top_n),
        })
    }

    /// Order counts per customer neighborhood.
    pub async fn neighborhood_summary(&self) -> ResultEngine<Vec<NeighborhoodCount>> {
        let stmt = self.stmt(
            "select customer_neighborhood, count(*) from orders \
             group by customer_neighborhood order by customer_neighborhood"
                .to_string(),
            Vec::new(),
        );
        let rows = self.database.query_all(stmt).await?;
        let mut counts = Vec::with_capacity(rows.len());
        for row in rows {
            counts.push(NeighborhoodCount {
                neighborhood: row.try_get_by_index(0)?,
                num_orders: row.try_get_by_index(1)?,
            });
        }
        Ok(counts)
    }
}
