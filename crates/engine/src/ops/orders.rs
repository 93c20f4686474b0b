use std::collections::BTreeMap;

use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DbErr, TransactionTrait, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::fields::{Projection, project};
use crate::orders::{self, MoneyCollected, Order};
use crate::util;
use crate::{EngineError, Identity, ResultEngine};

use super::{Engine, access, required_text, with_tx};

/// Scope of an order listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderFilter {
    All,
    /// Orders owned by the given seller.
    Owner(String),
    /// Orders whose spreader list contains the given seller.
    Spreader(String),
}

/// The collected total, when present alongside the per-method amounts,
/// must equal their sum.
fn check_collected_amounts(order: &Order) -> ResultEngine<()> {
    let Some(total) = order.amount_total_collected else {
        return Ok(());
    };
    let methods = [
        order.amount_from_cash_collected,
        order.amount_from_checks_collected,
    ];
    if methods.iter().all(Option::is_none) {
        return Ok(());
    }
    let sum: Decimal = methods.iter().flatten().copied().sum();
    if sum != total {
        return Err(EngineError::InvalidInput(
            "amountTotalCollected must equal the cash and check amounts collected".to_string(),
        ));
    }
    Ok(())
}

fn projection_for(selected: &[String]) -> ResultEngine<Projection> {
    if selected.is_empty() {
        return project(orders::FIELDS, &["orderId".to_string()]);
    }
    project(orders::FIELDS, selected)
}

impl Engine {
    /// Fetches one order, projecting the selected fields.
    pub async fn order_by_id(
        &self,
        order_id: &str,
        selected: &[String],
    ) -> ResultEngine<Option<Order>> {
        let projection = projection_for(selected)?;
        let sql = format!(
            "select {} from orders {} where orders.order_id = ?",
            projection.column_list(),
            projection.join_clause()
        );
        debug!(sql, order_id, "fetching order");

        let stmt = self.stmt(sql, vec![order_id.into()]);
        match self.database.query_one(stmt).await? {
            Some(row) => Ok(Some(orders::from_row(&projection.fields, &row)?)),
            None => Ok(None),
        }
    }

    /// Lists orders in the given scope, projecting the selected fields.
    pub async fn orders(
        &self,
        filter: &OrderFilter,
        selected: &[String],
    ) -> ResultEngine<Vec<Order>> {
        let projection = projection_for(selected)?;
        let mut sql = format!(
            "select {} from orders {}",
            projection.column_list(),
            projection.join_clause()
        );
        let mut values: Vec<Value> = Vec::new();
        match filter {
            OrderFilter::All => {}
            OrderFilter::Owner(owner_id) => {
                sql.push_str(" where order_owner_id = ?");
                values.push(owner_id.as_str().into());
            }
            OrderFilter::Spreader(uid) => {
                // The spreader list is a JSON array column; membership is
                // checked through json_each regardless of the projection's
                // own join.
                sql.push_str(
                    " where orders.order_id in \
                     (select order_id from order_spreaders, json_each(order_spreaders.spreaders) \
                     where json_each.value = ?)",
                );
                values.push(uid.as_str().into());
            }
        }
        debug!(sql, "listing orders");

        let rows = self.database.query_all(self.stmt(sql, values)).await?;
        rows.iter()
            .map(|row| orders::from_row(&projection.fields, row))
            .collect()
    }

    /// Money rollup grouped per (owner, delivery), optionally limited to
    /// one owner. Sums are accumulated here in decimal arithmetic.
    pub async fn orders_money_collected(
        &self,
        owner_id: Option<&str>,
    ) -> ResultEngine<Vec<MoneyCollected>> {
        let mut sql = "select order_owner_id, delivery_id, \
                       CAST(total_amount_collected AS TEXT), \
                       CAST(cash_amount_collected AS TEXT), \
                       CAST(check_amount_collected AS TEXT) from orders"
            .to_string();
        let mut values: Vec<Value> = Vec::new();
        if let Some(owner_id) = owner_id {
            sql.push_str(" where order_owner_id = ?");
            values.push(owner_id.into());
        }

        let rows = self.database.query_all(self.stmt(sql, values)).await?;
        let mut grouped: BTreeMap<(String, Option<i64>), MoneyCollected> = BTreeMap::new();
        for row in rows {
            let owner: String = row.try_get_by_index(0)?;
            let delivery: Option<i64> = row.try_get_by_index(1)?;
            let total = util::decimal_col(row.try_get_by_index(2)?, "total_amount_collected")?;
            let cash = util::decimal_col(row.try_get_by_index(3)?, "cash_amount_collected")?;
            let checks = util::decimal_col(row.try_get_by_index(4)?, "check_amount_collected")?;

            let entry = grouped
                .entry((owner.clone(), delivery))
                .or_insert_with(|| MoneyCollected {
                    owner_id: owner,
                    delivery_id: delivery,
                    ..MoneyCollected::default()
                });
            if let Some(v) = total {
                entry.total_collected += v;
            }
            if let Some(v) = cash {
                entry.from_cash_collected += v;
            }
            if let Some(v) = checks {
                entry.from_checks_collected += v;
            }
        }
        Ok(grouped.into_values().collect())
    }

    /// Creates a new order. Only the owner or an admin may create on the
    /// owner's behalf. Returns the order id, generated when absent.
    pub async fn create_order(&self, identity: &Identity, mut order: Order) -> ResultEngine<String> {
        if order.order_id.is_empty() {
            order.order_id = Uuid::new_v4().to_string();
        }
        required_text(&order.owner_id, "ownerId")?;
        access::require_owner_or_admin(identity, &order.owner_id)?;

        if order.customer.neighborhood.is_empty() || order.customer.neighborhood == "none" {
            return Err(EngineError::InvalidInput(
                "neighborhood must be provided for a new record".to_string(),
            ));
        }
        required_text(&order.customer.name, "customer name")?;
        required_text(&order.customer.addr1, "customer addr1")?;
        required_text(&order.customer.phone, "customer phone")?;
        if order.amount_total_collected.is_none() {
            return Err(EngineError::InvalidInput(
                "amountTotalCollected must be provided for a new record".to_string(),
            ));
        }
        check_collected_amounts(&order)?;

        let row = orders::write_row(&order)?;
        let stmt = self.stmt(row.insert_sql(orders::TABLE), row.into_values());
        self.database.execute(stmt).await?;
        info!(order_id = %order.order_id, "created order");
        Ok(order.order_id)
    }

    /// Replaces an order as a whole: the stored row is deleted and the
    /// given record inserted, in one transaction. Replacing an id with no
    /// stored row is not an error.
    pub async fn replace_order(&self, identity: &Identity, order: &Order) -> ResultEngine<()> {
        required_text(&order.order_id, "orderId")?;
        required_text(&order.owner_id, "ownerId")?;
        access::require_owner_or_admin(identity, &order.owner_id)?;
        check_collected_amounts(order)?;

        let row = orders::write_row(order)?;
        info!(order_id = %order.order_id, "replacing order");
        with_tx!(self, |tx| {
            let delete = self.stmt(
                "delete from orders where order_id = ?".to_string(),
                vec![order.order_id.as_str().into()],
            );
            tx.execute(delete).await?;
            let insert = self.stmt(row.insert_sql(orders::TABLE), row.into_values());
            tx.execute(insert).await?;
            Ok(())
        })
    }

    /// Deletes an order. The owner check runs against the stored owner, so
    /// this is the one gate that reads before authorizing.
    pub async fn delete_order(&self, identity: &Identity, order_id: &str) -> ResultEngine<()> {
        required_text(order_id, "orderId")?;

        let stmt = self.stmt(
            "select order_owner_id from orders where order_id = ?".to_string(),
            vec![order_id.into()],
        );
        let row = self.database.query_one(stmt).await?.ok_or_else(|| {
            EngineError::Database(DbErr::RecordNotFound(format!("order {order_id} not found")))
        })?;
        let owner_id: String = row.try_get_by_index(0)?;
        access::require_owner_or_admin(identity, &owner_id)?;

        let stmt = self.stmt(
            "delete from orders where order_id = ?".to_string(),
            vec![order_id.into()],
        );
        self.database.execute(stmt).await?;
        info!(order_id, "deleted order");
        Ok(())
    }

    /// Replaces the spreader list attached to an order.
    pub async fn set_spreaders(
        &self,
        identity: &Identity,
        order_id: &str,
        spreaders: &[String],
    ) -> ResultEngine<()> {
        required_text(order_id, "orderId")?;
        access::require_admin(identity)?;

        let encoded = util::encode_json(&spreaders, "spreaders")?;
        with_tx!(self, |tx| {
            let delete = self.stmt(
                "delete from order_spreaders where order_id = ?".to_string(),
                vec![order_id.into()],
            );
            tx.execute(delete).await?;
            if !spreaders.is_empty() {
                let insert = self.stmt(
                    "insert into order_spreaders (order_id, spreaders) values (?, ?)".to_string(),
                    vec![order_id.into(), encoded.as_str().into()],
                );
                tx.execute(insert).await?;
            }
            Ok(())
        })
    }
}
