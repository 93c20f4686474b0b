use sea_orm::{ConnectionTrait, TransactionTrait, Value};
use tracing::{debug, info};

use crate::fields::{Projection, project};
use crate::timecards::{self, Timecard};
use crate::util;
use crate::{Identity, ResultEngine};

use super::{Engine, access, with_tx};

fn projection_for(selected: &[String]) -> ResultEngine<Projection> {
    if selected.is_empty() {
        return project(timecards::FIELDS, &["id".to_string()]);
    }
    project(timecards::FIELDS, selected)
}

impl Engine {
    /// Lists timecards, optionally narrowed to one worker and/or one
    /// delivery event.
    pub async fn timecards(
        &self,
        uid: Option<&str>,
        delivery_id: Option<i64>,
        selected: &[String],
    ) -> ResultEngine<Vec<Timecard>> {
        let projection = projection_for(selected)?;
        let mut sql = format!(
            "select {} from {}",
            projection.column_list(),
            timecards::TABLE
        );
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();
        if let Some(uid) = uid {
            clauses.push("uid = ?");
            values.push(uid.into());
        }
        if let Some(delivery_id) = delivery_id {
            clauses.push("delivery_id = ?");
            values.push(delivery_id.into());
        }
        if !clauses.is_empty() {
            sql.push_str(" where ");
            sql.push_str(&clauses.join(" and "));
        }
        debug!(sql, "listing timecards");

        let rows = self.database.query_all(self.stmt(sql, values)).await?;
        rows.iter()
            .map(|row| timecards::from_row(&projection.fields, row))
            .collect()
    }

    /// Replaces the given timecards. Each card's stored row (same worker,
    /// delivery, and clock-in) is deleted first; a card with a zero or
    /// empty total duration stays deleted.
    pub async fn set_timecards(&self, identity: &Identity, cards: &[Timecard]) -> ResultEngine<()> {
        access::require_admin(identity)?;

        let now = util::now_rfc3339();
        info!(count = cards.len(), "setting timecards");
        with_tx!(self, |tx| {
            for card in cards {
                let delete = self.stmt(
                    format!(
                        "delete from {} where uid = ? and delivery_id = ? and time_in = ?",
                        timecards::TABLE
                    ),
                    vec![
                        card.uid.as_str().into(),
                        card.delivery_id.into(),
                        card.time_in.as_str().into(),
                    ],
                );
                tx.execute(delete).await?;

                if card.is_zero_duration() {
                    continue;
                }
                let insert = self.stmt(
                    format!(
                        "insert into {} \
                         (uid, delivery_id, last_modified_time, time_in, time_out, time_total) \
                         values (?, ?, ?, ?, ?, ?)",
                        timecards::TABLE
                    ),
                    vec![
                        card.uid.as_str().into(),
                        card.delivery_id.into(),
                        now.as_str().into(),
                        card.time_in.as_str().into(),
                        card.time_out.as_str().into(),
                        card.time_total.as_str().into(),
                    ],
                );
                tx.execute(insert).await?;
            }
            Ok(())
        })
    }
}
