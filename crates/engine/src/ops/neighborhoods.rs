use std::collections::HashSet;

use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::{debug, info};

use crate::fields::{Projection, project};
use crate::neighborhoods::{self, Neighborhood};
use crate::{Identity, ResultEngine};

use super::{Engine, access, required_text, with_tx};

fn projection_for(selected: &[String]) -> ResultEngine<Projection> {
    if selected.is_empty() {
        return project(neighborhoods::FIELDS, &["name".to_string()]);
    }
    project(neighborhoods::FIELDS, selected)
}

impl Engine {
    /// Lists neighborhoods, projecting the selected fields.
    pub async fn neighborhoods(&self, selected: &[String]) -> ResultEngine<Vec<Neighborhood>> {
        let projection = projection_for(selected)?;
        let sql = format!(
            "select {} from {}",
            projection.column_list(),
            neighborhoods::TABLE
        );
        debug!(sql, "listing neighborhoods");

        let rows = self.database.query_all(self.stmt(sql, Vec::new())).await?;
        rows.iter()
            .map(|row| neighborhoods::from_row(&projection.fields, row))
            .collect()
    }

    /// Inserts or updates neighborhoods by name, then moves the config
    /// timestamp in the same transaction. An empty batch is a no-op.
    pub async fn upsert_neighborhoods(
        &self,
        identity: &Identity,
        hoods: &[Neighborhood],
    ) -> ResultEngine<()> {
        if hoods.is_empty() {
            return Ok(());
        }
        access::require_admin(identity)?;
        for hood in hoods {
            required_text(&hood.name, "neighborhood name")?;
        }

        let existing: HashSet<String> = self
            .neighborhoods(&["name".to_string()])
            .await?
            .into_iter()
            .map(|h| h.name)
            .collect();

        info!(count = hoods.len(), "upserting neighborhoods");
        with_tx!(self, |tx| {
            for hood in hoods {
                let is_update = existing.contains(&hood.name);
                let row = neighborhoods::write_row(hood, is_update);
                let stmt = if is_update {
                    self.stmt(
                        row.update_sql(neighborhoods::TABLE, "where name = ?"),
                        row.into_values_with(hood.name.as_str()),
                    )
                } else {
                    self.stmt(row.insert_sql(neighborhoods::TABLE), row.into_values())
                };
                tx.execute(stmt).await?;
            }
            self.touch_config(&tx).await?;
            Ok(())
        })
    }
}
