use std::collections::HashSet;

use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::{debug, info};

use crate::users::{self, User};
use crate::{Identity, ResultEngine};

use super::{Engine, access, with_tx};

impl Engine {
    /// Lists users, projecting the selected fields. `name` is synthesized
    /// from the name columns. With `only_without_auth_creds`, limits the
    /// listing to accounts that have not yet claimed credentials.
    pub async fn users(
        &self,
        selected: &[String],
        only_without_auth_creds: bool,
    ) -> ResultEngine<Vec<User>> {
        let projection = users::project(selected)?;
        let mut sql = format!(
            "select {} from {}",
            projection.columns.join(", "),
            users::TABLE
        );
        if only_without_auth_creds {
            sql.push_str(" where not has_auth_creds");
        }
        debug!(sql, "listing users");

        let rows = self.database.query_all(self.stmt(sql, Vec::new())).await?;
        rows.iter()
            .map(|row| users::from_row(&projection, row))
            .collect()
    }

    /// Inserts or updates users by id. Identity fields only land on
    /// insert, credential state only on update; any write moves the config
    /// timestamp in the same transaction. Rows without an id are skipped.
    pub async fn upsert_users(&self, identity: &Identity, batch: &[User]) -> ResultEngine<()> {
        if batch.is_empty() {
            return Ok(());
        }
        access::require_admin(identity)?;

        let existing: HashSet<String> = self
            .users(&["id".to_string()], false)
            .await?
            .into_iter()
            .map(|u| u.id)
            .collect();

        info!(count = batch.len(), "upserting users");
        with_tx!(self, |tx| {
            let mut dirty = false;
            for user in batch {
                if user.id.is_empty() {
                    continue;
                }
                let is_update = existing.contains(&user.id);
                let row = users::write_row(user, is_update);
                let stmt = if is_update {
                    self.stmt(
                        row.update_sql(users::TABLE, "where id = ?"),
                        row.into_values_with(user.id.as_str()),
                    )
                } else {
                    self.stmt(row.insert_sql(users::TABLE), row.into_values())
                };
                tx.execute(stmt).await?;
                dirty = true;
            }
            if dirty {
                self.touch_config(&tx).await?;
            }
            Ok(())
        })
    }
}
