use sea_orm::{ConnectionTrait, DatabaseTransaction, DbErr, TransactionTrait};
use tracing::{debug, info};

use crate::fields::{Projection, project};
use crate::fr_config::{self, FundraiserConfig};
use crate::{EngineError, Identity, ResultEngine};

use super::{Engine, access, with_tx};

fn projection_for(selected: &[String]) -> ResultEngine<Projection> {
    if selected.is_empty() {
        return project(fr_config::FIELDS, &["kind".to_string()]);
    }
    project(fr_config::FIELDS, selected)
}

impl Engine {
    /// Reads the config singleton, projecting the selected fields.
    pub async fn fundraiser_config(&self, selected: &[String]) -> ResultEngine<FundraiserConfig> {
        let projection = projection_for(selected)?;
        let sql = format!(
            "select {} from {}",
            projection.column_list(),
            fr_config::TABLE
        );
        debug!(sql, "fetching fundraiser config");

        let row = self
            .database
            .query_one(self.stmt(sql, Vec::new()))
            .await?
            .ok_or_else(|| {
                EngineError::Database(DbErr::RecordNotFound(
                    "fundraiser config is not set".to_string(),
                ))
            })?;
        fr_config::from_row(&projection.fields, &row)
    }

    /// Replaces the config singleton: delete whatever is stored, insert
    /// the given record with a fresh timestamp.
    pub async fn set_fundraiser_config(
        &self,
        identity: &Identity,
        config: &FundraiserConfig,
    ) -> ResultEngine<()> {
        access::require_admin(identity)?;

        let row = fr_config::write_row(config)?;
        info!("setting fundraiser config");
        with_tx!(self, |tx| {
            let delete = self.stmt(format!("delete from {}", fr_config::TABLE), Vec::new());
            tx.execute(delete).await?;
            let insert = self.stmt(row.insert_sql(fr_config::TABLE), row.into_values());
            tx.execute(insert).await?;
            Ok(())
        })
    }

    /// Updates the set fields of the config singleton in place. The
    /// timestamp always moves, set fields or not.
    pub async fn update_fundraiser_config(
        &self,
        identity: &Identity,
        config: &FundraiserConfig,
    ) -> ResultEngine<()> {
        access::require_admin(identity)?;

        let row = fr_config::write_row(config)?;
        info!("updating fundraiser config");
        let stmt = self.stmt(row.update_sql(fr_config::TABLE, ""), row.into_values());
        self.database.execute(stmt).await?;
        Ok(())
    }

    /// Moves the config timestamp inside an open transaction. Writes to
    /// neighborhood and user data call this so config pollers notice.
    pub(crate) async fn touch_config(&self, tx: &DatabaseTransaction) -> ResultEngine<()> {
        let row = fr_config::write_row(&FundraiserConfig::default())?;
        let stmt = self.stmt(row.update_sql(fr_config::TABLE, ""), row.into_values());
        tx.execute(stmt).await?;
        Ok(())
    }
}
