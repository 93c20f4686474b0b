use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::info;

use crate::allocations::{self, Allocation};
use crate::{EngineError, Identity, ResultEngine};

use super::{Engine, access, with_tx};

impl Engine {
    /// Replaces the whole closeout allocation table. Any row without a uid
    /// aborts and rolls back the entire batch.
    pub async fn set_closeout_allocations(
        &self,
        identity: &Identity,
        batch: &[Allocation],
    ) -> ResultEngine<()> {
        access::require_admin(identity)?;

        info!(count = batch.len(), "setting closeout allocations");
        with_tx!(self, |tx| {
            let delete = self.stmt(format!("delete from {}", allocations::TABLE), Vec::new());
            tx.execute(delete).await?;

            for item in batch {
                if item.uid.is_empty() {
                    return Err(EngineError::InvalidAllocation(
                        "allocation record without a uid".to_string(),
                    ));
                }
                let row = allocations::write_row(item);
                let insert = self.stmt(row.insert_sql(allocations::TABLE), row.into_values());
                tx.execute(insert).await?;
            }
            Ok(())
        })
    }
}
