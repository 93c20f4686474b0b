//! Engine operations.
//!
//! Every public operation validates its input and runs its authorization
//! gate before touching the store. Multi-statement writes run inside one
//! database transaction through [`with_tx`].

use sea_orm::{ConnectionTrait, DatabaseConnection, Statement, Value};

use crate::{EngineError, ResultEngine};

mod access;
mod allocations;
mod config;
mod neighborhoods;
mod orders;
mod summaries;
mod timecards;
mod users;

pub use orders::OrderFilter;

/// Run a block inside a DB transaction, committing on success and rolling
/// back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = async { $body }.await;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                $tx.rollback().await?;
                Err(err)
            }
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub(crate) fn stmt(&self, sql: String, values: Vec<Value>) -> Statement {
        Statement::from_sql_and_values(self.database.get_database_backend(), sql, values)
    }
}

fn required_text(value: &str, label: &str) -> ResultEngine<()> {
    if value.trim().is_empty() {
        return Err(EngineError::InvalidInput(format!(
            "{label} must be provided"
        )));
    }
    Ok(())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}
