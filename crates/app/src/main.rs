use engine::SelectionShape;
use migration::{Migrator, MigratorTrait};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "colletta={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let url = match &settings.database {
        settings::Database::Memory => String::from("sqlite::memory:"),
        settings::Database::Sqlite { path } => format!("sqlite:{path}?mode=rwc"),
    };
    let database = sea_orm::Database::connect(&url).await?;
    Migrator::up(&database, None).await?;

    // The query-resolution adapter owns the engine from here; this binary
    // only wires up the single connection and the schema.
    let engine = engine::Engine::builder().database(database).build();

    let shape = SelectionShape::new().node(
        "config",
        SelectionShape::new().field("kind").field("lastModifiedTime"),
    );
    match engine
        .fundraiser_config(&shape.selected_fields(&["config"]))
        .await
    {
        Ok(config) => tracing::info!(kind = config.kind, "fundraiser config loaded"),
        Err(err) => tracing::warn!("fundraiser config is not set yet: {err}"),
    }

    Ok(())
}
