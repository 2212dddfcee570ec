//! Handler for the `sql check` command.

use crate::adapter::inbound::cli::command::SqlArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::sql::SqlDatabase;
use crate::error::Result;
use crate::infrastructure::config::Resolver;
use crate::port::Database;

/// Execute the sql check command.
pub async fn execute(args: &SqlArgs, resolver: &Resolver<'_>) -> Result<()> {
    let settings = resolver.sql(args.uri.clone(), args.dialect())?;
    let database = output::with_spinner(
        &format!("Connecting to {}…", settings.dialect()),
        &format!("Connected to {}", settings.dialect()),
        SqlDatabase::connect(&settings),
    )
    .await?;

    check(&database).await
}

/// Query `database` for its version, then close it whether or not that worked.
pub async fn check<D: Database + ?Sized>(database: &D) -> Result<()> {
    let result = report(database).await;
    database.close().await;
    output::note("Connection closed");
    result
}

async fn report<D: Database + ?Sized>(database: &D) -> Result<()> {
    let info = database.server_info().await?;
    output::success("Connection successful!");
    output::field("Test query", info.test);
    output::field("Version", &info.version);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dialect;
    use crate::testkit::todo::MemoryTodos;

    #[tokio::test]
    async fn check_closes_the_connection() {
        let database = MemoryTodos::new(Dialect::MySql);
        check(&database).await.unwrap();
        assert!(database.is_closed());
    }

    #[tokio::test]
    async fn failed_check_still_closes() {
        let database = MemoryTodos::new(Dialect::PostgreSql);
        database.close().await;
        assert!(check(&database).await.is_err());
        assert!(database.is_closed());
    }
}
