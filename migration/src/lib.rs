pub use sea_orm_migration::prelude::*;

mod m20251101_000001_create_base_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20251101_000001_create_base_tables::Migration)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::{ConnectionTrait, Database, DbBackend, Statement};

    #[tokio::test]
    async fn up_creates_every_table_and_is_repeatable() -> Result<(), DbErr> {
        let db = Database::connect("sqlite::memory:").await?;

        Migrator::up(&db, None).await?;

        for table in ["users", "tasks", "notebooks", "pages"] {
            let row = db
                .query_one(Statement::from_sql_and_values(
                    DbBackend::Sqlite,
                    "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
                    [table.into()],
                ))
                .await?;
            assert!(row.is_some(), "missing table {table}");
        }

        // Already applied, so this is a no-op rather than an error
        Migrator::up(&db, None).await?;
        Ok(())
    }

    #[tokio::test]
    async fn down_drops_the_tables() -> Result<(), DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        Migrator::up(&db, None).await?;

        Migrator::down(&db, None).await?;

        let row = db
            .query_one(Statement::from_string(
                DbBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'tasks'",
            ))
            .await?;
        assert!(row.is_none());
        Ok(())
    }
}
