//! Versioned schema bootstrap.
//!
//! The applied version lives in `v0.version`. Migration `N` runs only when the
//! recorded version is below `N`, and inside the same transaction that records
//! `N`, so a failed migration leaves the previous version intact.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};
use tracing::info;

use super::schema::version;
use crate::storage::StorageError;

pub const SCHEMA: &str = "v0";
const VERSION_TABLE: &str = "version";

/// Ordered migrations, index `i` brings the schema to version `i + 1`.
pub const MIGRATIONS: &[&str] = &[
    "CREATE SCHEMA v0;
     CREATE TABLE v0.version (
         value INTEGER PRIMARY KEY
     );
     INSERT INTO v0.version (value) VALUES (1);",
    "CREATE TABLE v0.targets (
         id SERIAL PRIMARY KEY,
         name TEXT NOT NULL
     );",
];

/// Version the code expects once all migrations ran.
pub fn latest_version() -> i32 {
    i32::try_from(MIGRATIONS.len()).unwrap_or(i32::MAX)
}

#[derive(QueryableByName)]
struct TableCount {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

/// Recorded schema version, `0` when the version table does not exist yet.
pub fn current_version(conn: &mut PgConnection) -> QueryResult<i32> {
    let tables = sql_query(
        "SELECT COUNT(*) AS count FROM information_schema.tables \
         WHERE table_schema = $1 AND table_name = $2",
    )
    .bind::<Text, _>(SCHEMA)
    .bind::<Text, _>(VERSION_TABLE)
    .get_result::<TableCount>(conn)?;

    if tables.count == 0 {
        return Ok(0);
    }

    version::table.select(version::value).first(conn)
}

/// Applies every pending migration, returning the resulting version.
pub fn run(conn: &mut PgConnection) -> Result<i32, StorageError> {
    let current = current_version(conn)?;

    for (target_version, migration) in (1..).zip(MIGRATIONS) {
        if target_version <= current {
            continue;
        }

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            conn.batch_execute(migration)?;
            diesel::update(version::table).set(version::value.eq(target_version)).execute(conn)?;
            Ok(())
        })
        .map_err(|source| StorageError::migration(target_version, source))?;

        info!(version = target_version, "applied schema migration");
    }

    Ok(current.max(latest_version()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_migration_creates_version_table() {
        assert!(MIGRATIONS[0].contains("CREATE SCHEMA v0"));
        assert!(MIGRATIONS[0].contains("CREATE TABLE v0.version"));
        assert!(MIGRATIONS[0].contains("INSERT INTO v0.version (value) VALUES (1)"));
    }

    #[test]
    fn targets_table_comes_after_version_table() {
        let position = MIGRATIONS.iter().position(|migration| migration.contains("CREATE TABLE v0.targets"));
        assert_eq!(position, Some(1));
        assert_eq!(latest_version(), 2);
    }
}
