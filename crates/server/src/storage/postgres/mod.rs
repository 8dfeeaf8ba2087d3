//! PostgreSQL storage using Diesel.
//!
//! Every call checks a connection out of an r2d2 pool on the blocking thread
//! pool, so concurrent requests never share a connection. All statements go
//! through the query builder and bind their values as parameters.

pub mod migrations;
mod schema;

use std::fmt;

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use tokio::task;
use tracing::{debug, info};

use super::{StorageError, Target, TargetStore};
use schema::targets;

type PgPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Queryable, Selectable)]
#[diesel(table_name = targets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct TargetRow {
    id: i32,
    name: String,
}

impl From<TargetRow> for Target {
    fn from(row: TargetRow) -> Self {
        Target::new(i64::from(row.id), row.name)
    }
}

/// Pool-backed [`TargetStore`] over the `v0` schema.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Builds the pool, failing when no connection can be established.
    pub async fn connect(database_url: &str, max_pool_size: u32) -> Result<Self, StorageError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = task::spawn_blocking(move || Pool::builder().max_size(max_pool_size).build(manager)).await??;

        info!(max_pool_size, "connected to the database");
        Ok(Self { pool })
    }

    /// Brings the schema up to date, see [`migrations`].
    pub async fn migrate(&self) -> Result<i32, StorageError> {
        self.with_conn(migrations::run).await
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, StorageError> + Send + 'static,
    {
        let pool = self.pool.clone();
        task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await?
    }
}

#[async_trait]
impl TargetStore for PostgresStore {
    async fn add(&self, name: &str) -> Result<i64, StorageError> {
        let name = name.to_owned();
        let id = self
            .with_conn(move |conn| {
                let id: i32 = diesel::insert_into(targets::table)
                    .values(targets::name.eq(&name))
                    .returning(targets::id)
                    .get_result(conn)?;
                Ok(id)
            })
            .await?;

        Ok(i64::from(id))
    }

    async fn list(&self) -> Result<Vec<Target>, StorageError> {
        self.with_conn(|conn| {
            let rows: Vec<TargetRow> = targets::table.select(TargetRow::as_select()).order(targets::id.asc()).load(conn)?;
            Ok(rows.into_iter().map(Target::from).collect())
        })
        .await
    }

    async fn delete(&self, id: i64) -> Result<bool, StorageError> {
        // ids are `serial`, anything outside i32 can not exist
        let Ok(id) = i32::try_from(id) else {
            debug!(id, "target id out of range, nothing to delete");
            return Ok(false);
        };

        let deleted = self
            .with_conn(move |conn| Ok(diesel::delete(targets::table.filter(targets::id.eq(id))).execute(conn)?))
            .await?;

        Ok(deleted > 0)
    }
}

impl fmt::Debug for PostgresStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.pool.state();
        f.debug_struct("PostgresStore")
            .field("connections", &state.connections)
            .field("idle_connections", &state.idle_connections)
            .finish()
    }
}
