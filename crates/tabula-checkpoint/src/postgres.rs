use async_trait::async_trait;
use sqlx::{Connection, Executor, PgConnection, Row};

use tabula_core::{Error, Result};

use crate::client::DatabaseClient;

/// [`DatabaseClient`] over a dedicated sqlx Postgres connection.
///
/// The transaction envelope is driven with plain `BEGIN`/`COMMIT`/`ROLLBACK`
/// since the checkpoint owns the whole connection for the duration of a
/// reset.
pub struct PostgresClient {
    conn: PgConnection,
}

impl PostgresClient {
    pub fn new(conn: PgConnection) -> Self {
        Self { conn }
    }

    pub async fn connect(url: &str) -> Result<Self> {
        let conn = PgConnection::connect(url)
            .await
            .map_err(|err| Error::Connection(err.to_string()))?;
        Ok(Self { conn })
    }

    pub fn into_inner(self) -> PgConnection {
        self.conn
    }
}

#[async_trait]
impl DatabaseClient for PostgresClient {
    async fn query_rows(&mut self, sql: &str) -> Result<Vec<Vec<Option<String>>>> {
        let rows = sqlx::query(sql)
            .fetch_all(&mut self.conn)
            .await
            .map_err(|err| Error::Connection(err.to_string()))?;

        rows.iter()
            .map(|row| {
                (0..row.len())
                    .map(|i| {
                        row.try_get::<Option<String>, _>(i)
                            .map_err(|err| Error::Connection(err.to_string()))
                    })
                    .collect()
            })
            .collect()
    }

    async fn execute(&mut self, sql: &str) -> Result<u64> {
        let done = self
            .conn
            .execute(sql)
            .await
            .map_err(|err| Error::Connection(err.to_string()))?;
        Ok(done.rows_affected())
    }

    async fn begin(&mut self) -> Result<()> {
        self.execute("BEGIN").await.map(|_| ())
    }

    async fn commit(&mut self) -> Result<()> {
        self.execute("COMMIT").await.map(|_| ())
    }

    async fn rollback(&mut self) -> Result<()> {
        self.execute("ROLLBACK").await.map(|_| ())
    }
}
