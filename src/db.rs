//! Connection pool construction for the SQLite-backed store.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, PooledConnection};
use diesel::sqlite::SqliteConnection;

/// Shared r2d2 pool over SQLite connections.
pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
/// A single checked-out pool connection.
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Pragmas applied to every connection handed out by the pool.
///
/// WAL plus a busy timeout lets concurrent cart writers block briefly on the
/// write lock instead of failing; `foreign_keys` makes the order -> item
/// cascade effective.
#[derive(Debug)]
struct ConnectionPragmas;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(
            "PRAGMA journal_mode = WAL; \
             PRAGMA busy_timeout = 5000; \
             PRAGMA foreign_keys = ON;",
        )
        .map_err(r2d2::Error::QueryError)
    }
}

/// Build a connection pool for `database_url`.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, r2d2::PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    r2d2::Pool::builder()
        .connection_customizer(Box::new(ConnectionPragmas))
        .build(manager)
}
