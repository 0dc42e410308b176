//! Shared `PostgreSQL` plumbing for Diesel-backed adapters.
//!
//! Diesel connections are synchronous, so every adapter offloads its work to
//! [`tokio::task::spawn_blocking`] through [`run_blocking`].

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};

/// `PostgreSQL` connection pool type used by all adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Pooled connection handed to blocking closures.
pub type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`PoolError`] when the pool cannot establish its initial
/// connections.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size).build(manager)
}

/// Checks out a connection and runs `f` on the blocking thread pool.
///
/// Pool checkout failures and join errors are mapped into the caller's
/// error type with `map_pool_err` and `map_join_err`.
pub(crate) async fn run_blocking<F, T, E>(
    pool: &PgPool,
    f: F,
    map_pool_err: fn(PoolError) -> E,
    map_join_err: fn(tokio::task::JoinError) -> E,
) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(map_pool_err)?;
        f(&mut connection)
    })
    .await
    .map_err(map_join_err)?
}
