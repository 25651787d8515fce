//! `PostgreSQL` adapters for capacity persistence.

pub mod models;
pub mod resource;
pub mod schema;
pub mod workload;

pub use resource::PostgresResourceRepository;
pub use workload::PostgresWorkloadRepository;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by capacity adapters.
pub type CapacityPgPool = Pool<ConnectionManager<PgConnection>>;
