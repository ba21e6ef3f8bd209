pub mod convert;
mod error;
mod repository;
mod service;
mod sqlite;
mod temporal;

#[cfg(feature = "http")]
pub mod http;

pub use error::{ConvertError, RepositoryError};
pub use repository::Repository;
pub use service::TemporalService;
pub use sqlite::SqliteRepository;
pub use temporal::Temporal;
