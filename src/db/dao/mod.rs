pub mod base;
pub mod base_traits;
pub mod error;
pub mod todo_dao;

pub use base::DaoBase;
pub use base_traits::{HasOrderingColumns, TimestampedActiveModel};
pub use error::{DaoLayerError, DaoResult};
pub use todo_dao::TodoDao;
