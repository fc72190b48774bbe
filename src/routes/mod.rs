mod entry;
mod extract;
pub mod todos;

pub use entry::{API_PREFIX, app, router};
pub use extract::TodoId;
