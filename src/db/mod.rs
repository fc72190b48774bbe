pub mod connection;
pub mod dao;
pub mod entities;
pub mod memory;
pub mod providers;
pub mod repository;
pub mod timestamps;

pub use memory::InMemoryTodoStore;
pub use repository::{NewTodo, Todo, TodoChanges, TodoRepository};
