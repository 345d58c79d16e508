//! Domain primitives shared by the todo service crates.
//!
//! Nothing in here performs I/O: persistence lives in `todo-db` and the
//! HTTP surface in `todo-api`.

pub mod error;
pub mod todo;
pub mod types;
