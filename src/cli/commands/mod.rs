pub mod cache;
mod config;
mod query;
mod session;

pub use self::config::config;
pub use self::query::{answer, query, Route};
pub use self::session::{login, logout};
