mod client;
pub mod types;

pub use client::{DocsApi, KdocsClient};
pub use types::*;
