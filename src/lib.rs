//! Room planner persistence and access layers over the `scene` engine.
//!
//! | module | role |
//! |---|---|
//! | `access` | identity, ownership and visibility checks in front of storage |
//! | `adapter` | scene ⇄ `designData` JSON |
//! | `config` | environment configuration |
//! | `db` | Postgres pool and migrations |
//! | `document` | stored document types |
//! | `error` | `DesignError` and the `ErrorCode` trait |
//! | `persistence` | editing sessions and the save lifecycle |
//! | `store` | `DesignStore` backends |

pub mod access;
pub mod adapter;
pub mod config;
pub mod db;
pub mod document;
pub mod error;
pub mod persistence;
pub mod store;

pub use error::{DesignError, ErrorCode};
