//! Runtime module — process lifecycle: boot, ingestion, serve, shutdown.

pub mod boot;
pub mod ingest;
pub mod serve;
pub mod stop;
