// Domain-driven module structure for pulse, a log pattern miner.

// Core
pub mod mine;

// Infrastructure
pub mod conf;
pub mod runtime;
