#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod clone;
pub mod config;
pub mod discovery;
pub mod runner;
pub mod summary;

pub use clone::{CloneDispatcher, CloneError, Cloner, GitCloner, DEFAULT_CLONE_TIMEOUT};
pub use config::{ConfigError, FilterMode, MirrorConfig};
pub use discovery::{
    discover_repositories, filter_by_owner, resolve_owner, DiscoveryError, GiteaClient,
    RepositoryDescriptor,
};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use summary::{CloneOutcome, CloneStatus, RunSummary};
