//! Context domain: profile model, override merge, interactive completion, record store,
//! persistence, and the commands that drive them.
//! CLI consumes via [`ContextCommandService`]; the cluster domain only reads [`Context`].

pub mod commands;
pub mod completion;
pub mod merge;
pub mod overrides;
pub mod profile;
pub mod storage;
pub mod store;
pub mod version;

pub use commands::{
    ContextCommandService, ContextListEntry, ContextListResult, SetContextDeps,
    SetContextOutcome, SetContextRequest, SetContextResult,
};
pub use completion::{complete, DialoguerPrompter, Prompter};
pub use merge::merge;
pub use overrides::{split_servers, ContextOverrides, Override};
pub use profile::{Context, SaslConfig, SaslMechanism};
pub use storage::{ContextStorage, FileContextStorage};
pub use store::ConfigurationStore;
pub use version::{KafkaVersion, VersionParseError};
