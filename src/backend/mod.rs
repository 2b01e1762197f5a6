pub mod client;
pub mod types;

pub use client::{AgentBackend, BackendError, HttpBackend};
pub use types::{DocumentMeta, NewAgent, UploadReceipt};
