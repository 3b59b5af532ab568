//! Tool operations exposed to the host workflow engine.
//!
//! Each tool decodes its own parameters from the host's loose JSON mapping,
//! talks to the Unsplash API through [`unsplash_provider::UnsplashClient`],
//! and reports everything (results and failures alike) as an ordered stream
//! of [`lenz_core::message::ToolMessage`] values. [`stdio`] carries that
//! stream over a line-framed JSON protocol for out-of-process hosts.

mod fetch;
pub mod random;
pub mod search;
pub mod stdio;
pub mod validate;

pub use random::RandomTool;
pub use search::SearchTool;
pub use stdio::StdioBridge;
pub use validate::CredentialValidator;

use async_trait::async_trait;
use lenz_core::message::MessageSink;
use lenz_core::params::Credentials;
use serde_json::Value;

/// A host-invocable operation.
///
/// `invoke` never returns an error: parameter and upstream failures are part
/// of the message stream, so the host always receives a well-formed sequence
/// ending in the tool's output variables.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Stable identifier the host addresses this tool by.
    fn name(&self) -> &'static str;

    async fn invoke(
        &self,
        tool_parameters: &Value,
        credentials: &Credentials,
        sink: &mut (dyn MessageSink + Send),
    );
}
