//! Line-framed JSON bridge for out-of-process hosts.
//!
//! Each request line carries a correlation id, the raw credentials mapping,
//! and an operation. Every message a tool emits is written back as its own
//! reply line with the same id, followed by a terminator reply: `done` on
//! completion or `failed` when the operation itself could not run.

use crate::validate::CredentialValidator;
use crate::Tool;
use lenz_core::message::{MessageSink, ToolMessage};
use lenz_core::params::Credentials;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, Write};
use thiserror::Error;

/// Errors that abort the serve loop.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to read request from host: {0}")]
    ReadError(std::io::Error),
    #[error("failed to write reply to host: {0}")]
    WriteError(std::io::Error),
    #[error("failed to encode reply: {0}")]
    EncodeError(serde_json::Error),
}

/// Request sent by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Correlation id echoed on every reply.
    pub id: u64,
    /// Raw credentials mapping; decoded leniently per operation.
    #[serde(default)]
    pub credentials: Value,
    /// The operation to run.
    pub operation: Operation,
}

/// Operations the host can request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "snake_case")]
pub enum Operation {
    /// Check the supplied access key against the live API.
    ValidateCredentials,
    /// Run a tool by name with its parameter mapping.
    InvokeTool {
        name: String,
        #[serde(default)]
        tool_parameters: Value,
    },
}

/// One reply line written back to the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationReply {
    /// Correlation id of the request this reply answers.
    pub id: u64,
    /// What happened.
    pub event: InvocationEvent,
}

/// Reply payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvocationEvent {
    /// One message from the tool's output stream.
    Message { message: ToolMessage },
    /// The operation finished; no further replies carry this id.
    Done,
    /// The operation could not run.
    Failed { error: String },
}

/// Serves tool invocations over a reader/writer pair (stdin and stdout in
/// production).
pub struct StdioBridge {
    validator: CredentialValidator,
    tools: Vec<Box<dyn Tool>>,
}

impl StdioBridge {
    pub fn new(validator: CredentialValidator, tools: Vec<Box<dyn Tool>>) -> Self {
        Self { validator, tools }
    }

    /// Reads requests until EOF. Returns when the host closes the pipe or a
    /// reply can no longer be written.
    pub async fn serve<R, W>(&self, reader: R, writer: &mut W) -> Result<(), BridgeError>
    where
        R: BufRead,
        W: Write + Send,
    {
        for line in reader.lines() {
            let line = line.map_err(BridgeError::ReadError)?;
            if line.trim().is_empty() {
                continue;
            }

            let request: InvocationRequest = match serde_json::from_str(&line) {
                Ok(request) => request,
                Err(err) => {
                    // An unparseable line has no usable id; the failure
                    // reply carries id 0.
                    tracing::warn!(error = %err, "discarding malformed request line");
                    write_reply(
                        writer,
                        &InvocationReply {
                            id: 0,
                            event: InvocationEvent::Failed {
                                error: format!("malformed request: {err}"),
                            },
                        },
                    )?;
                    continue;
                }
            };

            self.handle(request, writer).await?;
        }
        Ok(())
    }

    async fn handle<W>(
        &self,
        request: InvocationRequest,
        writer: &mut W,
    ) -> Result<(), BridgeError>
    where
        W: Write + Send,
    {
        let credentials = Credentials::from_value(&request.credentials);

        match request.operation {
            Operation::ValidateCredentials => {
                let event = match self.validator.validate(&credentials).await {
                    Ok(()) => InvocationEvent::Done,
                    Err(err) => InvocationEvent::Failed {
                        error: err.validation_message(),
                    },
                };
                write_reply(
                    writer,
                    &InvocationReply {
                        id: request.id,
                        event,
                    },
                )
            }
            Operation::InvokeTool {
                name,
                tool_parameters,
            } => {
                let Some(tool) = self.find_tool(&name) else {
                    return write_reply(
                        writer,
                        &InvocationReply {
                            id: request.id,
                            event: InvocationEvent::Failed {
                                error: format!("unknown tool: {name}"),
                            },
                        },
                    );
                };

                let failure = {
                    let mut sink = ReplySink {
                        id: request.id,
                        writer: &mut *writer,
                        failure: None,
                    };
                    tool.invoke(&tool_parameters, &credentials, &mut sink).await;
                    sink.failure
                };
                if let Some(err) = failure {
                    return Err(err);
                }

                write_reply(
                    writer,
                    &InvocationReply {
                        id: request.id,
                        event: InvocationEvent::Done,
                    },
                )
            }
        }
    }

    fn find_tool(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(|tool| tool.as_ref())
    }
}

/// Writes each emitted message as a reply line. A write failure is held
/// until the invocation returns; later emissions are dropped.
struct ReplySink<'a, W> {
    id: u64,
    writer: &'a mut W,
    failure: Option<BridgeError>,
}

impl<W: Write> MessageSink for ReplySink<'_, W> {
    fn emit(&mut self, message: ToolMessage) {
        if self.failure.is_some() {
            return;
        }
        let reply = InvocationReply {
            id: self.id,
            event: InvocationEvent::Message { message },
        };
        if let Err(err) = write_reply(self.writer, &reply) {
            self.failure = Some(err);
        }
    }
}

fn write_reply<W: Write>(writer: &mut W, reply: &InvocationReply) -> Result<(), BridgeError> {
    let json = serde_json::to_string(reply).map_err(BridgeError::EncodeError)?;
    writeln!(writer, "{json}").map_err(BridgeError::WriteError)?;
    writer.flush().map_err(BridgeError::WriteError)
}
