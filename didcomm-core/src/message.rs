// didcomm-core/src/message.rs
// DIDComm plaintext message envelope (application/didcomm-plain+json).
// Plaintext only: encryption, signing and key agreement live outside
// this crate.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{DidcommError, Result};
use crate::log_trace;

/// Media type of the plaintext envelope
pub const PLAINTEXT_TYP: &str = "application/didcomm-plain+json";

/// Text served by the smoke-test entry point of the FFI layer
pub const GREETING: &str = "Hello from the DIDComm native module!";

/// Message type URI used for the greeting message
const HELLO_TYPE: &str = "https://didcomm.org/basicmessage/2.0/message";

/// A DIDComm plaintext message
///
/// Field names follow the envelope wire format: `typ` is the envelope
/// media type (always [`PLAINTEXT_TYP`]), `type` is the protocol message
/// type URI. `from`, `to` and `created_time` are optional and omitted
/// from the serialized form when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaintextMessage {
    pub id: String,
    pub typ: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Vec<String>>,
    /// Unix timestamp (seconds) of message creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<i64>,
    pub body: Value,
}

impl PlaintextMessage {
    /// Create a new message with a fresh id and the current timestamp
    pub fn new(message_type: &str, body: Value) -> Self {
        PlaintextMessage {
            id: Uuid::new_v4().to_string(),
            typ: PLAINTEXT_TYP.to_string(),
            type_: message_type.to_string(),
            from: None,
            to: None,
            created_time: Some(Utc::now().timestamp()),
            body,
        }
    }

    /// The greeting message backing the smoke-test entry point
    pub fn hello() -> Self {
        Self::new(HELLO_TYPE, json!({ "content": GREETING }))
    }

    /// Serialize to compact JSON after validating the envelope
    pub fn pack(&self) -> Result<String> {
        self.validate()?;
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a plaintext envelope
    pub fn unpack(raw: &str) -> Result<Self> {
        let message: PlaintextMessage = serde_json::from_str(raw)?;
        message.validate()?;
        log_trace!("unpacked message {} ({})", message.id, message.type_);
        Ok(message)
    }

    fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(DidcommError::InvalidMessage(
                "message id is empty".to_string(),
            ));
        }
        if self.type_.is_empty() {
            return Err(DidcommError::InvalidMessage(
                "message type is empty".to_string(),
            ));
        }
        if self.typ != PLAINTEXT_TYP {
            return Err(DidcommError::InvalidMessage(format!(
                "unsupported envelope media type '{}'",
                self.typ
            )));
        }
        Ok(())
    }
}
