//! Wire types for the hostbridge protocol.
//!
//! Messages are plain serde structs: declared field order is the wire field
//! order, and names are camelCase on the wire. The remote runtime only ever
//! sees these records, never the native objects they describe.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Remote call forwarded from a native callback invocation.
///
/// Object-typed parameters travel as registry identifiers in `param_ids`;
/// everything else rides in `args` as plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallMessage {
    /// Method name on the remote side (e.g. `"onShowFileChooser"`).
    pub method: String,
    /// Identifier of the callback-source instance.
    pub self_id: u64,
    /// Identifiers of object-typed parameters, in declaration order.
    pub param_ids: Vec<u64>,
    /// Non-object arguments, in declaration order.
    pub args: Vec<Value>,
}

/// Notification that a native instance was released and the remote side may
/// drop its state for the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisposeMessage {
    pub identifier: u64,
}

/// Discriminated union of outbound messages.
///
/// Untagged: a call carries `method`, a dispose carries only `identifier`,
/// so structure alone discriminates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutboundMessage {
    Call(CallMessage),
    Dispose(DisposeMessage),
}

impl OutboundMessage {
    /// Returns the call payload if this is a forwarded call.
    pub fn as_call(&self) -> Option<&CallMessage> {
        match self {
            OutboundMessage::Call(call) => Some(call),
            OutboundMessage::Dispose(_) => None,
        }
    }

    /// Returns the dispose payload if this is a dispose notification.
    pub fn as_dispose(&self) -> Option<&DisposeMessage> {
        match self {
            OutboundMessage::Call(_) => None,
            OutboundMessage::Dispose(dispose) => Some(dispose),
        }
    }
}

/// Reply from the remote runtime.
///
/// Variant order matters for untagged deserialization: `Void` claims JSON
/// `null`, `Values` claims arrays, `Value` claims the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplyMessage {
    /// No payload; serialized as JSON `null`.
    Void,
    /// Ordered sequence payload.
    Values(Vec<Value>),
    /// Single-value payload.
    Value(Value),
}

impl ReplyMessage {
    pub fn is_void(&self) -> bool {
        matches!(self, ReplyMessage::Void)
    }

    /// Flattens the reply into an ordered value sequence.
    ///
    /// `Void` yields an empty sequence, a single value yields a sequence of
    /// one; existing order is preserved.
    pub fn into_values(self) -> Vec<Value> {
        match self {
            ReplyMessage::Void => Vec::new(),
            ReplyMessage::Values(values) => values,
            ReplyMessage::Value(value) => vec![value],
        }
    }

    /// Flattens the reply into an ordered string sequence.
    ///
    /// Returns `None` when any element is not a string; a partially usable
    /// sequence would break the caller's index correspondence.
    pub fn into_string_values(self) -> Option<Vec<String>> {
        self.into_values()
            .into_iter()
            .map(|value| match value {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect()
    }
}
