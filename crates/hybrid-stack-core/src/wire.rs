//! Wire-format decoding
//!
//! Both runtimes exchange stack actions as loosely typed maps. Labels are
//! parsed into closed enums here so the engine never sees raw strings.

use serde::{Deserialize, Serialize};

use crate::action::{ActionKind, ActionRequest};
use crate::errors::{StackError, StackResult};
use crate::node::{Layer, Node, PageKind, Params};

/// Raw channel message as sent by either runtime
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMessage {
    /// Action label, e.g. `push` or `popToRoot`
    pub action: String,
    /// Route; empty for `popToRoot`
    #[serde(default)]
    pub target: String,
    /// Instance id; a v4 UUID is generated when missing or empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    /// `native` or `embedded`
    pub page_type: String,
    /// Opaque payload for the node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
    /// True when the embedded layer sent the message
    #[serde(default)]
    pub from_embedded: bool,
    /// Native close belonging to a pop-to batch
    #[serde(default)]
    pub pop_to: bool,
}

impl WireMessage {
    /// Decode a message from JSON text
    pub fn from_json(text: &str) -> StackResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Decode a message from an already-parsed JSON value
    pub fn from_value(value: serde_json::Value) -> StackResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Decode the node fields alone, ignoring the action label
    pub fn to_node(&self) -> StackResult<Node> {
        let page_kind: PageKind = self.page_type.parse()?;
        let unique_id = self
            .unique_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        Ok(Node::new(
            self.target.clone(),
            unique_id,
            page_kind,
            Layer::from_embedded_flag(self.from_embedded),
        )
        .with_params(self.params.clone().unwrap_or_default()))
    }
}

impl TryFrom<WireMessage> for ActionRequest {
    type Error = StackError;

    fn try_from(message: WireMessage) -> Result<Self, Self::Error> {
        let kind: ActionKind = message.action.parse()?;
        let node = message.to_node()?;
        let request = ActionRequest::new(kind, node);
        Ok(if message.pop_to {
            request.in_pop_to_batch()
        } else {
            request
        })
    }
}
