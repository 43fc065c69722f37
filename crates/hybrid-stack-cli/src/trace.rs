//! Trace file format
//!
//! A trace is a JSON array of events in arrival order:
//!
//! ```json
//! [
//!   {"event": "action", "action": "push", "target": "home", "pageType": "native"},
//!   {"event": "embeddedClose", "target": "feed", "pageType": "embedded"},
//!   {"event": "nativeClose", "target": "detail", "pageType": "native", "popTo": true}
//! ]
//! ```

use anyhow::{Context, Result};
use hybrid_stack_core::{CloseCause, CloseNotice, Layer, Node, PageKind, StackResult, WireMessage};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Page named by a close notification
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedPage {
    /// Route of the closed page
    pub target: String,
    /// `native` or `embedded`
    pub page_type: String,
    /// Instance id; replay assigns one when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    /// Native close caused by a pop-to batch
    #[serde(default)]
    pub pop_to: bool,
}

impl ClosedPage {
    /// Decode into a node reported by `origin`
    pub fn to_node(&self, origin: Layer, fallback_id: &str) -> StackResult<Node> {
        let page_kind: PageKind = self.page_type.parse()?;
        let unique_id = self.unique_id.as_deref().unwrap_or(fallback_id);
        Ok(Node::new(self.target.clone(), unique_id, page_kind, origin))
    }

    /// Decode into a native close notice
    pub fn to_close_notice(&self, fallback_id: &str) -> StackResult<CloseNotice> {
        let cause = if self.pop_to {
            CloseCause::PopToBatch
        } else {
            CloseCause::Closed
        };
        Ok(CloseNotice::new(self.to_node(Layer::Native, fallback_id)?, cause))
    }
}

/// One recorded event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum TraceEvent {
    /// Stack action from either runtime
    Action(WireMessage),
    /// An embedded page's view was torn down
    EmbeddedClose(ClosedPage),
    /// A native container was destroyed
    NativeClose(ClosedPage),
}

/// Parse a trace from JSON text
pub fn parse_trace(text: &str) -> Result<Vec<TraceEvent>> {
    serde_json::from_str(text).context("trace is not a JSON array of events")
}

/// Load a trace file
pub fn load_trace(path: &Path) -> Result<Vec<TraceEvent>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read trace {}", path.display()))?;
    parse_trace(&text)
}
