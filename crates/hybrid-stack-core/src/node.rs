//! Stack entries
//!
//! A [`Node`] is one screen in the combined stack. Nodes are values: the
//! store owns them once appended, and everything else works with clones or
//! shared references.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::StackError;

/// Opaque payload forwarded to consumers untouched
pub type Params = serde_json::Map<String, serde_json::Value>;

/// Which runtime renders a page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Rendered by the host shell; owns its own container
    Native,
    /// Rendered by the guest engine inside a native container
    Embedded,
}

impl PageKind {
    /// Wire label for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Native => "native",
            PageKind::Embedded => "embedded",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native" | "Native" => Ok(PageKind::Native),
            "embedded" | "Embedded" => Ok(PageKind::Embedded),
            other => Err(StackError::UnknownPageKind {
                value: other.to_string(),
            }),
        }
    }
}

/// Layer an action originated from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Host shell
    #[default]
    Native,
    /// Guest engine
    Embedded,
}

impl Layer {
    /// Map the wire-level `fromEmbedded` flag
    pub fn from_embedded_flag(from_embedded: bool) -> Self {
        if from_embedded {
            Layer::Embedded
        } else {
            Layer::Native
        }
    }

    /// True for the embedded layer
    pub fn is_embedded(&self) -> bool {
        matches!(self, Layer::Embedded)
    }
}

/// Handle to a native container hosting an embedded page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerRef(pub u64);

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container#{}", self.0)
    }
}

/// One entry of the combined navigation stack
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    route: String,
    unique_id: String,
    page_kind: PageKind,
    origin: Layer,
    #[serde(default)]
    params: Params,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    container: Option<ContainerRef>,
}

impl Node {
    /// Create a node with no parameters and no bound container
    pub fn new(
        route: impl Into<String>,
        unique_id: impl Into<String>,
        page_kind: PageKind,
        origin: Layer,
    ) -> Self {
        Self {
            route: route.into(),
            unique_id: unique_id.into(),
            page_kind,
            origin,
            params: Params::new(),
            container: None,
        }
    }

    /// Attach a parameter payload
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Logical route; not unique within a stack
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Caller-assigned instance id
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Runtime that renders this node
    pub fn page_kind(&self) -> PageKind {
        self.page_kind
    }

    /// Layer the producing action came from
    pub fn origin(&self) -> Layer {
        self.origin
    }

    /// Opaque payload forwarded to the dispatcher
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Native container hosting an embedded node, once bound
    pub fn container(&self) -> Option<ContainerRef> {
        self.container
    }

    /// True when the embedded runtime renders this node
    pub fn is_embedded(&self) -> bool {
        self.page_kind == PageKind::Embedded
    }

    /// True for native screens announced by the embedded layer.
    ///
    /// Those screens register themselves when their container starts, so
    /// recording the announcement as well would double the entry.
    pub fn is_embedded_announced_native(&self) -> bool {
        self.origin.is_embedded() && self.page_kind == PageKind::Native
    }

    pub(crate) fn set_route(&mut self, route: impl Into<String>) {
        self.route = route.into();
    }

    pub(crate) fn set_page_kind(&mut self, page_kind: PageKind) {
        self.page_kind = page_kind;
        if page_kind == PageKind::Native {
            self.container = None;
        }
    }

    /// Bind the hosting container. Native nodes never carry one.
    pub(crate) fn bind_container(&mut self, container: Option<ContainerRef>) -> bool {
        if self.page_kind != PageKind::Embedded {
            return false;
        }
        self.container = container;
        true
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}--{}", self.page_kind, self.route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_announced_native_is_detected() {
        let node = Node::new("settings", "1", PageKind::Native, Layer::Embedded);
        assert!(node.is_embedded_announced_native());

        let node = Node::new("settings", "1", PageKind::Native, Layer::Native);
        assert!(!node.is_embedded_announced_native());

        let node = Node::new("feed", "1", PageKind::Embedded, Layer::Embedded);
        assert!(!node.is_embedded_announced_native());
    }

    #[test]
    fn native_nodes_refuse_containers() {
        let mut node = Node::new("settings", "1", PageKind::Native, Layer::Native);
        assert!(!node.bind_container(Some(ContainerRef(7))));
        assert_eq!(node.container(), None);

        let mut node = Node::new("feed", "2", PageKind::Embedded, Layer::Native);
        assert!(node.bind_container(Some(ContainerRef(7))));
        assert_eq!(node.container(), Some(ContainerRef(7)));
    }

    #[test]
    fn switching_to_native_drops_container() {
        let mut node = Node::new("feed", "2", PageKind::Embedded, Layer::Native);
        node.bind_container(Some(ContainerRef(3)));
        node.set_page_kind(PageKind::Native);
        assert_eq!(node.container(), None);
    }

    #[test]
    fn page_kind_parses_wire_labels() {
        assert_eq!("native".parse::<PageKind>().ok(), Some(PageKind::Native));
        assert_eq!("Embedded".parse::<PageKind>().ok(), Some(PageKind::Embedded));
        assert!("webview".parse::<PageKind>().is_err());
    }
}
