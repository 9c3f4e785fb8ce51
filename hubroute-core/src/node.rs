//! Graph nodes: hubs (depots and branches) and the clients they serve.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The role a node plays in the network.
///
/// Depots and branches are both hubs and take part in route edges. Clients
/// never carry route edges; they are reached through a branch that serves
/// them.
///
/// # Examples
/// ```
/// use hubroute_core::NodeKind;
///
/// assert!(NodeKind::Depot.is_hub());
/// assert!(!NodeKind::Client.is_hub());
/// assert_eq!("branch".parse::<NodeKind>(), Ok(NodeKind::Branch));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum NodeKind {
    /// A hub that originates packages and owns vehicles.
    Depot,
    /// A hub that serves clients.
    Branch,
    /// A delivery endpoint served by one or more branches.
    Client,
}

impl NodeKind {
    /// Return `true` for the hub sub-kinds.
    #[must_use]
    pub const fn is_hub(self) -> bool {
        matches!(self, Self::Depot | Self::Branch)
    }

    /// Return the kind as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Depot => "depot",
            Self::Branch => "branch",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`NodeKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown node kind '{0}'")]
pub struct ParseNodeKindError(pub String);

impl FromStr for NodeKind {
    type Err = ParseNodeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "depot" => Ok(Self::Depot),
            "branch" => Ok(Self::Branch),
            "client" => Ok(Self::Client),
            _ => Err(ParseNodeKindError(s.to_owned())),
        }
    }
}

/// A node in the logistics network.
///
/// Identifiers are unique across hubs and clients.
///
/// # Examples
/// ```
/// use hubroute_core::{Node, NodeKind};
///
/// let depot = Node::depot("DEP_1", "Central depot", "Centro");
/// assert_eq!(depot.kind, NodeKind::Depot);
/// assert_eq!(depot.district.as_deref(), Some("Centro"));
///
/// let client = Node::client("CLI_1", "Corner shop");
/// assert!(client.district.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Globally unique identifier.
    pub id: String,
    /// Role of the node.
    pub kind: NodeKind,
    /// Human-readable name.
    pub name: String,
    /// District the hub sits in. Clients carry none.
    #[cfg_attr(feature = "serde", serde(default))]
    pub district: Option<String>,
}

impl Node {
    /// Construct a depot hub.
    pub fn depot(
        id: impl Into<String>,
        name: impl Into<String>,
        district: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Depot,
            name: name.into(),
            district: Some(district.into()),
        }
    }

    /// Construct a branch hub.
    pub fn branch(
        id: impl Into<String>,
        name: impl Into<String>,
        district: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Branch,
            name: name.into(),
            district: Some(district.into()),
        }
    }

    /// Construct a client node.
    pub fn client(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Client,
            name: name.into(),
            district: None,
        }
    }

    /// Return `true` when the node is a depot or a branch.
    #[must_use]
    pub const fn is_hub(&self) -> bool {
        self.kind.is_hub()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("depot", NodeKind::Depot)]
    #[case("Branch", NodeKind::Branch)]
    #[case("CLIENT", NodeKind::Client)]
    fn parses_kinds_case_insensitively(#[case] raw: &str, #[case] expected: NodeKind) {
        assert_eq!(raw.parse::<NodeKind>(), Ok(expected));
    }

    #[rstest]
    fn parsing_rejects_unknown_kind() {
        let err = "warehouse".parse::<NodeKind>().unwrap_err();
        assert!(err.to_string().contains("warehouse"));
    }

    #[rstest]
    fn display_matches_as_str() {
        assert_eq!(NodeKind::Branch.to_string(), NodeKind::Branch.as_str());
    }

    #[rstest]
    fn only_depots_and_branches_are_hubs() {
        assert!(Node::depot("D", "d", "x").is_hub());
        assert!(Node::branch("B", "b", "x").is_hub());
        assert!(!Node::client("C", "c").is_hub());
    }
}
