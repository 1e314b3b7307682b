//! Lifecycle events of a peer-networking node and their log categories.
//!
//! # Categories
//! ```text
//! start | stop | failed
//! ras.discovered
//! las.{declared,undeclared}
//! connector.{started,stopped}
//! connector.session.{new,connected,idSpecified,failed,joined,closed}
//! acceptor.{started,stopped,failed}
//! acceptor.session.{new,idSpecified,failed,joined,closed}
//! link.remote.{joinedByConnect,joinedByAccept,closed,failed}
//! link.local.id
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::Level;

/// A log category: its path segments and the dot-joined name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub segments: &'static [&'static str],
    pub name: &'static str,
}

macro_rules! category {
    ($first:literal $(, $rest:literal)*) => {
        Category {
            segments: &[$first $(, $rest)*],
            name: concat!($first $(, ".", $rest)*),
        }
    };
}

/// Outcome of an asynchronous lookup (remote address, local link id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Resolution {
    Resolved(String),
    Failed(String),
    Cancelled,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// A lifecycle notification from the node.
///
/// Link ids are hex strings, addresses are transport address strings and
/// `session` is the per-kind session counter assigned by the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NodeEvent {
    Start,
    Stop,
    Failed { error: String },

    Discovered { link_id: String, address: String },
    Declared { address: String },
    Undeclared { address: String },

    ConnectorStarted { address: String },
    ConnectorStopped { address: String },
    ConnectorSessionNew { session: u64, link_id: String, address: String },
    ConnectorSessionConnected { session: u64 },
    ConnectorSessionIdSpecified { session: u64, link_id: String },
    ConnectorSessionFailed { session: u64, error: String },
    ConnectorSessionJoined { session: u64 },
    ConnectorSessionClosed { session: u64 },

    AcceptorStarted {
        address: String,
        #[serde(default)]
        bound_address: String,
    },
    AcceptorStopped {
        address: String,
        #[serde(default)]
        bound_address: String,
    },
    AcceptorFailed {
        address: String,
        #[serde(default)]
        bound_address: String,
        error: String,
    },
    AcceptorSessionNew { session: u64, address: Resolution },
    AcceptorSessionIdSpecified { session: u64, link_id: String },
    AcceptorSessionFailed { session: u64, error: String },
    AcceptorSessionJoined { session: u64 },
    AcceptorSessionClosed { session: u64 },

    RemoteJoinedByConnect { link_id: String, address: Resolution },
    RemoteJoinedByAccept { link_id: String, address: Resolution },
    RemoteClosed { link_id: String },
    RemoteFailed { link_id: String, error: String },
    LocalLinkId { link_id: Resolution },
}

impl NodeEvent {
    /// The category this event is gated under.
    pub fn category(&self) -> Category {
        use NodeEvent::*;
        match self {
            Start => category!("start"),
            Stop => category!("stop"),
            Failed { .. } => category!("failed"),

            Discovered { .. } => category!("ras", "discovered"),
            Declared { .. } => category!("las", "declared"),
            Undeclared { .. } => category!("las", "undeclared"),

            ConnectorStarted { .. } => category!("connector", "started"),
            ConnectorStopped { .. } => category!("connector", "stopped"),
            ConnectorSessionNew { .. } => category!("connector", "session", "new"),
            ConnectorSessionConnected { .. } => category!("connector", "session", "connected"),
            ConnectorSessionIdSpecified { .. } => category!("connector", "session", "idSpecified"),
            ConnectorSessionFailed { .. } => category!("connector", "session", "failed"),
            ConnectorSessionJoined { .. } => category!("connector", "session", "joined"),
            ConnectorSessionClosed { .. } => category!("connector", "session", "closed"),

            AcceptorStarted { .. } => category!("acceptor", "started"),
            AcceptorStopped { .. } => category!("acceptor", "stopped"),
            AcceptorFailed { .. } => category!("acceptor", "failed"),
            AcceptorSessionNew { .. } => category!("acceptor", "session", "new"),
            AcceptorSessionIdSpecified { .. } => category!("acceptor", "session", "idSpecified"),
            AcceptorSessionFailed { .. } => category!("acceptor", "session", "failed"),
            AcceptorSessionJoined { .. } => category!("acceptor", "session", "joined"),
            AcceptorSessionClosed { .. } => category!("acceptor", "session", "closed"),

            RemoteJoinedByConnect { .. } => category!("link", "remote", "joinedByConnect"),
            RemoteJoinedByAccept { .. } => category!("link", "remote", "joinedByAccept"),
            RemoteClosed { .. } => category!("link", "remote", "closed"),
            RemoteFailed { .. } => category!("link", "remote", "failed"),
            LocalLinkId { .. } => category!("link", "local", "id"),
        }
    }

    /// Severity of the rendered line.
    pub fn level(&self) -> Level {
        match self {
            NodeEvent::LocalLinkId { link_id } if !link_id.is_resolved() => Level::WARN,
            NodeEvent::AcceptorSessionNew { address, .. } if !address.is_resolved() => Level::WARN,
            _ => Level::INFO,
        }
    }
}

/// Render an acceptor's requested and bound addresses as one string.
pub fn describe_addresses(requested: &str, bound: &str) -> String {
    if !requested.is_empty() && !bound.is_empty() {
        if requested == bound {
            return requested.to_string();
        }
        return format!("{requested} ({bound})");
    }
    format!("{requested}{bound}")
}

fn write_remote_joined(
    f: &mut fmt::Formatter<'_>,
    how: &str,
    link_id: &str,
    address: &Resolution,
) -> fmt::Result {
    write!(f, "remote {how}: {link_id}, ")?;
    match address {
        Resolution::Resolved(a) => write!(f, "address: {a}"),
        Resolution::Failed(e) => write!(f, "address obtaining failed: {e}"),
        Resolution::Cancelled => f.write_str("address obtaining cancelled"),
    }
}

impl fmt::Display for NodeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use NodeEvent::*;
        match self {
            Start => f.write_str("start"),
            Stop => f.write_str("stop"),
            Failed { error } => write!(f, "failed: {error}"),

            Discovered { link_id, address } => write!(f, "discovered: {link_id}, {address}"),
            Declared { address } => write!(f, "declared: {address}"),
            Undeclared { address } => write!(f, "undeclared: {address}"),

            ConnectorStarted { address } => write!(f, "connectorStarted: {address}"),
            ConnectorStopped { address } => write!(f, "connectorStopped: {address}"),
            ConnectorSessionNew { session, link_id, address } => {
                write!(f, "new csession {session}, id: {link_id}, address: {address}")
            }
            ConnectorSessionConnected { session } => write!(f, "csession {session} connected"),
            ConnectorSessionIdSpecified { session, link_id } => {
                write!(f, "csession {session} idSpecified: {link_id}")
            }
            ConnectorSessionFailed { session, error } => write!(f, "csession {session} failed: {error}"),
            ConnectorSessionJoined { session } => write!(f, "csession {session} joined"),
            ConnectorSessionClosed { session } => write!(f, "csession {session} closed"),

            AcceptorStarted { address, bound_address } => {
                write!(f, "acceptorStarted: {}", describe_addresses(address, bound_address))
            }
            AcceptorStopped { address, bound_address } => {
                write!(f, "acceptorStopped: {}", describe_addresses(address, bound_address))
            }
            AcceptorFailed { address, bound_address, error } => write!(
                f,
                "acceptorFailed: {}, {error}",
                describe_addresses(address, bound_address)
            ),
            AcceptorSessionNew { session, address } => match address {
                Resolution::Resolved(a) => write!(f, "new asession {session}, address: {a}"),
                Resolution::Failed(e) => {
                    write!(f, "new asession {session}, address obtaining failed: {e}")
                }
                Resolution::Cancelled => {
                    write!(f, "new asession {session}, address obtaining cancelled")
                }
            },
            AcceptorSessionIdSpecified { session, link_id } => {
                write!(f, "asession {session} idSpecified: {link_id}")
            }
            AcceptorSessionFailed { session, error } => write!(f, "asession {session} failed: {error}"),
            AcceptorSessionJoined { session } => write!(f, "asession {session} joined"),
            AcceptorSessionClosed { session } => write!(f, "asession {session} closed"),

            RemoteJoinedByConnect { link_id, address } => {
                write_remote_joined(f, "joinedByConnect", link_id, address)
            }
            RemoteJoinedByAccept { link_id, address } => {
                write_remote_joined(f, "joinedByAccept", link_id, address)
            }
            RemoteClosed { link_id } => write!(f, "remote closed: {link_id}"),
            RemoteFailed { link_id, error } => write!(f, "remote failed: {link_id}, {error}"),
            LocalLinkId { link_id } => match link_id {
                Resolution::Resolved(id) => write!(f, "local link id: {id}"),
                Resolution::Failed(e) => write!(f, "local link id obtaining failed: {e}"),
                Resolution::Cancelled => f.write_str("local link id obtaining cancelled"),
            },
        }
    }
}
