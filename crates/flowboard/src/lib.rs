#![forbid(unsafe_code)]

//! `flowboard` is the headless core of a visual flow builder.
//!
//! Nodes are typed (trigger, send-message, business hours, connector, comment) and linked only
//! by parent pointers. The crate keeps them in a [`NodeRepository`], derives the edges, lays the
//! graph out with [`flowboard_layout`] and keeps positions consistent across drags and
//! structural edits. A [`Flow`] session is the entry point for a presentation layer: it takes
//! UI events, notifies subscribers and produces the `{nodes, edges}` [`RenderInput`].

pub mod config;
pub mod error;
pub mod events;
pub mod flow;
pub mod model;
pub mod render;
pub mod repository;
pub mod seed;
pub mod sync;

pub use config::FlowConfig;
pub use error::{Error, Result};
pub use events::{ChangeEvent, StructuralCause, SubscriptionId};
pub use flow::Flow;
pub use flowboard_layout::{LayoutOptions, Point, RankDir};
pub use model::{Edge, Node, NodeData, NodeId, NodeKind};
pub use render::{RenderInput, RenderNode};
pub use repository::{NodePatch, NodeRepository};
pub use seed::seed_nodes;
pub use sync::{LayoutPolicy, PositionSync};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
