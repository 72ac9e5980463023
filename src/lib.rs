//! # Overview
//!
//! This crate provides an implementation of the [Zhang–Shasha algorithm][zhang-shasha] for the
//! edit distance between two ordered trees, according to a user-defined measure for the cost of
//! inserting, deleting and renaming nodes. Besides the distance, it recovers the lowest cost edit
//! script that transforms one tree into the other, which can be replayed with [apply].
//!
//! Nodes are always referred to by handle, so trees may hold any number of equal nodes.
//!
//! [zhang-shasha]: https://doi.org/10.1137/0218082
//!
//! # Example
//!
//! ```rust
//! use zhang_shasha::*;
//! use serde_json::Value;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Json {
//!     Scalar(Value),
//!     Array,
//!     Object,
//!     Key(String),
//! }
//!
//! impl Node for Json {
//!     type Weight = u32;
//!
//!     fn cost(&self, operation: Operation, other: Option<&Self>) -> Self::Weight {
//!         match operation {
//!             Operation::Rename if other == Some(self) => 0,
//!             _ => 1,
//!         }
//!     }
//! }
//! #
//! # fn grow(arena: &mut Arena<Json>, parent: NodeId, value: &Value) {
//! #     let node = match value {
//! #         Value::Array(_) => Json::Array,
//! #         Value::Object(_) => Json::Object,
//! #         v => Json::Scalar(v.clone()),
//! #     };
//! #
//! #     let id = arena.push(parent, node);
//! #     children(arena, id, value);
//! # }
//! #
//! # fn children(arena: &mut Arena<Json>, id: NodeId, value: &Value) {
//! #     match value {
//! #         Value::Array(a) => a.iter().for_each(|v| grow(arena, id, v)),
//! #         Value::Object(m) => {
//! #             for (k, v) in m {
//! #                 let key = arena.push(id, Json::Key(k.clone()));
//! #                 grow(arena, key, v);
//! #             }
//! #         }
//! #         _ => {}
//! #     }
//! # }
//!
//! macro_rules! json {
//!     ($( $tokens:tt )*) => {{
//!         // ...
//! #         let value = ::serde_json::json!({$($tokens)*});
//! #         let mut arena = Arena::new(Json::Object);
//! #         let root = arena.root();
//! #         children(&mut arena, root, &value);
//! #         arena
//!     }};
//! }
//!
//! let john = json! {
//!     "name": "John Doe",
//!     "age": 43,
//!     "phones": [
//!         "+44 1234567",
//!         "+44 2345678"
//!     ]
//! };
//!
//! let jane = json! {
//!     "name": "Jane Doe",
//!     "maiden name": "Smith",
//!     "age": 40,
//!     "phones": [
//!         "+44 7654321",
//!     ]
//! };
//!
//! let (edits, cost) = diff(&john, &jane)?;
//!
//! // 43 -> 40, "maiden name": "Smith", "John Doe" -> "Jane Doe", one phone less and one changed
//! assert_eq!(cost, 6);
//! assert_eq!(edits.cost(), cost);
//! assert_eq!(apply(&john, &jane, &edits)?, jane);
//! # Ok::<_, Error<NodeId>>(())
//! ```

mod arena;
mod descent;
mod distance;
mod edit;
mod error;
mod keyroots;
mod postorder;
mod transform;
mod tree;

pub use arena::*;
pub use descent::*;
pub use distance::*;
pub use edit::*;
pub use error::*;
pub use keyroots::*;
pub use postorder::*;
pub use transform::*;
pub use tree::*;

mod cost;
mod script;
mod trail;
mod tracing_macros;

pub use cost::*;
