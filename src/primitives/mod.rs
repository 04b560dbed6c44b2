//! # Layer 0: Primitives
//!
//! The foundation every layout is resolved against:
//! - `shape.rs`: Tree topology without data (`Shape`).
//! - `path.rs`: Structural addresses (`Path`).
//! - `node.rs`: Owning, fixed-arity tree storage (`Node<T>`).
//! - `tree.rs`: Types whose shape is known statically (`Tree`).

pub mod shape;
pub mod path;
pub mod node;
pub mod tree;

pub use shape::Shape;
pub use path::Path;
pub use node::Node;
pub use tree::Tree;
