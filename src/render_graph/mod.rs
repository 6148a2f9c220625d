//! Render Graph System
//!
//! A declarative system for defining render passes as a directed acyclic
//! graph (DAG). Passes declare reads and writes of named resources; the graph
//! handles pass ordering and attachment load/store inference.

pub mod builder;
pub mod graph;
pub mod pass;
pub mod registry;
pub mod resource;

pub use builder::*;
pub use graph::*;
pub use pass::*;
pub use registry::*;
pub use resource::*;
