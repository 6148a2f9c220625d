//! Render graph core - declarative render pass scheduling
//!
//! Passes declare which named resources they read and write; the graph
//! compiles those declarations into a dependency-respecting execution order
//! and infers per-attachment load/store behavior (clear vs. preserve) from
//! the topology alone. Pass authors never reference other passes.
//!
//! # Features
//! - Render graph system for declarative render pass management
//! - Automatic pass ordering via topological sort, with cycle detection
//! - Attachment load/store/clear inference from graph topology
//! - Two authoring styles: trait implementations and inline closures with a
//!   per-pass `Scope`
//! - Backend-agnostic: resources are opaque handles realized by an external
//!   evaluator and published through [`RenderGraphRegistry`]
//!
//! The crate owns no GPU memory and calls no graphics API. The backend
//! evaluator compiles the graph, realizes each pass's declared resources,
//! publishes the handles into the registry, and drives each pass's execute
//! callback once per frame.

pub mod render_graph;
pub mod types;

pub use render_graph::{
    Attachment, CompiledGraph, GraphError, ImportedTexture, InlinePass, LoadOp, PassHandle,
    PassNode, RenderGraph, RenderGraphBuilder, RenderGraphPass, RenderGraphRegistry, ResourceId,
    StoreOp, TextureSize, SWAPCHAIN_NAME,
};
pub use types::{
    ClearValue, PipelineDescriptor, PipelineHandle, RenderPassHandle, TextureFormat, TextureHandle,
};
