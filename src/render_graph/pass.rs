//! Render pass definitions for the render graph

use std::any::Any;

use crate::render_graph::builder::RenderGraphBuilder;
use crate::render_graph::registry::RenderGraphRegistry;
use crate::render_graph::resource::{Attachment, ResourceId};

/// Handle to a pass in the render graph.
///
/// `PassHandle` is `Copy` and cheap to pass around. It is only valid within
/// the `RenderGraph` that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PassHandle(pub(crate) u32);

impl PassHandle {
    pub(crate) fn new(index: u32) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A unit of GPU work in the render graph.
///
/// The build step declares the pass's reads, writes, and created pipelines
/// through the supplied [`RenderGraphBuilder`]; it runs only while the pass
/// is dirty (gated by the graph, not by the implementation). The execute
/// step runs once per frame, reads realized handles from the registry, and
/// never mutates graph topology.
///
/// `cmd` is the backend's command recorder, opaque to the graph core;
/// implementations downcast it to the concrete type their backend provides.
pub trait RenderGraphPass {
    /// Declare resource reads/writes and create pipelines.
    fn build(&mut self, builder: &mut RenderGraphBuilder);

    /// Record GPU work for one frame.
    fn execute(&mut self, cmd: &mut dyn Any, registry: &RenderGraphRegistry);
}

/// Per-pass declarations recorded by the builder, owned by the graph.
#[derive(Debug)]
pub struct PassNode {
    pub(crate) name: String,
    /// The pass's own identity resource, keying the registry's render-pass
    /// table. Distinct from the resource ids the pass reads or writes.
    pub(crate) render_pass_id: ResourceId,
    pub(crate) inputs: Vec<ResourceId>,
    pub(crate) outputs: Vec<(ResourceId, Attachment)>,
    pub(crate) resources: Vec<ResourceId>,
    pub(crate) swapchain_relative: bool,
    pub(crate) dirty: bool,
}

impl PassNode {
    pub(crate) fn new(name: String, render_pass_id: ResourceId) -> Self {
        Self {
            name,
            render_pass_id,
            inputs: Vec::new(),
            outputs: Vec::new(),
            resources: Vec::new(),
            swapchain_relative: false,
            dirty: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pass's identity resource id (its render-pass resource id).
    pub fn render_pass_id(&self) -> ResourceId {
        self.render_pass_id
    }

    /// Resource ids this pass reads, in declaration order.
    pub fn inputs(&self) -> &[ResourceId] {
        &self.inputs
    }

    /// Resource ids this pass writes, with their derived attachment state.
    ///
    /// Attachment state is meaningful only after
    /// [`RenderGraph::compile`](crate::render_graph::RenderGraph::compile).
    pub fn outputs(&self) -> &[(ResourceId, Attachment)] {
        &self.outputs
    }

    /// Non-attachment resources (pipelines) created by this pass.
    pub fn resources(&self) -> &[ResourceId] {
        &self.resources
    }

    /// True if any output's size tracks the swapchain size.
    pub fn is_swapchain_relative(&self) -> bool {
        self.swapchain_relative
    }

    /// True until the pass's build step has run.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn reads_resource(&self, resource: ResourceId) -> bool {
        self.inputs.contains(&resource)
    }

    pub fn writes_resource(&self, resource: ResourceId) -> bool {
        self.outputs.iter().any(|(id, _)| *id == resource)
    }
}

/// Closure-authored pass carrying a caller-typed `Scope`.
///
/// Most passes are too simple to warrant a dedicated type: the build closure
/// populates the scope (typically with pipeline ids minted through
/// [`RenderGraphBuilder::create`]), and the execute closure reads the scope
/// plus the registry. The scope is the pass's only state between the two.
pub struct InlinePass<S, B, E> {
    scope: S,
    build_fn: B,
    execute_fn: E,
}

impl<S, B, E> InlinePass<S, B, E>
where
    B: FnMut(&mut S, &mut RenderGraphBuilder),
    E: FnMut(&mut S, &mut dyn Any, &RenderGraphRegistry),
{
    pub fn new(scope: S, build_fn: B, execute_fn: E) -> Self {
        Self {
            scope,
            build_fn,
            execute_fn,
        }
    }
}

impl<S, B, E> RenderGraphPass for InlinePass<S, B, E>
where
    B: FnMut(&mut S, &mut RenderGraphBuilder),
    E: FnMut(&mut S, &mut dyn Any, &RenderGraphRegistry),
{
    fn build(&mut self, builder: &mut RenderGraphBuilder) {
        (self.build_fn)(&mut self.scope, builder);
    }

    fn execute(&mut self, cmd: &mut dyn Any, registry: &RenderGraphRegistry) {
        (self.execute_fn)(&mut self.scope, cmd, registry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_node_starts_dirty_and_empty() {
        let node = PassNode::new("shadow".to_string(), ResourceId(7));
        assert!(node.is_dirty());
        assert!(node.inputs().is_empty());
        assert!(node.outputs().is_empty());
        assert!(node.resources().is_empty());
        assert!(!node.is_swapchain_relative());
        assert_eq!(node.render_pass_id(), ResourceId(7));
    }

    #[test]
    fn test_pass_node_read_write_queries() {
        let mut node = PassNode::new("main".to_string(), ResourceId(1));
        node.inputs.push(ResourceId(2));
        node.outputs.push((ResourceId(3), Attachment::default()));

        assert!(node.reads_resource(ResourceId(2)));
        assert!(!node.reads_resource(ResourceId(3)));
        assert!(node.writes_resource(ResourceId(3)));
        assert!(!node.writes_resource(ResourceId(2)));
    }
}
