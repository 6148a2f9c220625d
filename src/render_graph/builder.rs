//! Builder handed to a pass's build step

use std::collections::HashMap;

use crate::render_graph::pass::PassNode;
use crate::render_graph::resource::{Attachment, ImportedTexture, ResourceId};
use crate::types::PipelineDescriptor;

/// The only channel through which a pass declares graph edges.
///
/// Constructed by the graph for exactly one pass's build step, then
/// discarded. Resolves symbolic resource names to ids and appends them to
/// the owning pass's declarations. Resource names must already exist via
/// [`RenderGraph::import`](crate::render_graph::RenderGraph::import) (or be
/// the swapchain); a pass cannot invent an attachment by writing to an
/// unregistered name.
pub struct RenderGraphBuilder<'a> {
    pub(crate) resource_names: &'a HashMap<String, ResourceId>,
    pub(crate) imported: &'a HashMap<ResourceId, ImportedTexture>,
    pub(crate) pipelines: &'a mut HashMap<ResourceId, PipelineDescriptor>,
    pub(crate) next_resource_id: &'a mut u32,
    pub(crate) node: &'a mut PassNode,
}

impl<'a> RenderGraphBuilder<'a> {
    /// Declare that the owning pass writes `name`.
    ///
    /// Appends the resolved id to the pass's outputs with an uninferred
    /// attachment descriptor; compilation fills in load/store/clear. Writing
    /// the swapchain, or a resource imported with a swapchain-relative size,
    /// marks the pass swapchain-relative.
    ///
    /// Panics if `name` was never imported.
    pub fn write(&mut self, name: &str) -> ResourceId {
        let id = self.resolve(name);
        if !self.node.writes_resource(id) {
            self.node.outputs.push((id, Attachment::default()));
        }
        let relative = id == ResourceId::SWAPCHAIN
            || self
                .imported
                .get(&id)
                .is_some_and(|texture| texture.size.is_relative());
        if relative {
            self.node.swapchain_relative = true;
        }
        id
    }

    /// Declare that the owning pass reads `name`.
    ///
    /// Panics if `name` was never imported.
    pub fn read(&mut self, name: &str) -> ResourceId {
        let id = self.resolve(name);
        self.node.inputs.push(id);
        id
    }

    /// Create a pipeline resource on the graph and record it on the pass.
    ///
    /// This is the only way new resource ids are minted from inside a pass.
    /// Pipelines are not attachments and take no part in load/store
    /// inference.
    pub fn create(&mut self, descriptor: PipelineDescriptor) -> ResourceId {
        let id = ResourceId(*self.next_resource_id);
        *self.next_resource_id += 1;
        self.pipelines.insert(id, descriptor);
        self.node.resources.push(id);
        id
    }

    fn resolve(&self, name: &str) -> ResourceId {
        match self.resource_names.get(name) {
            Some(&id) => id,
            None => panic!(
                "render graph: pass '{}' references unknown resource '{}'",
                self.node.name, name
            ),
        }
    }
}
