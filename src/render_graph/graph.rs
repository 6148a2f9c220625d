//! Render graph definition and compilation

use std::any::Any;
use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::render_graph::builder::RenderGraphBuilder;
use crate::render_graph::pass::{InlinePass, PassHandle, PassNode, RenderGraphPass};
use crate::render_graph::registry::RenderGraphRegistry;
use crate::render_graph::resource::{
    ImportedTexture, LoadOp, ResourceId, StoreOp, TextureSize, SWAPCHAIN_NAME,
};
use crate::types::{ClearValue, PipelineDescriptor, TextureHandle};

/// Errors detected during graph compilation.
///
/// Both variants are configuration errors: a malformed graph cannot safely
/// render partial results, so the caller is expected to treat them as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Two passes share a name. Names are validated in bulk at compile time,
    /// not at registration time.
    #[error("two render graph passes share the name '{0}'")]
    DuplicatePassName(String),
    /// A pass transitively consumes its own output.
    #[error("render graph contains cyclic dependency")]
    CyclicDependency,
}

/// The main render graph structure.
///
/// Owns every pass and the name→id resource map. Passes are registered once
/// and persist for the graph's lifetime; [`compile`](Self::compile) may run
/// any number of times (typically once per structural change, e.g. a window
/// resize) and is idempotent while the pass declarations are unchanged.
///
/// Single-threaded by design: all methods are expected to run on the thread
/// owning the graphics context.
pub struct RenderGraph {
    passes: Vec<Box<dyn RenderGraphPass>>,
    nodes: Vec<PassNode>,
    resource_names: HashMap<String, ResourceId>,
    imported: HashMap<ResourceId, ImportedTexture>,
    pipelines: HashMap<ResourceId, PipelineDescriptor>,
    next_resource_id: u32,
    swapchain_clear_color: [f32; 4],
}

impl RenderGraph {
    pub fn new() -> Self {
        let mut resource_names = HashMap::new();
        resource_names.insert(SWAPCHAIN_NAME.to_string(), ResourceId::SWAPCHAIN);

        Self {
            passes: Vec::new(),
            nodes: Vec::new(),
            resource_names,
            imported: HashMap::new(),
            pipelines: HashMap::new(),
            next_resource_id: ResourceId::SWAPCHAIN.0 + 1,
            swapchain_clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Register a pass.
    ///
    /// The pass receives a fresh resource id for its own identity (its
    /// render-pass resource id), distinct from the ids it reads or writes.
    /// Duplicate names are not rejected here; they surface as
    /// [`GraphError::DuplicatePassName`] at [`compile`](Self::compile).
    pub fn add_pass(&mut self, name: &str, pass: impl RenderGraphPass + 'static) -> PassHandle {
        let render_pass_id = self.mint_resource_id();
        let handle = PassHandle::new(self.nodes.len() as u32);
        self.nodes.push(PassNode::new(name.to_string(), render_pass_id));
        self.passes.push(Box::new(pass));
        handle
    }

    /// Register an inline pass built from two closures and a `Scope`.
    ///
    /// The scope is default-constructed, owned by the pass for its lifetime,
    /// and is the only state shared between the build and execute closures.
    /// From the graph's perspective an inline pass is indistinguishable from
    /// a [`RenderGraphPass`] implementation.
    pub fn add_inline_pass<S, B, E>(&mut self, name: &str, build_fn: B, execute_fn: E) -> PassHandle
    where
        S: Default + 'static,
        B: FnMut(&mut S, &mut RenderGraphBuilder) + 'static,
        E: FnMut(&mut S, &mut dyn Any, &RenderGraphRegistry) + 'static,
    {
        self.add_pass(name, InlinePass::new(S::default(), build_fn, execute_fn))
    }

    /// Register an externally-owned resource (e.g. the swapchain image or a
    /// backend-allocated depth buffer) under `name`.
    ///
    /// The recorded clear value is used when a pass turns out to be the
    /// resource's first writer in the compiled order. Importing an existing
    /// name rebinds handle, size, and clear value while keeping the id
    /// stable (last write wins) — this is how a backend rebinds the
    /// swapchain image on resize.
    pub fn import(
        &mut self,
        name: &str,
        handle: TextureHandle,
        size: TextureSize,
        clear_value: ClearValue,
    ) -> ResourceId {
        let id = match self.resource_names.get(name) {
            Some(&id) => id,
            None => {
                let id = self.mint_resource_id();
                self.resource_names.insert(name.to_string(), id);
                id
            }
        };
        self.imported.insert(
            id,
            ImportedTexture {
                handle,
                size,
                clear_value,
            },
        );
        id
    }

    /// Resolve a previously imported name to its id.
    ///
    /// Panics if the name is unknown; callers must only resolve names they
    /// intend to read or write, never speculatively — use
    /// [`has_resource_id`](Self::has_resource_id) to probe.
    pub fn get_resource_id(&self, name: &str) -> ResourceId {
        match self.resource_names.get(name) {
            Some(&id) => id,
            None => panic!("render graph: unknown resource name '{}'", name),
        }
    }

    pub fn has_resource_id(&self, name: &str) -> bool {
        self.resource_names.contains_key(name)
    }

    /// Record a pipeline resource. Pipelines are not attachments and never
    /// take part in load/store inference.
    pub fn add_pipeline(&mut self, descriptor: PipelineDescriptor) -> ResourceId {
        let id = self.mint_resource_id();
        self.pipelines.insert(id, descriptor);
        id
    }

    pub fn is_swapchain(&self, id: ResourceId) -> bool {
        id == ResourceId::SWAPCHAIN
    }

    pub fn is_pipeline(&self, id: ResourceId) -> bool {
        self.pipelines.contains_key(&id)
    }

    /// Clear color applied when the swapchain's first writer clears it.
    pub fn set_swapchain_clear_color(&mut self, color: [f32; 4]) {
        self.swapchain_clear_color = color;
    }

    pub fn swapchain_clear_color(&self) -> [f32; 4] {
        self.swapchain_clear_color
    }

    /// Import record for `id`, if it is an imported resource.
    pub fn imported(&self, id: ResourceId) -> Option<&ImportedTexture> {
        self.imported.get(&id)
    }

    /// Descriptor for `id`, if it is a pipeline resource.
    pub fn pipeline_descriptor(&self, id: ResourceId) -> Option<&PipelineDescriptor> {
        self.pipelines.get(&id)
    }

    pub fn pass_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn pass_node(&self, handle: PassHandle) -> &PassNode {
        &self.nodes[handle.index()]
    }

    pub fn pass_nodes(&self) -> &[PassNode] {
        &self.nodes
    }

    /// Re-mark every swapchain-relative pass dirty.
    ///
    /// The owner calls this on swapchain recreation (resize), then
    /// re-imports the swapchain-sized resources and re-compiles; affected
    /// passes run their build step again with fresh declarations.
    pub fn invalidate_swapchain_relative(&mut self) {
        for node in &mut self.nodes {
            if node.swapchain_relative {
                node.dirty = true;
            }
        }
    }

    /// Run one pass's execute callback.
    ///
    /// Driven by the backend evaluator once per frame for each pass in
    /// compiled order, regardless of dirty state. `cmd` is the backend's
    /// command recorder, opaque to the graph.
    pub fn execute_pass(
        &mut self,
        handle: PassHandle,
        cmd: &mut dyn Any,
        registry: &RenderGraphRegistry,
    ) {
        self.passes[handle.index()].execute(cmd, registry);
    }

    /// Compile the graph: build dirty passes, validate names, drop dead
    /// passes, order the rest topologically, and infer attachment policy.
    ///
    /// For every discovered producer→consumer edge the producer's index in
    /// the returned order is strictly smaller than the consumer's. Passes
    /// with no edges between them keep a deterministic relative order, so
    /// repeated compilation of an unmodified graph yields identical results.
    pub fn compile(&mut self) -> Result<CompiledGraph, GraphError> {
        let Self {
            passes,
            nodes,
            resource_names,
            imported,
            pipelines,
            next_resource_id,
            swapchain_clear_color,
        } = self;

        // 1. Run the build step of every dirty pass against a fresh builder.
        //    Declarations are cleared first so a rebuild starts from scratch.
        for (pass, node) in passes.iter_mut().zip(nodes.iter_mut()) {
            if !node.dirty {
                continue;
            }
            node.inputs.clear();
            node.outputs.clear();
            node.resources.clear();
            node.swapchain_relative = false;

            let mut builder = RenderGraphBuilder {
                resource_names: &*resource_names,
                imported: &*imported,
                pipelines: &mut *pipelines,
                next_resource_id: &mut *next_resource_id,
                node: &mut *node,
            };
            pass.build(&mut builder);
            node.dirty = false;
        }

        // 2. Names are validated in bulk, not at registration time.
        let mut names: HashSet<&str> = HashSet::with_capacity(nodes.len());
        for node in nodes.iter() {
            if !names.insert(node.name.as_str()) {
                log::warn!("render graph: duplicate pass name '{}'", node.name);
                return Err(GraphError::DuplicatePassName(node.name.clone()));
            }
        }

        // 3. A pass with no inputs and no outputs can never be connected to
        //    the graph; drop it from the frame (it stays registered).
        let mut live: Vec<usize> = Vec::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if node.inputs.is_empty() && node.outputs.is_empty() {
                log::warn!(
                    "render graph: pass '{}' declares no inputs or outputs, dropping it from the frame",
                    node.name
                );
            } else {
                live.push(index);
            }
        }

        // 4. Resource id -> positions (into `live`) of the passes reading it.
        let mut readers: HashMap<ResourceId, Vec<usize>> = HashMap::new();
        for (position, &node_index) in live.iter().enumerate() {
            for &input in &nodes[node_index].inputs {
                readers.entry(input).or_default().push(position);
            }
        }

        // 5. Edge P -> Q for every pass Q consuming what P produces. A pass
        //    reading and writing the same resource does not depend on itself.
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); live.len()];
        for (position, &node_index) in live.iter().enumerate() {
            for &(output, _) in &nodes[node_index].outputs {
                if let Some(consumers) = readers.get(&output) {
                    for &consumer in consumers {
                        if consumer != position {
                            adjacency[position].push(consumer);
                        }
                    }
                }
            }
        }

        // 6. DFS topological sort. Roots are visited in descending index
        //    order for a stable tie-break among independent passes; each
        //    pass is appended after its consumers, then the list is reversed
        //    so producers precede consumers. A back edge means the graph is
        //    cyclic and cannot be ordered.
        let mut states = vec![VisitState::Unvisited; live.len()];
        let mut order: Vec<usize> = Vec::with_capacity(live.len());
        for root in (0..live.len()).rev() {
            visit(root, &adjacency, &mut states, &mut order).map_err(|position| {
                log::error!(
                    "render graph: cyclic dependency involving pass '{}'",
                    nodes[live[position]].name
                );
                GraphError::CyclicDependency
            })?;
        }
        order.reverse();

        // 7. Attachment policy: the first pass to write a resource in the
        //    sorted order clears it, every later writer preserves it, and
        //    all writers store.
        let mut seen: HashSet<ResourceId> = HashSet::new();
        for &position in &order {
            let node = &mut nodes[live[position]];
            for (output, attachment) in &mut node.outputs {
                attachment.load_op = if seen.insert(*output) {
                    let clear_value = if *output == ResourceId::SWAPCHAIN {
                        ClearValue::Color(*swapchain_clear_color)
                    } else {
                        match imported.get(output) {
                            Some(texture) => texture.clear_value,
                            None => panic!(
                                "render graph: no clear value recorded for {:?}",
                                output
                            ),
                        }
                    };
                    LoadOp::Clear(clear_value)
                } else {
                    LoadOp::Load
                };
                attachment.store_op = StoreOp::Store;
            }
        }

        Ok(CompiledGraph {
            pass_order: order
                .iter()
                .map(|&position| PassHandle::new(live[position] as u32))
                .collect(),
        })
    }

    fn mint_resource_id(&mut self) -> ResourceId {
        let id = ResourceId(self.next_resource_id);
        self.next_resource_id += 1;
        id
    }
}

impl Default for RenderGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// Post-order DFS step. `Err` carries the position where a back edge closed
/// a cycle.
fn visit(
    position: usize,
    adjacency: &[Vec<usize>],
    states: &mut [VisitState],
    order: &mut Vec<usize>,
) -> Result<(), usize> {
    match states[position] {
        VisitState::Done => return Ok(()),
        VisitState::InProgress => return Err(position),
        VisitState::Unvisited => {}
    }
    states[position] = VisitState::InProgress;
    for &next in &adjacency[position] {
        visit(next, adjacency, states, order)?;
    }
    states[position] = VisitState::Done;
    order.push(position);
    Ok(())
}

/// A compiled render graph: the execution order for one frame.
///
/// Pass ownership stays with the [`RenderGraph`]; the evaluator resolves
/// handles through [`RenderGraph::pass_node`] and drives execution with
/// [`RenderGraph::execute_pass`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledGraph {
    pass_order: Vec<PassHandle>,
}

impl CompiledGraph {
    pub fn pass_order(&self) -> &[PassHandle] {
        &self.pass_order
    }
}
