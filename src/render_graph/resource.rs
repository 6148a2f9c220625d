//! Resources of the render graph

use crate::types::{ClearValue, TextureHandle};

/// Name of the reserved swapchain resource, pre-seeded into every graph.
pub const SWAPCHAIN_NAME: &str = "SWAPCHAIN";

/// Unique identifier for a render graph resource.
///
/// Ids are opaque, unique within one graph instance, and minted
/// monotonically. [`ResourceId::SWAPCHAIN`] is reserved and always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(pub(crate) u32);

impl ResourceId {
    /// The reserved id of the swapchain resource.
    pub const SWAPCHAIN: ResourceId = ResourceId(0);
}

/// Operation to perform when loading an attachment at the start of a pass.
///
/// Derived by [`RenderGraph::compile`](crate::render_graph::RenderGraph::compile),
/// never declared by the pass author: the first pass to write a resource in
/// the compiled order clears it, every later writer loads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadOp {
    /// Clear the attachment with the specified value.
    Clear(ClearValue),
    /// Load the existing contents of the attachment.
    Load,
    /// Don't care about the existing contents (may be undefined).
    DontCare,
}

/// Operation to perform when storing an attachment at the end of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    /// Store the attachment contents for later use.
    Store,
    /// Don't care about the contents after the pass (may be discarded).
    DontCare,
}

/// Derived load/store state for one output of one pass.
///
/// Defaults to `DontCare`/`DontCare` when the output is declared and is
/// overwritten wholesale during compilation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attachment {
    pub load_op: LoadOp,
    pub store_op: StoreOp,
}

impl Default for Attachment {
    fn default() -> Self {
        Self {
            load_op: LoadOp::DontCare,
            store_op: StoreOp::DontCare,
        }
    }
}

/// Describes texture dimensions that can be relative to the swapchain size.
///
/// A pass writing a `Relative` resource (or the swapchain itself) is marked
/// swapchain-relative, so the owner knows to rebuild it on resize.
#[derive(Debug, Clone, Copy)]
pub enum TextureSize {
    /// Absolute size in pixels.
    Absolute { width: u32, height: u32 },
    /// Relative to the swapchain size (1.0 = full size).
    Relative { width_scale: f32, height_scale: f32 },
}

impl Default for TextureSize {
    fn default() -> Self {
        TextureSize::Relative {
            width_scale: 1.0,
            height_scale: 1.0,
        }
    }
}

impl TextureSize {
    pub fn resolve(&self, swapchain_width: u32, swapchain_height: u32) -> (u32, u32) {
        match self {
            TextureSize::Absolute { width, height } => (*width, *height),
            TextureSize::Relative {
                width_scale,
                height_scale,
            } => (
                ((swapchain_width as f32) * width_scale) as u32,
                ((swapchain_height as f32) * height_scale) as u32,
            ),
        }
    }

    pub fn is_relative(&self) -> bool {
        matches!(self, TextureSize::Relative { .. })
    }
}

/// Record of an externally-owned resource registered via
/// [`RenderGraph::import`](crate::render_graph::RenderGraph::import).
///
/// The clear value recovers the correct [`LoadOp::Clear`] when a pass is the
/// first writer of the resource in the compiled order.
#[derive(Debug, Clone, Copy)]
pub struct ImportedTexture {
    pub handle: TextureHandle,
    pub size: TextureSize,
    pub clear_value: ClearValue,
}
