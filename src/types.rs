//! Types shared with the backend evaluator
//!
//! The graph core never talks to a graphics API. Everything the backend
//! realizes is referenced through opaque handles; everything the graph asks
//! the backend to create is described with the plain data types below.

/// Handle to a realized GPU texture. Minted by the backend evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Handle to a realized GPU pipeline. Minted by the backend evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineHandle(pub u64);

/// Handle to a realized render pass object. Minted by the backend evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderPassHandle(pub u64);

/// Clear value for an attachment.
///
/// The variant is chosen when the resource is imported and is never
/// reinterpreted: a color attachment always clears with a color, a
/// depth/stencil attachment always clears with a depth/stencil pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClearValue {
    /// RGBA color clear.
    Color([f32; 4]),
    /// Depth/stencil clear.
    DepthStencil { depth: f32, stencil: u32 },
}

impl ClearValue {
    /// Create a color clear value.
    pub fn color(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::Color([r, g, b, a])
    }

    /// Create a depth/stencil clear value.
    pub fn depth_stencil(depth: f32, stencil: u32) -> Self {
        Self::DepthStencil { depth, stencil }
    }
}

/// Texture format enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    Rgba8Unorm,
    Rgba8UnormSrgb,
    Bgra8Unorm,
    Bgra8UnormSrgb,
    Rgba16Float,
    Rgba32Float,
    Depth32Float,
    Depth24PlusStencil8,
}

impl TextureFormat {
    pub fn is_depth(&self) -> bool {
        matches!(
            self,
            TextureFormat::Depth32Float | TextureFormat::Depth24PlusStencil8
        )
    }
}

/// Description of a pipeline to be realized by the backend.
///
/// Recorded on the graph by [`RenderGraphBuilder::create`] during a pass's
/// build step; the backend evaluator reads it back to create the actual
/// pipeline object and publishes the resulting handle into the registry.
///
/// [`RenderGraphBuilder::create`]: crate::render_graph::RenderGraphBuilder::create
#[derive(Debug, Clone)]
pub struct PipelineDescriptor {
    /// Debug label, also used by the backend for pipeline caches.
    pub label: String,
    /// Shader module name, resolved by the backend's shader library.
    pub shader: String,
    /// Color attachment formats the pipeline renders to.
    pub color_formats: Vec<TextureFormat>,
    /// Depth/stencil attachment format, if any.
    pub depth_format: Option<TextureFormat>,
}

impl PipelineDescriptor {
    /// Create a descriptor with no attachments configured.
    pub fn new(label: impl Into<String>, shader: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            shader: shader.into(),
            color_formats: Vec::new(),
            depth_format: None,
        }
    }

    /// Add a color attachment format.
    pub fn with_color_format(mut self, format: TextureFormat) -> Self {
        self.color_formats.push(format);
        self
    }

    /// Set the depth/stencil attachment format.
    pub fn with_depth_format(mut self, format: TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }
}
