//! Registry of realized backend handles

use std::collections::HashMap;

use crate::render_graph::resource::ResourceId;
use crate::types::{PipelineHandle, RenderPassHandle, TextureHandle};

/// Lookup table from resource id to realized backend handle.
///
/// Populated by the external evaluator after it has realized a compiled
/// graph, read by pass execute callbacks. All `add_*` methods are upserts:
/// on resize the evaluator re-creates resources and overwrites the old
/// handles without tearing the registry down. The `get_*` methods panic on a
/// miss, since a pass executing before its dependencies were realized is a
/// programming error, not a recoverable state; passes with optional inputs
/// probe with `has_*` first.
#[derive(Debug, Default)]
pub struct RenderGraphRegistry {
    textures: HashMap<ResourceId, TextureHandle>,
    pipelines: HashMap<ResourceId, PipelineHandle>,
    render_passes: HashMap<ResourceId, RenderPassHandle>,
}

impl RenderGraphRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_texture(&mut self, id: ResourceId, handle: TextureHandle) {
        self.textures.insert(id, handle);
    }

    pub fn add_pipeline(&mut self, id: ResourceId, handle: PipelineHandle) {
        self.pipelines.insert(id, handle);
    }

    pub fn add_render_pass(&mut self, id: ResourceId, handle: RenderPassHandle) {
        self.render_passes.insert(id, handle);
    }

    pub fn get_texture(&self, id: ResourceId) -> TextureHandle {
        match self.textures.get(&id) {
            Some(&handle) => handle,
            None => panic!("render graph registry: no texture realized for {:?}", id),
        }
    }

    pub fn get_pipeline(&self, id: ResourceId) -> PipelineHandle {
        match self.pipelines.get(&id) {
            Some(&handle) => handle,
            None => panic!("render graph registry: no pipeline realized for {:?}", id),
        }
    }

    pub fn get_render_pass(&self, id: ResourceId) -> RenderPassHandle {
        match self.render_passes.get(&id) {
            Some(&handle) => handle,
            None => panic!(
                "render graph registry: no render pass realized for {:?}",
                id
            ),
        }
    }

    pub fn has_texture(&self, id: ResourceId) -> bool {
        self.textures.contains_key(&id)
    }

    pub fn has_pipeline(&self, id: ResourceId) -> bool {
        self.pipelines.contains_key(&id)
    }

    pub fn has_render_pass(&self, id: ResourceId) -> bool {
        self.render_passes.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut registry = RenderGraphRegistry::new();
        registry.add_texture(ResourceId(1), TextureHandle(10));
        registry.add_pipeline(ResourceId(2), PipelineHandle(20));
        registry.add_render_pass(ResourceId(3), RenderPassHandle(30));

        assert_eq!(registry.get_texture(ResourceId(1)), TextureHandle(10));
        assert_eq!(registry.get_pipeline(ResourceId(2)), PipelineHandle(20));
        assert_eq!(
            registry.get_render_pass(ResourceId(3)),
            RenderPassHandle(30)
        );
    }

    #[test]
    fn test_add_is_upsert() {
        let mut registry = RenderGraphRegistry::new();
        registry.add_texture(ResourceId(1), TextureHandle(10));
        // Resize path: same id, fresh handle.
        registry.add_texture(ResourceId(1), TextureHandle(11));
        assert_eq!(registry.get_texture(ResourceId(1)), TextureHandle(11));
    }

    #[test]
    fn test_has_probes() {
        let mut registry = RenderGraphRegistry::new();
        registry.add_texture(ResourceId(1), TextureHandle(10));

        assert!(registry.has_texture(ResourceId(1)));
        assert!(!registry.has_texture(ResourceId(2)));
        assert!(!registry.has_pipeline(ResourceId(1)));
        assert!(!registry.has_render_pass(ResourceId(1)));
    }

    #[test]
    #[should_panic(expected = "no texture realized")]
    fn test_get_texture_miss_panics() {
        RenderGraphRegistry::new().get_texture(ResourceId(1));
    }

    #[test]
    #[should_panic(expected = "no pipeline realized")]
    fn test_get_pipeline_miss_panics() {
        RenderGraphRegistry::new().get_pipeline(ResourceId(1));
    }

    #[test]
    #[should_panic(expected = "no render pass realized")]
    fn test_get_render_pass_miss_panics() {
        RenderGraphRegistry::new().get_render_pass(ResourceId(1));
    }
}
