// Render targets - named scene slots the host UI exposes to the renderers
use std::collections::HashMap;

use crate::presentation::scene::Scene;

/// Addressable containers, keyed by string id. Rendering into an id the
/// host never registered is a silent no-op (the chart may simply not be
/// visible yet); rendering into a registered id replaces whatever scene was
/// there, so a target never accumulates stale output.
#[derive(Debug, Default)]
pub struct RenderTargets {
    slots: HashMap<String, Option<Scene>>,
}

impl RenderTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: impl Into<String>) {
        self.slots.entry(id.into()).or_insert(None);
    }

    pub fn unregister(&mut self, id: &str) {
        self.slots.remove(id);
    }

    /// Replace the scene under `id`. Returns `false` when the target does
    /// not exist, in which case the scene is dropped.
    pub fn render_into(&mut self, id: &str, scene: Scene) -> bool {
        match self.slots.get_mut(id) {
            Some(slot) => {
                *slot = Some(scene);
                true
            }
            None => false,
        }
    }

    /// Remove the scene under `id` without unregistering the target.
    pub fn clear(&mut self, id: &str) {
        if let Some(slot) = self.slots.get_mut(id) {
            *slot = None;
        }
    }

    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.slots.get(id).and_then(|slot| slot.as_ref())
    }
}
