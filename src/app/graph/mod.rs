pub(in crate::app) mod build;
mod interaction;
mod view;

use eframe::egui::Vec2;

pub(in crate::app) use build::build_scene;

pub(in crate::app) struct SceneNode {
    pub(in crate::app) word: String,
    pub(in crate::app) frequency: u32,
    pub(in crate::app) community_id: u32,
    pub(in crate::app) radius: f32,
    pub(in crate::app) pos: Vec2,
    pub(in crate::app) velocity: Vec2,
    /// Set while the node is dragged; only the interaction code writes this.
    pub(in crate::app) pinned: Option<Vec2>,
}

pub(in crate::app) struct SceneEdge {
    pub(in crate::app) source: usize,
    pub(in crate::app) target: usize,
    pub(in crate::app) weight: f32,
}

pub(in crate::app) struct Scene {
    pub(in crate::app) nodes: Vec<SceneNode>,
    pub(in crate::app) edges: Vec<SceneEdge>,
    pub(in crate::app) index_by_word: std::collections::HashMap<String, usize>,
    pub(in crate::app) neighbors: Vec<Vec<usize>>,
    pub(in crate::app) incident_edges: Vec<Vec<usize>>,
    pub(in crate::app) max_weight: f32,
}

impl Scene {
    pub(in crate::app) fn node_index(&self, word: &str) -> Option<usize> {
        self.index_by_word.get(word).copied()
    }
}
