use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct WordRecord {
    pub word: String,
    pub frequency: u32,
    pub degree_centrality: f32,
    pub betweenness_centrality: f32,
    pub community_id: u32,
}

#[derive(Clone, Debug)]
pub struct Community {
    pub id: u32,
    pub label: String,
    /// Member words ordered by frequency, highest first.
    pub members: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct WordGraph {
    pub words: HashMap<String, WordRecord>,
    pub edges: Vec<(String, String, f32)>,
    pub communities: Vec<Community>,
    pub modularity: f32,
}

impl WordGraph {
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn community(&self, id: u32) -> Option<&Community> {
        self.communities
            .iter()
            .find(|community| community.id == id)
    }

    pub fn community_label(&self, id: u32) -> String {
        self.community(id)
            .map(|community| community.label.clone())
            .unwrap_or_else(|| format!("Community {id}"))
    }

    /// Renames a community in place; positions and colors are untouched.
    pub fn set_community_label(&mut self, id: u32, label: String) {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return;
        }

        if let Some(community) = self
            .communities
            .iter_mut()
            .find(|community| community.id == id)
        {
            community.label = trimmed.to_owned();
        }
    }
}
