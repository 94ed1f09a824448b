use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawNode {
    pub(super) word: String,
    #[serde(default)]
    pub(super) frequency: u32,
    #[serde(default)]
    pub(super) degree_centrality: f32,
    #[serde(default)]
    pub(super) betweenness_centrality: f32,
    #[serde(default)]
    pub(super) community_id: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawEdge {
    pub(super) source: String,
    pub(super) target: String,
    #[serde(default)]
    pub(super) weight: f32,
}

/// Wire shape of an analysis run. Community ids arrive string-encoded, and a
/// later naming pass may attach human labels.
#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawAnalysis {
    #[serde(default)]
    pub(super) nodes: Vec<RawNode>,
    #[serde(default)]
    pub(super) edges: Vec<RawEdge>,
    #[serde(default)]
    pub(super) communities: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub(super) community_labels: HashMap<String, String>,
    #[serde(default)]
    pub(super) modularity: f32,
}

pub(super) fn parse_analysis(raw: &str) -> Result<RawAnalysis> {
    let parsed: RawAnalysis =
        serde_json::from_str(raw).context("invalid co-occurrence analysis JSON")?;

    if parsed.nodes.is_empty() {
        return Err(anyhow!("analysis result contains no network nodes"));
    }

    Ok(parsed)
}

pub(super) fn parse_community_key(key: &str) -> Option<u32> {
    key.trim().parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "nodes": [
            {"word": "price", "frequency": 10, "degree_centrality": 0.5, "community_id": 0},
            {"word": "quality", "frequency": 5, "community_id": 1}
        ],
        "edges": [
            {"source": "price", "target": "quality", "weight": 3}
        ],
        "communities": {"0": ["price"], "1": ["quality"]},
        "modularity": 0.42
    }"#;

    #[test]
    fn parses_analysis_payload() {
        let parsed = parse_analysis(SAMPLE).expect("sample parses");
        assert_eq!(parsed.nodes.len(), 2);
        assert_eq!(parsed.edges.len(), 1);
        assert_eq!(parsed.communities.len(), 2);
        assert!((parsed.modularity - 0.42).abs() < 1e-6);
        assert_eq!(parsed.nodes[1].degree_centrality, 0.0);
    }

    #[test]
    fn rejects_empty_node_list() {
        assert!(parse_analysis(r#"{"nodes": [], "edges": []}"#).is_err());
    }

    #[test]
    fn community_keys_are_string_encoded_integers() {
        assert_eq!(parse_community_key("3"), Some(3));
        assert_eq!(parse_community_key(" 12 "), Some(12));
        assert_eq!(parse_community_key("misc"), None);
    }
}
