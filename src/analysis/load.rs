use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{Community, WordGraph, WordRecord};
use super::parse::{RawAnalysis, parse_analysis, parse_community_key};

pub fn load_analysis(path: &Path) -> Result<WordGraph> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read analysis file {}", path.display()))?;

    let parsed = parse_analysis(&raw)
        .with_context(|| format!("failed to parse analysis file {}", path.display()))?;

    Ok(build_word_graph(parsed))
}

fn build_word_graph(raw: RawAnalysis) -> WordGraph {
    let mut words: HashMap<String, WordRecord> = HashMap::with_capacity(raw.nodes.len());
    for node in raw.nodes {
        let word = node.word.trim().to_owned();
        if word.is_empty() {
            continue;
        }

        words.insert(
            word.clone(),
            WordRecord {
                word,
                frequency: node.frequency.max(1),
                degree_centrality: node.degree_centrality,
                betweenness_centrality: node.betweenness_centrality,
                community_id: node.community_id,
            },
        );
    }

    // Edges with unknown endpoints or non-positive weight are dropped; a
    // partial graph still renders.
    let mut seen_pairs = HashSet::new();
    let mut edges = Vec::with_capacity(raw.edges.len());
    for edge in raw.edges {
        if edge.weight <= 0.0 {
            continue;
        }
        if !words.contains_key(&edge.source) || !words.contains_key(&edge.target) {
            continue;
        }

        let pair = if edge.source <= edge.target {
            (edge.source.clone(), edge.target.clone())
        } else {
            (edge.target.clone(), edge.source.clone())
        };
        if seen_pairs.insert(pair) {
            edges.push((edge.source, edge.target, edge.weight));
        }
    }

    let mut members_by_id: HashMap<u32, Vec<String>> = HashMap::new();
    for (key, community_words) in raw.communities {
        let Some(id) = parse_community_key(&key) else {
            continue;
        };

        let members = members_by_id.entry(id).or_default();
        for word in community_words {
            if words.contains_key(&word) {
                members.push(word);
            }
        }
    }

    // The partition may omit words that arrived only on the node list.
    for record in words.values() {
        let members = members_by_id.entry(record.community_id).or_default();
        if !members.contains(&record.word) {
            members.push(record.word.clone());
        }
    }

    let mut communities = Vec::with_capacity(members_by_id.len());
    for (id, mut members) in members_by_id {
        members.sort_by(|a, b| {
            let freq_a = words.get(a).map(|record| record.frequency).unwrap_or(0);
            let freq_b = words.get(b).map(|record| record.frequency).unwrap_or(0);
            freq_b.cmp(&freq_a).then_with(|| a.cmp(b))
        });

        let label = raw
            .community_labels
            .get(&id.to_string())
            .map(|label| label.trim().to_owned())
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| format!("Community {id}"));

        communities.push(Community { id, label, members });
    }
    communities.sort_by_key(|community| community.id);

    WordGraph {
        words,
        edges,
        communities,
        modularity: raw.modularity,
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse::parse_analysis;
    use super::*;

    fn graph_from(raw: &str) -> WordGraph {
        build_word_graph(parse_analysis(raw).expect("payload parses"))
    }

    #[test]
    fn drops_edges_with_unknown_endpoints() {
        let graph = graph_from(
            r#"{
                "nodes": [
                    {"word": "a", "frequency": 4, "community_id": 0},
                    {"word": "b", "frequency": 2, "community_id": 0}
                ],
                "edges": [
                    {"source": "a", "target": "b", "weight": 2},
                    {"source": "a", "target": "ghost", "weight": 9}
                ]
            }"#,
        );

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges[0].0, "a");
        assert_eq!(graph.edges[0].1, "b");
    }

    #[test]
    fn orders_community_members_by_frequency() {
        let graph = graph_from(
            r#"{
                "nodes": [
                    {"word": "rare", "frequency": 1, "community_id": 2},
                    {"word": "common", "frequency": 30, "community_id": 2},
                    {"word": "middle", "frequency": 7, "community_id": 2}
                ],
                "edges": [],
                "communities": {"2": ["rare", "common", "middle"]}
            }"#,
        );

        let community = graph.community(2).expect("community exists");
        assert_eq!(community.members, vec!["common", "middle", "rare"]);
    }

    #[test]
    fn covers_words_missing_from_the_partition() {
        let graph = graph_from(
            r#"{
                "nodes": [{"word": "orphan", "frequency": 3, "community_id": 5}],
                "edges": [],
                "communities": {}
            }"#,
        );

        let community = graph.community(5).expect("community synthesized");
        assert_eq!(community.members, vec!["orphan"]);
        assert_eq!(community.label, "Community 5");
    }

    #[test]
    fn rename_in_place_keeps_membership() {
        let mut graph = graph_from(
            r#"{
                "nodes": [{"word": "cost", "frequency": 3, "community_id": 0}],
                "edges": [],
                "communities": {"0": ["cost"]}
            }"#,
        );

        graph.set_community_label(0, "Pricing".to_owned());
        assert_eq!(graph.community_label(0), "Pricing");
        assert_eq!(graph.community(0).expect("still present").members, vec!["cost"]);

        graph.set_community_label(0, "   ".to_owned());
        assert_eq!(graph.community_label(0), "Pricing");
    }
}
