use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};

use crate::analysis::WordGraph;
use crate::util::stable_pair;

use super::{Scene, SceneEdge, SceneNode};

const MIN_RADIUS: f32 = 10.0;
const RADIUS_SPAN: f32 = 22.0;
const INITIAL_SPREAD: f32 = 120.0;

pub(in crate::app) fn node_radius(frequency: u32, max_frequency: u32) -> f32 {
    MIN_RADIUS + (frequency as f32 / max_frequency.max(1) as f32) * RADIUS_SPAN
}

fn initial_position(word: &str, index: usize) -> Vec2 {
    let (jx, jy) = stable_pair(word);
    let mut direction = vec2(jx, jy);
    if direction.length_sq() <= 0.0001 {
        let angle = ((index as f32) * 0.618_034 + 0.11) * std::f32::consts::TAU;
        direction = vec2(angle.cos(), angle.sin());
    }
    direction * INITIAL_SPREAD
}

/// Builds the render scene from a normalized analysis result. Pure: ordering
/// follows the node list sorted by word, edges referencing unknown words are
/// dropped silently.
pub(in crate::app) fn build_scene(graph: &WordGraph) -> Scene {
    let mut ordered = graph.words.values().collect::<Vec<_>>();
    ordered.sort_by(|a, b| a.word.cmp(&b.word));

    let max_frequency = ordered
        .iter()
        .map(|record| record.frequency)
        .max()
        .unwrap_or(1)
        .max(1);

    let mut index_by_word = HashMap::with_capacity(ordered.len());
    let mut nodes = Vec::with_capacity(ordered.len());
    for (index, record) in ordered.iter().enumerate() {
        index_by_word.insert(record.word.clone(), index);
        nodes.push(SceneNode {
            word: record.word.clone(),
            frequency: record.frequency,
            community_id: record.community_id,
            radius: node_radius(record.frequency, max_frequency),
            pos: initial_position(&record.word, index),
            velocity: Vec2::ZERO,
            pinned: None,
        });
    }

    let mut edges = Vec::with_capacity(graph.edge_count());
    let mut max_weight = 0.0_f32;
    for (source_word, target_word, weight) in &graph.edges {
        let (Some(&source), Some(&target)) = (
            index_by_word.get(source_word),
            index_by_word.get(target_word),
        ) else {
            continue;
        };

        max_weight = max_weight.max(*weight);
        edges.push(SceneEdge {
            source,
            target,
            weight: *weight,
        });
    }

    let mut neighbors = vec![Vec::new(); nodes.len()];
    let mut incident_edges = vec![Vec::new(); nodes.len()];
    for (edge_index, edge) in edges.iter().enumerate() {
        if edge.source == edge.target {
            incident_edges[edge.source].push(edge_index);
            continue;
        }

        neighbors[edge.source].push(edge.target);
        neighbors[edge.target].push(edge.source);
        incident_edges[edge.source].push(edge_index);
        incident_edges[edge.target].push(edge_index);
    }

    Scene {
        nodes,
        edges,
        index_by_word,
        neighbors,
        incident_edges,
        max_weight: max_weight.max(1.0),
    }
}

#[cfg(test)]
pub(in crate::app) mod tests {
    use std::collections::HashMap;

    use crate::analysis::{Community, WordGraph, WordRecord};

    use super::*;

    pub(in crate::app) fn sample_graph(
        nodes: &[(&str, u32, u32)],
        edges: &[(&str, &str, f32)],
    ) -> WordGraph {
        let mut words = HashMap::new();
        for (word, frequency, community_id) in nodes {
            words.insert(
                (*word).to_owned(),
                WordRecord {
                    word: (*word).to_owned(),
                    frequency: *frequency,
                    degree_centrality: 0.0,
                    betweenness_centrality: 0.0,
                    community_id: *community_id,
                },
            );
        }

        let mut community_ids = words
            .values()
            .map(|record| record.community_id)
            .collect::<Vec<_>>();
        community_ids.sort_unstable();
        community_ids.dedup();

        WordGraph {
            communities: community_ids
                .into_iter()
                .map(|id| Community {
                    id,
                    label: format!("Community {id}"),
                    members: Vec::new(),
                })
                .collect(),
            words,
            edges: edges
                .iter()
                .map(|(source, target, weight)| {
                    ((*source).to_owned(), (*target).to_owned(), *weight)
                })
                .collect(),
            modularity: 0.0,
        }
    }

    #[test]
    fn radius_interpolates_between_min_and_span() {
        let scene = build_scene(&sample_graph(
            &[("a", 10, 0), ("b", 5, 0), ("c", 1, 0)],
            &[("a", "b", 3.0), ("b", "c", 1.0)],
        ));

        let radius_of = |word: &str| {
            let index = scene.node_index(word).expect("word present");
            scene.nodes[index].radius
        };

        assert!((radius_of("a") - 32.0).abs() < 1e-4);
        assert!((radius_of("b") - 21.0).abs() < 1e-4);
        assert!((radius_of("c") - 12.2).abs() < 1e-4);
    }

    #[test]
    fn single_node_avoids_division_by_zero() {
        let scene = build_scene(&sample_graph(&[("only", 0, 0)], &[]));
        assert!(scene.nodes[0].radius.is_finite());
    }

    #[test]
    fn dangling_edges_are_dropped_silently() {
        let scene = build_scene(&sample_graph(
            &[("a", 3, 0), ("b", 2, 0)],
            &[("a", "b", 1.0), ("a", "missing", 5.0)],
        ));

        assert_eq!(scene.edges.len(), 1);
        assert_eq!(scene.neighbors[scene.node_index("a").unwrap()].len(), 1);
    }

    #[test]
    fn initial_positions_are_deterministic_and_spread() {
        let graph = sample_graph(&[("a", 3, 0), ("b", 2, 0), ("c", 1, 0)], &[]);
        let first = build_scene(&graph);
        let second = build_scene(&graph);

        for (left, right) in first.nodes.iter().zip(second.nodes.iter()) {
            assert_eq!(left.pos, right.pos);
            assert!(left.pos.length() > 1.0);
        }
    }
}
