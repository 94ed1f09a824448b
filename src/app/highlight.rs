use super::graph::Scene;

const DIMMED_NODE_OPACITY: f32 = 0.15;
const DEFAULT_EDGE_OPACITY: f32 = 0.45;
const HIDDEN_EDGE_OPACITY: f32 = 0.05;
const MIN_FOCUSED_EDGE_OPACITY: f32 = 0.25;

/// Node-focus dimension of the interaction state machine. The community
/// filter is an independent dimension kept alongside it; hover transiently
/// overrides the filtered display and releasing the hover restores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum Focus {
    Idle,
    Hovering(usize),
    Dragging(usize),
}

impl Focus {
    pub(in crate::app) fn node(self) -> Option<usize> {
        match self {
            Focus::Idle => None,
            Focus::Hovering(index) | Focus::Dragging(index) => Some(index),
        }
    }
}

pub(in crate::app) struct DisplayState {
    pub(in crate::app) node_opacity: Vec<f32>,
    pub(in crate::app) edge_opacity: Vec<f32>,
}

/// Toggles the legend filter; selecting the active community returns to the
/// unfiltered display.
pub(in crate::app) fn toggle_community_filter(filter: &mut Option<u32>, community_id: u32) {
    if *filter == Some(community_id) {
        *filter = None;
    } else {
        *filter = Some(community_id);
    }
}

/// Derives per-frame opacities from the focus state and community filter.
/// Pure over the scene, so leaving a state restores the previous display
/// without bookkeeping.
pub(in crate::app) fn display_state(
    scene: &Scene,
    focus: Focus,
    community_filter: Option<u32>,
) -> DisplayState {
    if let Some(focused) = focus.node() {
        return focused_display(scene, focused);
    }

    if let Some(community_id) = community_filter {
        return filtered_display(scene, community_id);
    }

    DisplayState {
        node_opacity: vec![1.0; scene.nodes.len()],
        edge_opacity: vec![DEFAULT_EDGE_OPACITY; scene.edges.len()],
    }
}

fn focused_display(scene: &Scene, focused: usize) -> DisplayState {
    let mut node_opacity = vec![DIMMED_NODE_OPACITY; scene.nodes.len()];
    if let Some(opacity) = node_opacity.get_mut(focused) {
        *opacity = 1.0;
    }
    for &neighbor in &scene.neighbors[focused] {
        node_opacity[neighbor] = 1.0;
    }

    let mut edge_opacity = vec![HIDDEN_EDGE_OPACITY; scene.edges.len()];
    for &edge_index in &scene.incident_edges[focused] {
        let weight = scene.edges[edge_index].weight;
        edge_opacity[edge_index] =
            (weight / scene.max_weight).clamp(MIN_FOCUSED_EDGE_OPACITY, 1.0);
    }

    DisplayState {
        node_opacity,
        edge_opacity,
    }
}

fn filtered_display(scene: &Scene, community_id: u32) -> DisplayState {
    let node_opacity = scene
        .nodes
        .iter()
        .map(|node| {
            if node.community_id == community_id {
                1.0
            } else {
                DIMMED_NODE_OPACITY
            }
        })
        .collect::<Vec<_>>();

    let edge_opacity = scene
        .edges
        .iter()
        .map(|edge| {
            let source_in = scene.nodes[edge.source].community_id == community_id;
            let target_in = scene.nodes[edge.target].community_id == community_id;
            if source_in && target_in {
                DEFAULT_EDGE_OPACITY
            } else {
                HIDDEN_EDGE_OPACITY
            }
        })
        .collect::<Vec<_>>();

    DisplayState {
        node_opacity,
        edge_opacity,
    }
}

#[cfg(test)]
mod tests {
    use super::super::graph::build::tests::sample_graph;
    use super::super::graph::build_scene;
    use super::*;

    fn hover_scene() -> Scene {
        build_scene(&sample_graph(
            &[("n", 10, 0), ("a", 5, 0), ("b", 4, 1), ("c", 2, 1)],
            &[("n", "a", 3.0), ("n", "b", 1.0), ("a", "b", 2.0)],
        ))
    }

    #[test]
    fn hover_highlights_the_closed_neighborhood() {
        let scene = hover_scene();
        let focused = scene.node_index("n").unwrap();
        let state = display_state(&scene, Focus::Hovering(focused), None);

        let opacity_of = |word: &str| state.node_opacity[scene.node_index(word).unwrap()];
        assert_eq!(opacity_of("n"), 1.0);
        assert_eq!(opacity_of("a"), 1.0);
        assert_eq!(opacity_of("b"), 1.0);
        assert_eq!(opacity_of("c"), 0.15);
    }

    #[test]
    fn hover_scales_incident_edges_by_relative_weight() {
        let scene = hover_scene();
        let focused = scene.node_index("n").unwrap();
        let state = display_state(&scene, Focus::Hovering(focused), None);

        for (index, edge) in scene.edges.iter().enumerate() {
            if edge.source == focused || edge.target == focused {
                let expected = (edge.weight / scene.max_weight).clamp(0.25, 1.0);
                assert!((state.edge_opacity[index] - expected).abs() < 1e-6);
            } else {
                assert!(state.edge_opacity[index] <= 0.05);
            }
        }
    }

    #[test]
    fn hover_exit_restores_the_filtered_display() {
        let scene = hover_scene();
        let focused = scene.node_index("c").unwrap();
        let filter = Some(0);

        // While hovering, the neighborhood wins even over the filter.
        let hovering = display_state(&scene, Focus::Hovering(focused), filter);
        assert_eq!(hovering.node_opacity[focused], 1.0);

        let restored = display_state(&scene, Focus::Idle, filter);
        let opacity_of = |word: &str| restored.node_opacity[scene.node_index(word).unwrap()];
        assert_eq!(opacity_of("n"), 1.0);
        assert_eq!(opacity_of("a"), 1.0);
        assert_eq!(opacity_of("b"), 0.15);
        assert_eq!(opacity_of("c"), 0.15);
    }

    #[test]
    fn community_filter_toggle_is_idempotent() {
        let mut filter = None;
        toggle_community_filter(&mut filter, 2);
        assert_eq!(filter, Some(2));
        toggle_community_filter(&mut filter, 2);
        assert_eq!(filter, None);

        toggle_community_filter(&mut filter, 2);
        toggle_community_filter(&mut filter, 3);
        assert_eq!(filter, Some(3));
    }

    #[test]
    fn idle_without_filter_shows_everything() {
        let scene = hover_scene();
        let state = display_state(&scene, Focus::Idle, None);
        assert!(state.node_opacity.iter().all(|&opacity| opacity == 1.0));
        assert!(state.edge_opacity.iter().all(|&opacity| opacity == 0.45));
    }
}
