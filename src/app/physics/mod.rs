mod forces;
mod quadtree;

use eframe::egui::Vec2;

use super::graph::Scene;
use forces::{CollisionParams, accumulate_charge_for_node, resolve_collision_pairs};
use quadtree::QuadNode;

const LINK_BASE_DISTANCE: f32 = 80.0;
const LINK_DISTANCE_REDUCTION: f32 = 40.0;
const CHARGE_STRENGTH: f32 = -350.0;
const CENTER_STRENGTH: f32 = 0.05;
const COLLISION_PADDING: f32 = 8.0;
const COLLISION_ITERATIONS: usize = 2;
const BARNES_HUT_THETA: f32 = 0.9;

const ALPHA_MIN: f32 = 0.001;
// Geometric decay reaching ALPHA_MIN in roughly MAX_TICKS steps.
const ALPHA_DECAY: f32 = 0.022_758;
const VELOCITY_RETENTION: f32 = 0.6;
const DRAG_ALPHA_TARGET: f32 = 0.3;
const MAX_TICKS: usize = 300;

/// Spring rest length shrinks as relative co-occurrence weight grows.
pub(in crate::app) fn link_target_distance(weight: f32, max_weight: f32) -> f32 {
    LINK_BASE_DISTANCE - (weight / max_weight.max(f32::EPSILON)) * LINK_DISTANCE_REDUCTION
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum TickOutcome {
    /// Already settled; nothing moved.
    Idle,
    Moved,
    /// Kinetic energy fell below the threshold or the tick budget ran out;
    /// emitted exactly once per relaxation.
    Settled,
}

#[derive(Default)]
struct PhysicsScratch {
    forces: Vec<Vec2>,
    positions: Vec<Vec2>,
    radii: Vec<f32>,
    pinned: Vec<bool>,
}

pub(in crate::app) struct Simulation {
    alpha: f32,
    alpha_target: f32,
    ticks: usize,
    settled: bool,
    scratch: PhysicsScratch,
}

impl Simulation {
    pub(in crate::app) fn new() -> Self {
        Self {
            alpha: 1.0,
            alpha_target: 0.0,
            ticks: 0,
            settled: false,
            scratch: PhysicsScratch::default(),
        }
    }

    pub(in crate::app) fn is_settled(&self) -> bool {
        self.settled
    }

    /// Nudges the simulation back to a warm energy target so drags get a live
    /// response; defers settling until `cool` is called.
    pub(in crate::app) fn reheat(&mut self) {
        self.alpha_target = DRAG_ALPHA_TARGET;
        self.alpha = self.alpha.max(DRAG_ALPHA_TARGET);
        self.ticks = 0;
        self.settled = false;
    }

    pub(in crate::app) fn cool(&mut self) {
        self.alpha_target = 0.0;
    }

    pub(in crate::app) fn step(&mut self, scene: &mut Scene) -> TickOutcome {
        if self.settled {
            return TickOutcome::Idle;
        }

        let node_count = scene.nodes.len();
        if node_count == 0 {
            self.settled = true;
            return TickOutcome::Settled;
        }

        self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY;

        let scratch = &mut self.scratch;
        scratch.forces.clear();
        scratch.forces.resize(node_count, Vec2::ZERO);
        scratch.positions.clear();
        scratch.radii.clear();
        scratch.pinned.clear();
        let mut max_effective_radius = 0.0_f32;
        for node in &scene.nodes {
            scratch.positions.push(node.pos);
            let effective = node.radius + COLLISION_PADDING;
            scratch.radii.push(effective);
            max_effective_radius = max_effective_radius.max(effective);
            scratch.pinned.push(node.pinned.is_some());
        }

        // Link attraction, displacement biased toward the lighter endpoint.
        for edge in &scene.edges {
            if edge.source == edge.target {
                continue;
            }

            let source = &scene.nodes[edge.source];
            let target = &scene.nodes[edge.target];
            let delta = (target.pos + target.velocity) - (source.pos + source.velocity);
            let distance = delta.length().max(0.001);
            let rest = link_target_distance(edge.weight, scene.max_weight);

            let source_degree = scene.neighbors[edge.source].len().max(1) as f32;
            let target_degree = scene.neighbors[edge.target].len().max(1) as f32;
            let strength = 1.0 / source_degree.min(target_degree);
            let bias = source_degree / (source_degree + target_degree);

            let correction = delta * (((distance - rest) / distance) * self.alpha * strength);
            scratch.forces[edge.target] -= correction * bias;
            scratch.forces[edge.source] += correction * (1.0 - bias);
        }

        // All-pairs charge repulsion, Barnes-Hut approximated. The negative
        // charge strength pushes nodes apart.
        if let Some(tree) = QuadNode::build(&scratch.positions) {
            let repulsion_alpha = -CHARGE_STRENGTH * self.alpha;
            for (index, force) in scratch.forces.iter_mut().enumerate() {
                accumulate_charge_for_node(
                    &tree,
                    index,
                    &scratch.positions,
                    repulsion_alpha,
                    BARNES_HUT_THETA,
                    force,
                );
            }
        }

        // Weak pull toward the canvas origin keeps the cloud from drifting.
        for (index, force) in scratch.forces.iter_mut().enumerate() {
            *force -= scene.nodes[index].pos * (CENTER_STRENGTH * self.alpha);
        }

        for (index, node) in scene.nodes.iter_mut().enumerate() {
            if let Some(pin) = node.pinned {
                node.pos = pin;
                node.velocity = Vec2::ZERO;
                scratch.positions[index] = pin;
                continue;
            }

            node.velocity = (node.velocity + scratch.forces[index]) * VELOCITY_RETENTION;
            node.pos += node.velocity;
            scratch.positions[index] = node.pos;
        }

        let max_pair_distance = max_effective_radius * 2.0;
        let params = CollisionParams {
            padding: COLLISION_PADDING,
            max_pair_distance_sq: max_pair_distance * max_pair_distance,
        };
        for _ in 0..COLLISION_ITERATIONS {
            let Some(tree) = QuadNode::build(&scratch.positions) else {
                break;
            };
            resolve_collision_pairs(
                &tree,
                &tree,
                true,
                &mut scratch.positions,
                &scratch.radii,
                &scratch.pinned,
                params,
            );
        }
        for (index, node) in scene.nodes.iter_mut().enumerate() {
            if node.pinned.is_none() {
                node.pos = scratch.positions[index];
            }
        }

        self.ticks += 1;
        let resting_target = self.alpha_target < ALPHA_MIN;
        if resting_target && (self.alpha < ALPHA_MIN || self.ticks >= MAX_TICKS) {
            self.settled = true;
            return TickOutcome::Settled;
        }

        TickOutcome::Moved
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::super::graph::build_scene;
    use super::super::graph::build::tests::sample_graph;
    use super::*;

    fn run_until_settled(simulation: &mut Simulation, scene: &mut Scene) -> usize {
        for tick in 0..1_000 {
            if simulation.step(scene) == TickOutcome::Settled {
                return tick + 1;
            }
        }
        panic!("simulation never settled");
    }

    #[test]
    fn link_target_distance_shrinks_with_weight() {
        assert!((link_target_distance(3.0, 3.0) - 40.0).abs() < 1e-4);
        assert!((link_target_distance(1.0, 3.0) - (80.0 - 40.0 / 3.0)).abs() < 1e-4);
    }

    #[test]
    fn settle_is_emitted_once_within_the_tick_budget() {
        let mut scene = build_scene(&sample_graph(
            &[("a", 10, 0), ("b", 5, 0), ("c", 1, 1)],
            &[("a", "b", 3.0), ("b", "c", 1.0)],
        ));
        let mut simulation = Simulation::new();

        let ticks = run_until_settled(&mut simulation, &mut scene);
        assert!(ticks <= MAX_TICKS);
        assert!(simulation.is_settled());
        assert_eq!(simulation.step(&mut scene), TickOutcome::Idle);
    }

    #[test]
    fn settled_nodes_respect_the_collision_invariant() {
        let mut scene = build_scene(&sample_graph(
            &[
                ("a", 10, 0),
                ("b", 8, 0),
                ("c", 6, 0),
                ("d", 4, 1),
                ("e", 2, 1),
                ("f", 1, 1),
            ],
            &[
                ("a", "b", 4.0),
                ("b", "c", 2.0),
                ("c", "d", 2.0),
                ("d", "e", 1.0),
                ("a", "f", 1.0),
            ],
        ));
        let mut simulation = Simulation::new();
        run_until_settled(&mut simulation, &mut scene);

        const TOLERANCE: f32 = 1.0;
        for i in 0..scene.nodes.len() {
            for j in (i + 1)..scene.nodes.len() {
                let distance = (scene.nodes[i].pos - scene.nodes[j].pos).length();
                let min_distance = scene.nodes[i].radius
                    + scene.nodes[j].radius
                    + (COLLISION_PADDING * 2.0);
                assert!(
                    distance >= min_distance - TOLERANCE,
                    "nodes {i} and {j} overlap: {distance} < {min_distance}"
                );
            }
        }
    }

    #[test]
    fn pinned_node_stays_fixed_across_ticks() {
        let mut scene = build_scene(&sample_graph(
            &[("a", 10, 0), ("b", 5, 0), ("c", 1, 0)],
            &[("a", "b", 3.0), ("b", "c", 1.0)],
        ));
        let pin = vec2(37.0, -18.0);
        let index = scene.node_index("b").expect("b present");
        scene.nodes[index].pinned = Some(pin);

        let mut simulation = Simulation::new();
        for _ in 0..60 {
            simulation.step(&mut scene);
            assert_eq!(scene.nodes[index].pos, pin);
        }

        scene.nodes[index].pinned = None;
        simulation.reheat();
        simulation.cool();
        for _ in 0..60 {
            simulation.step(&mut scene);
        }
        assert_ne!(scene.nodes[index].pos, pin);
    }

    #[test]
    fn reheat_defers_settling_until_cooled() {
        let mut scene = build_scene(&sample_graph(
            &[("a", 4, 0), ("b", 2, 0)],
            &[("a", "b", 1.0)],
        ));
        let mut simulation = Simulation::new();
        simulation.reheat();

        for _ in 0..(MAX_TICKS * 2) {
            assert_ne!(simulation.step(&mut scene), TickOutcome::Settled);
        }

        simulation.cool();
        run_until_settled(&mut simulation, &mut scene);
    }

    #[test]
    fn empty_scene_settles_immediately() {
        let mut scene = build_scene(&sample_graph(&[], &[]));
        let mut simulation = Simulation::new();
        assert_eq!(simulation.step(&mut scene), TickOutcome::Settled);
    }
}
