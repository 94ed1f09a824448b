use eframe::egui::{Vec2, vec2};

use super::quadtree::QuadNode;

#[derive(Clone, Copy)]
pub(super) struct CollisionParams {
    pub(super) padding: f32,
    pub(super) max_pair_distance_sq: f32,
}

fn separation_direction(from: usize, to: usize, delta: Vec2, distance: f32) -> Vec2 {
    if distance > 0.0001 {
        delta / distance
    } else {
        // Coincident nodes separate along a stable index-derived angle.
        let angle =
            ((from as f32) * 0.618_034 + (to as f32) * 0.414_214) * std::f32::consts::TAU;
        vec2(angle.cos(), angle.sin())
    }
}

/// Accumulates inverse-distance charge repulsion on one node, approximating
/// far clusters by their center of mass.
pub(super) fn accumulate_charge_for_node(
    node: &QuadNode,
    index: usize,
    positions: &[Vec2],
    repulsion_alpha: f32,
    theta: f32,
    force: &mut Vec2,
) {
    if node.mass <= 0.0 {
        return;
    }

    let point = positions[index];

    if node.is_leaf() {
        for &other_index in &node.indices {
            if other_index == index {
                continue;
            }

            let delta = point - positions[other_index];
            let distance_sq = delta.length_sq().max(1.0);
            *force += delta * (repulsion_alpha / distance_sq);
        }
        return;
    }

    let delta = point - node.center_of_mass;
    let distance_sq = delta.length_sq().max(1.0);
    let distance = distance_sq.sqrt();
    let can_approximate = !node.bounds.contains(point)
        && ((node.bounds.side_length() / distance) < theta)
        && node.mass > 1.0;

    if can_approximate {
        *force += delta * ((repulsion_alpha * node.mass) / distance_sq);
        return;
    }

    for child in &node.children {
        if let Some(child) = child.as_ref() {
            accumulate_charge_for_node(child, index, positions, repulsion_alpha, theta, force);
        }
    }
}

fn resolve_pair(
    from: usize,
    to: usize,
    positions: &mut [Vec2],
    radii: &[f32],
    pinned: &[bool],
    padding: f32,
) {
    if pinned[from] && pinned[to] {
        return;
    }

    let delta = positions[from] - positions[to];
    let distance = delta.length();
    let min_distance = radii[from] + radii[to] + (padding * 2.0);
    if distance >= min_distance {
        return;
    }

    let direction = separation_direction(from, to, delta, distance);
    let overlap = min_distance - distance;

    if pinned[from] {
        positions[to] -= direction * overlap;
    } else if pinned[to] {
        positions[from] += direction * overlap;
    } else {
        positions[from] += direction * (overlap * 0.5);
        positions[to] -= direction * (overlap * 0.5);
    }
}

/// Hard non-overlap resolution over quadtree leaf pairs; positions are
/// displaced directly, pinned nodes never move.
pub(super) fn resolve_collision_pairs(
    node_a: &QuadNode,
    node_b: &QuadNode,
    same_node: bool,
    positions: &mut [Vec2],
    radii: &[f32],
    pinned: &[bool],
    params: CollisionParams,
) {
    if node_a.bounds.distance_sq_to(node_b.bounds) > params.max_pair_distance_sq {
        return;
    }

    if node_a.is_leaf() && node_b.is_leaf() {
        if same_node {
            for i in 0..node_a.indices.len() {
                let from = node_a.indices[i];
                for j in (i + 1)..node_a.indices.len() {
                    resolve_pair(from, node_a.indices[j], positions, radii, pinned, params.padding);
                }
            }
        } else {
            for &from in &node_a.indices {
                for &to in &node_b.indices {
                    resolve_pair(from, to, positions, radii, pinned, params.padding);
                }
            }
        }
        return;
    }

    if same_node {
        for first in 0..4 {
            let Some(child_a) = node_a.children[first].as_ref() else {
                continue;
            };

            resolve_collision_pairs(child_a, child_a, true, positions, radii, pinned, params);

            for second in (first + 1)..4 {
                let Some(child_b) = node_a.children[second].as_ref() else {
                    continue;
                };
                resolve_collision_pairs(child_a, child_b, false, positions, radii, pinned, params);
            }
        }
        return;
    }

    let split_a = if node_a.is_leaf() {
        false
    } else if node_b.is_leaf() {
        true
    } else {
        node_a.bounds.half_extent >= node_b.bounds.half_extent
    };

    if split_a {
        for child in &node_a.children {
            let Some(child) = child.as_ref() else {
                continue;
            };
            resolve_collision_pairs(child, node_b, false, positions, radii, pinned, params);
        }
    } else {
        for child in &node_b.children {
            let Some(child) = child.as_ref() else {
                continue;
            };
            resolve_collision_pairs(node_a, child, false, positions, radii, pinned, params);
        }
    }
}
