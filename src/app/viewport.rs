use eframe::egui::{Vec2, vec2};

use super::graph::SceneNode;

pub(in crate::app) const ZOOM_MIN: f32 = 0.3;
pub(in crate::app) const ZOOM_MAX: f32 = 5.0;
const FIT_MAX_SCALE: f32 = 2.0;
const FIT_PADDING: f32 = 40.0;
const FIT_DURATION_SECS: f64 = 0.75;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct ViewTransform {
    pub(in crate::app) pan: Vec2,
    pub(in crate::app) zoom: f32,
}

struct FitAnimation {
    from: ViewTransform,
    to: ViewTransform,
    started_at: f64,
}

pub(in crate::app) struct Viewport {
    transform: ViewTransform,
    fit: Option<FitAnimation>,
}

fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let back = -2.0 * t + 2.0;
        1.0 - (back * back * back) / 2.0
    }
}

/// Frames every node (center ± radius) inside the canvas with fixed padding.
/// Degenerate geometries are skipped: fewer than two nodes or a collapsed
/// bounding box yield no transform.
pub(in crate::app) fn fit_transform(nodes: &[SceneNode], canvas: Vec2) -> Option<ViewTransform> {
    if nodes.len() < 2 {
        return None;
    }

    let mut min = vec2(f32::INFINITY, f32::INFINITY);
    let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
    for node in nodes {
        min.x = min.x.min(node.pos.x - node.radius);
        min.y = min.y.min(node.pos.y - node.radius);
        max.x = max.x.max(node.pos.x + node.radius);
        max.y = max.y.max(node.pos.y + node.radius);
    }

    let box_size = max - min;
    if !box_size.x.is_finite() || !box_size.y.is_finite() || box_size.x <= 0.0 || box_size.y <= 0.0
    {
        return None;
    }

    let available = canvas - vec2(FIT_PADDING * 2.0, FIT_PADDING * 2.0);
    if available.x <= 0.0 || available.y <= 0.0 {
        return None;
    }

    let zoom = (available.x / box_size.x)
        .min(available.y / box_size.y)
        .min(FIT_MAX_SCALE)
        .clamp(ZOOM_MIN, ZOOM_MAX);

    let center = (min + max) * 0.5;
    Some(ViewTransform {
        pan: -center * zoom,
        zoom,
    })
}

impl Viewport {
    pub(in crate::app) fn new() -> Self {
        Self {
            transform: ViewTransform {
                pan: Vec2::ZERO,
                zoom: 1.0,
            },
            fit: None,
        }
    }

    pub(in crate::app) fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub(in crate::app) fn pan_by(&mut self, delta: Vec2) {
        self.fit = None;
        self.transform.pan += delta;
    }

    /// Zoom about a screen-space anchor, keeping the world point under the
    /// cursor fixed. `anchor` is relative to the canvas center.
    pub(in crate::app) fn zoom_about(&mut self, anchor: Vec2, factor: f32) {
        self.fit = None;
        let old = self.transform;
        let world_before = (anchor - old.pan) / old.zoom;
        self.transform.zoom = (old.zoom * factor).clamp(ZOOM_MIN, ZOOM_MAX);
        self.transform.pan = anchor - world_before * self.transform.zoom;
    }

    /// Starts a fit animation; runs on simulation settle, never mid-drag.
    pub(in crate::app) fn request_fit(&mut self, nodes: &[SceneNode], canvas: Vec2, now: f64) {
        let Some(target) = fit_transform(nodes, canvas) else {
            return;
        };

        self.fit = Some(FitAnimation {
            from: self.transform,
            to: target,
            started_at: now,
        });
    }

    /// Advances the pending fit animation; true while still animating.
    pub(in crate::app) fn animate(&mut self, now: f64) -> bool {
        let Some(fit) = &self.fit else {
            return false;
        };

        let progress = ((now - fit.started_at) / FIT_DURATION_SECS).clamp(0.0, 1.0) as f32;
        let eased = ease_in_out_cubic(progress);
        self.transform = ViewTransform {
            pan: fit.from.pan + (fit.to.pan - fit.from.pan) * eased,
            zoom: fit.from.zoom + (fit.to.zoom - fit.from.zoom) * eased,
        };

        if progress >= 1.0 {
            self.fit = None;
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_at(x: f32, y: f32, radius: f32) -> SceneNode {
        SceneNode {
            word: String::new(),
            frequency: 1,
            community_id: 0,
            radius,
            pos: vec2(x, y),
            velocity: Vec2::ZERO,
            pinned: None,
        }
    }

    #[test]
    fn fit_skips_single_node() {
        let nodes = vec![node_at(0.0, 0.0, 10.0)];
        assert!(fit_transform(&nodes, vec2(800.0, 600.0)).is_none());
    }

    #[test]
    fn fit_skips_empty_scene_and_tiny_canvas() {
        assert!(fit_transform(&[], vec2(800.0, 600.0)).is_none());

        let nodes = vec![node_at(-50.0, 0.0, 10.0), node_at(50.0, 0.0, 10.0)];
        assert!(fit_transform(&nodes, vec2(60.0, 60.0)).is_none());
    }

    #[test]
    fn fit_frames_the_bounding_box_with_padding() {
        // Box spans x in [-60, 60], y in [-10, 10].
        let nodes = vec![node_at(-50.0, 0.0, 10.0), node_at(50.0, 0.0, 10.0)];
        let transform = fit_transform(&nodes, vec2(1000.0, 600.0)).expect("fit applies");

        // Width-limited: (1000 - 80) / 120 > 2, so the auto-scale cap wins.
        assert!((transform.zoom - 2.0).abs() < 1e-4);
        assert_eq!(transform.pan, Vec2::ZERO);
    }

    #[test]
    fn fit_scale_is_clamped_to_the_zoom_range() {
        let nodes = vec![
            node_at(-10_000.0, 0.0, 10.0),
            node_at(10_000.0, 0.0, 10.0),
        ];
        let transform = fit_transform(&nodes, vec2(800.0, 600.0)).expect("fit applies");
        assert!(transform.zoom >= ZOOM_MIN);
    }

    #[test]
    fn zoom_about_keeps_the_anchor_fixed_and_clamps() {
        let mut viewport = Viewport::new();
        let anchor = vec2(120.0, -40.0);
        let world_before = (anchor - viewport.transform().pan) / viewport.transform().zoom;

        viewport.zoom_about(anchor, 1.5);
        let transform = viewport.transform();
        let world_after = (anchor - transform.pan) / transform.zoom;
        assert!((world_after - world_before).length() < 1e-3);

        for _ in 0..20 {
            viewport.zoom_about(anchor, 10.0);
        }
        assert!((viewport.transform().zoom - ZOOM_MAX).abs() < 1e-4);

        for _ in 0..40 {
            viewport.zoom_about(anchor, 0.01);
        }
        assert!((viewport.transform().zoom - ZOOM_MIN).abs() < 1e-4);
    }

    #[test]
    fn fit_animation_converges_to_the_target() {
        let mut viewport = Viewport::new();
        let nodes = vec![node_at(-50.0, 40.0, 10.0), node_at(150.0, 0.0, 10.0)];
        let target = fit_transform(&nodes, vec2(800.0, 600.0)).expect("fit applies");

        viewport.request_fit(&nodes, vec2(800.0, 600.0), 10.0);
        assert!(viewport.animate(10.2));
        assert!(!viewport.animate(10.8));

        let end = viewport.transform();
        assert!((end.pan - target.pan).length() < 1e-3);
        assert!((end.zoom - target.zoom).abs() < 1e-4);
    }

    #[test]
    fn manual_input_cancels_a_pending_fit() {
        let mut viewport = Viewport::new();
        let nodes = vec![node_at(-50.0, 0.0, 10.0), node_at(50.0, 0.0, 10.0)];
        viewport.request_fit(&nodes, vec2(800.0, 600.0), 0.0);
        viewport.pan_by(vec2(5.0, 0.0));
        assert!(!viewport.animate(0.1));
    }
}
