use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::ViewModel;
use super::super::highlight::display_state;
use super::super::physics::TickOutcome;
use super::super::render_utils::{
    circle_visible, community_color, draw_background, fade, world_to_screen,
};

impl ViewModel {
    fn search_matches(&self) -> Option<HashSet<usize>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .scene
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                matcher
                    .fuzzy_match(&node.word, query)
                    .or_else(|| {
                        matcher.fuzzy_match(&node.word.to_lowercase(), &query.to_lowercase())
                    })
                    .map(|_| index)
            })
            .collect::<HashSet<_>>();

        Some(matches)
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.viewport.transform());

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        let now = ui.input(|input| input.time);
        if self.viewport.animate(now) {
            ui.ctx().request_repaint();
        }

        // One relaxation step per frame; fit-to-view runs on the one-shot
        // settle outcome, never while a drag keeps the simulation warm.
        match self.simulation.step(&mut self.scene) {
            TickOutcome::Moved => {
                ui.ctx().request_repaint();
            }
            TickOutcome::Settled => {
                self.viewport.request_fit(&self.scene.nodes, rect.size(), now);
                ui.ctx().request_repaint();
            }
            TickOutcome::Idle => {}
        }

        let transform = self.viewport.transform();
        let screen_positions = self
            .scene
            .nodes
            .iter()
            .map(|node| world_to_screen(rect, transform, node.pos))
            .collect::<Vec<_>>();
        let screen_radii = self
            .scene
            .nodes
            .iter()
            .map(|node| node.radius * transform.zoom)
            .collect::<Vec<_>>();

        let hovered = Self::hovered_index(ui, &screen_positions, &screen_radii);
        let pointer = ui.input(|input| input.pointer.hover_pos());
        self.update_focus(rect, &response, pointer, hovered);

        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let display = display_state(&self.scene, self.focus, self.community_filter);
        // Match emphasis yields to an active hover or drag.
        let search_matches = if self.focus.node().is_none() {
            self.search_matches()
        } else {
            None
        };

        for (index, edge) in self.scene.edges.iter().enumerate() {
            if edge.source == edge.target {
                continue;
            }

            let start = screen_positions[edge.source];
            let end = screen_positions[edge.target];
            let width =
                ((1.0 + (edge.weight / self.scene.max_weight) * 2.5) * transform.zoom.sqrt())
                    .clamp(0.5, 6.0);
            let color = fade(Color32::from_gray(150), display.edge_opacity[index]);
            painter.line_segment([start, end], Stroke::new(width, color));
        }

        // Frequent words draw last so they stay on top.
        let mut draw_order = (0..self.scene.nodes.len()).collect::<Vec<_>>();
        draw_order.sort_by_key(|&index| self.scene.nodes[index].frequency);

        let focused = self.focus.node();
        for index in draw_order {
            let position = screen_positions[index];
            let radius = screen_radii[index];
            if !circle_visible(rect, position, radius) {
                continue;
            }

            let node = &self.scene.nodes[index];
            let opacity = display.node_opacity[index];
            let is_selected = self.selected.as_deref() == Some(node.word.as_str());
            let is_match = search_matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&index));

            painter.circle_filled(position, radius, fade(community_color(node.community_id), opacity));
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(1.0, fade(Color32::from_rgba_unmultiplied(15, 15, 15, 190), opacity)),
            );

            if is_selected {
                painter.circle_stroke(
                    position,
                    radius + 3.0,
                    Stroke::new(2.0, Color32::from_rgb(245, 206, 93)),
                );
            } else if is_match {
                painter.circle_stroke(
                    position,
                    radius + 3.0,
                    Stroke::new(1.6, Color32::from_rgb(103, 196, 255)),
                );
            }

            let should_label = focused == Some(index)
                || is_selected
                || is_match
                || (opacity > 0.5 && (radius > 14.0 || transform.zoom > 1.3));
            if should_label {
                painter.text(
                    position + vec2(radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    node.word.as_str(),
                    FontId::proportional(12.0),
                    fade(Color32::from_gray(238), opacity.max(0.6)),
                );
            }
        }

        if let Some(index) = focused {
            let node = &self.scene.nodes[index];
            let strip = format!(
                "{}  |  {} occurrences  |  {}",
                node.word,
                crate::util::format_count(node.frequency),
                self.graph.community_label(node.community_id),
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                strip,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if response.clicked_by(egui::PointerButton::Primary) {
            let clicked_word = hovered.map(|index| self.scene.nodes[index].word.clone());
            self.set_selected(clicked_word);
        }
    }
}
