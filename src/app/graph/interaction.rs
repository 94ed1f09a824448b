use eframe::egui::{self, Pos2, Rect, Ui};

use super::super::ViewModel;
use super::super::highlight::Focus;
use super::super::render_utils::screen_to_world;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.viewport.zoom_about(pointer - rect.center(), factor);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.viewport.pan_by(response.drag_delta());
        }
    }

    pub(in crate::app) fn hovered_index(
        ui: &Ui,
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        screen_positions
            .iter()
            .enumerate()
            .filter_map(|(index, position)| {
                let distance = position.distance(pointer);
                let reach = screen_radii[index].max(3.0);
                (distance <= reach).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    /// Advances the node-focus state machine for one frame. Only this code
    /// writes `pinned`; the simulation owns unpinned positions.
    pub(in crate::app) fn update_focus(
        &mut self,
        rect: Rect,
        response: &egui::Response,
        pointer: Option<Pos2>,
        hovered: Option<usize>,
    ) {
        if let Focus::Dragging(index) = self.focus {
            let released = response.drag_stopped_by(egui::PointerButton::Primary)
                || !response.dragged_by(egui::PointerButton::Primary);

            if released {
                if let Some(node) = self.scene.nodes.get_mut(index) {
                    node.pinned = None;
                }
                self.simulation.cool();
                self.focus = match hovered {
                    Some(hovered_index) => Focus::Hovering(hovered_index),
                    None => Focus::Idle,
                };
                return;
            }

            if let Some(pointer) = pointer
                && let Some(node) = self.scene.nodes.get_mut(index)
            {
                node.pinned = Some(screen_to_world(rect, self.viewport.transform(), pointer));
            }
            return;
        }

        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(index) = hovered
        {
            self.focus = Focus::Dragging(index);
            self.simulation.reheat();
            if let (Some(pointer), Some(node)) = (pointer, self.scene.nodes.get_mut(index)) {
                node.pinned = Some(screen_to_world(rect, self.viewport.transform(), pointer));
            }
            return;
        }

        self.focus = match hovered {
            Some(index) => Focus::Hovering(index),
            None => Focus::Idle,
        };
    }
}
