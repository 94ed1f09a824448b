use eframe::egui::{self, Key, RichText, Ui};

use crate::util::format_count;

use super::super::highlight::toggle_community_filter;
use super::super::render_utils::community_color;
use super::super::{LabelEdit, ViewModel, ViewTab};

const LEGEND_MEMBER_PREVIEW: usize = 5;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("View");
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.active_view, ViewTab::Network, "Network");
            ui.selectable_value(&mut self.active_view, ViewTab::WordCloud, "Word cloud");
        });

        ui.add_space(8.0);
        ui.label("Search words");
        ui.add(egui::TextEdit::singleline(&mut self.search).hint_text("fuzzy match..."));

        ui.add_space(10.0);
        ui.separator();
        ui.heading("Communities");
        ui.add_space(4.0);
        ui.small("Click a community to filter the display; click again to clear.");
        ui.add_space(4.0);

        let community_rows = self
            .graph
            .communities
            .iter()
            .map(|community| {
                (
                    community.id,
                    community.label.clone(),
                    community.members.len(),
                    community
                        .members
                        .iter()
                        .take(LEGEND_MEMBER_PREVIEW)
                        .cloned()
                        .collect::<Vec<_>>(),
                )
            })
            .collect::<Vec<_>>();

        egui::ScrollArea::vertical()
            .id_salt("community_legend")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (community_id, label, member_count, preview) in community_rows {
                    let filtered = self.community_filter == Some(community_id);

                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new("●")
                                .color(community_color(community_id))
                                .size(14.0),
                        );

                        let text = format!("{label} ({})", format_count(member_count as u32));
                        if ui.selectable_label(filtered, text).clicked() {
                            toggle_community_filter(&mut self.community_filter, community_id);
                        }

                        if ui
                            .small_button("rename")
                            .on_hover_text("Rename the community; the layout is kept.")
                            .clicked()
                        {
                            self.label_edit = Some(LabelEdit {
                                community_id,
                                draft: label.clone(),
                            });
                        }
                    });

                    if self
                        .label_edit
                        .as_ref()
                        .is_some_and(|edit| edit.community_id == community_id)
                    {
                        self.draw_label_editor(ui, community_id);
                    }

                    if !preview.is_empty() {
                        ui.indent(("community_members", community_id), |ui| {
                            ui.small(preview.join(", "));
                        });
                    }
                    ui.add_space(4.0);
                }
            });
    }

    fn draw_label_editor(&mut self, ui: &mut Ui, community_id: u32) {
        let Some(edit) = self.label_edit.as_mut() else {
            return;
        };

        let mut commit = false;
        let mut cancel = false;
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut edit.draft).hint_text("community name"),
            );
            if response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter)) {
                commit = true;
            }
            if ui.small_button("save").clicked() {
                commit = true;
            }
            if ui.small_button("cancel").clicked() {
                cancel = true;
            }
        });

        if commit {
            let draft = edit.draft.clone();
            self.graph.set_community_label(community_id, draft);
            self.label_edit = None;
        } else if cancel {
            self.label_edit = None;
        }
    }
}
