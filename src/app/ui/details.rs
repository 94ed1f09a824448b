use eframe::egui::{self, RichText, Ui};

use crate::util::format_count;

use super::super::ViewModel;
use super::super::render_utils::community_color;

const MAX_COOCCURRENCE_ROWS: usize = 20;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Word details");
        ui.add_space(6.0);

        let Some(selected_word) = self.selected.clone() else {
            ui.label("Select a word in the network view.");
            return;
        };

        let Some(record) = self.graph.words.get(&selected_word) else {
            ui.label("The selected word is not part of the current analysis.");
            return;
        };

        let frequency = record.frequency;
        let degree_centrality = record.degree_centrality;
        let betweenness_centrality = record.betweenness_centrality;
        let community_id = record.community_id;
        let community_label = self.graph.community_label(community_id);

        ui.label(RichText::new(&selected_word).strong().size(18.0));
        ui.add_space(6.0);
        ui.label(format!("Occurrences: {}", format_count(frequency)));
        ui.horizontal(|ui| {
            ui.label("Community:");
            ui.label(
                RichText::new(format!("● {community_label}"))
                    .color(community_color(community_id)),
            );
        });
        ui.label(format!("Degree centrality: {degree_centrality:.3}"));
        ui.label(format!("Betweenness centrality: {betweenness_centrality:.3}"));

        ui.separator();
        ui.label(RichText::new("Strongest co-occurrences").strong());

        let neighbors = self.strongest_cooccurrences(&selected_word);
        if neighbors.is_empty() {
            ui.label("No co-occurring words above the analysis threshold.");
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt("cooccurrence_rows")
            .max_height(360.0)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (word, weight) in neighbors {
                    let label = format!("{word}  (weight {weight})");
                    if ui.link(label).clicked() {
                        self.set_selected(Some(word));
                    }
                }
            });
    }

    fn strongest_cooccurrences(&self, word: &str) -> Vec<(String, f32)> {
        let Some(index) = self.scene.node_index(word) else {
            return Vec::new();
        };

        let mut rows = self.scene.incident_edges[index]
            .iter()
            .filter_map(|&edge_index| {
                let edge = &self.scene.edges[edge_index];
                let other = if edge.source == index {
                    edge.target
                } else {
                    edge.source
                };
                if other == index {
                    return None;
                }
                Some((self.scene.nodes[other].word.clone(), edge.weight))
            })
            .collect::<Vec<_>>();

        rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        rows.truncate(MAX_COOCCURRENCE_ROWS);
        rows
    }
}
