use std::path::Path;

use eframe::egui::{self, Align, Context, Layout};

use crate::analysis::WordGraph;
use crate::util::format_count;

use super::super::graph::build_scene;
use super::super::highlight::Focus;
use super::super::physics::Simulation;
use super::super::viewport::Viewport;
use super::super::{ViewModel, ViewTab};

impl ViewModel {
    pub(in crate::app) fn new(graph: WordGraph) -> Self {
        let scene = build_scene(&graph);
        Self {
            graph,
            scene,
            simulation: Simulation::new(),
            viewport: Viewport::new(),
            focus: Focus::Idle,
            community_filter: None,
            selected: None,
            search: String::new(),
            active_view: ViewTab::Network,
            label_edit: None,
            cloud_cache: None,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        input_path: &Path,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("cooc-viz");
                    ui.separator();
                    if let Some(file_name) = input_path.file_name() {
                        ui.label(file_name.to_string_lossy());
                    }
                    ui.label(format!(
                        "words: {}",
                        format_count(self.graph.word_count() as u32)
                    ));
                    ui.label(format!(
                        "co-occurrences: {}",
                        format_count(self.graph.edge_count() as u32)
                    ));
                    ui.label(format!("communities: {}", self.graph.communities.len()));
                    ui.label(format!("modularity: {:.3}", self.graph.modularity));

                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload analysis"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.simulation.is_settled() {
                            ui.label("layout settled");
                        } else {
                            ui.label("layout settling...");
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Loading co-occurrence analysis...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
                return;
            }

            match self.active_view {
                ViewTab::Network => self.draw_graph(ui),
                ViewTab::WordCloud => self.draw_word_cloud(ui),
            }
        });
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<String>) {
        if self.selected != selected {
            self.selected = selected;
        }
    }
}
