use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use crate::analysis::{WordGraph, load_analysis};

mod graph;
mod highlight;
mod physics;
mod render_utils;
mod ui;
mod viewport;
mod wordcloud;

use graph::Scene;
use highlight::Focus;
use physics::Simulation;
use viewport::Viewport;
use wordcloud::PlacedWord;

pub struct CoocVizApp {
    input_path: PathBuf,
    state: AppState,
    reload_rx: Option<Receiver<Result<WordGraph, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<WordGraph, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ViewTab {
    Network,
    WordCloud,
}

struct LabelEdit {
    community_id: u32,
    draft: String,
}

struct CloudCache {
    canvas: Vec2,
    placed: Vec<PlacedWord>,
}

struct ViewModel {
    graph: WordGraph,
    scene: Scene,
    simulation: Simulation,
    viewport: Viewport,
    focus: Focus,
    community_filter: Option<u32>,
    selected: Option<String>,
    search: String,
    active_view: ViewTab,
    label_edit: Option<LabelEdit>,
    cloud_cache: Option<CloudCache>,
}

impl CoocVizApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, input_path: PathBuf) -> Self {
        let state = Self::start_load(input_path.clone());
        Self {
            input_path,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(input_path: PathBuf) -> Receiver<Result<WordGraph, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_analysis(&input_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(input_path: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(input_path),
        }
    }
}

impl eframe::App for CoocVizApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(graph) => AppState::Ready(Box::new(ViewModel::new(graph))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading co-occurrence analysis...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load co-occurrence analysis");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.input_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.input_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.input_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        // Replacing the dataset builds a fresh view model; the
                        // superseded scene and simulation are torn down whole.
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(graph) => AppState::Ready(Box::new(ViewModel::new(graph))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(AppState::Error("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
