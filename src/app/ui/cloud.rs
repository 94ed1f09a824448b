use eframe::egui::{Align2, Color32, FontId, Sense, Ui};

use super::super::render_utils::{community_color, fade};
use super::super::wordcloud::{WordCloudConfig, WordCloudItem, pack_words};
use super::super::{CloudCache, ViewModel};

const DIMMED_WORD_OPACITY: f32 = 0.2;

impl ViewModel {
    pub(in crate::app) fn draw_word_cloud(&mut self, ui: &mut Ui) {
        let (rect, _response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

        let canvas = rect.size();
        let cache_is_stale = self
            .cloud_cache
            .as_ref()
            .is_none_or(|cache| (cache.canvas - canvas).length() > 0.5);

        if cache_is_stale {
            let items = self
                .scene
                .nodes
                .iter()
                .map(|node| WordCloudItem {
                    word: node.word.clone(),
                    frequency: node.frequency,
                    community_id: node.community_id,
                })
                .collect::<Vec<_>>();

            self.cloud_cache = Some(CloudCache {
                canvas,
                placed: pack_words(&items, canvas, &WordCloudConfig::default()),
            });
        }

        let Some(cache) = self.cloud_cache.as_ref() else {
            return;
        };

        if cache.placed.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No words fit the current canvas.",
                FontId::proportional(14.0),
                Color32::from_gray(180),
            );
            return;
        }

        for placed in &cache.placed {
            let opacity = match self.community_filter {
                Some(community_id) if placed.community_id != community_id => DIMMED_WORD_OPACITY,
                _ => 1.0,
            };

            painter.text(
                rect.left_top() + placed.rect.center().to_vec2(),
                Align2::CENTER_CENTER,
                placed.word.as_str(),
                FontId::proportional(placed.font_size),
                fade(community_color(placed.community_id), opacity),
            );
        }
    }
}
