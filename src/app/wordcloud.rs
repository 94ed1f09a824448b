use eframe::egui::{Rect, Vec2, pos2, vec2};

/// Tuning parameters for the spiral packer. The box estimate and step budget
/// are heuristics calibrated for proportional Latin fonts; scripts with very
/// different aspect ratios may want their own values.
pub(in crate::app) struct WordCloudConfig {
    pub(in crate::app) min_font_size: f32,
    pub(in crate::app) font_size_span: f32,
    pub(in crate::app) angle_step: f32,
    pub(in crate::app) radius_step: f32,
    pub(in crate::app) max_steps: usize,
    pub(in crate::app) box_margin: f32,
    pub(in crate::app) canvas_margin: f32,
    pub(in crate::app) glyph_width_factor: f32,
    pub(in crate::app) line_height_factor: f32,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            min_font_size: 16.0,
            font_size_span: 48.0,
            angle_step: 0.15,
            radius_step: 0.5,
            max_steps: 1200,
            box_margin: 3.0,
            canvas_margin: 10.0,
            glyph_width_factor: 0.65,
            line_height_factor: 1.2,
        }
    }
}

#[derive(Clone, Debug)]
pub(in crate::app) struct WordCloudItem {
    pub(in crate::app) word: String,
    pub(in crate::app) frequency: u32,
    pub(in crate::app) community_id: u32,
}

#[derive(Clone, Debug)]
pub(in crate::app) struct PlacedWord {
    pub(in crate::app) word: String,
    pub(in crate::app) frequency: u32,
    pub(in crate::app) community_id: u32,
    pub(in crate::app) font_size: f32,
    pub(in crate::app) rect: Rect,
}

/// Places words on the canvas along an expanding spiral from the center.
/// Deterministic: higher frequency claims center-proximate spots first, and
/// items whose step budget runs out are dropped, never resized or retried.
pub(in crate::app) fn pack_words(
    items: &[WordCloudItem],
    canvas: Vec2,
    config: &WordCloudConfig,
) -> Vec<PlacedWord> {
    let mut ranked = items.to_vec();
    ranked.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    let max_frequency = ranked
        .iter()
        .map(|item| item.frequency)
        .max()
        .unwrap_or(1)
        .max(1) as f32;

    let bounds = Rect::from_min_size(pos2(0.0, 0.0), canvas).shrink(config.canvas_margin);
    let center = pos2(canvas.x * 0.5, canvas.y * 0.5);

    let mut placed: Vec<PlacedWord> = Vec::with_capacity(ranked.len());
    for item in ranked {
        let font_size =
            config.min_font_size + (item.frequency as f32 / max_frequency) * config.font_size_span;
        let glyph_count = item.word.chars().count() as f32;
        let size = vec2(
            glyph_count * font_size * config.glyph_width_factor,
            font_size * config.line_height_factor,
        );

        let mut accepted = None;
        for step in 0..config.max_steps {
            let angle = step as f32 * config.angle_step;
            let radius = step as f32 * config.radius_step;
            let candidate_center = center + vec2(angle.cos(), angle.sin()) * radius;
            let candidate = Rect::from_center_size(candidate_center, size);

            if !bounds.contains_rect(candidate) {
                continue;
            }

            let margin = config.box_margin;
            let collides = placed
                .iter()
                .any(|other| candidate.expand(margin).intersects(other.rect));
            if !collides {
                accepted = Some(candidate);
                break;
            }
        }

        // Budget exhausted: the word is omitted, under-filling is expected.
        let Some(rect) = accepted else {
            continue;
        };

        placed.push(PlacedWord {
            word: item.word,
            frequency: item.frequency,
            community_id: item.community_id,
            font_size,
            rect,
        });
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(entries: &[(&str, u32)]) -> Vec<WordCloudItem> {
        entries
            .iter()
            .map(|(word, frequency)| WordCloudItem {
                word: (*word).to_owned(),
                frequency: *frequency,
                community_id: 0,
            })
            .collect()
    }

    #[test]
    fn font_size_interpolates_by_relative_frequency() {
        let placed = pack_words(
            &items(&[("top", 10), ("half", 5)]),
            vec2(800.0, 600.0),
            &WordCloudConfig::default(),
        );

        let font_of = |word: &str| {
            placed
                .iter()
                .find(|entry| entry.word == word)
                .expect("placed")
                .font_size
        };
        assert!((font_of("top") - 64.0).abs() < 1e-4);
        assert!((font_of("half") - 40.0).abs() < 1e-4);
    }

    #[test]
    fn highest_frequency_claims_the_center() {
        let placed = pack_words(
            &items(&[("minor", 2), ("major", 9), ("middle", 5)]),
            vec2(800.0, 600.0),
            &WordCloudConfig::default(),
        );

        assert_eq!(placed[0].word, "major");
        let center = pos2(400.0, 300.0);
        assert!((placed[0].rect.center() - center).length() < 1e-3);
    }

    #[test]
    fn packing_is_deterministic() {
        let list = items(&[
            ("alpha", 12),
            ("beta", 9),
            ("gamma", 9),
            ("delta", 4),
            ("epsilon", 2),
        ]);
        let first = pack_words(&list, vec2(640.0, 480.0), &WordCloudConfig::default());
        let second = pack_words(&list, vec2(640.0, 480.0), &WordCloudConfig::default());

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.word, b.word);
            assert_eq!(a.rect, b.rect);
        }
    }

    #[test]
    fn placed_boxes_never_overlap() {
        let list = items(&[
            ("service", 20),
            ("support", 16),
            ("price", 14),
            ("delivery", 11),
            ("quality", 9),
            ("refund", 7),
            ("shipping", 5),
            ("account", 3),
        ]);
        let placed = pack_words(&list, vec2(900.0, 700.0), &WordCloudConfig::default());

        for i in 0..placed.len() {
            for j in (i + 1)..placed.len() {
                assert!(
                    !placed[i].rect.intersects(placed[j].rect),
                    "{} overlaps {}",
                    placed[i].word,
                    placed[j].word
                );
            }
        }
    }

    #[test]
    fn oversized_words_are_dropped_not_resized() {
        let placed = pack_words(
            &items(&[("unplaceablebecausefartoolong", 10)]),
            vec2(120.0, 80.0),
            &WordCloudConfig::default(),
        );
        assert!(placed.is_empty());

        // A small canvas still accepts what fits.
        let partial = pack_words(
            &items(&[("unplaceablebecausefartoolong", 10), ("ok", 1)]),
            vec2(160.0, 80.0),
            &WordCloudConfig::default(),
        );
        assert_eq!(partial.len(), 1);
        assert_eq!(partial[0].word, "ok");
    }

    #[test]
    fn words_stay_inside_the_canvas_margin() {
        let canvas = vec2(500.0, 400.0);
        let config = WordCloudConfig::default();
        let placed = pack_words(
            &items(&[("one", 9), ("two", 6), ("three", 3), ("four", 1)]),
            canvas,
            &config,
        );

        let bounds = Rect::from_min_size(pos2(0.0, 0.0), canvas).shrink(config.canvas_margin);
        for entry in &placed {
            assert!(bounds.contains_rect(entry.rect), "{} escaped", entry.word);
        }
    }
}
