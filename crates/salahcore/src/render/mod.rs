//! Prayer-time card rendering
//!
//! The card is a fixed 1080×1080 square: solid forest-green background and
//! the six-line schedule painted in white from a fixed offset. Layout values
//! are tuned for this canvas and font size and are not derived from metrics.

use std::path::Path;

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};

use crate::core::{config, AppError, AppResult};
use crate::prayer::{Daylight, HourMinute, PrayerTime};

/// Width and height of the card in pixels
pub const CANVAS_SIZE: u32 = 1080;
/// Text block origin as a fraction of canvas width
pub const TEXT_ORIGIN_X_FRACTION: f32 = 0.19;
/// Text block origin as a fraction of canvas height
pub const TEXT_ORIGIN_Y_FRACTION: f32 = 0.17;
pub const FONT_SIZE_PX: f32 = 90.0;
/// Forest green
pub const BACKGROUND: Rgba<u8> = Rgba([34, 139, 34, 255]);
pub const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Formats the schedule as six `"{icon} {label} : HH:MM"` lines without a trailing newline.
pub fn format_schedule(times: &PrayerTime) -> String {
    times
        .entries()
        .iter()
        .map(|(label, icon, time)| format!("{} {} : {}", icon.emoji(), label, HourMinute(*time)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Turns a schedule into image bytes ready for upload.
pub trait CardRenderer: Send + Sync {
    fn render(&self, times: &PrayerTime) -> AppResult<Vec<u8>>;
}

/// The icons `format_schedule` puts in front of each line
pub fn schedule_icons() -> String {
    [Daylight::Moon, Daylight::Sun].iter().map(|d| d.emoji()).collect()
}

/// Canvas filled with the background colour
pub fn blank_canvas() -> RgbaImage {
    RgbaImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, BACKGROUND)
}

/// Encodes with the strongest PNG compression.
pub fn encode_png(canvas: &RgbaImage) -> AppResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, FilterType::Adaptive);
    canvas.write_with_encoder(encoder)?;
    Ok(bytes)
}

/// Loads the font named by `FONT_PATH`, or the first installed candidate.
pub fn load_font() -> AppResult<FontArc> {
    if let Some(path) = config::render::FONT_PATH.as_deref() {
        return load_font_file(Path::new(path));
    }

    let path = config::render::FONT_CANDIDATES
        .iter()
        .map(Path::new)
        .find(|p| p.is_file())
        .ok_or_else(|| {
            AppError::Config(format!(
                "no font found; set FONT_PATH or install one of: {}",
                config::render::FONT_CANDIDATES.join(", ")
            ))
        })?;
    load_font_file(path)
}

/// Loads every font in `FONT_FALLBACK_PATHS`, or every installed fallback candidate.
///
/// An explicitly configured path that fails to load is an error; missing
/// candidates are skipped.
pub fn load_fallback_fonts() -> AppResult<Vec<FontArc>> {
    if let Some(paths) = config::render::FONT_FALLBACK_PATHS.as_deref() {
        return paths.iter().map(|p| load_font_file(p)).collect();
    }

    let fonts = config::render::FALLBACK_FONT_CANDIDATES
        .iter()
        .map(Path::new)
        .filter(|p| p.is_file())
        .filter_map(|p| match load_font_file(p) {
            Ok(font) => Some(font),
            Err(e) => {
                log::warn!("Skipping fallback font {}: {}", p.display(), e);
                None
            }
        })
        .collect();
    Ok(fonts)
}

pub fn load_font_file(path: &Path) -> AppResult<FontArc> {
    let bytes = std::fs::read(path)?;
    let font = FontArc::try_from_vec(bytes)?;
    log::info!("Loaded card font from {}", path.display());
    Ok(font)
}

/// Main font followed by fallbacks, consulted per character.
#[derive(Clone)]
pub struct FontChain {
    primary: FontArc,
    fallbacks: Vec<FontArc>,
}

impl FontChain {
    pub fn new(primary: FontArc, fallbacks: Vec<FontArc>) -> Self {
        Self { primary, fallbacks }
    }

    /// First font with a real glyph for `ch`; the main font when none has one.
    pub fn font_for(&self, ch: char) -> &FontArc {
        std::iter::once(&self.primary)
            .chain(&self.fallbacks)
            .find(|font| font.glyph_id(ch) != GlyphId(0))
            .unwrap_or(&self.primary)
    }

    pub fn covers(&self, ch: char) -> bool {
        self.font_for(ch).glyph_id(ch) != GlyphId(0)
    }

    /// Characters of `text` that would be drawn as `.notdef`.
    pub fn missing_glyphs(&self, text: &str) -> Vec<char> {
        let mut missing: Vec<char> = text.chars().filter(|c| !c.is_whitespace() && !self.covers(*c)).collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    pub fn primary(&self) -> &FontArc {
        &self.primary
    }
}

/// Splits a line into runs drawn with the same font.
fn font_runs<'a>(fonts: &'a FontChain, line: &str) -> Vec<(&'a FontArc, String)> {
    let mut runs: Vec<(&FontArc, String)> = Vec::new();
    for ch in line.chars() {
        let font = fonts.font_for(ch);
        match runs.last_mut() {
            Some((current, run)) if std::ptr::eq(*current, font) => run.push(ch),
            _ => runs.push((font, ch.to_string())),
        }
    }
    runs
}

/// [`CardRenderer`] drawing with a [`FontChain`].
#[derive(Clone)]
pub struct PrayerCardRenderer {
    fonts: FontChain,
}

impl PrayerCardRenderer {
    pub fn new(fonts: FontChain) -> Self {
        Self { fonts }
    }

    /// Main font and fallbacks from `config::render`.
    ///
    /// Warns when no loaded font can draw the schedule icons.
    pub fn from_config() -> AppResult<Self> {
        let fonts = FontChain::new(load_font()?, load_fallback_fonts()?);
        let missing = fonts.missing_glyphs(&schedule_icons());
        if !missing.is_empty() {
            log::warn!(
                "No card font has a glyph for {:?}; set FONT_FALLBACK_PATHS to an emoji font",
                missing
            );
        }
        Ok(Self::new(fonts))
    }

    /// Paints `text` left-aligned, one row per line, clipped to the canvas.
    fn paint_text(&self, canvas: &mut RgbaImage, text: &str) {
        let scale = PxScale::from(FONT_SIZE_PX);
        let scaled = self.fonts.primary().as_scaled(scale);
        let line_height = scaled.height() + scaled.line_gap();

        let left = (canvas.width() as f32 * TEXT_ORIGIN_X_FRACTION) as i32;
        let top = canvas.height() as f32 * TEXT_ORIGIN_Y_FRACTION;
        let bottom = canvas.height() as f32;

        for (row, line) in text.lines().enumerate() {
            let y = top + row as f32 * line_height;
            if y + line_height > bottom {
                log::warn!("Card text overflows the canvas after {} lines", row);
                break;
            }

            let mut x = left;
            for (font, run) in font_runs(&self.fonts, line) {
                draw_text_mut(canvas, TEXT_COLOR, x, y as i32, scale, font, &run);
                x += text_size(scale, font, &run).0 as i32;
            }
        }
    }
}

impl CardRenderer for PrayerCardRenderer {
    fn render(&self, times: &PrayerTime) -> AppResult<Vec<u8>> {
        let mut canvas = blank_canvas();
        self.paint_text(&mut canvas, &format_schedule(times));
        encode_png(&canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prayer::hm;
    use pretty_assertions::assert_eq;

    fn sample_times() -> PrayerTime {
        PrayerTime {
            fajr: hm(5, 0),
            sunrise: hm(6, 30),
            dhuhr: hm(12, 15),
            asr: hm(15, 45),
            maghrib: hm(18, 20),
            isha: hm(19, 45),
        }
    }

    /// Printable ASCII only, every glyph a solid box
    fn text_font() -> FontArc {
        FontArc::try_from_slice(include_bytes!("../../tests/fixtures/card-text.ttf")).unwrap()
    }

    /// Only the two schedule icons, drawn as wide boxes
    fn symbol_font() -> FontArc {
        FontArc::try_from_slice(include_bytes!("../../tests/fixtures/card-symbols.ttf")).unwrap()
    }

    fn full_chain() -> FontChain {
        FontChain::new(text_font(), vec![symbol_font()])
    }

    fn is_painted(card: &RgbaImage, x: u32, y: u32) -> bool {
        card.get_pixel(x, y)[1] > 200
    }

    #[test]
    fn test_format_schedule_exact() {
        assert_eq!(
            format_schedule(&sample_times()),
            "🌙 Fajr : 05:00\n🔆 Sunrise : 06:30\n🔆 Dhuhr : 12:15\n🔆 Asr : 15:45\n🌙 Maghrib : 18:20\n🌙 Isha : 19:45"
        );
    }

    #[test]
    fn test_format_schedule_has_six_lines() {
        let text = format_schedule(&sample_times());
        assert_eq!(text.lines().count(), 6);
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_blank_canvas_is_forest_green_square() {
        let canvas = blank_canvas();
        assert_eq!(canvas.dimensions(), (1080, 1080));
        assert_eq!(*canvas.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*canvas.get_pixel(1079, 1079), BACKGROUND);
    }

    #[test]
    fn test_encode_png_round_trips_dimensions() {
        let bytes = encode_png(&blank_canvas()).unwrap();

        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (CANVAS_SIZE, CANVAS_SIZE));
    }

    #[test]
    fn test_text_origin_constants() {
        assert_eq!((CANVAS_SIZE as f32 * TEXT_ORIGIN_X_FRACTION) as i32, 205);
        assert_eq!((CANVAS_SIZE as f32 * TEXT_ORIGIN_Y_FRACTION) as i32, 183);
    }

    #[test]
    fn test_load_font_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        assert!(matches!(load_font_file(&path), Err(AppError::Font(_))));
        assert!(matches!(
            load_font_file(&dir.path().join("missing.ttf")),
            Err(AppError::Io(_))
        ));
    }

    #[test]
    fn test_font_chain_resolves_icons_through_fallback() {
        let chain = full_chain();

        assert_eq!(text_font().glyph_id('🌙'), GlyphId(0));
        for icon in schedule_icons().chars() {
            assert_ne!(chain.font_for(icon).glyph_id(icon), GlyphId(0), "{} has no glyph", icon);
        }
        assert!(chain.missing_glyphs(&format_schedule(&sample_times())).is_empty());
    }

    #[test]
    fn test_font_chain_without_fallback_reports_icons() {
        let chain = FontChain::new(text_font(), Vec::new());

        assert_eq!(chain.missing_glyphs(&format_schedule(&sample_times())), vec!['🌙', '🔆']);
        assert_ne!(chain.font_for('F').glyph_id('F'), GlyphId(0));
    }

    #[test]
    fn test_font_runs_split_on_font_change() {
        let chain = full_chain();
        let runs: Vec<String> = font_runs(&chain, "🌙 Fajr : 05:00").into_iter().map(|(_, run)| run).collect();

        assert_eq!(runs, vec!["🌙".to_string(), " Fajr : 05:00".to_string()]);
    }

    #[test]
    fn test_render_paints_every_line_with_its_icon() {
        let renderer = PrayerCardRenderer::new(full_chain());

        let bytes = renderer.render(&sample_times()).unwrap();
        let card = image::load_from_memory(&bytes).unwrap().to_rgba8();

        assert_eq!(card.dimensions(), (CANVAS_SIZE, CANVAS_SIZE));
        // Nothing is painted left of or above the text origin
        assert_eq!(*card.get_pixel(100, 100), BACKGROUND);
        assert_eq!(*card.get_pixel(5, 1000), BACKGROUND);
        // The icon box spans x 209..281, y 192..255 on the first row; rows are 90px apart
        for row in 0..6 {
            assert!(is_painted(&card, 270, 225 + row * 90), "icon missing on row {}", row);
        }
    }

    #[test]
    fn test_render_without_icon_font_draws_narrow_notdef() {
        let renderer = PrayerCardRenderer::new(FontChain::new(text_font(), Vec::new()));

        let bytes = renderer.render(&sample_times()).unwrap();
        let card = image::load_from_memory(&bytes).unwrap().to_rgba8();

        // .notdef only reaches x 250, so the icon area right of it stays blank
        assert!(is_painted(&card, 230, 225));
        assert!(!is_painted(&card, 270, 225));
    }
}
