use std::hash::Hash;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{anyhow, Context as _};
use egui::{
    Align2, Color32, ColorImage, FontId, Pos2, Rect, Sense, Stroke, TextureHandle, TextureOptions,
    Vec2,
};
use lru::LruCache;
use papyrus_map::{
    constants::{OVERLAY_REFERENCE_ZOOM, OVERLAY_TILE_SIZE},
    data::DirectorySource,
    DataLayer, LayerTrait, MapTileLayer, OverlayLayer, Point, TileCoord, TileSource, Viewer,
};

/// Tiles drawn per layer and frame at most.
const MAX_TILES_PER_LAYER: i64 = 400;
/// New base tiles decoded per frame.
const TILE_LOADS_PER_FRAME: usize = 16;
const SCROLL_ZOOM_STEP: f64 = 0.5;
/// Textures kept per cache, a few screens worth of tiles at the per-layer draw limit.
const TEXTURE_CACHE_CAPACITY: usize = 1024;

/// Desktop viewer for a PapyrusCS export directory
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    papyrus_map::init_logging();

    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let source = DirectorySource::new(&root);
    let viewer = Viewer::bootstrap(&source)
        .await
        .ok_or_else(|| anyhow!("no usable layers.json in {}", root.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Papyrus - Minecraft Map Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "papyrus-app",
        options,
        Box::new(move |_cc| Box::new(PapyrusApp::new(viewer, root))),
    )
    .map_err(|error| anyhow!("{error}"))
    .context("viewer window failed")?;

    Ok(())
}

/// The main application struct
struct PapyrusApp {
    viewer: Viewer,
    root: PathBuf,
    /// Decoded base tiles by path; `None` marks a missing file.
    base_tiles: LruCache<PathBuf, Option<TextureHandle>>,
    overlay_tiles: LruCache<(String, TileCoord), TextureHandle>,
}

impl PapyrusApp {
    fn new(viewer: Viewer, root: PathBuf) -> Self {
        Self {
            viewer,
            root,
            base_tiles: texture_cache(),
            overlay_tiles: texture_cache(),
        }
    }

    fn layer_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Layers");
        ui.separator();

        let radios = self.viewer.controls().radios().to_vec();
        for radio in radios {
            if ui.radio(radio.checked, &radio.label).clicked() {
                self.viewer.select_layer(&radio.key);
            }
        }

        let mut toggled = Vec::new();
        for group in self.viewer.controls().groups() {
            if !group.visible {
                continue;
            }
            ui.separator();
            if let Some(title) = &group.title {
                ui.label(title);
            }
            for id in &group.checkboxes {
                let Ok(checkbox) = self.viewer.controls().checkbox(*id) else {
                    continue;
                };
                if !checkbox.visible {
                    continue;
                }
                let mut checked = checkbox.checked;
                if ui.checkbox(&mut checked, &checkbox.label).changed() {
                    toggled.push((*id, checked));
                }
            }
        }
        for (id, checked) in toggled {
            if let Err(error) = self.viewer.set_checkbox(id, checked) {
                log::warn!("checkbox toggle failed: {}", error);
            }
        }

        ui.separator();
        ui.label(self.viewer.location_text());

        if let Ok(layer) = self.viewer.current_layer() {
            if let Some(attribution) = &layer.descriptor().attribution {
                ui.separator();
                ui.small(attribution);
            }
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context, response: &egui::Response, rect: Rect) {
        let viewport = self.viewer.map_mut().viewport_mut();
        viewport.set_size(Point::new(f64::from(rect.width()), f64::from(rect.height())));

        let drag = response.drag_delta();
        if drag != Vec2::ZERO {
            viewport.pan(Point::new(f64::from(drag.x), f64::from(drag.y)));
        }

        let hover = response.hover_pos().map(|pos| {
            let local = pos - rect.min;
            Point::new(f64::from(local.x), f64::from(local.y))
        });

        let scroll = ctx.input(|input| input.raw_scroll_delta.y);
        if response.hovered() && scroll != 0.0 {
            let step = SCROLL_ZOOM_STEP * f64::from(scroll.signum());
            let zoom = viewport.zoom + step;
            viewport.zoom_to(zoom, hover);
        }

        if let Some(pixel) = hover {
            let coordinate = self.viewer.map().viewport().pixel_to_projection(&pixel);
            self.viewer.pointer_move(coordinate);
        }
    }

    fn paint_map(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: Rect) {
        painter.rect_filled(rect, 0.0, parse_color(self.viewer.map().background()));

        let mut loads = 0;

        let visible: Vec<String> = self
            .viewer
            .visible_layers()
            .map(|layer| layer.id().to_string())
            .collect();

        for key in visible {
            let Some(layer) = self.viewer.map().layers().get_layer(&key) else {
                continue;
            };
            match layer {
                DataLayer::Map(tile_layer) => {
                    let tile_layer = tile_layer.clone();
                    self.paint_base_layer(ctx, painter, rect, &tile_layer, &mut loads);
                }
                DataLayer::Overlay(overlay) => {
                    let overlay = overlay.clone();
                    self.paint_overlay(ctx, painter, rect, &overlay);
                }
                DataLayer::Markers(markers) => {
                    let viewport = self.viewer.map().viewport();
                    for feature in markers.features() {
                        let pixel = viewport.projection_to_pixel(&feature.position);
                        let pos = rect.min + Vec2::new(pixel.x as f32, pixel.y as f32);
                        if !rect.contains(pos) {
                            continue;
                        }
                        let fill = parse_color(&feature.style.fill_color);
                        let outline = Stroke::new(feature.style.stroke_width, Color32::WHITE);
                        painter.circle(pos, 5.0, fill, outline);
                        let label_pos = pos - Vec2::new(0.0, 8.0);
                        let font = FontId::proportional(14.0);
                        for offset in [Vec2::X, -Vec2::X, Vec2::Y, -Vec2::Y] {
                            painter.text(
                                label_pos + offset,
                                Align2::CENTER_BOTTOM,
                                &feature.name,
                                font.clone(),
                                Color32::WHITE,
                            );
                        }
                        painter.text(label_pos, Align2::CENTER_BOTTOM, &feature.name, font, fill);
                    }
                }
            }
        }

        if loads >= TILE_LOADS_PER_FRAME {
            ctx.request_repaint();
        }
    }

    fn paint_base_layer(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        rect: Rect,
        layer: &MapTileLayer,
        loads: &mut usize,
    ) {
        let descriptor = layer.descriptor();
        let constants = self.viewer.controls().constants();
        let viewport = self.viewer.map().viewport();

        let level = constants
            .tile_grid_zoom(viewport.zoom)
            .clamp(descriptor.min_native_zoom, descriptor.max_native_zoom);
        let Ok(z) = u8::try_from(level) else {
            return;
        };
        let span = constants.tile_span(z);

        for (x, y) in visible_tiles(viewport.extent(), span) {
            let coord = TileCoord::new(z, x, y);
            let path = self.root.join(layer.url(coord).trim_start_matches("./"));

            if !self.base_tiles.contains(&path) {
                if *loads >= TILE_LOADS_PER_FRAME {
                    continue;
                }
                *loads += 1;
                let texture = load_tile_texture(ctx, &path);
                self.base_tiles.put(path.clone(), texture);
            }

            if let Some(Some(texture)) = self.base_tiles.get(&path) {
                let tile_rect = tile_screen_rect(self.viewer.map().viewport(), rect, x, y, span);
                painter.image(texture.id(), tile_rect, full_uv(), Color32::WHITE);
            }
        }
    }

    fn paint_overlay(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        rect: Rect,
        overlay: &OverlayLayer,
    ) {
        let constants = self.viewer.controls().constants();
        let viewport = self.viewer.map().viewport();

        // Pick the overlay level whose tiles are closest to their native size.
        let chunk_pixels = constants.chunk_span() / viewport.resolution();
        let depth = (f64::from(OVERLAY_TILE_SIZE) / chunk_pixels).log2().round() as i32;
        let Ok(z) = u8::try_from((OVERLAY_REFERENCE_ZOOM - depth).clamp(0, 40)) else {
            return;
        };
        let span = constants.overlay_tile_span(z);

        for (x, y) in visible_tiles(viewport.extent(), span) {
            let coord = TileCoord::new(z, x, y);
            let key = (overlay.id().to_string(), coord);
            let texture = match self.overlay_tiles.get(&key).cloned() {
                Some(texture) => texture,
                None => {
                    let pixels = overlay.tile(coord);
                    let size = OVERLAY_TILE_SIZE as usize;
                    let image = ColorImage::from_rgba_unmultiplied([size, size], &pixels);
                    let name = format!("{}/{}", overlay.id(), coord);
                    let texture = ctx.load_texture(name, image, TextureOptions::NEAREST);
                    self.overlay_tiles.put(key, texture.clone());
                    texture
                }
            };
            let tile_rect = tile_screen_rect(viewport, rect, x, y, span);
            painter.image(texture.id(), tile_rect, full_uv(), Color32::WHITE);
        }
    }
}

impl eframe::App for PapyrusApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("layer_panel").resizable(true).show(ctx, |ui| {
            self.layer_panel(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
                let rect = response.rect;
                self.handle_input(ctx, &response, rect);
                self.paint_map(ctx, &painter, rect);
            });
    }
}

/// Tile indices covering `extent`; tile rows grow downwards from the origin.
fn visible_tiles(extent: [f64; 4], span: f64) -> Vec<(i64, i64)> {
    let [min_x, min_y, max_x, max_y] = extent;
    let x0 = (min_x / span).floor() as i64;
    let x1 = (max_x / span).floor() as i64;
    let y0 = (-max_y / span).floor() as i64;
    let y1 = (-min_y / span).floor() as i64;

    if (x1 - x0 + 1).saturating_mul(y1 - y0 + 1) > MAX_TILES_PER_LAYER {
        return Vec::new();
    }
    (y0..=y1)
        .flat_map(|y| (x0..=x1).map(move |x| (x, y)))
        .collect()
}

fn tile_screen_rect(viewport: &papyrus_map::Viewport, rect: Rect, x: i64, y: i64, span: f64) -> Rect {
    let top_left = viewport.projection_to_pixel(&Point::new(x as f64 * span, -(y as f64) * span));
    let bottom_right =
        viewport.projection_to_pixel(&Point::new((x + 1) as f64 * span, -((y + 1) as f64) * span));
    Rect::from_min_max(
        rect.min + Vec2::new(top_left.x as f32, top_left.y as f32),
        rect.min + Vec2::new(bottom_right.x as f32, bottom_right.y as f32),
    )
}

/// Bounded texture store; evicted handles free their GPU texture on drop.
fn texture_cache<K: Hash + Eq, V>() -> LruCache<K, V> {
    let capacity = NonZeroUsize::new(TEXTURE_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
    LruCache::new(capacity)
}

fn full_uv() -> Rect {
    Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0))
}

fn load_tile_texture(ctx: &egui::Context, path: &std::path::Path) -> Option<TextureHandle> {
    let image = match image::open(path) {
        Ok(image) => image.to_rgba8(),
        Err(error) => {
            log::debug!("no tile at {}: {}", path.display(), error);
            return None;
        }
    };
    let size = [image.width() as usize, image.height() as usize];
    let color_image = ColorImage::from_rgba_unmultiplied(size, image.as_raw());
    Some(ctx.load_texture(path.display().to_string(), color_image, TextureOptions::LINEAR))
}

/// Parses `#rgb` and `#rrggbb`; anything else is drawn black.
fn parse_color(color: &str) -> Color32 {
    let hex = color.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();

    let rgb = match hex.len() {
        3 => [channel(0..1), channel(1..2), channel(2..3)].map(|c| c.map(|v| v * 17)),
        6 => [channel(0..2), channel(2..4), channel(4..6)],
        _ => [None; 3],
    };
    match rgb {
        [Some(r), Some(g), Some(b)] => Color32::from_rgb(r, g, b),
        _ => Color32::BLACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#fff"), Color32::from_rgb(255, 255, 255));
        assert_eq!(parse_color("#202020"), Color32::from_rgb(32, 32, 32));
        assert_eq!(parse_color("red"), Color32::BLACK);
    }

    #[test]
    fn test_texture_cache_evicts_least_recently_used() {
        let mut cache = texture_cache::<TileCoord, u32>();
        for x in 0..=TEXTURE_CACHE_CAPACITY as i64 {
            cache.put(TileCoord::new(20, x, 0), 0);
        }

        assert_eq!(cache.len(), TEXTURE_CACHE_CAPACITY);
        assert!(!cache.contains(&TileCoord::new(20, 0, 0)));
        assert!(cache.contains(&TileCoord::new(20, TEXTURE_CACHE_CAPACITY as i64, 0)));
    }

    #[test]
    fn test_visible_tiles() {
        let tiles = visible_tiles([0.0, -1.5, 1.5, 0.0], 1.0);
        assert_eq!(tiles, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert!(visible_tiles([-1000.0, -1000.0, 1000.0, 1000.0], 1.0).is_empty());
    }
}
