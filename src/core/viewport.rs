use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in projection coordinates
    pub center: Point,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
    /// Projection units per pixel at zoom 0
    base_resolution: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: Point, zoom: f64, size: Point, base_resolution: f64) -> Self {
        Self {
            center,
            zoom,
            size,
            min_zoom: 0.0,
            max_zoom: 42.0,
            base_resolution,
        }
    }

    /// Sets the center of the viewport
    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let max_zoom = max_zoom.max(min_zoom);
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Gets the resolution (projection units per pixel) at the current zoom level
    pub fn resolution(&self) -> f64 {
        self.base_resolution / 2_f64.powf(self.zoom)
    }

    /// Converts a projection coordinate to container pixel coordinates
    pub fn projection_to_pixel(&self, point: &Point) -> Point {
        let resolution = self.resolution();
        Point::new(
            (point.x - self.center.x) / resolution + self.size.x / 2.0,
            (self.center.y - point.y) / resolution + self.size.y / 2.0,
        )
    }

    /// Converts container pixel coordinates back to a projection coordinate
    pub fn pixel_to_projection(&self, pixel: &Point) -> Point {
        let resolution = self.resolution();
        Point::new(
            self.center.x + (pixel.x - self.size.x / 2.0) * resolution,
            self.center.y - (pixel.y - self.size.y / 2.0) * resolution,
        )
    }

    /// Pans the viewport by the given pixel offset
    pub fn pan(&mut self, delta: Point) {
        let resolution = self.resolution();
        self.center = Point::new(
            self.center.x - delta.x * resolution,
            self.center.y + delta.y * resolution,
        );
    }

    /// Zooms the viewport to a specific level, keeping `focus_point` fixed on screen
    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        let new_zoom = zoom.clamp(self.min_zoom, self.max_zoom);

        // No-op if zoom does not change significantly
        if (new_zoom - self.zoom).abs() < 0.001 {
            return;
        }

        match focus_point {
            Some(focus_screen) => {
                let focus = self.pixel_to_projection(&focus_screen);
                self.zoom = new_zoom;
                let drifted = self.pixel_to_projection(&focus_screen);
                self.center = self.center.add(&focus.subtract(&drifted));
            }
            None => self.zoom = new_zoom,
        }
    }

    /// Gets the visible projection extent `[min_x, min_y, max_x, max_y]`
    pub fn extent(&self) -> [f64; 4] {
        let top_left = self.pixel_to_projection(&Point::new(0.0, 0.0));
        let bottom_right = self.pixel_to_projection(&self.size);
        [top_left.x, bottom_right.y, bottom_right.x, top_left.y]
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Point::ORIGIN, 0.0, Point::new(800.0, 600.0), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(Point::new(0.25, -0.5), 3.0, Point::new(800.0, 600.0), 64.0);

        assert_eq!(viewport.zoom, 3.0);
        assert_eq!(viewport.center.x, 0.25);
        assert_eq!(viewport.size.x, 800.0);
        assert_eq!(viewport.resolution(), 8.0);
    }

    #[test]
    fn test_coordinate_conversion() {
        let viewport = Viewport::new(Point::new(10.0, 20.0), 1.0, Point::new(512.0, 512.0), 2.0);

        let center = viewport.pixel_to_projection(&Point::new(256.0, 256.0));
        assert_eq!(center, Point::new(10.0, 20.0));

        // screen y grows downwards, projection y upwards
        let below = viewport.pixel_to_projection(&Point::new(256.0, 266.0));
        assert_eq!(below, Point::new(10.0, 10.0));
        assert_eq!(viewport.projection_to_pixel(&below), Point::new(256.0, 266.0));
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_limits(2.0, 15.0);

        viewport.set_zoom(1.0); // Below minimum
        assert_eq!(viewport.zoom, 2.0);

        viewport.set_zoom(20.0); // Above maximum
        assert_eq!(viewport.zoom, 15.0);
    }

    #[test]
    fn test_pan() {
        let mut viewport = Viewport::new(Point::ORIGIN, 0.0, Point::new(512.0, 512.0), 1.0);
        viewport.pan(Point::new(10.0, 10.0));

        // dragging right and down moves the view left and up
        assert_eq!(viewport.center, Point::new(-10.0, 10.0));
    }

    #[test]
    fn test_zoom_to_keeps_focus_fixed() {
        let mut viewport = Viewport::new(Point::ORIGIN, 0.0, Point::new(400.0, 400.0), 1.0);
        let focus = Point::new(300.0, 100.0);
        let before = viewport.pixel_to_projection(&focus);

        viewport.zoom_to(2.0, Some(focus));

        assert_eq!(viewport.zoom, 2.0);
        let after = viewport.pixel_to_projection(&focus);
        assert!(before.distance_to(&after) < 1e-9);
    }
}
