use crate::core::geo::TileCoord;

/// Anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// Relative path of a pre-rendered tile inside an export: `./<folder>/<z>/<x>/<y>.<ext>`.
pub fn folder_tile_url(folder: &str, extension: &str, coord: TileCoord) -> String {
    format!(
        "./{}/{}/{}/{}.{}",
        folder, coord.z, coord.x, coord.y, extension
    )
}
