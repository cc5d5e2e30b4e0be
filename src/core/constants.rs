//! Engine-wide constants for PapyrusCS maps.

/// Map background used when a layer does not specify one.
pub const DEFAULT_BACKGROUND: &str = "#202020";

/// Layer key that gets a light background by default.
pub const STRONGHOLD_LAYER_KEY: &str = "dim0_stronghold";

/// Background for [`STRONGHOLD_LAYER_KEY`].
pub const STRONGHOLD_BACKGROUND: &str = "#fff";

/// Layer keys are `dim<N>...`; the dimension id follows this prefix.
pub const DIMENSION_KEY_PREFIX: &str = "dim";

/// Number of entries in the resolution ladder (zoom levels 0 through 42).
pub const RESOLUTION_COUNT: usize = 43;

/// Tile size the projection aims for at zoom level 0.
pub const INTERNAL_TILE_SIZE: f64 = 256.0;

/// Tile grid extents, in tiles of the most zoomed out generated level.
pub const MAXIMUM_EXTENT_SIZE: f64 = 10_000.0;
pub const MINIMUM_EXTENT_SIZE: f64 = -10_000.0;

/// Square size of generated overlay tiles in pixels.
pub const OVERLAY_TILE_SIZE: u32 = 256;

/// Overlay zoom at which one overlay tile covers exactly one chunk.
pub const OVERLAY_REFERENCE_ZOOM: i32 = 20;

/// Blocks along one side of a chunk.
pub const BLOCKS_PER_CHUNK: f64 = 16.0;

/// Number of dimensions with a player marker layer (overworld, nether, end).
pub const DIMENSION_COUNT: usize = 3;

/// Document names served next to the tiles.
pub const LAYERS_DOCUMENT: &str = "layers.json";
pub const PLAYERS_DOCUMENT: &str = "playersData.json";
