pub mod layers;
pub mod loader;
pub mod players;

pub use layers::{LayerDescriptor, LayerRegistry, LayersDocument, RawLayerDescriptor};
pub use loader::{load_documents, DataSource, HttpDataSource, LoadedDocuments, StaticSource};
pub use players::{partition_players, PlayerMarker, PlayersDocument};

#[cfg(feature = "tokio-runtime")]
pub use loader::DirectorySource;
