//! Fetching of the two startup documents.
//!
//! Where the documents come from is up to the embedder; the crate only needs
//! their bytes. Both are requested at once because neither depends on the other.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;

use crate::{
    core::constants::{LAYERS_DOCUMENT, PLAYERS_DOCUMENT},
    data::{layers::LayersDocument, players::PlayersDocument},
    MapError, Result,
};

/// Shared HTTP client with a custom User-Agent.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("papyrus-map/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Anything that can hand out a named document.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>>;
}

/// Documents served over HTTP next to the tile folders.
pub struct HttpDataSource {
    base_url: String,
}

impl HttpDataSource {
    /// Creates a source rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    /// Full URL of the document `name`.
    pub fn url(&self, name: &str) -> String {
        format!("{}{}", self.base_url, name)
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>> {
        let url = self.url(name);
        log::debug!("fetching {}", url);

        let response = HTTP_CLIENT.get(&url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Documents read from an export directory on disk.
#[cfg(feature = "tokio-runtime")]
pub struct DirectorySource {
    root: std::path::PathBuf,
}

#[cfg(feature = "tokio-runtime")]
impl DirectorySource {
    /// Creates a source reading from the export directory `root`.
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

#[cfg(feature = "tokio-runtime")]
#[async_trait]
impl DataSource for DirectorySource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.root.join(name);
        log::debug!("reading {}", path.display());
        Ok(tokio::fs::read(&path).await?)
    }
}

/// Result of fetching and parsing both startup documents.
pub struct LoadedDocuments {
    pub layers: Result<LayersDocument>,
    pub players: Result<PlayersDocument>,
}

/// Fetches `layers.json` and `playersData.json` concurrently and parses them.
pub async fn load_documents(source: &dyn DataSource) -> LoadedDocuments {
    let (layers, players) = futures::join!(
        source.fetch(LAYERS_DOCUMENT),
        source.fetch(PLAYERS_DOCUMENT)
    );

    LoadedDocuments {
        layers: layers.and_then(|bytes| LayersDocument::from_slice(&bytes)),
        players: players.and_then(|bytes| PlayersDocument::from_slice(&bytes)),
    }
}

/// In-memory documents, mostly useful for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: crate::prelude::HashMap<String, Vec<u8>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document served under `name`.
    pub fn with_document(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(name.into(), bytes.into());
        self
    }
}

#[async_trait]
impl DataSource for StaticSource {
    async fn fetch(&self, name: &str) -> Result<Vec<u8>> {
        self.documents.get(name).cloned().ok_or_else(|| {
            MapError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{name} not found"),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_source_urls() {
        let source = HttpDataSource::new("https://maps.example.org/world");
        assert_eq!(
            source.url(LAYERS_DOCUMENT),
            "https://maps.example.org/world/layers.json"
        );
        let source = HttpDataSource::new("https://maps.example.org/");
        assert_eq!(
            source.url(PLAYERS_DOCUMENT),
            "https://maps.example.org/playersData.json"
        );
    }

    #[tokio::test]
    async fn test_load_documents_reports_each_failure_separately() {
        let source = StaticSource::new().with_document(PLAYERS_DOCUMENT, r#"{"players":[]}"#);

        let loaded = load_documents(&source).await;
        assert!(matches!(loaded.layers, Err(MapError::Io(_))));
        assert!(loaded.players.unwrap().players.is_empty());
    }

    #[tokio::test]
    async fn test_load_documents_surfaces_parse_errors() {
        let source = StaticSource::new()
            .with_document(LAYERS_DOCUMENT, "{not json")
            .with_document(PLAYERS_DOCUMENT, r#"{"players":[]}"#);

        let loaded = load_documents(&source).await;
        assert!(matches!(loaded.layers, Err(MapError::Serialization(_))));
    }
}
