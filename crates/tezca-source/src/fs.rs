use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tezca_types::DocumentId;

use crate::config::SourceConfig;
use crate::error::{SourceError, SourceResult};
use crate::traits::DocumentSource;

const ARTICLES_FILE: &str = "articles.json";
const STRUCTURE_FILE: &str = "structure.json";

/// Document source backed by a directory tree.
///
/// Layout:
///
/// ```text
/// <root>/<document id>/articles.json    required
/// <root>/<document id>/structure.json   optional
/// ```
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(config.root.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_dir(&self, id: &DocumentId) -> SourceResult<PathBuf> {
        let raw = id.as_str();
        if raw.contains('/') || raw.contains('\\') || raw.contains("..") {
            return Err(SourceError::InvalidId(raw.to_string()));
        }
        Ok(self.root.join(raw))
    }
}

/// Read and decode a JSON file; a missing file is `None`.
async fn read_json(path: &Path) -> SourceResult<Option<Value>> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl DocumentSource for DirectorySource {
    async fn fetch_articles(&self, id: &DocumentId) -> SourceResult<Value> {
        let path = self.document_dir(id)?.join(ARTICLES_FILE);
        tracing::debug!(path = %path.display(), "reading article list");
        read_json(&path)
            .await?
            .ok_or_else(|| SourceError::NotFound(id.clone()))
    }

    async fn fetch_outline(&self, id: &DocumentId) -> SourceResult<Option<Value>> {
        let path = self.document_dir(id)?.join(STRUCTURE_FILE);
        read_json(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> DocumentId {
        DocumentId::new(s).unwrap()
    }

    fn write_doc(root: &Path, name: &str, articles: &str, structure: Option<&str>) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(ARTICLES_FILE), articles).unwrap();
        if let Some(structure) = structure {
            std::fs::write(dir.join(STRUCTURE_FILE), structure).unwrap();
        }
    }

    #[tokio::test]
    async fn reads_both_files() {
        let tmp = tempfile::tempdir().unwrap();
        write_doc(
            tmp.path(),
            "lft",
            r#"{"law_name": "Ley Federal del Trabajo", "articles": []}"#,
            Some(r#"{"structure": [{"label": "Título Primero"}]}"#),
        );
        let source = DirectorySource::new(tmp.path());
        let articles = source.fetch_articles(&id("lft")).await.unwrap();
        assert_eq!(articles["law_name"], "Ley Federal del Trabajo");
        let outline = source.fetch_outline(&id("lft")).await.unwrap().unwrap();
        assert_eq!(outline["structure"][0]["label"], "Título Primero");
    }

    #[tokio::test]
    async fn missing_structure_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        write_doc(tmp.path(), "a", r#"{"law_name": "A", "articles": []}"#, None);
        let source = DirectorySource::new(tmp.path());
        assert!(source.fetch_outline(&id("a")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_document_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(tmp.path());
        let err = source.fetch_articles(&id("nope")).await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[tokio::test]
    async fn invalid_json_is_malformed() {
        let tmp = tempfile::tempdir().unwrap();
        write_doc(tmp.path(), "bad", "{not json", None);
        let source = DirectorySource::new(tmp.path());
        let err = source.fetch_articles(&id("bad")).await.unwrap_err();
        assert!(err.is_malformed(), "got {err:?}");
    }

    #[tokio::test]
    async fn rejects_path_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(tmp.path());
        let err = source.fetch_articles(&id("../etc")).await.unwrap_err();
        assert!(matches!(err, SourceError::InvalidId(_)));
        let err = source.fetch_outline(&id("a/b")).await.unwrap_err();
        assert!(matches!(err, SourceError::InvalidId(_)));
    }

    #[test]
    fn from_config_uses_root() {
        let config = SourceConfig { root: PathBuf::from("/data/laws") };
        assert_eq!(DirectorySource::from_config(&config).root(), Path::new("/data/laws"));
    }
}
