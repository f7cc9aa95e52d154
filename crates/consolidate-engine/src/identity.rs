use crate::crawler::DiscoveredProject;
use crate::logger::Logger;
use chrono::Utc;
use consolidate_types::{IdentityKey, MarkerKind, leaf_name};
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// How an identity key was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// `name` field of the package manifest
    DeclaredName,
    /// SHA-256 of the marker file bytes
    ContentHash,
    /// Marker unreadable; key is unique to this instance
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub key: IdentityKey,
    pub source: IdentitySource,
}

#[derive(Deserialize)]
struct PackageManifest {
    name: Option<serde_json::Value>,
}

/// Derives identity keys. Holds a sequence so synthetic keys stay unique
/// even when two fallbacks happen within the same clock tick.
#[derive(Debug, Default)]
pub struct IdentityResolver {
    synthetic_seq: u64,
}

impl IdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(
        &mut self,
        project: &DiscoveredProject,
        logger: &dyn Logger,
    ) -> ResolvedIdentity {
        let bytes = match std::fs::read(&project.marker.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                let key = self.synthetic_key(&project.path);
                logger.error(&format!(
                    "Cannot read marker {} ({}); using synthetic identity {}",
                    project.marker.path.display(),
                    err,
                    key
                ));
                return ResolvedIdentity {
                    key,
                    source: IdentitySource::Synthetic,
                };
            }
        };

        if project.marker.kind == MarkerKind::PackageManifest {
            match declared_name(&bytes) {
                Ok(Some(name)) => {
                    return ResolvedIdentity {
                        key: IdentityKey::new(name),
                        source: IdentitySource::DeclaredName,
                    };
                }
                Ok(None) => {}
                Err(err) => logger.warn(&format!(
                    "{} is not valid JSON ({}); identifying by content hash",
                    project.marker.path.display(),
                    err
                )),
            }
        }

        ResolvedIdentity {
            key: IdentityKey::new(content_hash(&bytes)),
            source: IdentitySource::ContentHash,
        }
    }

    fn synthetic_key(&mut self, project_dir: &std::path::Path) -> IdentityKey {
        self.synthetic_seq += 1;
        IdentityKey::new(format!(
            "{}_{}_{}",
            leaf_name(project_dir),
            Utc::now().format("%Y%m%d%H%M%S%3f"),
            self.synthetic_seq
        ))
    }
}

/// Non-empty string `name` of a package manifest
fn declared_name(bytes: &[u8]) -> serde_json::Result<Option<String>> {
    let manifest: PackageManifest = serde_json::from_slice(bytes)?;
    Ok(manifest
        .name
        .as_ref()
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string))
}

/// Lowercase hex SHA-256 digest
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::NullLogger;
    use consolidate_types::Marker;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn project(
        dir: &Path,
        marker: &str,
        kind: MarkerKind,
        content: Option<&str>,
    ) -> DiscoveredProject {
        fs::create_dir_all(dir).unwrap();
        if let Some(content) = content {
            fs::write(dir.join(marker), content).unwrap();
        }
        DiscoveredProject {
            path: dir.to_path_buf(),
            marker: Marker::new(kind, dir.join(marker)),
        }
    }

    #[test]
    fn test_declared_name_wins() {
        let temp = TempDir::new().unwrap();
        let p = project(
            &temp.path().join("renamed-copy"),
            "package.json",
            MarkerKind::PackageManifest,
            Some(r#"{"name": "foo", "version": "1.0.0"}"#),
        );

        let id = IdentityResolver::new().resolve(&p, &NullLogger);
        assert_eq!(id.key.as_str(), "foo");
        assert_eq!(id.source, IdentitySource::DeclaredName);
    }

    #[test]
    fn test_manifest_without_name_is_hashed() {
        let temp = TempDir::new().unwrap();
        let content = r#"{"private": true}"#;
        let p = project(
            temp.path(),
            "package.json",
            MarkerKind::PackageManifest,
            Some(content),
        );

        let id = IdentityResolver::new().resolve(&p, &NullLogger);
        assert_eq!(id.source, IdentitySource::ContentHash);
        assert_eq!(id.key.as_str(), content_hash(content.as_bytes()));
    }

    #[test]
    fn test_non_string_or_blank_name_is_hashed() {
        assert_eq!(declared_name(br#"{"name": 42}"#).unwrap(), None);
        assert_eq!(declared_name(br#"{"name": "  "}"#).unwrap(), None);
        assert!(declared_name(b"{not json").is_err());
    }

    #[test]
    fn test_identical_markers_share_identity() {
        let temp = TempDir::new().unwrap();
        let a = project(
            &temp.path().join("a"),
            "requirements.txt",
            MarkerKind::DependencyList,
            Some("flask==2.0\n"),
        );
        let b = project(
            &temp.path().join("b"),
            "requirements.txt",
            MarkerKind::DependencyList,
            Some("flask==2.0\n"),
        );

        let mut resolver = IdentityResolver::new();
        let ka = resolver.resolve(&a, &NullLogger);
        let kb = resolver.resolve(&b, &NullLogger);
        assert_eq!(ka, kb);
        assert_eq!(ka.key.as_str().len(), 64);
    }

    #[test]
    fn test_unreadable_marker_gets_unique_synthetic_key() {
        let temp = TempDir::new().unwrap();
        let p = project(
            &temp.path().join("broken"),
            "package.json",
            MarkerKind::PackageManifest,
            None,
        );

        let mut resolver = IdentityResolver::new();
        let first = resolver.resolve(&p, &NullLogger);
        let second = resolver.resolve(&p, &NullLogger);
        assert_eq!(first.source, IdentitySource::Synthetic);
        assert!(first.key.as_str().starts_with("broken_"));
        assert_ne!(first.key, second.key);
    }
}
