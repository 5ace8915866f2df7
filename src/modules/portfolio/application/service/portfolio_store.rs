use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::modules::portfolio::application::ports::outgoing::{
    DocumentBackend, DocumentStore, PortfolioStoreError, SaveOutcome,
};
use crate::modules::portfolio::domain::{merge_fields, VersionedDocument};

//
// ──────────────────────────────────────────────────────────
// Fallback store
// ──────────────────────────────────────────────────────────
// Backends are ordered by preference (cache, database, file).
// - read: every backend is asked; the highest revision wins, ties go
//   to the earlier backend; errors only drop that backend
// - backends answering with an older revision (or nothing) are
//   brought up to date under the write lock
// - the seed is persisted only when every backend answered empty
// - write: sent to every backend; succeeds if at least one accepts
// - read-merge-write runs under one lock so concurrent saves of
//   disjoint fields both survive
//

/// Result of asking every backend for its copy.
struct ReadSweep {
    newest: Option<VersionedDocument>,
    /// Backends that answered with nothing or an older revision.
    lagging: Vec<usize>,
    failed: usize,
}

pub struct PortfolioStore {
    backends: Vec<Arc<dyn DocumentBackend>>,
    write_lock: Mutex<()>,
}

impl PortfolioStore {
    pub fn new(backends: Vec<Arc<dyn DocumentBackend>>) -> Self {
        Self {
            backends,
            write_lock: Mutex::new(()),
        }
    }

    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    async fn read_all(&self) -> ReadSweep {
        let results = join_all(self.backends.iter().map(|b| b.read())).await;

        let mut newest: Option<VersionedDocument> = None;
        let mut answered: Vec<(usize, Option<u64>)> = Vec::new();
        let mut failed = 0;

        for (index, (backend, result)) in self.backends.iter().zip(results).enumerate() {
            match result {
                Ok(Some(doc)) => {
                    debug!(backend = backend.name(), revision = doc.revision, "document read");
                    answered.push((index, Some(doc.revision)));
                    if newest.as_ref().map_or(true, |n| doc.revision > n.revision) {
                        newest = Some(doc);
                    }
                }
                Ok(None) => {
                    debug!(backend = backend.name(), "no document stored");
                    answered.push((index, None));
                }
                Err(e) => {
                    warn!(backend = backend.name(), error = %e, "read failed, using other backends");
                    failed += 1;
                }
            }
        }

        let latest = newest.as_ref().map(|d| d.revision);
        let lagging = answered
            .into_iter()
            .filter(|(_, revision)| match (revision, latest) {
                (Some(r), Some(l)) => *r < l,
                _ => true,
            })
            .map(|(index, _)| index)
            .collect();

        ReadSweep {
            newest,
            lagging,
            failed,
        }
    }

    /// Best effort: failures are logged and otherwise ignored.
    async fn repair(&self, doc: &VersionedDocument, lagging: &[usize]) {
        let targets: Vec<&Arc<dyn DocumentBackend>> =
            lagging.iter().filter_map(|&i| self.backends.get(i)).collect();
        let results = join_all(targets.iter().map(|b| b.write(doc))).await;

        for (backend, result) in targets.iter().zip(results) {
            match result {
                Ok(()) => info!(
                    backend = backend.name(),
                    revision = doc.revision,
                    "lagging backend brought up to date"
                ),
                Err(e) => warn!(backend = backend.name(), error = %e, "repair write failed"),
            }
        }
    }

    /// Returns the names of backends that accepted the write, or every failure.
    async fn write_all(&self, doc: &VersionedDocument) -> Result<Vec<&'static str>, Vec<String>> {
        let results = join_all(self.backends.iter().map(|b| b.write(doc))).await;

        let mut accepted = Vec::new();
        let mut failures = Vec::new();

        for (backend, result) in self.backends.iter().zip(results) {
            match result {
                Ok(()) => accepted.push(backend.name()),
                Err(e) => {
                    warn!(backend = backend.name(), error = %e, "write failed");
                    failures.push(format!("{}: {}", backend.name(), e));
                }
            }
        }

        if accepted.is_empty() {
            Err(failures)
        } else {
            Ok(accepted)
        }
    }
}

#[async_trait]
impl DocumentStore for PortfolioStore {
    async fn load(&self) -> VersionedDocument {
        let mut sweep = self.read_all().await;
        if sweep.lagging.is_empty() {
            if let Some(doc) = sweep.newest.take() {
                return doc;
            }
        }

        // Repair and seed under the write lock against a fresh read; a save may have landed.
        let _guard = self.write_lock.lock().await;
        let sweep = self.read_all().await;

        match sweep.newest {
            Some(doc) => {
                if !sweep.lagging.is_empty() {
                    self.repair(&doc, &sweep.lagging).await;
                }
                doc
            }
            None if sweep.failed > 0 => {
                // An unreachable backend may hold the owner's content; a persisted seed
                // would be merged over it by the next save.
                warn!(
                    failed = sweep.failed,
                    "no reachable backend holds a document, serving default without persisting"
                );
                VersionedDocument::seed()
            }
            None => {
                let seed = VersionedDocument::seed();
                match self.write_all(&seed).await {
                    Ok(accepted) => info!(backends = ?accepted, "seeded default portfolio document"),
                    Err(failures) => warn!(?failures, "could not persist default document"),
                }
                seed
            }
        }
    }

    async fn save(
        &self,
        fields: Map<String, Value>,
        expected_revision: Option<u64>,
    ) -> Result<SaveOutcome, PortfolioStoreError> {
        let _guard = self.write_lock.lock().await;

        let current = self
            .read_all()
            .await
            .newest
            .unwrap_or_else(VersionedDocument::seed);

        if let Some(expected) = expected_revision {
            if expected != current.revision {
                return Err(PortfolioStoreError::Conflict {
                    expected,
                    actual: current.revision,
                });
            }
        }

        let merged = merge_fields(&current.document, fields);
        if !merged.rejected.is_empty() {
            warn!(rejected = ?merged.rejected, "ignored malformed fields");
        }

        let next = VersionedDocument {
            revision: current.revision + 1,
            document: merged.document,
        };

        let accepted = self
            .write_all(&next)
            .await
            .map_err(PortfolioStoreError::AllBackendsFailed)?;

        info!(revision = next.revision, backends = ?accepted, "portfolio document saved");

        Ok(SaveOutcome {
            saved: next,
            rejected: merged.rejected,
        })
    }

    async fn reachable_backends(&self) -> Vec<&'static str> {
        let pings = join_all(self.backends.iter().map(|b| b.ping())).await;

        self.backends
            .iter()
            .zip(pings)
            .filter_map(|(b, r)| r.ok().map(|_| b.name()))
            .collect()
    }
}
