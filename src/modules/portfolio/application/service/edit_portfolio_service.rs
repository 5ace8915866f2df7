use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::modules::portfolio::application::ports::incoming::use_cases::{
    EditCommand, EditPortfolioError, EditPortfolioUseCase, EditResult, Edited,
};
use crate::modules::portfolio::application::ports::outgoing::{DocumentStore, PortfolioStoreError};
use crate::modules::portfolio::domain::{DocumentEditor, EditorError};
use crate::shared::patch_field::PatchField;

/// Unpinned edits retry this many times when another save lands in between.
const MAX_ATTEMPTS: usize = 3;

pub struct EditPortfolioService<S>
where
    S: DocumentStore,
{
    store: Arc<S>,
}

impl<S> EditPortfolioService<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> EditPortfolioUseCase for EditPortfolioService<S>
where
    S: DocumentStore,
{
    async fn execute(
        &self,
        command: EditCommand,
        expected_revision: Option<u64>,
    ) -> Result<EditResult, EditPortfolioError> {
        let mut attempt = 1;

        loop {
            let current = self.store.load().await;

            if let Some(expected) = expected_revision {
                if expected != current.revision {
                    return Err(EditPortfolioError::Conflict {
                        expected,
                        actual: current.revision,
                    });
                }
            }

            let mut editor = DocumentEditor::new(current.document, current.revision);
            let edited = apply(&mut editor, command.clone())?;

            // Pin the revision we edited so a save that lands in between is not overwritten.
            match self
                .store
                .save(editor.to_fields(), Some(editor.revision()))
                .await
            {
                Ok(outcome) => {
                    editor.mark_saved(outcome.saved.revision);
                    return Ok(EditResult {
                        revision: editor.revision(),
                        edited,
                    });
                }
                Err(PortfolioStoreError::Conflict { expected, actual })
                    if expected_revision.is_none() && attempt < MAX_ATTEMPTS =>
                {
                    debug!(expected, actual, attempt, "document moved during edit, retrying");
                    attempt += 1;
                }
                Err(PortfolioStoreError::Conflict { expected, actual }) => {
                    return Err(EditPortfolioError::Conflict { expected, actual });
                }
                Err(PortfolioStoreError::AllBackendsFailed(failures)) => {
                    warn!(?failures, "edit could not be persisted");
                    return Err(EditPortfolioError::SaveFailed(failures.join("; ")));
                }
            }
        }
    }
}

fn apply(editor: &mut DocumentEditor, command: EditCommand) -> Result<Edited, EditorError> {
    match command {
        EditCommand::UpdateProfile(changes) => {
            editor.apply_profile(changes);
            Ok(Edited::Profile(Box::new(editor.document().clone())))
        }

        EditCommand::AddProject => Ok(Edited::Project(editor.add_project()?.clone())),

        EditCommand::UpdateProject { id, mut changes } => {
            let session = editor.begin_cover_edit(id)?;

            if let PatchField::Value(url) = std::mem::take(&mut changes.image_url) {
                session.set_cover_image(url)?;
            }
            if changes.touches_details() {
                session.continue_to_details()?;
                session.apply_details(changes)?;
            }

            Ok(Edited::Project(editor.save_project()?.clone()))
        }

        EditCommand::RemoveProject { id } => {
            editor.remove_project(id)?;
            Ok(Edited::Removed)
        }

        EditCommand::AddSection {
            project_id,
            kind,
            content,
        } => {
            let section = editor
                .begin_details_edit(project_id)?
                .add_section(kind, content)?
                .clone();
            editor.save_project()?;
            Ok(Edited::Section(section))
        }

        EditCommand::UpdateSection {
            project_id,
            section_id,
            changes,
        } => {
            let section = editor
                .begin_details_edit(project_id)?
                .update_section(&section_id, changes)?
                .clone();
            editor.save_project()?;
            Ok(Edited::Section(section))
        }

        EditCommand::RemoveSection {
            project_id,
            section_id,
        } => {
            editor
                .begin_details_edit(project_id)?
                .remove_section(&section_id)?;
            editor.save_project()?;
            Ok(Edited::Removed)
        }

        EditCommand::AddExperience => Ok(Edited::Experience(editor.add_experience()?.clone())),

        EditCommand::UpdateExperience { id, changes } => Ok(Edited::Experience(
            editor.update_experience(id, changes)?.clone(),
        )),

        EditCommand::RemoveExperience { id } => {
            editor.remove_experience(id)?;
            Ok(Edited::Removed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::portfolio::application::ports::outgoing::{
        DocumentBackend, SaveOutcome,
    };
    use crate::modules::portfolio::application::service::{MemoryBackend, PortfolioStore};
    use crate::modules::portfolio::domain::{
        PortfolioDocument, ProfileChanges, ProjectChanges, SectionChanges, SectionType,
        VersionedDocument,
    };
    use serde_json::{Map, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service_over(backend: &Arc<MemoryBackend>) -> EditPortfolioService<PortfolioStore> {
        let store = PortfolioStore::new(vec![Arc::clone(backend) as Arc<dyn DocumentBackend>]);
        EditPortfolioService::new(Arc::new(store))
    }

    fn with_cover(revision: u64) -> VersionedDocument {
        let mut document = PortfolioDocument::seed();
        document.projects[0].image_url = "https://cdn.example.com/p1.png".to_string();
        VersionedDocument { revision, document }
    }

    /* -------------------------------------------------- */
    /* projects                                           */
    /* -------------------------------------------------- */

    #[tokio::test]
    async fn add_project_persists_template_with_next_id() {
        let backend = MemoryBackend::holding("file", VersionedDocument::seed());
        let service = service_over(&backend);

        let result = service.execute(EditCommand::AddProject, None).await.unwrap();

        assert_eq!(result.revision, 1);
        match result.edited {
            Edited::Project(p) => {
                assert_eq!(p.id, 2);
                assert_eq!(p.title, "New Project");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(backend.stored().unwrap().document.projects.len(), 2);
    }

    #[tokio::test]
    async fn details_without_cover_are_refused_and_nothing_is_written() {
        let backend = MemoryBackend::holding("file", VersionedDocument::seed());
        let service = service_over(&backend);

        let result = service
            .execute(
                EditCommand::UpdateProject {
                    id: 1,
                    changes: ProjectChanges {
                        title: PatchField::Value("X".to_string()),
                        ..Default::default()
                    },
                },
                None,
            )
            .await;

        assert!(matches!(
            result,
            Err(EditPortfolioError::Editor(EditorError::CoverImageRequired))
        ));
        assert_eq!(backend.stored().unwrap().revision, 0);
    }

    #[tokio::test]
    async fn cover_and_details_in_one_request() {
        let backend = MemoryBackend::holding("file", VersionedDocument::seed());
        let service = service_over(&backend);

        service
            .execute(
                EditCommand::UpdateProject {
                    id: 1,
                    changes: ProjectChanges {
                        image_url: PatchField::Value("https://cdn.example.com/c.png".into()),
                        title: PatchField::Value("X".to_string()),
                        ..Default::default()
                    },
                },
                None,
            )
            .await
            .unwrap();

        let stored = backend.stored().unwrap().document.projects[0].clone();
        assert_eq!(stored.title, "X");
        assert_eq!(stored.image_url, "https://cdn.example.com/c.png");
    }

    #[tokio::test]
    async fn cover_only_update_needs_no_image_beforehand() {
        let backend = MemoryBackend::holding("file", VersionedDocument::seed());
        let service = service_over(&backend);

        let result = service
            .execute(
                EditCommand::UpdateProject {
                    id: 1,
                    changes: ProjectChanges {
                        image_url: PatchField::Value("https://cdn.example.com/c.png".into()),
                        ..Default::default()
                    },
                },
                None,
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn add_project_at_max_id_is_refused_and_nothing_is_written() {
        let mut stored = VersionedDocument::seed();
        stored.document.projects[0].id = i64::MAX;
        let backend = MemoryBackend::holding("file", stored);
        let service = service_over(&backend);

        let result = service.execute(EditCommand::AddProject, None).await;

        assert!(matches!(
            result,
            Err(EditPortfolioError::Editor(EditorError::IdSpaceExhausted("project")))
        ));
        assert_eq!(backend.stored().unwrap().revision, 0);
        assert_eq!(backend.stored().unwrap().document.projects.len(), 1);
    }

    #[tokio::test]
    async fn unknown_project_is_reported() {
        let backend = MemoryBackend::holding("file", VersionedDocument::seed());
        let service = service_over(&backend);

        let result = service
            .execute(EditCommand::RemoveProject { id: 42 }, None)
            .await;

        assert!(matches!(
            result,
            Err(EditPortfolioError::Editor(EditorError::ProjectNotFound(42)))
        ));
    }

    /* -------------------------------------------------- */
    /* sections                                           */
    /* -------------------------------------------------- */

    #[tokio::test]
    async fn section_lifecycle() {
        let backend = MemoryBackend::holding("file", with_cover(0));
        let service = service_over(&backend);

        let added = service
            .execute(
                EditCommand::AddSection {
                    project_id: 1,
                    kind: None,
                    content: None,
                },
                None,
            )
            .await
            .unwrap();
        let Edited::Section(section) = added.edited else {
            panic!("expected section");
        };
        assert_eq!(section.kind, SectionType::Text);
        assert_eq!(section.content, "");

        service
            .execute(
                EditCommand::UpdateSection {
                    project_id: 1,
                    section_id: section.id.clone(),
                    changes: SectionChanges {
                        content: PatchField::Value("Hello".to_string()),
                        ..Default::default()
                    },
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(
            backend.stored().unwrap().document.projects[0].sections[0].content,
            "Hello"
        );

        let removed = service
            .execute(
                EditCommand::RemoveSection {
                    project_id: 1,
                    section_id: section.id,
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(removed.revision, 3);
        assert!(backend.stored().unwrap().document.projects[0]
            .sections
            .is_empty());
    }

    #[tokio::test]
    async fn sections_need_a_cover() {
        let backend = MemoryBackend::holding("file", VersionedDocument::seed());
        let service = service_over(&backend);

        let result = service
            .execute(
                EditCommand::AddSection {
                    project_id: 1,
                    kind: Some(SectionType::Image),
                    content: None,
                },
                None,
            )
            .await;

        assert!(matches!(
            result,
            Err(EditPortfolioError::Editor(EditorError::CoverImageRequired))
        ));
    }

    /* -------------------------------------------------- */
    /* profile, experiences and revisions                 */
    /* -------------------------------------------------- */

    #[tokio::test]
    async fn profile_update_keeps_collections() {
        let backend = MemoryBackend::holding("file", with_cover(2));
        let service = service_over(&backend);

        let result = service
            .execute(
                EditCommand::UpdateProfile(ProfileChanges {
                    hero_name: PatchField::Value("Ada".to_string()),
                    ..Default::default()
                }),
                Some(2),
            )
            .await
            .unwrap();

        assert_eq!(result.revision, 3);
        let stored = backend.stored().unwrap();
        assert_eq!(stored.document.hero_name, "Ada");
        assert_eq!(stored.document.projects, with_cover(2).document.projects);
    }

    #[tokio::test]
    async fn experience_add_and_remove() {
        let backend = MemoryBackend::holding("file", VersionedDocument::seed());
        let service = service_over(&backend);

        let added = service.execute(EditCommand::AddExperience, None).await.unwrap();
        let Edited::Experience(experience) = added.edited else {
            panic!("expected experience");
        };
        assert_eq!(experience.id, 2);

        service
            .execute(EditCommand::RemoveExperience { id: 1 }, None)
            .await
            .unwrap();

        let ids: Vec<i64> = backend
            .stored()
            .unwrap()
            .document
            .experiences
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn stale_if_match_is_a_conflict() {
        let backend = MemoryBackend::holding("file", with_cover(4));
        let service = service_over(&backend);

        let result = service.execute(EditCommand::AddProject, Some(3)).await;

        assert!(matches!(
            result,
            Err(EditPortfolioError::Conflict {
                expected: 3,
                actual: 4
            })
        ));
    }

    #[tokio::test]
    async fn storage_failure_is_save_failed() {
        let backend = MemoryBackend::holding("file", VersionedDocument::seed());
        let service = service_over(&backend);
        backend.set_failing(true);

        let result = service.execute(EditCommand::AddExperience, None).await;

        assert!(matches!(result, Err(EditPortfolioError::SaveFailed(_))));
    }

    /// Reports a conflict on the first save, then delegates.
    struct RacingStore {
        inner: PortfolioStore,
        saves: AtomicUsize,
    }

    #[async_trait]
    impl DocumentStore for RacingStore {
        async fn load(&self) -> VersionedDocument {
            self.inner.load().await
        }

        async fn save(
            &self,
            fields: Map<String, Value>,
            expected_revision: Option<u64>,
        ) -> Result<SaveOutcome, PortfolioStoreError> {
            if self.saves.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(PortfolioStoreError::Conflict {
                    expected: expected_revision.unwrap_or(0),
                    actual: 99,
                });
            }
            self.inner.save(fields, expected_revision).await
        }

        async fn reachable_backends(&self) -> Vec<&'static str> {
            self.inner.reachable_backends().await
        }
    }

    #[tokio::test]
    async fn unpinned_edit_retries_after_a_race() {
        let backend = MemoryBackend::holding("file", VersionedDocument::seed());
        let store = RacingStore {
            inner: PortfolioStore::new(vec![Arc::clone(&backend) as Arc<dyn DocumentBackend>]),
            saves: AtomicUsize::new(0),
        };
        let service = EditPortfolioService::new(Arc::new(store));

        let result = service.execute(EditCommand::AddProject, None).await.unwrap();

        assert_eq!(result.revision, 1);
    }
}
