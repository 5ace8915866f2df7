use async_trait::async_trait;

use crate::modules::portfolio::domain::{
    EditorError, Experience, ExperienceChanges, PortfolioDocument, ProfileChanges, Project,
    ProjectChanges, Section, SectionChanges, SectionType,
};

//
// ──────────────────────────────────────────────────────────
// Commands
// ──────────────────────────────────────────────────────────
//

/// One admin edit, applied to a fresh working copy of the stored document.
#[derive(Debug, Clone)]
pub enum EditCommand {
    UpdateProfile(ProfileChanges),

    AddProject,
    UpdateProject {
        id: i64,
        changes: ProjectChanges,
    },
    RemoveProject {
        id: i64,
    },

    AddSection {
        project_id: i64,
        kind: Option<SectionType>,
        content: Option<String>,
    },
    UpdateSection {
        project_id: i64,
        section_id: String,
        changes: SectionChanges,
    },
    RemoveSection {
        project_id: i64,
        section_id: String,
    },

    AddExperience,
    UpdateExperience {
        id: i64,
        changes: ExperienceChanges,
    },
    RemoveExperience {
        id: i64,
    },
}

/// The item an edit produced or touched.
#[derive(Debug, Clone, PartialEq)]
pub enum Edited {
    Profile(Box<PortfolioDocument>),
    Project(Project),
    Section(Section),
    Experience(Experience),
    Removed,
}

#[derive(Debug, Clone)]
pub struct EditResult {
    pub revision: u64,
    pub edited: Edited,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum EditPortfolioError {
    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("Document changed since revision {expected} (now {actual})")]
    Conflict { expected: u64, actual: u64 },

    #[error("Failed to save data: {0}")]
    SaveFailed(String),
}

//
// ──────────────────────────────────────────────────────────
// Use case trait
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait EditPortfolioUseCase: Send + Sync {
    async fn execute(
        &self,
        command: EditCommand,
        expected_revision: Option<u64>,
    ) -> Result<EditResult, EditPortfolioError>;
}
