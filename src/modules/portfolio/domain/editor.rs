//! In-memory working copy of the portfolio document.
//!
//! The editor owns id allocation for projects and experiences: counters start above the
//! highest id in the loaded document and only ever grow, so a delete followed by an add
//! never hands out an id that was used earlier in the same session. Once a counter passes
//! `i64::MAX` further adds are refused.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::portfolio::domain::entities::{
    Experience, Layout, PortfolioDocument, Project, ProjectStats, Section, SectionType,
};
use crate::shared::patch_field::PatchField;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("Project {0} not found")]
    ProjectNotFound(i64),

    #[error("Experience {0} not found")]
    ExperienceNotFound(i64),

    #[error("Section {0} not found")]
    SectionNotFound(String),

    #[error("Set a cover image before editing project details")]
    CoverImageRequired,

    #[error("Action not available in the {0:?} step")]
    WrongStep(EditStep),

    #[error("No project is being edited")]
    NotEditing,

    #[error("No {0} id left to allocate")]
    IdSpaceExhausted(&'static str),
}

//
// ──────────────────────────────────────────────────────────
// Change sets
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProjectStatsChanges {
    #[schema(value_type = Option<String>)]
    pub users: PatchField<String>,
    #[schema(value_type = Option<String>)]
    pub rating: PatchField<String>,
    #[schema(value_type = Option<String>)]
    pub growth: PatchField<String>,
}

/// Field-level changes to one project. Omitted fields are left alone.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectChanges {
    /// Cover step.
    #[schema(value_type = Option<String>)]
    pub image_url: PatchField<String>,

    // Details step.
    #[schema(value_type = Option<String>)]
    pub title: PatchField<String>,
    #[schema(value_type = Option<String>)]
    pub description: PatchField<String>,
    #[schema(value_type = Option<Vec<String>>)]
    pub tags: PatchField<Vec<String>>,
    /// Comma separated alternative to `tags`, as typed in the admin form.
    #[schema(value_type = Option<String>)]
    pub tags_text: PatchField<String>,
    pub stats: Option<ProjectStatsChanges>,
    #[schema(value_type = Option<String>)]
    pub chart_image_url: PatchField<String>,
    #[schema(value_type = Option<String>)]
    pub challenge: PatchField<String>,
    #[schema(value_type = Option<String>)]
    pub solution: PatchField<String>,
    /// `null` removes the link.
    #[schema(value_type = Option<String>)]
    pub cta_link: PatchField<String>,
}

impl ProjectChanges {
    pub fn touches_details(&self) -> bool {
        !(self.title.is_unset()
            && self.description.is_unset()
            && self.tags.is_unset()
            && self.tags_text.is_unset()
            && self.stats.is_none()
            && self.chart_image_url.is_unset()
            && self.challenge.is_unset()
            && self.solution.is_unset()
            && self.cta_link.is_unset())
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ExperienceChanges {
    #[schema(value_type = Option<String>)]
    pub title: PatchField<String>,
    #[schema(value_type = Option<String>)]
    pub company: PatchField<String>,
    #[schema(value_type = Option<String>)]
    pub period: PatchField<String>,
    #[schema(value_type = Option<String>)]
    pub description: PatchField<String>,
}

/// Top-level text fields and layout.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileChanges {
    #[schema(value_type = Option<String>)]
    pub hero_name: PatchField<String>,
    #[schema(value_type = Option<String>)]
    pub hero_description: PatchField<String>,
    #[schema(value_type = Option<String>)]
    pub about_text: PatchField<String>,
    #[schema(value_type = Option<String>)]
    pub contact_email: PatchField<String>,
    #[serde(rename = "contactLinkedIn")]
    #[schema(value_type = Option<String>)]
    pub contact_linked_in: PatchField<String>,
    #[schema(value_type = Option<String>)]
    pub contact_instagram: PatchField<String>,
    #[schema(value_type = Option<String>)]
    pub contact_medium: PatchField<String>,
    #[serde(rename = "contactGitHub")]
    #[schema(value_type = Option<String>)]
    pub contact_git_hub: PatchField<String>,
    #[schema(value_type = Option<String>)]
    pub profile_image_url: PatchField<String>,
    #[schema(value_type = Option<Layout>)]
    pub layout: PatchField<Layout>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SectionChanges {
    #[serde(rename = "type")]
    #[schema(value_type = Option<SectionType>)]
    pub kind: PatchField<SectionType>,
    #[schema(value_type = Option<String>)]
    pub content: PatchField<String>,
}

/// Splits the admin form's tag input (`"#UX, #Mobile"`).
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

//
// ──────────────────────────────────────────────────────────
// Project edit session (cover -> details)
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStep {
    Cover,
    Details,
}

/// A detached copy of one project. Nothing reaches the document until
/// [`DocumentEditor::save_project`].
#[derive(Debug, Clone)]
pub struct ProjectEditSession {
    step: EditStep,
    project: Project,
}

impl ProjectEditSession {
    pub fn step(&self) -> EditStep {
        self.step
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn set_cover_image(&mut self, url: String) -> Result<(), EditorError> {
        self.require(EditStep::Cover)?;
        self.project.image_url = url;
        Ok(())
    }

    /// Guarded by a non-empty cover image; on rejection the step stays `Cover`.
    pub fn continue_to_details(&mut self) -> Result<(), EditorError> {
        if self.project.image_url.is_empty() {
            return Err(EditorError::CoverImageRequired);
        }
        self.step = EditStep::Details;
        Ok(())
    }

    pub fn back_to_cover(&mut self) {
        self.step = EditStep::Cover;
    }

    pub fn apply_details(&mut self, changes: ProjectChanges) -> Result<(), EditorError> {
        self.require(EditStep::Details)?;
        let project = &mut self.project;

        changes.title.apply_to(&mut project.title);
        changes.description.apply_to(&mut project.description);
        changes.tags.apply_to(&mut project.tags);
        if let PatchField::Value(text) = changes.tags_text {
            project.tags = parse_tags(&text);
        }
        if let Some(stats) = changes.stats {
            stats.users.apply_to(&mut project.stats.users);
            stats.rating.apply_to(&mut project.stats.rating);
            stats.growth.apply_to(&mut project.stats.growth);
        }
        changes.chart_image_url.apply_to(&mut project.chart_image_url);
        changes.challenge.apply_to(&mut project.challenge);
        changes.solution.apply_to(&mut project.solution);
        changes.cta_link.apply_to_option(&mut project.cta_link);

        Ok(())
    }

    /// Appends a section; defaults to an empty text block.
    pub fn add_section(
        &mut self,
        kind: Option<SectionType>,
        content: Option<String>,
    ) -> Result<&Section, EditorError> {
        self.require(EditStep::Details)?;

        let sections = &mut self.project.sections;
        sections.push(Section {
            id: Uuid::now_v7().to_string(),
            kind: kind.unwrap_or_default(),
            content: content.unwrap_or_default(),
        });

        Ok(&sections[sections.len() - 1])
    }

    pub fn update_section(
        &mut self,
        section_id: &str,
        changes: SectionChanges,
    ) -> Result<&Section, EditorError> {
        self.require(EditStep::Details)?;

        let section = self
            .project
            .sections
            .iter_mut()
            .find(|s| s.id == section_id)
            .ok_or_else(|| EditorError::SectionNotFound(section_id.to_string()))?;

        changes.kind.apply_to(&mut section.kind);
        changes.content.apply_to(&mut section.content);

        Ok(section)
    }

    pub fn remove_section(&mut self, section_id: &str) -> Result<Section, EditorError> {
        self.require(EditStep::Details)?;

        let index = self
            .project
            .sections
            .iter()
            .position(|s| s.id == section_id)
            .ok_or_else(|| EditorError::SectionNotFound(section_id.to_string()))?;

        Ok(self.project.sections.remove(index))
    }

    fn require(&self, step: EditStep) -> Result<(), EditorError> {
        if self.step == step {
            Ok(())
        } else {
            Err(EditorError::WrongStep(self.step))
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Document editor
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct DocumentEditor {
    document: PortfolioDocument,
    revision: u64,
    /// `None` once the id space is used up.
    next_project_id: Option<i64>,
    next_experience_id: Option<i64>,
    editing: Option<ProjectEditSession>,
}

impl DocumentEditor {
    pub fn new(document: PortfolioDocument, revision: u64) -> Self {
        let next_project_id = next_id(document.projects.iter().map(|p| p.id));
        let next_experience_id = next_id(document.experiences.iter().map(|e| e.id));

        Self {
            document,
            revision,
            next_project_id,
            next_experience_id,
            editing: None,
        }
    }

    pub fn document(&self) -> &PortfolioDocument {
        &self.document
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// What a save sends to the store.
    pub fn to_fields(&self) -> Map<String, Value> {
        self.document.to_fields()
    }

    /// Adopt the revision the store assigned to the last save.
    pub fn mark_saved(&mut self, revision: u64) {
        self.revision = revision;
    }

    // ── top-level fields ────────────────────────────────────

    pub fn apply_profile(&mut self, changes: ProfileChanges) {
        let doc = &mut self.document;

        changes.hero_name.apply_to(&mut doc.hero_name);
        changes.hero_description.apply_to(&mut doc.hero_description);
        changes.about_text.apply_to(&mut doc.about_text);
        changes.contact_email.apply_to(&mut doc.contact_email);
        changes.contact_linked_in.apply_to(&mut doc.contact_linked_in);
        changes.contact_instagram.apply_to(&mut doc.contact_instagram);
        changes.contact_medium.apply_to(&mut doc.contact_medium);
        changes.contact_git_hub.apply_to(&mut doc.contact_git_hub);
        changes.profile_image_url.apply_to(&mut doc.profile_image_url);
        changes.layout.apply_to(&mut doc.layout);
    }

    // ── projects ───────────────────────────────────────────

    pub fn add_project(&mut self) -> Result<&Project, EditorError> {
        let id = take_id(&mut self.next_project_id, "project")?;

        self.document.projects.push(Project {
            id,
            title: "New Project".to_string(),
            description: "Project description".to_string(),
            tags: vec!["#Tag".to_string()],
            stats: ProjectStats {
                users: "0 users".to_string(),
                rating: "⭐ 0 rating".to_string(),
                growth: "📈 0% growth".to_string(),
            },
            image_url: String::new(),
            chart_image_url: String::new(),
            challenge: "Challenge description".to_string(),
            solution: "Solution description".to_string(),
            cta_link: Some(String::new()),
            sections: vec![],
        });

        Ok(&self.document.projects[self.document.projects.len() - 1])
    }

    pub fn project(&self, id: i64) -> Result<&Project, EditorError> {
        self.document
            .projects
            .iter()
            .find(|p| p.id == id)
            .ok_or(EditorError::ProjectNotFound(id))
    }

    pub fn remove_project(&mut self, id: i64) -> Result<Project, EditorError> {
        let index = self
            .document
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(EditorError::ProjectNotFound(id))?;

        if self.editing.as_ref().is_some_and(|s| s.project.id == id) {
            self.editing = None;
        }

        Ok(self.document.projects.remove(index))
    }

    /// Opens a project at the cover step. Replaces any session already open.
    pub fn begin_cover_edit(&mut self, id: i64) -> Result<&mut ProjectEditSession, EditorError> {
        let project = self.project(id)?.clone();
        Ok(self.editing.insert(ProjectEditSession {
            step: EditStep::Cover,
            project,
        }))
    }

    /// Opens a project straight at the details step, allowed only once it has a cover.
    pub fn begin_details_edit(
        &mut self,
        id: i64,
    ) -> Result<&mut ProjectEditSession, EditorError> {
        let project = self.project(id)?;
        if project.image_url.is_empty() {
            return Err(EditorError::CoverImageRequired);
        }

        let project = project.clone();
        Ok(self.editing.insert(ProjectEditSession {
            step: EditStep::Details,
            project,
        }))
    }

    pub fn editing(&self) -> Option<&ProjectEditSession> {
        self.editing.as_ref()
    }

    /// Commits the edited copy over the entry with the same id and closes the session.
    /// If that entry was removed meanwhile, the session is dropped and the error reported.
    pub fn save_project(&mut self) -> Result<&Project, EditorError> {
        let session = self.editing.take().ok_or(EditorError::NotEditing)?;
        let id = session.project.id;

        let slot = self
            .document
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(EditorError::ProjectNotFound(id))?;

        *slot = session.project;
        Ok(slot)
    }

    pub fn cancel_project_edit(&mut self) {
        self.editing = None;
    }

    // ── experiences ────────────────────────────────────────

    pub fn add_experience(&mut self) -> Result<&Experience, EditorError> {
        let id = take_id(&mut self.next_experience_id, "experience")?;

        self.document.experiences.push(Experience {
            id,
            title: "Job Title".to_string(),
            company: "Company Name".to_string(),
            period: "Year - Year".to_string(),
            description: "Role description".to_string(),
        });

        Ok(&self.document.experiences[self.document.experiences.len() - 1])
    }

    pub fn update_experience(
        &mut self,
        id: i64,
        changes: ExperienceChanges,
    ) -> Result<&Experience, EditorError> {
        let experience = self
            .document
            .experiences
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(EditorError::ExperienceNotFound(id))?;

        changes.title.apply_to(&mut experience.title);
        changes.company.apply_to(&mut experience.company);
        changes.period.apply_to(&mut experience.period);
        changes.description.apply_to(&mut experience.description);

        Ok(experience)
    }

    pub fn remove_experience(&mut self, id: i64) -> Result<Experience, EditorError> {
        let index = self
            .document
            .experiences
            .iter()
            .position(|e| e.id == id)
            .ok_or(EditorError::ExperienceNotFound(id))?;

        Ok(self.document.experiences.remove(index))
    }
}

fn next_id(ids: impl Iterator<Item = i64>) -> Option<i64> {
    ids.max().unwrap_or(0).checked_add(1)
}

fn take_id(next: &mut Option<i64>, kind: &'static str) -> Result<i64, EditorError> {
    let id = next.ok_or(EditorError::IdSpaceExhausted(kind))?;
    *next = id.checked_add(1);
    Ok(id)
}
