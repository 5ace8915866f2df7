pub mod editor;
pub mod entities;

pub use editor::{
    parse_tags, DocumentEditor, EditStep, EditorError, ExperienceChanges, ProfileChanges,
    ProjectChanges, ProjectEditSession, ProjectStatsChanges, SectionChanges,
};
pub use entities::{
    merge_fields, Experience, Layout, MergeOutcome, PortfolioDocument, Project, ProjectStats,
    Section, SectionType, VersionedDocument,
};
