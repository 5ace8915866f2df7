use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

//
// ──────────────────────────────────────────────────────────
// Document shape
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Regular,
    Bento,
    Circular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Header,
    Image,
    #[default]
    Text,
    Title,
    Paragraph,
}

/// A block inside a project's case study. `content` is display text, or an image URL
/// when `kind` is [`SectionType::Image`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Section {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SectionType,
    pub content: String,
}

/// Presentational strings, not numbers ("+5k users").
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProjectStats {
    pub users: String,
    pub rating: String,
    pub growth: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub stats: ProjectStats,
    /// Cover image. Empty means "render a placeholder".
    pub image_url: String,
    pub chart_image_url: String,
    pub challenge: String,
    pub solution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_link: Option<String>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Experience {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub period: String,
    pub description: String,
}

/// The single persisted aggregate behind the whole site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioDocument {
    pub projects: Vec<Project>,
    pub experiences: Vec<Experience>,
    pub hero_name: String,
    pub hero_description: String,
    pub about_text: String,
    pub contact_email: String,
    #[serde(rename = "contactLinkedIn")]
    pub contact_linked_in: String,
    pub contact_instagram: String,
    pub contact_medium: String,
    #[serde(rename = "contactGitHub")]
    pub contact_git_hub: String,
    pub profile_image_url: String,
    pub layout: Layout,
}

//
// ──────────────────────────────────────────────────────────
// Seed content
// ──────────────────────────────────────────────────────────
//

const SEED_CHALLENGE: &str = "The challenge was to redesign the user experience for a complex application, making it intuitive and accessible to users.";
const SEED_SOLUTION: &str = "Implemented a clean, minimalist design with progressive disclosure, improving user experience and satisfaction.";

impl PortfolioDocument {
    /// Demonstration content served until the owner saves their own.
    pub fn seed() -> Self {
        Self {
            projects: vec![Project {
                id: 1,
                title: "Project 1".to_string(),
                description: "Innovative app design with focus on user experience.".to_string(),
                tags: vec!["#UX".to_string(), "#Mobile".to_string()],
                stats: ProjectStats {
                    users: "+5k users".to_string(),
                    rating: "⭐ 4.8 rating".to_string(),
                    growth: "📈 40% growth".to_string(),
                },
                image_url: String::new(),
                chart_image_url: String::new(),
                challenge: SEED_CHALLENGE.to_string(),
                solution: SEED_SOLUTION.to_string(),
                cta_link: None,
                sections: vec![],
            }],
            experiences: vec![Experience {
                id: 1,
                title: "Senior Product Manager".to_string(),
                company: "Company Name".to_string(),
                period: "2020 - Present".to_string(),
                description:
                    "Led product strategy and design for key features, resulting in 40% user growth."
                        .to_string(),
            }],
            hero_name: "YOUR NAME".to_string(),
            hero_description: "Product Manager & Designer crafting innovative solutions with strategic thinking and creative design.".to_string(),
            about_text: "Crafting digital experiences that blend strategic thinking with artistic design. I bridge the gap between user needs and technical innovation, creating products that not only work beautifully but tell compelling stories.".to_string(),
            contact_email: "mailto:your.email@example.com".to_string(),
            contact_linked_in: "https://linkedin.com/in/yourprofile".to_string(),
            contact_instagram: "https://instagram.com/yourprofile".to_string(),
            contact_medium: "https://medium.com/@yourprofile".to_string(),
            contact_git_hub: "https://github.com/yourprofile".to_string(),
            profile_image_url: String::new(),
            layout: Layout::Regular,
        }
    }

    /// Top-level fields as a JSON object, the unit the store merges on.
    pub fn to_fields(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Parse a stored or submitted value without ever failing. Fields that are missing
    /// or do not fit the document shape keep the seed value.
    pub fn from_value_lenient(value: Value) -> Self {
        match value {
            Value::Object(fields) => merge_fields(&Self::seed(), fields).document,
            _ => Self::seed(),
        }
    }
}

impl Default for PortfolioDocument {
    fn default() -> Self {
        Self::seed()
    }
}

//
// ──────────────────────────────────────────────────────────
// Shallow merge
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub document: PortfolioDocument,
    /// Keys that were sent but could not be applied.
    pub rejected: Vec<String>,
}

/// Overlays `fields` on `base`, one top-level key at a time. Keys absent from `fields`
/// keep the base value; a key whose value does not deserialize is skipped and reported.
pub fn merge_fields(base: &PortfolioDocument, fields: Map<String, Value>) -> MergeOutcome {
    let mut merged = base.to_fields();
    let mut rejected = Vec::new();

    for (key, value) in fields {
        let mut candidate = merged.clone();
        candidate.insert(key.clone(), value.clone());

        match serde_json::from_value::<PortfolioDocument>(Value::Object(candidate)) {
            Ok(_) => {
                merged.insert(key, value);
            }
            Err(_) => rejected.push(key),
        }
    }

    let document =
        serde_json::from_value(Value::Object(merged)).unwrap_or_else(|_| base.clone());

    MergeOutcome { document, rejected }
}

//
// ──────────────────────────────────────────────────────────
// Revisioned envelope
// ──────────────────────────────────────────────────────────
//

/// What the backends persist: the document plus a monotonically increasing revision.
/// Revision 0 is the seed written on first read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedDocument {
    pub revision: u64,
    pub document: PortfolioDocument,
}

impl VersionedDocument {
    pub fn seed() -> Self {
        Self {
            revision: 0,
            document: PortfolioDocument::seed(),
        }
    }

    /// `{ "revision": n, "document": {...} }`
    pub fn to_envelope(&self) -> Value {
        serde_json::json!({
            "revision": self.revision,
            "document": self.document,
        })
    }

    /// Accepts the envelope, or a bare document (treated as revision 0) so a
    /// hand-written file still loads.
    pub fn from_envelope(value: Value) -> Self {
        match value {
            Value::Object(mut map) if map.contains_key("document") => {
                let revision = map.get("revision").and_then(Value::as_u64).unwrap_or(0);
                let document = map.remove("document").unwrap_or(Value::Null);
                Self {
                    revision,
                    document: PortfolioDocument::from_value_lenient(document),
                }
            }
            other => Self {
                revision: 0,
                document: PortfolioDocument::from_value_lenient(other),
            },
        }
    }
}
