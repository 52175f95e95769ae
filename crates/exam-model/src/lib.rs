pub mod artifact;
pub mod blueprint;
pub mod category;
pub mod error;
pub mod filters;
pub mod ids;
pub mod policy;

pub use artifact::{
    AnswerOption, ArtifactStatus, AssessmentArtifact, Question, QuestionBody, Section,
};
pub use blueprint::{AssessmentBlueprint, DifficultyMix, SectionConfig};
pub use category::SectionCategory;
pub use error::ModelError;
pub use filters::{FilterCascade, FilterLevel};
pub use ids::{ArtifactId, ClassId, OptionId, QuestionId, TenantId};
pub use policy::ClassPolicy;
