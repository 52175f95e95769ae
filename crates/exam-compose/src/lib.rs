pub mod error;
pub mod generate;
pub mod orchestrator;
pub mod store;

pub use error::{ComposeError, StoreError};
pub use generate::{
    ContentGenerationService, GenerationFailure, GenerationRequest, TemplateGenerator,
};
pub use orchestrator::CompositionOrchestrator;
pub use store::{ArtifactStore, InMemoryStore, JsonDirStore};
