pub mod batch;
pub mod pipeline;
pub mod session;
pub mod settings_store;

pub use batch::{BatchFailure, BatchProcessor, BatchReport, CancelFlag};
pub use pipeline::ImagePipeline;
pub use session::{InMemorySession, SessionStore};
pub use settings_store::SettingsStore;
