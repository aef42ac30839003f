//! Resume matcher engine: collaborator calls and effect execution.
mod collaborator;
mod engine;
mod export;
mod reply;
mod types;

pub use collaborator::{Collaborator, CollaboratorSettings, ReqwestCollaborator, DEFAULT_BASE_URL};
pub use engine::{run_effect, EngineHandle};
pub use export::{report_filename, ExportError, ReportWriter};
pub use reply::ServiceReply;
pub use types::EngineEvent;
