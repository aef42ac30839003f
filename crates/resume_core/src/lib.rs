//! Resume matcher core: pure workflow state machine and view-model helpers.
mod effect;
mod failure;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use failure::{Failure, FailureCategory};
pub use model::{
    job_summary, CoverLetter, ImprovementReport, InsightKind, InsightRequest, InterviewPrepReport,
    InterviewQuestion, JobMatch, MatchReport, SkillsGapReport, Suggestion,
};
pub use msg::{InsightOutcome, Msg};
pub use state::{
    AppPhase, AppState, ErrorChannel, InsightWorkflow, RequestToken, ResumeTextCache,
    SelectedFile, DEFAULT_MAX_UPLOAD_BYTES,
};
pub use update::update;
pub use view_model::{AppViewModel, InsightPanelView, JobCardView, MatchTier, SelectedFileView};
