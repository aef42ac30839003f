use crate::{
    CoverLetter, Failure, ImprovementReport, InsightKind, InterviewPrepReport, JobMatch,
    MatchReport, RequestToken, SelectedFile, SkillsGapReport,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked or dropped a resume file.
    FileSelected(SelectedFile),
    /// User clicked Start Over.
    ResetClicked,
    /// User asked to match the selected resume against jobs.
    MatchClicked,
    /// User asked for improvement suggestions on the selected resume.
    ImproveClicked,
    /// User asked for one insight report on a matched job.
    InsightRequested { kind: InsightKind, job: JobMatch },
    /// User closed an insight panel.
    InsightClosed(InsightKind),
    /// User dismissed the error banner.
    ErrorDismissed,
    /// Collaborator reply to a match request.
    MatchCompleted {
        token: RequestToken,
        result: Result<MatchReport, Failure>,
    },
    /// Collaborator reply to an improve request.
    ImproveCompleted {
        token: RequestToken,
        result: Result<ImprovementReport, Failure>,
    },
    /// Collaborator reply to an insight request.
    InsightCompleted {
        token: RequestToken,
        outcome: InsightOutcome,
    },
    /// Render tick.
    Tick,
}

/// Typed reply of one insight call; the variant names the workflow it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightOutcome {
    SkillsGap(Result<SkillsGapReport, Failure>),
    InterviewPrep(Result<InterviewPrepReport, Failure>),
    CoverLetter(Result<CoverLetter, Failure>),
}

impl InsightOutcome {
    pub fn kind(&self) -> InsightKind {
        match self {
            InsightOutcome::SkillsGap(_) => InsightKind::SkillsGap,
            InsightOutcome::InterviewPrep(_) => InsightKind::InterviewPrep,
            InsightOutcome::CoverLetter(_) => InsightKind::CoverLetter,
        }
    }
}
