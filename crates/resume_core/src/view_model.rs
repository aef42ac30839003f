//! Read-only snapshots handed to the presentation layer.
use crate::{
    AppPhase, AppState, CoverLetter, ImprovementReport, InterviewPrepReport, JobMatch,
    SkillsGapReport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Excellent,
    Strong,
    Fair,
    Low,
}

impl MatchTier {
    pub fn for_percentage(score: f64) -> Self {
        if score >= 90.0 {
            MatchTier::Excellent
        } else if score >= 80.0 {
            MatchTier::Strong
        } else if score >= 70.0 {
            MatchTier::Fair
        } else {
            MatchTier::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFileView {
    pub name: String,
    pub content_type: String,
    /// Megabytes with two decimals, e.g. `0.25 MB`.
    pub size_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobCardView {
    pub job: JobMatch,
    /// One decimal, e.g. `92.3%`.
    pub match_label: String,
    pub tier: MatchTier,
}

impl JobCardView {
    fn from_job(job: &JobMatch) -> Self {
        Self {
            job: job.clone(),
            match_label: format!("{:.1}%", job.match_percentage),
            tier: MatchTier::for_percentage(job.match_percentage),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightPanelView<R> {
    pub is_open: bool,
    pub is_loading: bool,
    pub result: Option<R>,
    pub job_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub phase: AppPhase,
    pub selected_file: Option<SelectedFileView>,
    /// Collaborator ranking order, never re-sorted.
    pub jobs: Vec<JobCardView>,
    pub improvement: Option<ImprovementReport>,
    pub skills_gap: InsightPanelView<SkillsGapReport>,
    pub interview_prep: InsightPanelView<InterviewPrepReport>,
    pub cover_letter: InsightPanelView<CoverLetter>,
    pub error: Option<String>,
    pub dirty: bool,
}

impl AppViewModel {
    pub(crate) fn project(state: &AppState) -> Self {
        Self {
            phase: state.phase(),
            selected_file: state.selected_file().map(|file| SelectedFileView {
                name: file.name.clone(),
                content_type: file.content_type.clone(),
                size_label: format!("{:.2} MB", file.size() as f64 / 1024.0 / 1024.0),
            }),
            jobs: state.matches().iter().map(JobCardView::from_job).collect(),
            improvement: state.improvement().cloned(),
            skills_gap: state.skills_gap().view(),
            interview_prep: state.interview_prep().view(),
            cover_letter: state.cover_letter().view(),
            error: state.error().message().map(ToOwned::to_owned),
            dirty: state.is_dirty(),
        }
    }

    pub fn any_insight_open(&self) -> bool {
        self.skills_gap.is_open || self.interview_prep.is_open || self.cover_letter.is_open
    }
}
