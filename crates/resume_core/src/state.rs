use std::sync::Arc;

use crate::view_model::{AppViewModel, InsightPanelView};
use crate::{
    CoverLetter, ImprovementReport, InsightKind, InterviewPrepReport, JobMatch, SkillsGapReport,
};

/// Advertised upload limit of the collaborator.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Phase of the primary analyze-or-improve workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Initial,
    Loading,
    Results,
    Improving,
    ImprovedResult,
}

impl AppPhase {
    /// True while a primary call is outstanding.
    pub fn is_busy(self) -> bool {
        matches!(self, AppPhase::Loading | AppPhase::Improving)
    }
}

/// Identifies one outgoing request of a workflow instance.
///
/// Tokens only ever move forward; a reply is applied iff it carries the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }

    fn advance(&mut self) -> RequestToken {
        self.0 += 1;
        *self
    }
}

/// The resume file chosen by the user, as declared by the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Checks the declared type only; the content itself is not sniffed.
    pub fn is_pdf(&self) -> bool {
        let ct = self
            .content_type
            .split(';')
            .next()
            .unwrap_or(&self.content_type)
            .trim();
        ct.eq_ignore_ascii_case(PDF_CONTENT_TYPE)
    }
}

/// Single slot holding the most recent failure message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorChannel {
    message: Option<String>,
}

impl ErrorChannel {
    pub fn set(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Resume text extracted by the last successful match call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResumeTextCache {
    text: String,
}

impl ResumeTextCache {
    pub(crate) fn store(&mut self, text: String) {
        self.text = text;
    }

    pub(crate) fn invalidate(&mut self) {
        self.text.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Request/result lifecycle of one job-scoped insight kind.
///
/// Each instance owns its own `target_job`; nothing is shared between kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightWorkflow<R> {
    target_job: Option<JobMatch>,
    is_open: bool,
    is_loading: bool,
    result: Option<R>,
    token: RequestToken,
}

impl<R> Default for InsightWorkflow<R> {
    fn default() -> Self {
        Self {
            target_job: None,
            is_open: false,
            is_loading: false,
            result: None,
            token: RequestToken::default(),
        }
    }
}

impl<R: Clone> InsightWorkflow<R> {
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn result(&self) -> Option<&R> {
        self.result.as_ref()
    }

    pub fn target_job(&self) -> Option<&JobMatch> {
        self.target_job.as_ref()
    }

    pub fn token(&self) -> RequestToken {
        self.token
    }

    /// Opens the panel for `job` and returns the token the new request must carry.
    pub(crate) fn begin(&mut self, job: JobMatch) -> RequestToken {
        self.target_job = Some(job);
        self.is_open = true;
        self.is_loading = true;
        self.result = None;
        self.token.advance()
    }

    /// Returns false when the reply is stale and was dropped.
    pub(crate) fn complete(&mut self, token: RequestToken, result: R) -> bool {
        if token != self.token {
            return false;
        }
        self.is_loading = false;
        self.result = Some(result);
        true
    }

    /// Returns false when the reply is stale and was dropped.
    pub(crate) fn fail(&mut self, token: RequestToken) -> bool {
        if token != self.token {
            return false;
        }
        self.is_open = false;
        self.is_loading = false;
        true
    }

    /// Hides the panel. An outstanding request stays on the wire but its reply
    /// no longer matches and is dropped on arrival.
    pub(crate) fn close(&mut self) -> bool {
        let changed = self.is_open || self.is_loading;
        if self.is_loading {
            self.token.advance();
            self.is_loading = false;
        }
        self.is_open = false;
        changed
    }

    pub(crate) fn reset(&mut self) {
        self.close();
        self.result = None;
        self.target_job = None;
    }

    pub(crate) fn view(&self) -> InsightPanelView<R> {
        InsightPanelView {
            is_open: self.is_open,
            is_loading: self.is_loading,
            result: self.result.clone(),
            job_title: self.target_job.as_ref().map(|job| job.title.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    phase: AppPhase,
    selected_file: Option<SelectedFile>,
    matches: Vec<JobMatch>,
    resume_text: ResumeTextCache,
    improvement: Option<ImprovementReport>,
    error: ErrorChannel,
    primary_token: RequestToken,
    skills_gap: InsightWorkflow<SkillsGapReport>,
    interview_prep: InsightWorkflow<InterviewPrepReport>,
    cover_letter: InsightWorkflow<CoverLetter>,
    max_upload_bytes: u64,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_upload_limit(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_upload_limit(max_upload_bytes: u64) -> Self {
        Self {
            phase: AppPhase::Initial,
            selected_file: None,
            matches: Vec::new(),
            resume_text: ResumeTextCache::default(),
            improvement: None,
            error: ErrorChannel::default(),
            primary_token: RequestToken::default(),
            skills_gap: InsightWorkflow::default(),
            interview_prep: InsightWorkflow::default(),
            cover_letter: InsightWorkflow::default(),
            max_upload_bytes,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::project(self)
    }

    pub fn phase(&self) -> AppPhase {
        self.phase
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn matches(&self) -> &[JobMatch] {
        &self.matches
    }

    pub fn resume_text(&self) -> &ResumeTextCache {
        &self.resume_text
    }

    pub fn improvement(&self) -> Option<&ImprovementReport> {
        self.improvement.as_ref()
    }

    pub fn error(&self) -> &ErrorChannel {
        &self.error
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    pub fn skills_gap(&self) -> &InsightWorkflow<SkillsGapReport> {
        &self.skills_gap
    }

    pub fn interview_prep(&self) -> &InsightWorkflow<InterviewPrepReport> {
        &self.interview_prep
    }

    pub fn cover_letter(&self) -> &InsightWorkflow<CoverLetter> {
        &self.cover_letter
    }

    /// True while any insight request of any kind is outstanding.
    pub fn any_insight_loading(&self) -> bool {
        self.skills_gap.is_loading
            || self.interview_prep.is_loading
            || self.cover_letter.is_loading
    }

    pub fn insight_loading(&self, kind: InsightKind) -> bool {
        match kind {
            InsightKind::SkillsGap => self.skills_gap.is_loading,
            InsightKind::InterviewPrep => self.interview_prep.is_loading,
            InsightKind::CoverLetter => self.cover_letter.is_loading,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether anything changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_phase(&mut self, phase: AppPhase) {
        if self.phase != phase {
            engine_logging::engine_debug!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    pub(crate) fn select_file(&mut self, file: SelectedFile) {
        self.selected_file = Some(file);
    }

    pub(crate) fn error_mut(&mut self) -> &mut ErrorChannel {
        &mut self.error
    }

    pub(crate) fn begin_primary(&mut self, phase: AppPhase) -> RequestToken {
        self.set_phase(phase);
        self.error.clear();
        self.primary_token.advance()
    }

    /// A primary reply is current iff its token matches and the phase still waits on it.
    pub(crate) fn is_current_primary(&self, token: RequestToken, waiting_in: AppPhase) -> bool {
        token == self.primary_token && self.phase == waiting_in
    }

    pub(crate) fn store_matches(&mut self, matches: Vec<JobMatch>, resume_text: String) {
        self.matches = matches;
        self.resume_text.store(resume_text);
    }

    pub(crate) fn store_improvement(&mut self, report: ImprovementReport) {
        self.improvement = Some(report);
    }

    pub(crate) fn skills_gap_mut(&mut self) -> &mut InsightWorkflow<SkillsGapReport> {
        &mut self.skills_gap
    }

    pub(crate) fn interview_prep_mut(&mut self) -> &mut InsightWorkflow<InterviewPrepReport> {
        &mut self.interview_prep
    }

    pub(crate) fn cover_letter_mut(&mut self) -> &mut InsightWorkflow<CoverLetter> {
        &mut self.cover_letter
    }

    /// Back to a fresh session. Only in-flight tokens advance, so repeating is a no-op.
    pub(crate) fn reset(&mut self) {
        if self.phase.is_busy() {
            self.primary_token.advance();
        }
        self.set_phase(AppPhase::Initial);
        self.selected_file = None;
        self.matches.clear();
        self.resume_text.invalidate();
        self.improvement = None;
        self.error.clear();
        self.skills_gap.reset();
        self.interview_prep.reset();
        self.cover_letter.reset();
    }
}
