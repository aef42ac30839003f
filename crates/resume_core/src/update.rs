use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::{
    AppPhase, AppState, Effect, Failure, InsightKind, InsightOutcome, InsightRequest, JobMatch,
    Msg, RequestToken, SelectedFile,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(file) => {
            select_file(&mut state, file);
            Vec::new()
        }
        Msg::ResetClicked => {
            state.reset();
            state.mark_dirty();
            Vec::new()
        }
        Msg::MatchClicked => start_primary(&mut state, AppPhase::Loading)
            .map(|(token, file)| Effect::SubmitMatch { token, file })
            .into_iter()
            .collect(),
        Msg::ImproveClicked => start_primary(&mut state, AppPhase::Improving)
            .map(|(token, file)| Effect::SubmitImprove { token, file })
            .into_iter()
            .collect(),
        Msg::InsightRequested { kind, job } => trigger_insight(&mut state, kind, job)
            .into_iter()
            .collect(),
        Msg::InsightClosed(kind) => {
            let changed = match kind {
                InsightKind::SkillsGap => state.skills_gap_mut().close(),
                InsightKind::InterviewPrep => state.interview_prep_mut().close(),
                InsightKind::CoverLetter => state.cover_letter_mut().close(),
            };
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ErrorDismissed => {
            if state.error().message().is_some() {
                state.error_mut().clear();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::MatchCompleted { token, result } => {
            if !state.is_current_primary(token, AppPhase::Loading) {
                engine_debug!("Dropping stale match reply token={}", token.value());
                return (state, Vec::new());
            }
            match result {
                Ok(report) => {
                    engine_info!("Match returned {} jobs", report.matches.len());
                    state.store_matches(report.matches, report.resume_text);
                    state.set_phase(AppPhase::Results);
                }
                Err(failure) => fail_primary(&mut state, &failure),
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::ImproveCompleted { token, result } => {
            if !state.is_current_primary(token, AppPhase::Improving) {
                engine_debug!("Dropping stale improve reply token={}", token.value());
                return (state, Vec::new());
            }
            match result {
                Ok(report) => {
                    engine_info!("Improve returned {} suggestions", report.suggestions.len());
                    state.store_improvement(report);
                    state.set_phase(AppPhase::ImprovedResult);
                }
                Err(failure) => fail_primary(&mut state, &failure),
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::InsightCompleted { token, outcome } => {
            let kind = outcome.kind();
            let applied = match outcome {
                InsightOutcome::SkillsGap(result) => {
                    settle(&mut state, token, result, AppState::skills_gap_mut)
                }
                InsightOutcome::InterviewPrep(result) => {
                    settle(&mut state, token, result, AppState::interview_prep_mut)
                }
                InsightOutcome::CoverLetter(result) => {
                    settle(&mut state, token, result, AppState::cover_letter_mut)
                }
            };
            if applied {
                state.mark_dirty();
            } else {
                engine_debug!(
                    "Dropping stale {} reply token={}",
                    kind.label(),
                    token.value()
                );
            }
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}

fn select_file(state: &mut AppState, file: SelectedFile) {
    if state.phase() != AppPhase::Initial {
        engine_debug!("Ignoring file selection in phase {:?}", state.phase());
        return;
    }

    let rejection = if !file.is_pdf() {
        Some(Failure::NotPdf {
            content_type: file.content_type.clone(),
        })
    } else if file.size() > state.max_upload_bytes() {
        Some(Failure::TooLarge {
            max_bytes: state.max_upload_bytes(),
            actual: file.size(),
        })
    } else {
        None
    };

    match rejection {
        Some(failure) => {
            engine_warn!("Rejected file {:?}: {:?}", file.name, failure);
            state.error_mut().set(failure.to_string());
        }
        None => {
            engine_info!("Selected {:?} ({} bytes)", file.name, file.size());
            state.select_file(file);
            state.error_mut().clear();
        }
    }
    state.mark_dirty();
}

fn start_primary(state: &mut AppState, phase: AppPhase) -> Option<(RequestToken, SelectedFile)> {
    if state.phase() != AppPhase::Initial {
        engine_debug!("Ignoring {:?} request in phase {:?}", phase, state.phase());
        return None;
    }
    let file = state.selected_file()?.clone();
    let token = state.begin_primary(phase);
    state.mark_dirty();
    Some((token, file))
}

fn fail_primary(state: &mut AppState, failure: &Failure) {
    engine_warn!("Primary workflow failed: {}", failure);
    state.error_mut().set(failure.to_string());
    state.set_phase(AppPhase::Initial);
}

fn trigger_insight(state: &mut AppState, kind: InsightKind, job: JobMatch) -> Option<Effect> {
    if state.resume_text().is_empty() {
        engine_debug!("Ignoring {} request without resume text", kind.label());
        return None;
    }

    let request = InsightRequest::new(kind, state.resume_text().as_str(), &job);
    let token = match kind {
        InsightKind::SkillsGap => state.skills_gap_mut().begin(job),
        InsightKind::InterviewPrep => state.interview_prep_mut().begin(job),
        InsightKind::CoverLetter => state.cover_letter_mut().begin(job),
    };
    state.error_mut().clear();
    state.mark_dirty();
    Some(Effect::RequestInsight {
        kind,
        token,
        request,
    })
}

fn settle<R: Clone>(
    state: &mut AppState,
    token: RequestToken,
    result: Result<R, Failure>,
    workflow: fn(&mut AppState) -> &mut crate::InsightWorkflow<R>,
) -> bool {
    match result {
        Ok(report) => workflow(state).complete(token, report),
        Err(failure) => {
            if !workflow(state).fail(token) {
                return false;
            }
            engine_warn!("Insight request failed: {}", failure);
            state.error_mut().set(failure.to_string());
            true
        }
    }
}
