use resume_core::{
    job_summary, update, AppPhase, AppState, CoverLetter, Effect, Failure, InsightKind,
    InsightOutcome, InterviewPrepReport, InterviewQuestion, JobMatch, MatchReport, Msg,
    RequestToken, SelectedFile, SkillsGapReport,
};

const RESUME_TEXT: &str = "Jane Doe\nRust, Postgres, Kubernetes";

fn init_logging() {
    engine_logging::initialize_for_tests();
}

fn job(id: &str, title: &str) -> JobMatch {
    JobMatch {
        id: id.to_string(),
        title: title.to_string(),
        company: format!("{title} Inc"),
        match_percentage: 88.0,
        description: format!("Work as {title}"),
        company_profile: String::new(),
        location: "Berlin".to_string(),
        salary: String::new(),
        employment_type: "Contract".to_string(),
        requirements: vec!["Rust".to_string(), "Tokio".to_string()],
    }
}

fn skills(tip: &str) -> SkillsGapReport {
    SkillsGapReport {
        matching_skills: vec!["Rust".to_string()],
        missing_skills: vec!["Tokio".to_string()],
        pro_tip: tip.to_string(),
    }
}

/// A state in `Results` with a populated resume text cache.
fn results_state() -> AppState {
    let file = SelectedFile::new("cv.pdf", "application/pdf", b"%PDF".to_vec());
    let (state, _) = update(AppState::new(), Msg::FileSelected(file));
    let (state, effects) = update(state, Msg::MatchClicked);
    let token = match effects.as_slice() {
        [Effect::SubmitMatch { token, .. }] => *token,
        other => panic!("unexpected effects {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::MatchCompleted {
            token,
            result: Ok(MatchReport {
                matches: vec![job("a", "Job A"), job("b", "Job B")],
                resume_text: RESUME_TEXT.to_string(),
            }),
        },
    );
    assert_eq!(state.phase(), AppPhase::Results);
    state
}

fn trigger(state: AppState, kind: InsightKind, job: JobMatch) -> (AppState, RequestToken) {
    let (state, effects) = update(state, Msg::InsightRequested { kind, job });
    match effects.as_slice() {
        [Effect::RequestInsight {
            kind: emitted,
            token,
            ..
        }] => {
            assert_eq!(*emitted, kind);
            (state, *token)
        }
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn trigger_without_resume_text_is_a_noop() {
    init_logging();
    let state = AppState::new();
    for kind in InsightKind::ALL {
        let (next, effects) = update(
            state.clone(),
            Msg::InsightRequested {
                kind,
                job: job("a", "Job A"),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(next, state);
    }
}

#[test]
fn trigger_opens_panel_and_builds_request() {
    init_logging();
    let state = results_state();
    let (state, effects) = update(
        state,
        Msg::InsightRequested {
            kind: InsightKind::SkillsGap,
            job: job("a", "Job A"),
        },
    );

    let view = state.view();
    assert!(view.skills_gap.is_open);
    assert!(view.skills_gap.is_loading);
    assert_eq!(view.skills_gap.result, None);
    assert_eq!(view.skills_gap.job_title.as_deref(), Some("Job A"));
    assert!(!view.interview_prep.is_open);
    assert!(!view.cover_letter.is_open);

    match effects.as_slice() {
        [Effect::RequestInsight { request, .. }] => {
            assert_eq!(request.resume_text, RESUME_TEXT);
            assert_eq!(
                request.job_details,
                "Title: Job A\nDescription: Work as Job A\nRequirements: Rust, Tokio"
            );
        }
        other => panic!("unexpected effects {other:?}"),
    }
    // The cache is read, never consumed.
    assert_eq!(state.resume_text().as_str(), RESUME_TEXT);
}

#[test]
fn cover_letter_request_names_the_company() {
    init_logging();
    let (state, effects) = update(
        results_state(),
        Msg::InsightRequested {
            kind: InsightKind::CoverLetter,
            job: job("b", "Job B"),
        },
    );
    assert!(state.cover_letter().is_loading());
    match effects.as_slice() {
        [Effect::RequestInsight { request, .. }] => {
            assert_eq!(
                request.job_details,
                job_summary(InsightKind::CoverLetter, &job("b", "Job B"))
            );
            assert!(request.job_details.contains("Company: Job B Inc"));
        }
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn trigger_clears_shared_error() {
    init_logging();
    let state = results_state();
    let (state, token) = trigger(state, InsightKind::InterviewPrep, job("a", "Job A"));
    let (state, _) = update(
        state,
        Msg::InsightCompleted {
            token,
            outcome: InsightOutcome::InterviewPrep(Err(Failure::HttpStatus(502))),
        },
    );
    assert_eq!(state.error().message(), Some("Server error: 502"));

    let (state, _) = trigger(state, InsightKind::SkillsGap, job("a", "Job A"));
    assert!(state.error().message().is_none());
}

#[test]
fn success_stores_typed_result() {
    init_logging();
    let (state, token) = trigger(results_state(), InsightKind::InterviewPrep, job("a", "Job A"));
    let report = InterviewPrepReport {
        behavioral_questions: vec![InterviewQuestion {
            question: "Tell me about a conflict.".to_string(),
            tip: "Use STAR.".to_string(),
        }],
        technical_questions: vec![InterviewQuestion {
            question: "Explain Send vs Sync.".to_string(),
            tip: "Give examples.".to_string(),
        }],
        final_tip: "Breathe.".to_string(),
    };

    let (state, _) = update(
        state,
        Msg::InsightCompleted {
            token,
            outcome: InsightOutcome::InterviewPrep(Ok(report.clone())),
        },
    );

    let panel = state.view().interview_prep;
    assert!(panel.is_open);
    assert!(!panel.is_loading);
    assert_eq!(panel.result, Some(report));
}

#[test]
fn later_trigger_supersedes_earlier_one() {
    init_logging();
    let state = results_state();
    let (state, token_a) = trigger(state, InsightKind::SkillsGap, job("a", "Job A"));
    let (state, token_b) = trigger(state, InsightKind::SkillsGap, job("b", "Job B"));
    assert!(token_b > token_a);

    // Job A's reply arrives late, after Job B's panel opened.
    let (mut state, _) = update(
        state,
        Msg::InsightCompleted {
            token: token_a,
            outcome: InsightOutcome::SkillsGap(Ok(skills("for A"))),
        },
    );
    let panel = state.view().skills_gap;
    assert!(panel.is_open);
    assert!(panel.is_loading);
    assert_eq!(panel.result, None);
    assert_eq!(panel.job_title.as_deref(), Some("Job B"));
    state.consume_dirty();

    let (mut state, _) = update(
        state,
        Msg::InsightCompleted {
            token: token_b,
            outcome: InsightOutcome::SkillsGap(Ok(skills("for B"))),
        },
    );
    assert!(state.consume_dirty());
    let panel = state.view().skills_gap;
    assert_eq!(panel.result.unwrap().pro_tip, "for B");
    assert_eq!(panel.job_title.as_deref(), Some("Job B"));
}

#[test]
fn stale_failure_does_not_close_current_panel() {
    init_logging();
    let state = results_state();
    let (state, token_a) = trigger(state, InsightKind::SkillsGap, job("a", "Job A"));
    let (state, _token_b) = trigger(state, InsightKind::SkillsGap, job("b", "Job B"));

    let (mut state, _) = update(
        state,
        Msg::InsightCompleted {
            token: token_a,
            outcome: InsightOutcome::SkillsGap(Err(Failure::HttpStatus(500))),
        },
    );
    assert!(state.skills_gap().is_open());
    assert!(state.skills_gap().is_loading());
    assert!(state.error().message().is_none());
    // Trigger marked dirty; the stale reply itself must not.
    assert!(state.consume_dirty());
    let (mut state, _) = update(
        state,
        Msg::InsightCompleted {
            token: token_a,
            outcome: InsightOutcome::SkillsGap(Err(Failure::HttpStatus(500))),
        },
    );
    assert!(!state.consume_dirty());
}

#[test]
fn failure_closes_only_its_own_panel() {
    init_logging();
    let state = results_state();
    let (state, skills_token) = trigger(state, InsightKind::SkillsGap, job("a", "Job A"));
    let (state, prep_token) = trigger(state, InsightKind::InterviewPrep, job("b", "Job B"));
    let (state, _letter_token) = trigger(state, InsightKind::CoverLetter, job("a", "Job A"));

    let (state, _) = update(
        state,
        Msg::InsightCompleted {
            token: prep_token,
            outcome: InsightOutcome::InterviewPrep(Err(Failure::Service(
                "model overloaded".to_string(),
            ))),
        },
    );

    let view = state.view();
    assert!(!view.interview_prep.is_open);
    assert!(!view.interview_prep.is_loading);
    assert_eq!(view.error.as_deref(), Some("model overloaded"));
    assert_eq!(view.phase, AppPhase::Results);
    assert!(view.skills_gap.is_open && view.skills_gap.is_loading);
    assert!(view.cover_letter.is_open && view.cover_letter.is_loading);
    assert_eq!(view.jobs.len(), 2);

    let (state, _) = update(
        state,
        Msg::InsightCompleted {
            token: skills_token,
            outcome: InsightOutcome::SkillsGap(Ok(skills("tip"))),
        },
    );
    assert!(state.skills_gap().result().is_some());
}

#[test]
fn each_kind_keeps_its_own_target_job() {
    init_logging();
    let state = results_state();
    let (state, _) = trigger(state, InsightKind::SkillsGap, job("a", "Job A"));
    let (state, _) = trigger(state, InsightKind::CoverLetter, job("b", "Job B"));

    let view = state.view();
    assert_eq!(view.skills_gap.job_title.as_deref(), Some("Job A"));
    assert_eq!(view.cover_letter.job_title.as_deref(), Some("Job B"));
    assert_eq!(view.interview_prep.job_title, None);
}

#[test]
fn tokens_are_routed_by_kind() {
    init_logging();
    let state = results_state();
    let (state, skills_token) = trigger(state, InsightKind::SkillsGap, job("a", "Job A"));
    let (state, letter_token) = trigger(state, InsightKind::CoverLetter, job("a", "Job A"));
    // Counters are per instance, so both first requests share a value.
    assert_eq!(skills_token, letter_token);

    let (state, _) = update(
        state,
        Msg::InsightCompleted {
            token: letter_token,
            outcome: InsightOutcome::CoverLetter(Ok(CoverLetter {
                cover_letter_text: "Dear team".to_string(),
            })),
        },
    );
    assert!(state.skills_gap().is_loading());
    assert!(state.skills_gap().result().is_none());
    assert!(!state.cover_letter().is_loading());
}

#[test]
fn close_hides_panel_and_drops_late_reply() {
    init_logging();
    let (state, token) = trigger(results_state(), InsightKind::SkillsGap, job("a", "Job A"));
    let (state, effects) = update(state, Msg::InsightClosed(InsightKind::SkillsGap));
    assert!(effects.is_empty());
    assert!(!state.skills_gap().is_open());
    assert!(!state.skills_gap().is_loading());

    let (state, _) = update(
        state,
        Msg::InsightCompleted {
            token,
            outcome: InsightOutcome::SkillsGap(Ok(skills("late"))),
        },
    );
    assert!(!state.skills_gap().is_open());
    assert!(state.skills_gap().result().is_none());
}

#[test]
fn close_after_result_keeps_other_state() {
    init_logging();
    let (state, token) = trigger(results_state(), InsightKind::SkillsGap, job("a", "Job A"));
    let (state, _) = update(
        state,
        Msg::InsightCompleted {
            token,
            outcome: InsightOutcome::SkillsGap(Ok(skills("tip"))),
        },
    );
    let (state, _) = update(state, Msg::InsightClosed(InsightKind::SkillsGap));
    assert!(!state.skills_gap().is_open());
    assert_eq!(state.skills_gap().token(), token);
    assert_eq!(state.phase(), AppPhase::Results);
}

#[test]
fn cover_letter_text_is_kept_verbatim() {
    init_logging();
    let (state, token) = trigger(results_state(), InsightKind::CoverLetter, job("a", "Job A"));
    let text = "Dear Hiring Manager,\n\n  I am writing...\r\nSincerely,\nJane\n";

    let (state, _) = update(
        state,
        Msg::InsightCompleted {
            token,
            outcome: InsightOutcome::CoverLetter(Ok(CoverLetter {
                cover_letter_text: text.to_string(),
            })),
        },
    );

    let panel = state.view().cover_letter;
    assert_eq!(panel.result.unwrap().cover_letter_text, text);
}

#[test]
fn reset_closes_panels_and_drops_inflight_replies() {
    init_logging();
    let state = results_state();
    let (state, token) = trigger(state, InsightKind::InterviewPrep, job("a", "Job A"));
    let (state, _) = update(state, Msg::ResetClicked);

    let view = state.view();
    assert!(!view.any_insight_open());
    assert!(!view.interview_prep.is_loading);
    assert!(view.interview_prep.job_title.is_none());

    let (state, _) = update(
        state,
        Msg::InsightCompleted {
            token,
            outcome: InsightOutcome::InterviewPrep(Err(Failure::HttpStatus(500))),
        },
    );
    assert!(state.error().message().is_none());

    // The cache is gone, so new triggers do nothing.
    let (_state, effects) = update(
        state,
        Msg::InsightRequested {
            kind: InsightKind::SkillsGap,
            job: job("a", "Job A"),
        },
    );
    assert!(effects.is_empty());
}
