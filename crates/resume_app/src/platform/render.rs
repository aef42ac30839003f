use std::fmt::Write;

use resume_core::{
    AppPhase, AppViewModel, CoverLetter, ImprovementReport, InsightPanelView, InterviewPrepReport,
    InterviewQuestion, JobCardView, MatchTier, SkillsGapReport,
};

pub fn status_line(view: &AppViewModel) -> String {
    let phase = match view.phase {
        AppPhase::Initial => "Ready",
        AppPhase::Loading => "Scanning opportunities...",
        AppPhase::Results => "Matches ready",
        AppPhase::Improving => "Enhancing your resume...",
        AppPhase::ImprovedResult => "Suggestions ready",
    };
    match &view.selected_file {
        Some(file) => format!("{phase} | {} ({})", file.name, file.size_label),
        None => phase.to_string(),
    }
}

pub fn render_matches(view: &AppViewModel) -> String {
    if view.jobs.is_empty() {
        return "No matching jobs found.\n".to_string();
    }
    let mut out = String::new();
    for (index, card) in view.jobs.iter().enumerate() {
        render_card(&mut out, index + 1, card);
    }
    out
}

fn render_card(out: &mut String, position: usize, card: &JobCardView) {
    let job = &card.job;
    let _ = writeln!(
        out,
        "{position}. {} [{} {}]",
        job.title,
        card.match_label,
        tier_label(card.tier)
    );
    let _ = writeln!(out, "   {} | {} | {}", job.company, job.location, job.employment_type);
    if !job.salary.is_empty() {
        let _ = writeln!(out, "   Salary: {}", job.salary);
    }
    if !job.description.is_empty() {
        let _ = writeln!(out, "   {}", job.description);
    }
    if !job.requirements.is_empty() {
        let _ = writeln!(out, "   Requirements: {}", job.requirements.join(", "));
    }
    out.push('\n');
}

fn tier_label(tier: MatchTier) -> &'static str {
    match tier {
        MatchTier::Excellent => "excellent",
        MatchTier::Strong => "strong",
        MatchTier::Fair => "fair",
        MatchTier::Low => "low",
    }
}

pub fn render_improvement(report: &ImprovementReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Summary\n{}\n", report.overall_summary);
    for (index, suggestion) in report.suggestions.iter().enumerate() {
        let _ = writeln!(out, "{}. {}\n   {}", index + 1, suggestion.title, suggestion.detail);
    }
    out
}

/// Header shared by every insight panel; `None` while the panel is closed.
fn panel_header<R>(title: &str, panel: &InsightPanelView<R>) -> Option<String> {
    if !panel.is_open {
        return None;
    }
    let mut out = format!("== {title} ==\n");
    if let Some(job_title) = &panel.job_title {
        let _ = writeln!(out, "For: {job_title}");
    }
    if panel.is_loading {
        out.push_str("Working...\n");
    }
    Some(out)
}

pub fn render_skills_gap(panel: &InsightPanelView<SkillsGapReport>) -> Option<String> {
    let mut out = panel_header("Skills Gap Analysis", panel)?;
    if let Some(report) = &panel.result {
        let _ = writeln!(out, "Skills you have: {}", report.matching_skills.join(", "));
        let _ = writeln!(out, "Skills to develop: {}", report.missing_skills.join(", "));
        let _ = writeln!(out, "Pro tip: {}", report.pro_tip);
    }
    Some(out)
}

pub fn render_interview_prep(panel: &InsightPanelView<InterviewPrepReport>) -> Option<String> {
    let mut out = panel_header("AI Interview Prep", panel)?;
    if let Some(report) = &panel.result {
        render_questions(&mut out, "Behavioral questions", &report.behavioral_questions);
        render_questions(&mut out, "Technical questions", &report.technical_questions);
        let _ = writeln!(out, "Final tip: {}", report.final_tip);
    }
    Some(out)
}

fn render_questions(out: &mut String, heading: &str, questions: &[InterviewQuestion]) {
    let _ = writeln!(out, "{heading}:");
    for question in questions {
        let _ = writeln!(out, "  - {}\n    Tip: {}", question.question, question.tip);
    }
}

/// The letter body is emitted untouched.
pub fn render_cover_letter(panel: &InsightPanelView<CoverLetter>) -> Option<String> {
    let mut out = panel_header("Cover Letter", panel)?;
    if let Some(letter) = &panel.result {
        out.push_str(&letter.cover_letter_text);
        if !letter.cover_letter_text.ends_with('\n') {
            out.push('\n');
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use resume_core::{update, AppState, JobMatch, MatchReport, Msg, SelectedFile};

    fn results_view(score: f64) -> AppViewModel {
        let file = SelectedFile::new("cv.pdf", "application/pdf", vec![0; 1024]);
        let (state, _) = update(AppState::new(), Msg::FileSelected(file));
        let (state, effects) = update(state, Msg::MatchClicked);
        let token = match &effects[0] {
            resume_core::Effect::SubmitMatch { token, .. } => *token,
            other => panic!("unexpected effect {other:?}"),
        };
        let (state, _) = update(
            state,
            Msg::MatchCompleted {
                token,
                result: Ok(MatchReport {
                    matches: vec![JobMatch {
                        id: "1".to_string(),
                        title: "Site Reliability Engineer".to_string(),
                        company: "Globex".to_string(),
                        match_percentage: score,
                        description: "Keep it up".to_string(),
                        company_profile: String::new(),
                        location: "Remote".to_string(),
                        salary: String::new(),
                        employment_type: "Full-time".to_string(),
                        requirements: vec!["Rust".to_string(), "SRE".to_string()],
                    }],
                    resume_text: "text".to_string(),
                }),
            },
        );
        state.view()
    }

    #[test]
    fn first_card_shows_one_decimal_score() {
        let out = render_matches(&results_view(92.3));
        assert!(out.starts_with("1. Site Reliability Engineer [92.3% excellent]\n"));
        assert!(out.contains("Requirements: Rust, SRE"));
        assert!(!out.contains("Salary"));
    }

    #[test]
    fn status_line_names_file() {
        let view = results_view(70.0);
        assert_eq!(status_line(&view), "Matches ready | cv.pdf (0.00 MB)");
    }

    #[test]
    fn closed_panel_renders_nothing() {
        let panel: InsightPanelView<CoverLetter> = InsightPanelView {
            is_open: false,
            is_loading: false,
            result: None,
            job_title: None,
        };
        assert_eq!(render_cover_letter(&panel), None);
    }

    #[test]
    fn cover_letter_body_is_verbatim() {
        let text = "Dear Globex,\n\n  Hello.\nJane";
        let panel = InsightPanelView {
            is_open: true,
            is_loading: false,
            result: Some(CoverLetter {
                cover_letter_text: text.to_string(),
            }),
            job_title: Some("SRE".to_string()),
        };
        let out = render_cover_letter(&panel).unwrap();
        assert!(out.contains(text));
        assert!(out.starts_with("== Cover Letter ==\nFor: SRE\n"));
    }

    #[test]
    fn loading_panel_says_so() {
        let panel: InsightPanelView<SkillsGapReport> = InsightPanelView {
            is_open: true,
            is_loading: true,
            result: None,
            job_title: Some("SRE".to_string()),
        };
        assert!(render_skills_gap(&panel).unwrap().contains("Working..."));
    }
}
