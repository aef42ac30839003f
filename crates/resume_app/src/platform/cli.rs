use std::path::PathBuf;

use clap::{Parser, Subcommand};
use resume_core::InsightKind;

use super::logging::LogDestination;

/// Match a resume against open jobs and generate per-job insight reports.
#[derive(Debug, Parser)]
#[command(name = "resume_matcher", version)]
pub struct Cli {
    /// RON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the analysis service
    #[arg(long, env = "RESUME_MATCHER_URL", global = true)]
    pub base_url: Option<String>,

    /// Where log output goes
    #[arg(long, value_enum, global = true)]
    pub log: Option<LogDestination>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find jobs matching a PDF resume
    Match { file: PathBuf },

    /// Get improvement suggestions for a PDF resume
    Improve { file: PathBuf },

    /// Match, then run insight reports for one of the matched jobs
    Insights {
        file: PathBuf,

        /// Position of the job in the match list, starting at 1
        #[arg(long, default_value_t = 1)]
        job: usize,

        /// Skills-gap analysis
        #[arg(long)]
        skills: bool,

        /// Interview preparation questions
        #[arg(long)]
        interview: bool,

        /// Cover letter draft
        #[arg(long)]
        cover_letter: bool,

        /// Directory to save the generated cover letter into
        #[arg(long, value_name = "DIR")]
        save_cover_letter: Option<PathBuf>,
    },
}

/// Insight kinds picked by the `insights` flags. No flag means all of them;
/// asking to save a cover letter implies generating one.
pub fn requested_kinds(
    skills: bool,
    interview: bool,
    cover_letter: bool,
    save_cover_letter: bool,
) -> Vec<InsightKind> {
    let cover_letter = cover_letter || save_cover_letter;
    let kinds: Vec<InsightKind> = [
        (skills, InsightKind::SkillsGap),
        (interview, InsightKind::InterviewPrep),
        (cover_letter, InsightKind::CoverLetter),
    ]
    .into_iter()
    .filter_map(|(wanted, kind)| wanted.then_some(kind))
    .collect();
    if kinds.is_empty() {
        InsightKind::ALL.to_vec()
    } else {
        kinds
    }
}
