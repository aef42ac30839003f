use serde::{Deserialize, Deserializer, Serialize};

/// One ranked job suggestion returned by the match call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    pub id: String,
    pub title: String,
    pub company: String,
    /// 0..=100, as scored by the collaborator.
    pub match_percentage: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub company_profile: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default, rename = "type")]
    pub employment_type: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}

/// Successful reply of the match call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchReport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub matches: Vec<JobMatch>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resume_text: String,
}

/// An explicit `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(alias = "suggestion_title")]
    pub title: String,
    #[serde(alias = "suggestion_detail")]
    pub detail: String,
}

/// Successful reply of the improve call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementReport {
    pub overall_summary: String,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsGapReport {
    #[serde(default)]
    pub matching_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    pub pro_tip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    pub tip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewPrepReport {
    #[serde(default)]
    pub behavioral_questions: Vec<InterviewQuestion>,
    #[serde(default)]
    pub technical_questions: Vec<InterviewQuestion>,
    pub final_tip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverLetter {
    /// Presented verbatim, line breaks included.
    pub cover_letter_text: String,
}

/// Which of the three job-scoped insight workflows a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsightKind {
    SkillsGap,
    InterviewPrep,
    CoverLetter,
}

impl InsightKind {
    pub const ALL: [InsightKind; 3] = [
        InsightKind::SkillsGap,
        InsightKind::InterviewPrep,
        InsightKind::CoverLetter,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InsightKind::SkillsGap => "skills gap",
            InsightKind::InterviewPrep => "interview prep",
            InsightKind::CoverLetter => "cover letter",
        }
    }
}

/// Body of every insight call: the cached resume text plus a flattened job summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightRequest {
    pub resume_text: String,
    pub job_details: String,
}

impl InsightRequest {
    pub fn new(kind: InsightKind, resume_text: &str, job: &JobMatch) -> Self {
        Self {
            resume_text: resume_text.to_string(),
            job_details: job_summary(kind, job),
        }
    }
}

/// Flattens a job into the text block the collaborator expects.
///
/// The cover letter variant also names the company.
pub fn job_summary(kind: InsightKind, job: &JobMatch) -> String {
    let requirements = job.requirements.join(", ");
    match kind {
        InsightKind::SkillsGap | InsightKind::InterviewPrep => format!(
            "Title: {}\nDescription: {}\nRequirements: {}",
            job.title, job.description, requirements
        ),
        InsightKind::CoverLetter => format!(
            "Title: {}\nCompany: {}\nDescription: {}\nRequirements: {}",
            job.title, job.company, job.description, requirements
        ),
    }
}
