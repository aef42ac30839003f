use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use reqwest::header::CONTENT_TYPE;
use resume_core::{
    CoverLetter, Failure, ImprovementReport, InsightRequest, InterviewPrepReport, MatchReport,
    SelectedFile, SkillsGapReport,
};
use serde::de::DeserializeOwned;

use crate::ServiceReply;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const MATCH_PATH: &str = "analyze";
const IMPROVE_PATH: &str = "improve_resume";
const SKILLS_GAP_PATH: &str = "analyze_skills";
const INTERVIEW_PREP_PATH: &str = "interview_prep";
const COVER_LETTER_PATH: &str = "generate_cover_letter";
const RESUME_FIELD: &str = "resume";

#[derive(Debug, Clone)]
pub struct CollaboratorSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Upper bound for one call; model-backed endpoints can take minutes.
    pub request_timeout: Duration,
}

impl Default for CollaboratorSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(180),
        }
    }
}

/// The external analysis service: one call per contract.
#[async_trait::async_trait]
pub trait Collaborator: Send + Sync {
    async fn match_resume(&self, file: &SelectedFile) -> Result<MatchReport, Failure>;

    async fn improve_resume(&self, file: &SelectedFile) -> Result<ImprovementReport, Failure>;

    async fn skills_gap(&self, request: &InsightRequest) -> Result<SkillsGapReport, Failure>;

    async fn interview_prep(
        &self,
        request: &InsightRequest,
    ) -> Result<InterviewPrepReport, Failure>;

    async fn cover_letter(&self, request: &InsightRequest) -> Result<CoverLetter, Failure>;
}

#[derive(Debug, Clone)]
pub struct ReqwestCollaborator {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl ReqwestCollaborator {
    pub fn new(settings: CollaboratorSettings) -> Result<Self, Failure> {
        let base_url = parse_base_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| Failure::Network(err.to_string()))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, Failure> {
        self.base_url
            .join(path)
            .map_err(|err| Failure::Network(format!("invalid endpoint {path}: {err}")))
    }

    async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        file: &SelectedFile,
    ) -> Result<T, Failure> {
        let part = reqwest::multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(map_reqwest_error)?;
        let form = reqwest::multipart::Form::new().part(RESUME_FIELD, part);

        engine_info!("POST /{} file={:?} bytes={}", path, file.name, file.size());
        let response = self
            .client
            .post(self.endpoint(path)?)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_reply(path, response).await
    }

    async fn post_insight<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &InsightRequest,
    ) -> Result<T, Failure> {
        let body = serde_json::to_vec(request).map_err(|err| Failure::Malformed(err.to_string()))?;

        engine_info!(
            "POST /{} resume_len={} job_details_len={}",
            path,
            request.resume_text.len(),
            request.job_details.len()
        );
        let response = self
            .client
            .post(self.endpoint(path)?)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_reply(path, response).await
    }
}

#[async_trait::async_trait]
impl Collaborator for ReqwestCollaborator {
    async fn match_resume(&self, file: &SelectedFile) -> Result<MatchReport, Failure> {
        self.upload(MATCH_PATH, file).await
    }

    async fn improve_resume(&self, file: &SelectedFile) -> Result<ImprovementReport, Failure> {
        self.upload(IMPROVE_PATH, file).await
    }

    async fn skills_gap(&self, request: &InsightRequest) -> Result<SkillsGapReport, Failure> {
        self.post_insight(SKILLS_GAP_PATH, request).await
    }

    async fn interview_prep(
        &self,
        request: &InsightRequest,
    ) -> Result<InterviewPrepReport, Failure> {
        self.post_insight(INTERVIEW_PREP_PATH, request).await
    }

    async fn cover_letter(&self, request: &InsightRequest) -> Result<CoverLetter, Failure> {
        self.post_insight(COVER_LETTER_PATH, request).await
    }
}

/// Status is checked before the body; a non-2xx reply never reaches decoding.
async fn read_reply<T: DeserializeOwned>(
    path: &str,
    response: reqwest::Response,
) -> Result<T, Failure> {
    let status = response.status();
    engine_debug!("/{} answered {}", path, status);
    if !status.is_success() {
        return Err(Failure::HttpStatus(status.as_u16()));
    }
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    ServiceReply::decode(&body)?.into_result()
}

/// Joined endpoints must stay under the base path, so it always ends in `/`.
fn parse_base_url(raw: &str) -> Result<reqwest::Url, Failure> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    reqwest::Url::parse(&normalized)
        .map_err(|err| Failure::Network(format!("invalid base url {raw:?}: {err}")))
}

fn map_reqwest_error(err: reqwest::Error) -> Failure {
    if err.is_timeout() {
        return Failure::Timeout(err.to_string());
    }
    Failure::Network(err.to_string())
}
