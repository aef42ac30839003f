use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use resume_core::{Effect, InsightKind, InsightOutcome};
use tokio::sync::mpsc as async_mpsc;

use crate::{Collaborator, EngineEvent};

/// Runs effects against a collaborator on one cooperative worker thread.
///
/// Requests overlap freely; each completion is reported with the token it was
/// issued under and the controller decides whether it is still wanted.
pub struct EngineHandle {
    cmd_tx: async_mpsc::UnboundedSender<Effect>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(collaborator: Arc<dyn Collaborator>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (cmd_tx, mut cmd_rx) = async_mpsc::unbounded_channel::<Effect>();
        let (event_tx, event_rx) = mpsc::channel();

        thread::Builder::new()
            .name("resume-engine".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(effect) = cmd_rx.recv().await {
                        let collaborator = collaborator.clone();
                        let event_tx = event_tx.clone();
                        tokio::spawn(async move {
                            let event = run_effect(collaborator.as_ref(), effect).await;
                            let _ = event_tx.send(event);
                        });
                    }
                    engine_debug!("Engine command channel closed");
                });
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, effect: Effect) {
        if self.cmd_tx.send(effect).is_err() {
            engine_warn!("Engine worker is gone; effect dropped");
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

/// Performs one effect and packages the reply with its originating token.
pub async fn run_effect(collaborator: &dyn Collaborator, effect: Effect) -> EngineEvent {
    match effect {
        Effect::SubmitMatch { token, file } => EngineEvent::MatchCompleted {
            token,
            result: collaborator.match_resume(&file).await,
        },
        Effect::SubmitImprove { token, file } => EngineEvent::ImproveCompleted {
            token,
            result: collaborator.improve_resume(&file).await,
        },
        Effect::RequestInsight {
            kind,
            token,
            request,
        } => {
            let outcome = match kind {
                InsightKind::SkillsGap => {
                    InsightOutcome::SkillsGap(collaborator.skills_gap(&request).await)
                }
                InsightKind::InterviewPrep => {
                    InsightOutcome::InterviewPrep(collaborator.interview_prep(&request).await)
                }
                InsightKind::CoverLetter => {
                    InsightOutcome::CoverLetter(collaborator.cover_letter(&request).await)
                }
            };
            EngineEvent::InsightCompleted { token, outcome }
        }
    }
}
