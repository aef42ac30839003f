use resume_core::{
    Failure, ImprovementReport, InsightOutcome, MatchReport, Msg, RequestToken,
};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    MatchCompleted {
        token: RequestToken,
        result: Result<MatchReport, Failure>,
    },
    ImproveCompleted {
        token: RequestToken,
        result: Result<ImprovementReport, Failure>,
    },
    InsightCompleted {
        token: RequestToken,
        outcome: InsightOutcome,
    },
}

impl EngineEvent {
    pub fn token(&self) -> RequestToken {
        match self {
            EngineEvent::MatchCompleted { token, .. }
            | EngineEvent::ImproveCompleted { token, .. }
            | EngineEvent::InsightCompleted { token, .. } => *token,
        }
    }
}

impl From<EngineEvent> for Msg {
    fn from(event: EngineEvent) -> Self {
        match event {
            EngineEvent::MatchCompleted { token, result } => Msg::MatchCompleted { token, result },
            EngineEvent::ImproveCompleted { token, result } => {
                Msg::ImproveCompleted { token, result }
            }
            EngineEvent::InsightCompleted { token, outcome } => {
                Msg::InsightCompleted { token, outcome }
            }
        }
    }
}
