use crate::{InsightKind, InsightRequest, RequestToken, SelectedFile};

/// Side effects requested by `update`; each produces exactly one completion `Msg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitMatch {
        token: RequestToken,
        file: SelectedFile,
    },
    SubmitImprove {
        token: RequestToken,
        file: SelectedFile,
    },
    RequestInsight {
        kind: InsightKind,
        token: RequestToken,
        request: InsightRequest,
    },
}
