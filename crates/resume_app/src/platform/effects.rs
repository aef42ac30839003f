use std::time::Duration;

use engine_logging::engine_info;
use resume_core::{Effect, Msg};
use resume_engine::EngineHandle;

/// Hands effects to the engine and turns its completions back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match &effect {
                Effect::SubmitMatch { token, file } => {
                    engine_info!("SubmitMatch token={} file={:?}", token.value(), file.name);
                }
                Effect::SubmitImprove { token, file } => {
                    engine_info!("SubmitImprove token={} file={:?}", token.value(), file.name);
                }
                Effect::RequestInsight { kind, token, .. } => {
                    engine_info!("RequestInsight kind={} token={}", kind.label(), token.value());
                }
            }
            self.engine.submit(effect);
        }
    }

    /// Waits up to `wait` for the next completion.
    pub fn next_msg(&self, wait: Duration) -> Option<Msg> {
        self.engine.recv_timeout(wait).map(Msg::from)
    }
}
