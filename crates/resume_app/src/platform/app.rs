use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use engine_logging::{engine_debug, engine_info, engine_warn};
use resume_core::{update, AppState, AppViewModel, InsightKind, Msg};
use resume_engine::{report_filename, EngineHandle, ReportWriter, ReqwestCollaborator};

use super::cli::{requested_kinds, Cli, Command};
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::{files, logging, render};

const TICK: Duration = Duration::from_millis(75);

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(cli.base_url, cli.log);
    logging::initialize(config.log, config.level_filter());

    let collaborator = ReqwestCollaborator::new(config.collaborator_settings())
        .context("configuring analysis service client")?;
    engine_info!("Using analysis service at {}", collaborator.base_url());
    let engine = EngineHandle::new(Arc::new(collaborator)).context("starting request engine")?;
    let mut session = Session::new(
        AppState::with_upload_limit(config.max_upload_bytes()),
        EffectRunner::new(engine),
    );

    match cli.command {
        Command::Match { file } => {
            session.run_match(&file)?;
            print!("{}", render::render_matches(&session.view()));
        }
        Command::Improve { file } => {
            session.select(&file)?;
            session.dispatch(Msg::ImproveClicked);
            session.wait_for_primary()?;
            let report = session
                .state
                .improvement()
                .ok_or_else(|| anyhow!("no suggestions were returned"))?;
            print!("{}", render::render_improvement(report));
        }
        Command::Insights {
            file,
            job,
            skills,
            interview,
            cover_letter,
            save_cover_letter,
        } => {
            let kinds =
                requested_kinds(skills, interview, cover_letter, save_cover_letter.is_some());
            session.run_match(&file)?;
            session.run_insights(job, &kinds, save_cover_letter.as_deref())?;
        }
    }
    Ok(())
}

/// Owns the controller state; the only place `update` is called.
struct Session {
    state: AppState,
    effects: EffectRunner,
}

impl Session {
    fn new(state: AppState, effects: EffectRunner) -> Self {
        Self { state, effects }
    }

    fn view(&self) -> AppViewModel {
        self.state.view()
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            engine_debug!("{}", render::status_line(&state.view()));
        }
        self.state = state;
        self.effects.enqueue(effects);
    }

    /// Drives the loop until `settled` holds. Completions are applied in arrival order.
    fn pump_until(&mut self, settled: impl Fn(&AppState) -> bool) {
        while !settled(&self.state) {
            let msg = self.effects.next_msg(TICK).unwrap_or(Msg::Tick);
            self.dispatch(msg);
        }
    }

    fn select(&mut self, path: &Path) -> anyhow::Result<()> {
        let file = files::load_selected_file(path)?;
        self.dispatch(Msg::FileSelected(file));
        if self.state.selected_file().is_none() {
            bail!(self.take_error().unwrap_or_else(|| "file was not accepted".to_string()));
        }
        Ok(())
    }

    fn wait_for_primary(&mut self) -> anyhow::Result<()> {
        self.pump_until(|state| !state.phase().is_busy());
        match self.take_error() {
            Some(message) => bail!(message),
            None => Ok(()),
        }
    }

    fn run_match(&mut self, path: &Path) -> anyhow::Result<()> {
        self.select(path)?;
        self.dispatch(Msg::MatchClicked);
        self.wait_for_primary()
    }

    fn run_insights(
        &mut self,
        position: usize,
        kinds: &[InsightKind],
        save_dir: Option<&Path>,
    ) -> anyhow::Result<()> {
        let job = position
            .checked_sub(1)
            .and_then(|index| self.state.matches().get(index))
            .cloned()
            .ok_or_else(|| {
                anyhow!(
                    "no job #{position}; the service returned {} matches",
                    self.state.matches().len()
                )
            })?;
        if self.state.resume_text().is_empty() {
            bail!("the service returned no resume text, so insights are unavailable");
        }

        for &kind in kinds {
            self.dispatch(Msg::InsightRequested {
                kind,
                job: job.clone(),
            });
        }
        self.pump_until(|state| !state.any_insight_loading());

        let view = self.view();
        let panels = [
            render::render_skills_gap(&view.skills_gap),
            render::render_interview_prep(&view.interview_prep),
            render::render_cover_letter(&view.cover_letter),
        ];
        for panel in panels.into_iter().flatten() {
            println!("{panel}");
        }

        if let (Some(dir), Some(letter)) = (save_dir, &view.cover_letter.result) {
            let writer = ReportWriter::new(PathBuf::from(dir));
            let path = writer
                .write(&report_filename(&job), &letter.cover_letter_text)
                .context("saving cover letter")?;
            println!("Cover letter saved to {}", path.display());
        }

        // Failed panels closed themselves; the last failure is in the error slot.
        if let Some(message) = self.take_error() {
            engine_warn!("Insight run finished with an error: {}", message);
            bail!(message);
        }
        Ok(())
    }

    fn take_error(&mut self) -> Option<String> {
        let message = self.state.error().message().map(ToOwned::to_owned);
        if message.is_some() {
            self.dispatch(Msg::ErrorDismissed);
        }
        message
    }
}
