use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::Local;
use engine_logging::{engine_info, engine_warn};
use minutes_core::UiState;
use minutes_engine::{
    export_report_page, Backend, Clock, EngineHandle, Orchestrator, ReqwestBackend,
};
use tokio::runtime::Runtime;

use super::config::{load_config, AppConfig};
use super::downloads::download_artifacts;
use super::terminal::{TerminalForm, TerminalReport, TerminalStatus};
use crate::cli::{Cli, Command};

const LOCAL_TIME_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let (mut config, config_warning) = load_config(&cli.config);
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(target) = cli.log {
        config.log_destination = target;
    }

    engine_logging::initialize(
        config.log_destination.into(),
        log::LevelFilter::Info,
        &config.log_file,
    );
    if let Some(err) = config_warning {
        engine_warn!("{}; using defaults", err);
    }

    let backend = ReqwestBackend::new(config.client_settings())
        .with_context(|| format!("invalid base url {:?}", config.base_url))?;
    let backend = Arc::new(backend);

    match cli.command {
        Command::Health => run_health(&*backend),
        Command::Submit {
            transcript,
            meeting_id,
            output,
            download,
        } => {
            let output_dir = output.unwrap_or_else(|| config.output_dir.clone());
            let transcript = read_transcript(&transcript)?;
            run_submit(
                &config,
                backend,
                transcript,
                meeting_id.unwrap_or_default(),
                &output_dir,
                download,
            )
        }
    }
}

fn run_health(backend: &dyn Backend) -> anyhow::Result<()> {
    let runtime = Runtime::new().context("starting async runtime")?;
    let status = runtime
        .block_on(backend.health())
        .context("health check failed")?;
    println!("{status}");
    if status != "ok" {
        bail!("service reported status {status:?}");
    }
    Ok(())
}

fn run_submit(
    config: &AppConfig,
    backend: Arc<ReqwestBackend>,
    transcript: String,
    meeting_id: String,
    output_dir: &Path,
    download: bool,
) -> anyhow::Result<()> {
    let engine = EngineHandle::new(backend.clone()).context("starting engine")?;
    let clock = Clock::new(|| Local::now().format(LOCAL_TIME_FORMAT).to_string());
    let mut orchestrator = Orchestrator::new(
        engine,
        clock,
        TerminalStatus::new(io::stderr()),
        TerminalForm::default(),
        TerminalReport::new(io::stdout()),
    );

    orchestrator.set_transcript(transcript);
    orchestrator.set_meeting_id(meeting_id);
    orchestrator.submit();

    if orchestrator.view().ui == UiState::Submitting
        && !orchestrator.wait_for_completion(config.completion_timeout())
    {
        bail!("no answer from {} in time", config.base_url);
    }

    let view = orchestrator.view();
    if view.ui != UiState::Success {
        // Validation and request failures both end up in the status line.
        bail!(view.status.text);
    }
    let Some(report) = orchestrator.report_view().shown() else {
        bail!("report missing after successful processing");
    };

    let page = export_report_page(output_dir, report, &config.base_url)
        .context("writing report page")?;
    engine_info!("Report page written to {:?}", page);
    println!("{}", page.display());

    if download && !report.links.is_empty() {
        let runtime = Runtime::new().context("starting async runtime")?;
        for path in download_artifacts(&runtime, &*backend, &report.links, output_dir) {
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn read_transcript(source: &Path) -> anyhow::Result<String> {
    if source == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("reading transcript from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(source).with_context(|| format!("reading transcript {:?}", source))
}
