mod terminal;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{selected_file_from_path, AnalyzeClient};
use form_controller::{
    dispatch_and_settle,
    render::decode_plot_data_uri,
    settings::{load_settings, DEFAULT_SETTINGS_FILE},
    DomEvent, DomHandles, FileList, FormController, SubmitOutcome,
};
use shared::domain::SlotKind;
use terminal::TerminalSurface;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Upload a replay and its beatmap for press timing analysis")]
struct Args {
    /// Replay file, selected through the replay zone's file picker.
    #[arg(long)]
    replay: PathBuf,
    /// Beatmap file, dropped onto the beatmap zone.
    #[arg(long)]
    beatmap: PathBuf,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    /// Ignore submit activations while a request is pending.
    #[arg(long)]
    single_flight: bool,
    /// Write the returned plot PNG here.
    #[arg(long)]
    save_plot: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if args.single_flight {
        settings.submit_policy = form_controller::SubmitPolicy::SingleFlight;
    }

    let client = AnalyzeClient::new(&settings.server_url)?;
    let replay = selected_file_from_path(&args.replay)
        .with_context(|| format!("failed to read replay '{}'", args.replay.display()))?;
    let beatmap = selected_file_from_path(&args.beatmap)
        .with_context(|| format!("failed to read beatmap '{}'", args.beatmap.display()))?;

    let handles = DomHandles::default();
    let mut surface = TerminalSurface::default();
    surface.stage_pick(handles.replay_input.clone(), FileList::single(replay));
    let mut controller =
        FormController::with_policy(surface, handles.clone(), settings.submit_policy);

    controller.dispatch(&handles.replay_zone, DomEvent::Click);
    while let Some((element, event)) = controller.surface_mut().next_event() {
        controller.dispatch(&element, event);
    }
    controller.dispatch(&handles.beatmap_zone, DomEvent::DragOver);
    controller.dispatch(
        &handles.beatmap_zone,
        DomEvent::Drop(FileList::single(beatmap)),
    );

    for slot in SlotKind::ALL {
        let file = controller.state().slots().get(slot).file();
        println!(
            "{slot}: {}",
            file.map(|f| f.name.as_str()).unwrap_or("<missing>")
        );
    }

    let outcome = dispatch_and_settle(&mut controller, &client, &handles.submit, DomEvent::Click)
        .await;
    match outcome {
        Some(SubmitOutcome::Rendered(_)) => {
            let surface = controller.surface();
            let rows = [
                ("Total presses", &handles.total_presses),
                ("Average press time", &handles.avg_press_time),
                ("Shortest press", &handles.min_press_time),
                ("Longest press", &handles.max_press_time),
            ];
            for (label, target) in rows {
                println!("{label}: {}", surface.text(target).unwrap_or("-"));
            }

            if let Some(path) = args.save_plot {
                let source = surface.image_source(&handles.plot_image).unwrap_or_default();
                let png = decode_plot_data_uri(source).context("plot is not valid base64")?;
                tokio::fs::write(&path, png)
                    .await
                    .with_context(|| format!("failed to write plot to '{}'", path.display()))?;
                println!("Plot written to {}", path.display());
            }
            Ok(())
        }
        Some(SubmitOutcome::Failed(err)) => bail!("{}", err.user_message()),
        None => {
            let surface = controller.surface();
            let reason = surface
                .alerts()
                .last()
                .cloned()
                .unwrap_or_else(|| "submit action was not accepted".to_string());
            if surface.is_disabled(&handles.submit) {
                bail!("submit disabled: {reason}");
            }
            bail!("{reason}")
        }
    }
}
