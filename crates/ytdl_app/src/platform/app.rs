use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use ytdl_core::{update, AppState, Msg};
use ytdl_logging::{ytdl_info, ytdl_warn};

use super::effects::EffectRunner;
use super::logging;
use super::settings::{load_settings, AppSettings, Overrides};
use super::ui::commands::{self, Command, HELP};
use super::ui::render::render;

/// Everything `main` hands over after parsing the command line.
pub struct LaunchOptions {
    pub config_path: PathBuf,
    pub initial_url: Option<String>,
    pub overrides: Overrides,
}

pub fn run_app(options: LaunchOptions) -> anyhow::Result<()> {
    let (settings, settings_error) = match load_settings(&options.config_path) {
        Ok(settings) => (settings, None),
        Err(err) => (AppSettings::default(), Some(err)),
    };
    let settings = settings.with_overrides(options.overrides);

    let level = ytdl_logging::parse_level(&settings.log_level);
    logging::initialize(
        settings.log_destination,
        level.unwrap_or(log::LevelFilter::Info),
    );
    if let Some(err) = settings_error {
        ytdl_warn!("Using default settings: {:#}", err);
    }
    if level.is_none() {
        ytdl_warn!("Unknown log level {:?}; using info", settings.log_level);
    }
    ytdl_info!(
        "Starting ytdl backend={:?} output_dir={:?}",
        settings.backend,
        settings.output_dir
    );

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    let runner = EffectRunner::new(&settings, cmd_tx.clone())?;
    spawn_input_reader(cmd_tx).context("failed to start the input reader")?;

    let mut session = Session {
        state: AppState::new(),
        runner,
    };
    session.draw();
    if let Some(url) = options.initial_url {
        session.dispatch(Msg::UrlChanged(url));
        session.dispatch(Msg::FetchInfoClicked);
    }

    while let Ok(command) = cmd_rx.recv() {
        match command {
            Command::Msg(msg) => session.dispatch(msg),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }
    ytdl_info!("Leaving ytdl");
    Ok(())
}

struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
        if self.state.consume_dirty() {
            self.draw();
        }
    }

    fn draw(&self) {
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "\n{}", render(&self.state.view()));
        let _ = stdout.flush();
    }
}

/// Reads stdin line by line; end of input counts as `quit`.
fn spawn_input_reader(cmd_tx: mpsc::Sender<Command>) -> io::Result<()> {
    thread::Builder::new()
        .name("ytdl-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                match commands::parse(&line) {
                    Ok(Some(command)) => {
                        if cmd_tx.send(command).is_err() {
                            return;
                        }
                    }
                    Ok(None) => {}
                    Err(problem) => eprintln!("{problem}"),
                }
            }
            let _ = cmd_tx.send(Command::Quit);
        })?;
    Ok(())
}
