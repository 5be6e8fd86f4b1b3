use clap::Subcommand;
use marzano_core::notify::FLASH_INTERVAL_MS;
use marzano_core::{Config, Event, Mode, Session, Store, TitleFlasher};

use crate::sound::Chime;
use crate::view;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the countdown
    Start,
    /// Stop the countdown, keeping the remaining time
    Stop,
    /// Reset the current interval to its full duration
    Reset,
    /// Reset everything: mode, countdown and completed sessions
    ResetAll,
    /// Print the current timer state as JSON
    Status,
    /// Override the remaining seconds (debug affordance)
    Set {
        /// New countdown value; negative values clamp to zero
        #[arg(allow_hyphen_values = true)]
        secs: i64,
    },
    /// Override the completed-session count (debug affordance)
    SetCompleted {
        /// New count; negative values clamp to zero
        #[arg(allow_hyphen_values = true)]
        count: i64,
    },
    /// Run the live countdown view until interrupted
    Watch {
        /// Start the countdown on entry
        #[arg(long)]
        start: bool,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let mut session = Session::open(store);

    match action {
        TimerAction::Start => {
            let event = session.start();
            print_event(event, &session)?;
        }
        TimerAction::Stop => {
            let event = session.stop();
            print_event(event, &session)?;
        }
        TimerAction::Reset => {
            let event = session.reset();
            print_event(event, &session)?;
        }
        TimerAction::ResetAll => {
            let event = session.reset_all();
            print_event(event, &session)?;
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        }
        TimerAction::Set { secs } => {
            session.set_time(secs);
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        }
        TimerAction::SetCompleted { count } => {
            session.set_completed_sessions(count);
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        }
        TimerAction::Watch { start } => {
            if start {
                session.start();
            }
            return watch(session);
        }
    }
    Ok(())
}

/// Print the resulting event, or the current snapshot for no-op commands.
fn print_event(
    event: Option<Event>,
    session: &Session,
) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
        None => println!("{}", serde_json::to_string_pretty(&session.snapshot())?),
    }
    Ok(())
}

/// Run the live view. The one-second engine tick and the flash cadence
/// both live inside this loop; tearing the loop down (ctrl-c) disarms
/// them and any in-flight flash sequence with it.
fn watch(session: Session) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(watch_loop(session, &config))
}

async fn watch_loop(
    mut session: Session,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    use std::time::Duration;
    use tokio::time::interval;

    let mut stdout = std::io::stdout();

    // Completion hook: the engine calls this synchronously while
    // completing; the loop drains the channel right after the tick.
    let (completions_tx, completions_rx) = std::sync::mpsc::channel::<()>();
    session.set_completion_hook(move || {
        let _ = completions_tx.send(());
    });

    let mut chime = Chime::new(config.notifications.volume);
    let mut flasher = config
        .notifications
        .title_flash
        .then(TitleFlasher::new);
    let mut last_title = String::new();

    let mut tick = interval(Duration::from_secs(1));
    let mut flash = interval(Duration::from_millis(FLASH_INTERVAL_MS));
    // The first tick of a tokio interval fires immediately; consume both
    // so the countdown starts a full second after entering the loop.
    tick.tick().await;
    flash.tick().await;

    if let Some(flasher) = flasher.as_mut() {
        flasher.observe(session.remaining_secs(), session.is_active());
        apply_title(&mut stdout, &mut last_title, flasher.title())?;
    }
    render(&mut stdout, &session)?;

    loop {
        tokio::select! {
            _ = tick.tick() => {
                let event = session.tick();

                while completions_rx.try_recv().is_ok() {
                    if config.notifications.enabled {
                        chime.play();
                    }
                }
                if let Some(Event::TimerCompleted { finished, next, .. }) = &event {
                    if config.notifications.enabled {
                        notify_desktop(*finished, *next);
                    }
                }
                if let Some(flasher) = flasher.as_mut() {
                    flasher.observe(session.remaining_secs(), session.is_active());
                    apply_title(&mut stdout, &mut last_title, flasher.title())?;
                }
                render(&mut stdout, &session)?;
            }
            _ = flash.tick() => {
                if let Some(flasher) = flasher.as_mut() {
                    if flasher.is_flashing() {
                        flasher.tick();
                        apply_title(&mut stdout, &mut last_title, flasher.title())?;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                return Ok(());
            }
        }
    }
}

fn render(
    stdout: &mut std::io::Stdout,
    session: &Session,
) -> Result<(), Box<dyn std::error::Error>> {
    use crossterm::cursor::MoveToColumn;
    use crossterm::style::Print;
    use crossterm::terminal::{Clear, ClearType};

    let line = view::status_line(
        session.mode(),
        session.remaining_secs(),
        session.progress_percent(),
        session.is_active(),
        session.completed_work_sessions(),
    );
    crossterm::execute!(
        stdout,
        MoveToColumn(0),
        Clear(ClearType::UntilNewLine),
        Print(line)
    )?;
    Ok(())
}

fn apply_title(
    stdout: &mut std::io::Stdout,
    last_title: &mut String,
    title: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if title != last_title.as_str() {
        crossterm::execute!(stdout, crossterm::terminal::SetTitle(title))?;
        *last_title = title.to_string();
    }
    Ok(())
}

fn notify_desktop(finished: Mode, next: Mode) {
    let body = match finished {
        Mode::Work => format!(
            "Work session complete! Time for a {}-minute break.",
            next.duration_secs() / 60
        ),
        Mode::ShortBreak | Mode::LongBreak => {
            "Break is over! Ready for the next 25-minute work session.".to_string()
        }
    };
    if let Err(e) = notify_rust::Notification::new()
        .summary("Marzano")
        .body(&body)
        .show()
    {
        eprintln!("warning: failed to send notification: {e}");
    }
}
