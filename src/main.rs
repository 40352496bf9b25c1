use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute, terminal,
};
use std::fs::File;
use std::io::{self, stdout};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fate_coin::controls::{self, Command};
use fate_coin::render::Screen;
use fate_coin::{Error, Result, Settings, Silent, SoundUnit, Synth, Table, Trigger};

fn init_logging(settings: &Settings) -> Result<()> {
    let file = File::create(&settings.log_file).map_err(|source| Error::LogFile {
        path: settings.log_file.display().to_string(),
        source,
    })?;
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "fate_coin=info".into());
    let writer = Mutex::new(file);

    let res = if settings.log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .try_init()
    };
    res.map_err(|e| Error::Logging(e.to_string()))
}

fn open_sound(settings: &Settings) -> Box<dyn SoundUnit> {
    if settings.mute {
        return Box::new(Silent);
    }
    match Synth::open() {
        Ok(synth) => Box::new(synth),
        Err(e) => {
            warn!(error = %e, "no audio, playing silently");
            Box::new(Silent)
        }
    }
}

fn run(settings: &Settings, out: &mut io::Stdout) -> Result<()> {
    let mut sound = open_sound(settings);
    let mut table = Table::seeded(settings.seed);
    let (cols, rows) = terminal::size()?;
    let mut screen = Screen::new(cols, rows);

    let frame_dur = settings.frame_duration();
    let started = Instant::now();

    loop {
        let frame_start = Instant::now();
        let now = started.elapsed();

        // Input
        while event::poll(std::time::Duration::ZERO)? {
            let cmd = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    controls::command_for(table.mode(), key)
                }
                Event::Mouse(m)
                    if m.kind == MouseEventKind::Down(MouseButton::Left)
                        && screen.hits_coin(m.column, m.row) =>
                {
                    Some(Command::Flip(Trigger::Pointer))
                }
                Event::Resize(c, r) => {
                    screen.resize(c, r);
                    None
                }
                _ => None,
            };
            if let Some(cmd) = cmd {
                if !controls::apply(&mut table, cmd, now) {
                    info!(
                        heads = table.lifetime().heads,
                        tails = table.lifetime().tails,
                        "leaving the table"
                    );
                    return Ok(());
                }
            }
        }

        // Update
        table.advance(now);
        for cue in table.take_cues() {
            cue.play(sound.as_mut());
        }

        // Render
        screen.draw(&table.view(), started.elapsed(), out)?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}

fn main() -> Result<()> {
    let settings = Settings::parse();
    init_logging(&settings)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        seed = ?settings.seed,
        mute = settings.mute,
        "starting"
    );

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        EnableMouseCapture,
    )?;

    let cleanup = |out: &mut io::Stdout| -> io::Result<()> {
        execute!(
            out,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    };

    let result = run(&settings, &mut out);
    cleanup(&mut out)?;
    result
}
