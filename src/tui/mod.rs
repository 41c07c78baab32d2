pub mod app;
pub mod handler;
pub mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;

use app::App;

/// Runs until the user quits. One frame is drawn per `frame_interval` at most.
pub fn run(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    frame_interval: Duration,
) -> io::Result<()> {
    while app.running {
        let deadline = Instant::now() + frame_interval;
        terminal.draw(|f| ui::draw(f, app))?;

        pump_events(app, deadline, |timeout| {
            if event::poll(timeout)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        })?;

        app.update();
        app.process_events();
    }

    Ok(())
}

/// Handles every input event that arrives before `deadline`.
///
/// `next` waits up to the given timeout and returns `None` when nothing came.
pub fn pump_events<F>(app: &mut App, deadline: Instant, mut next: F) -> io::Result<()>
where
    F: FnMut(Duration) -> io::Result<Option<Event>>,
{
    while app.running {
        let timeout = deadline.saturating_duration_since(Instant::now());
        let Some(ev) = next(timeout)? else {
            break;
        };
        if let Event::Key(key) = ev {
            // Ignore key release events on Windows (crossterm quirk)
            if key.kind == KeyEventKind::Press {
                handler::handle_key(app, key);
            }
        }
    }
    Ok(())
}
