use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::warn;

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse wheel, click or drag
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Idle tick when no input arrived within the tick rate
    Tick,
    /// Frame clock tick, only produced while something animates
    Frame,
}

/// Event handler for terminal events.
///
/// Terminal input is read on a blocking task and forwarded over a channel;
/// the frame clock runs on the async side and is only consulted while an
/// animation is in flight.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    frame: Interval,
}

impl EventHandler {
    /// Start reading terminal events
    pub fn new(tick_rate_ms: u64, frame_interval: Duration) -> Self {
        let rx = spawn_event_reader(Duration::from_millis(tick_rate_ms));
        Self::from_channel(rx, frame_interval)
    }

    /// Build on an existing event source
    pub fn from_channel(rx: mpsc::UnboundedReceiver<AppEvent>, frame_interval: Duration) -> Self {
        let mut frame = tokio::time::interval(frame_interval);
        frame.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { rx, frame }
    }

    /// Wait for the next event.
    ///
    /// While `animating` the frame clock competes with terminal input.
    /// Returns `None` once the reader has stopped.
    pub async fn next(&mut self, animating: bool) -> Option<AppEvent> {
        if animating {
            tokio::select! {
                event = self.rx.recv() => event,
                _ = self.frame.tick() => Some(AppEvent::Frame),
            }
        } else {
            self.rx.recv().await
        }
    }
}

/// Read crossterm events on a blocking task
fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        let event = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(event) => event,
                Err(e) => {
                    warn!("Failed to read terminal event: {}", e);
                    break;
                }
            },
            Ok(false) => {
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
                continue;
            }
            Err(e) => {
                warn!("Failed to poll terminal events: {}", e);
                break;
            }
        };

        let app_event = match event {
            // Only handle key press events, ignore release events
            // (crossterm 0.27+ sends release events on some systems)
            Event::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
            Event::Mouse(mouse) => AppEvent::Mouse(mouse),
            Event::Resize(w, h) => AppEvent::Resize(w, h),
            _ => continue,
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });

    rx
}
