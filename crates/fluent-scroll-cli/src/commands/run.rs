use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use fluent_scroll_core::AppConfig;
use fluent_scroll_tui::{
    app::{App, Mode, PaneLayout},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    keymap::Keymap,
    widgets::{DocumentWidget, PickerWidget, PopupWidget, StatusBarWidget},
};

type Backend = CrosstermBackend<io::Stdout>;

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    let keymap = Keymap::from_config(&config.keymap);
    let mut app = App::new(config.clone())?;

    // Frame clock follows the engine timer
    let mut events = EventHandler::new(config.ui.tick_rate_ms, app.area.frame_interval());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("fluent-scroll"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = main_loop(&mut terminal, &mut app, &keymap, &mut events).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn main_loop(
    terminal: &mut Terminal<Backend>,
    app: &mut App,
    keymap: &Keymap,
    events: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            let focuses = app.picker.focuses();
            let layout =
                PaneLayout::compute(frame.area(), &focuses, app.config.picker.visible_count);
            app.apply_layout(layout);

            let layout = app.layout.clone();
            DocumentWidget::render(frame, layout.document, app);
            PickerWidget::render(frame, layout.picker, app);
            StatusBarWidget::render(frame, layout.status, app);

            if app.mode == Mode::Help {
                PopupWidget::render_help(frame, &app.config.keymap, &app.theme);
            }
        })?;

        // Frame events only arrive while something moves
        let Some(event) = events.next(app.is_animating()).await else {
            debug!("Event reader stopped");
            break;
        };

        match event {
            AppEvent::Key(key) => {
                let action = handle_key_event(key, app, keymap);
                handle_action(app, action);
            }
            AppEvent::Mouse(mouse) => {
                let now = app.now_ms();
                app.handle_mouse(mouse, now);
            }
            AppEvent::Frame => {
                let now = app.now_ms();
                app.tick(now);
            }
            // Layout is recomputed on every draw
            AppEvent::Resize(_, _) | AppEvent::Tick => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_action(app: &mut App, action: Action) {
    // Any action other than the first 'g' ends a pending sequence
    if action != Action::PendingG {
        app.clear_pending_key();
    }

    match action {
        Action::Quit => app.should_quit = true,
        Action::FocusNext => app.focus_next(),
        Action::FocusPrev => app.focus_prev(),
        Action::ScrollDown => {
            let now = app.now_ms();
            app.scroll_down(now);
        }
        Action::ScrollUp => {
            let now = app.now_ms();
            app.scroll_up(now);
        }
        Action::PageDown => app.page_down(),
        Action::PageUp => app.page_up(),
        Action::JumpToTop => app.jump_to_top(),
        Action::JumpToBottom => app.jump_to_bottom(),
        Action::PendingG => app.pending_key = Some('g'),
        Action::CycleEasing => app.cycle_easing(),
        Action::ToggleAnimation => app.toggle_animation(),
        Action::Help => app.mode = Mode::Help,
        Action::ExitMode => {
            app.mode = Mode::Normal;
            app.clear_status();
        }
        Action::None => {}
    }
}
