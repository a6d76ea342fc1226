use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{App, InputMode};
use crate::state::{MapLayer, Tab};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.show_language_picker {
        handle_language_picker(app, key);
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_language_picker(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.show_language_picker = false,
        KeyCode::Char('j') | KeyCode::Down => app.language_picker_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.language_picker_nav_up(),
        KeyCode::Enter => app.confirm_language_pick(),
        _ => {}
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        // Quit
        KeyCode::Char('q') => app.should_quit = true,

        // Tab switching
        KeyCode::Tab => app.dashboard.active_tab = app.dashboard.active_tab.next(),
        KeyCode::Char('1') => app.dashboard.active_tab = Tab::Chat,
        KeyCode::Char('2') => app.dashboard.active_tab = Tab::Map,
        KeyCode::Char('3') => app.dashboard.active_tab = Tab::Analytics,

        // Language picker
        KeyCode::Char('L') => app.open_language_picker(),

        // Focus the input (jumps to the chat tab if needed)
        KeyCode::Char('i') => {
            app.dashboard.active_tab = Tab::Chat;
            app.input_mode = InputMode::Editing;
            app.input_cursor = app.input.chars().count();
        }

        // Prefill the next quick suggestion
        KeyCode::Char('p') => {
            app.dashboard.active_tab = Tab::Chat;
            app.cycle_suggestion();
            app.input_mode = InputMode::Editing;
        }

        // Per-tab navigation
        KeyCode::Char('j') | KeyCode::Down => match app.active_tab() {
            Tab::Chat => app.scroll_chat_down(1),
            Tab::Map => app.map_nav_down(),
            Tab::Analytics => app.analytics_scroll_down(),
        },
        KeyCode::Char('k') | KeyCode::Up => match app.active_tab() {
            Tab::Chat => app.scroll_chat_up(1),
            Tab::Map => app.map_nav_up(),
            Tab::Analytics => app.analytics_scroll_up(),
        },
        // Map layer hotkeys, mirroring the layer buttons on the map view
        KeyCode::Char('g') if app.active_tab() == Tab::Map => {
            app.dashboard.map.active_layer = MapLayer::Groundwater;
        }
        KeyCode::Char('r') if app.active_tab() == Tab::Map => {
            app.dashboard.map.active_layer = MapLayer::Rainfall;
        }
        KeyCode::Char('s') if app.active_tab() == Tab::Map => {
            app.dashboard.map.active_layer = MapLayer::Stress;
        }
        KeyCode::Char('n') if app.active_tab() == Tab::Map => {
            app.dashboard.map.active_layer = MapLayer::None;
        }

        // Jump to top/bottom of the transcript
        KeyCode::Char('g') => {
            if app.active_tab() == Tab::Chat {
                app.chat_scroll = 0;
            }
        }
        KeyCode::Char('G') => {
            if app.active_tab() == Tab::Chat {
                app.scroll_chat_to_bottom();
            }
        }

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => submit_input(app),
        KeyCode::Backspace => {
            if app.input_cursor > 0 {
                app.input_cursor -= 1;
                let byte_pos = char_to_byte_index(&app.input, app.input_cursor);
                app.input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.input.chars().count();
            if app.input_cursor < char_count {
                let byte_pos = char_to_byte_index(&app.input, app.input_cursor);
                app.input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.input_cursor = app.input_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.input.chars().count();
            app.input_cursor = (app.input_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.input_cursor = 0;
        }
        KeyCode::End => {
            app.input_cursor = app.input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.input, app.input_cursor);
            app.input.insert(byte_pos, c);
            app.input_cursor += 1;
        }
        _ => {}
    }
}

fn submit_input(app: &mut App) {
    // While a request is in flight the draft is kept, not silently lost.
    if app.input.trim().is_empty() || app.chat.is_sending() {
        return;
    }

    let text = std::mem::take(&mut app.input);
    app.input_cursor = 0;
    app.chat.submit(&text);
    app.scroll_chat_to_bottom();
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    let in_chat = app.chat_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let in_map = app.map_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);

    match mouse.kind {
        MouseEventKind::ScrollDown => match app.active_tab() {
            Tab::Chat if in_chat => app.scroll_chat_down(3),
            Tab::Map if in_map => app.map_nav_down(),
            Tab::Analytics => app.analytics_scroll_down(),
            _ => {}
        },
        MouseEventKind::ScrollUp => match app.active_tab() {
            Tab::Chat if in_chat => app.scroll_chat_up(3),
            Tab::Map if in_map => app.map_nav_up(),
            Tab::Analytics => app.analytics_scroll_up(),
            _ => {}
        },
        _ => {}
    }
}
