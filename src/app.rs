use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tracing::warn;

use crate::chat::ChatController;
use crate::config::Config;
use crate::data;
use crate::gemini::GeminiClient;
use crate::lang::Language;
use crate::state::{DashboardState, Tab};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub dashboard: DashboardState,
    pub chat: ChatController,
    pub model_name: String,

    // Chat input
    pub input: String,
    pub input_cursor: usize,

    // Chat transcript scrolling
    pub chat_scroll: u16,
    pub chat_height: u16, // Inner height of the transcript area
    pub chat_width: u16,  // Inner width, for wrap calculations

    // Map view
    pub state_list: ListState,

    // Analytics view
    pub analytics_scroll: usize, // Index of the first visible chart row

    // Language picker popup
    pub show_language_picker: bool,
    pub language_picker_state: ListState,

    // Suggestion cycling
    pub suggestion_idx: usize,

    // Panel areas for mouse hit-testing (updated during render)
    pub chat_area: Option<Rect>,
    pub map_area: Option<Rect>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation
}

impl App {
    pub fn new(model_override: Option<String>) -> Self {
        let config = Config::load().unwrap_or_else(|_| Config::new());
        let language = config
            .language
            .as_deref()
            .and_then(Language::from_code)
            .unwrap_or(Language::English);

        let (client, model_name) = match GeminiClient::from_env(model_override) {
            Ok(client) => {
                let model = client.model().to_string();
                (Some(client), model)
            }
            Err(err) => {
                warn!(%err, "assistant disabled for this session");
                (None, "offline".to_string())
            }
        };

        let mut chat = ChatController::new(client, language);
        chat.start(language);

        let mut state_list = ListState::default();
        state_list.select(Some(0));

        Self {
            should_quit: false,
            // Start ready to type, like a chat box with focus
            input_mode: InputMode::Editing,
            dashboard: DashboardState::default(),
            chat,
            model_name,

            input: String::new(),
            input_cursor: 0,

            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,

            state_list,

            analytics_scroll: 0,

            show_language_picker: false,
            language_picker_state: ListState::default(),

            suggestion_idx: 0,

            chat_area: None,
            map_area: None,

            animation_frame: 0,
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.chat.is_sending() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Switch conversation language: persist the choice and restart the chat
    /// with a fresh transcript.
    pub fn set_language(&mut self, language: Language) {
        if let Err(err) = Config::save_language(language.code()) {
            warn!(%err, "failed to persist language preference");
        }
        self.chat.start(language);
        self.chat_scroll = 0;
    }

    /// Prefill the input with the next quick suggestion.
    pub fn cycle_suggestion(&mut self) {
        if data::SUGGESTIONS.is_empty() {
            return;
        }
        let suggestion = data::SUGGESTIONS[self.suggestion_idx % data::SUGGESTIONS.len()];
        self.suggestion_idx += 1;
        self.input = suggestion.to_string();
        self.input_cursor = self.input.chars().count();
    }

    // Transcript scrolling
    pub fn scroll_chat_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    pub fn scroll_chat_down(&mut self, lines: u16) {
        let max = self.transcript_lines().saturating_sub(self.chat_height);
        self.chat_scroll = self.chat_scroll.saturating_add(lines).min(max);
    }

    /// Scroll the transcript so the latest message (or the "Thinking..."
    /// indicator) is visible.
    pub fn scroll_chat_to_bottom(&mut self) {
        let total = self.transcript_lines();
        let visible = if self.chat_height > 0 { self.chat_height } else { 20 };
        if total > visible {
            self.chat_scroll = total - visible;
        }
    }

    /// Estimate of the rendered transcript height, accounting for wrapping.
    fn transcript_lines(&self) -> u16 {
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total: u16 = 0;
        for msg in self.chat.messages() {
            total += 1; // Role line
            for line in msg.text.lines() {
                // Character count, not byte length, for wrapped-width math
                let chars = line.chars().count();
                total += ((chars / wrap_width) + 1) as u16;
            }
            total += 1; // Blank line after message
        }

        if self.chat.is_sending() {
            total += 2; // Role line + "Thinking..."
        }

        total
    }

    // Map view navigation
    pub fn map_nav_down(&mut self) {
        let len = data::STATE_NAMES.len();
        if len > 0 {
            let i = self.state_list.selected().unwrap_or(0);
            self.state_list.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn map_nav_up(&mut self) {
        let i = self.state_list.selected().unwrap_or(0);
        self.state_list.select(Some(i.saturating_sub(1)));
    }

    /// Move the map list cursor onto a state by name, if it exists.
    pub fn select_state(&mut self, name: &str) {
        if let Some(idx) = data::STATE_NAMES
            .iter()
            .position(|state| state.eq_ignore_ascii_case(name.trim()))
        {
            self.state_list.select(Some(idx));
        }
    }

    // Analytics scrolling (one chart row at a time)
    pub fn analytics_scroll_down(&mut self) {
        let rows = self.dashboard.charts.len().div_ceil(2);
        if rows > 0 {
            self.analytics_scroll = (self.analytics_scroll + 1).min(rows - 1);
        }
    }

    pub fn analytics_scroll_up(&mut self) {
        self.analytics_scroll = self.analytics_scroll.saturating_sub(1);
    }

    // Language picker
    pub fn open_language_picker(&mut self) {
        let current = Language::all()
            .iter()
            .position(|lang| *lang == self.chat.language())
            .unwrap_or(0);
        self.language_picker_state.select(Some(current));
        self.show_language_picker = true;
    }

    pub fn language_picker_nav_down(&mut self) {
        let len = Language::all().len();
        let i = self.language_picker_state.selected().unwrap_or(0);
        self.language_picker_state.select(Some((i + 1).min(len - 1)));
    }

    pub fn language_picker_nav_up(&mut self) {
        let i = self.language_picker_state.selected().unwrap_or(0);
        self.language_picker_state.select(Some(i.saturating_sub(1)));
    }

    pub fn confirm_language_pick(&mut self) {
        if let Some(i) = self.language_picker_state.selected() {
            if let Some(language) = Language::all().get(i).copied() {
                self.show_language_picker = false;
                if language != self.chat.language() {
                    self.set_language(language);
                }
            }
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.dashboard.active_tab
    }
}
