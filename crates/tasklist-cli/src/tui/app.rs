//! Application state and logic

use crossterm::event::{KeyCode, KeyModifiers};
use tasklist_core::{Completion, Request, Task, TaskList};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode
    Normal,
    /// Typing into the new-task form
    Editing,
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Tasks, pending input and error slot
    pub list: TaskList,
    /// Currently selected task index
    pub selected: usize,
    /// Requests sent but not yet completed
    pub in_flight: usize,
    /// Status message to display temporarily
    pub status_message: Option<String>,
    /// When the status message was set (for auto-dismiss)
    pub status_message_time: Option<std::time::Instant>,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Pending 'g' keypress for gg sequence (with timestamp)
    pub pending_g: Option<std::time::Instant>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create an app with an empty list
    pub fn new() -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            list: TaskList::new(),
            selected: 0,
            in_flight: 0,
            status_message: None,
            status_message_time: None,
            show_help: false,
            pending_g: None,
        }
    }

    /// Set a status message (will auto-dismiss after 3 seconds)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(std::time::Instant::now());
    }

    /// Check and clear expired status message
    pub fn check_status_timeout(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() > std::time::Duration::from_secs(3) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Get the currently selected task
    pub fn selected_task(&self) -> Option<&Task> {
        self.list.tasks().get(self.selected)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected < self.list.len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    /// Move selection to first task (vim 'gg')
    pub fn move_to_first(&mut self) {
        self.selected = 0;
    }

    /// Move selection to last task (vim 'G')
    pub fn move_to_last(&mut self) {
        self.selected = self.list.len().saturating_sub(1);
    }

    /// Record that a request was handed off
    pub fn dispatched(&mut self, request: &Request) {
        self.in_flight += 1;
        self.set_status(format!("{}...", request.describe()));
    }

    /// Fold a finished request into the state
    pub fn complete(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.list.apply(completion);
        self.clamp_selection();
        if self.in_flight == 0 {
            self.status_message = None;
            self.status_message_time = None;
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.list.len() {
            self.selected = self.list.len().saturating_sub(1);
        }
    }

    /// Handle a key press, returning a request to send if one was triggered
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<Request> {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        // If help is showing, any key dismisses it
        if self.show_help {
            self.show_help = false;
            return None;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(code),
            InputMode::Editing => self.handle_editing_key(code),
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> Option<Request> {
        // Clear pending 'g' if timeout expired (500ms)
        if let Some(time) = self.pending_g {
            if time.elapsed() > std::time::Duration::from_millis(500) {
                self.pending_g = None;
            }
        }

        match code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('G') => {
                self.pending_g = None;
                self.move_to_last();
            }
            KeyCode::Char('g') => {
                if self.pending_g.take().is_some() {
                    self.move_to_first();
                } else {
                    self.pending_g = Some(std::time::Instant::now());
                }
            }

            // Toggle done on the selected task
            KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => {
                let id = self.selected_task()?.id;
                return self.list.toggle(id);
            }

            // Delete the selected task
            KeyCode::Char('d') | KeyCode::Delete => {
                let id = self.selected_task()?.id;
                return Some(self.list.delete(id));
            }

            // Focus the new-task form
            KeyCode::Char('a') | KeyCode::Char('i') => {
                self.input_mode = InputMode::Editing;
            }

            KeyCode::Char('?') => self.toggle_help(),
            KeyCode::Esc => {
                self.status_message = None;
                self.status_message_time = None;
            }
            _ => {
                self.pending_g = None;
            }
        }

        None
    }

    fn handle_editing_key(&mut self, code: KeyCode) -> Option<Request> {
        match code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                return Some(self.list.submit());
            }
            KeyCode::Backspace => self.list.pop_input(),
            KeyCode::Char(c) => self.list.push_input(c),
            _ => {}
        }
        None
    }
}
