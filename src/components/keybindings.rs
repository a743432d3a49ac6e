//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change based on the current
//! application mode. The registry drives the nav bar and the help overlay;
//! the key handling itself lives in the app.

use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    PageUp,
    PageDown,
    Home,
    End,
    Select,
    NextField,
    PreviousField,
    ChangeValue,
    Submit,
    Refresh,
    Clear,
    Back,
    Quit,
    Help,
    Dismiss,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Global keybindings (available in every mode)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all modes
    fn register_defaults(&mut self) {
        self.global_bindings = vec![Keybinding::with_modifiers(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyAction::Quit,
            "Ctrl+C",
            "Quit",
        )];

        // Main Menu
        self.mode_bindings.insert(
            AppMode::MainMenu,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Navigate up"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Navigate down"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Select"),
                Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
                Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            ],
        );

        // Register form
        self.mode_bindings.insert(
            AppMode::Register,
            vec![
                Keybinding::new(KeyCode::Tab, KeyAction::NextField, "Tab/Down", "Next field"),
                Keybinding::new(KeyCode::BackTab, KeyAction::PreviousField, "S-Tab/Up", "Previous field"),
                Keybinding::new(KeyCode::Left, KeyAction::ChangeValue, "Left/Right", "Change age, option or date"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Next / pick file / submit"),
                Keybinding::with_modifiers(
                    KeyCode::Char('s'),
                    KeyModifiers::CONTROL,
                    KeyAction::Submit,
                    "Ctrl+S",
                    "Submit report",
                ),
                Keybinding::new(KeyCode::Delete, KeyAction::Clear, "Del", "Remove chosen file"),
                Keybinding::new(KeyCode::F(1), KeyAction::Help, "F1", "Help"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back to menu"),
            ],
        );

        // View all reports
        self.mode_bindings.insert(
            AppMode::ViewAll,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous row"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next row"),
                Keybinding::new(KeyCode::PageUp, KeyAction::PageUp, "PgUp", "Page up"),
                Keybinding::new(KeyCode::PageDown, KeyAction::PageDown, "PgDn", "Page down"),
                Keybinding::new(KeyCode::Home, KeyAction::Home, "Home", "First report"),
                Keybinding::new(KeyCode::End, KeyAction::End, "End", "Last report"),
                Keybinding::new(KeyCode::Char('r'), KeyAction::Refresh, "R", "Reload"),
                Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back to menu"),
                Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            ],
        );

        // Search by patient
        self.mode_bindings.insert(
            AppMode::Search,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Scroll results up"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Scroll results down"),
                Keybinding::new(KeyCode::Backspace, KeyAction::Clear, "Bksp", "Delete character"),
                Keybinding::new(KeyCode::F(1), KeyAction::Help, "F1", "Help"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back to menu"),
            ],
        );

        // File picker
        self.mode_bindings.insert(
            AppMode::FileBrowser,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Move up"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Move down"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Open / choose"),
                Keybinding::new(KeyCode::Backspace, KeyAction::Back, "Bksp", "Parent dir"),
                Keybinding::new(KeyCode::Esc, KeyAction::Dismiss, "Esc", "Cancel"),
            ],
        );
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(mode) {
            bindings.extend(mode_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());

        bindings
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, mode: &AppMode) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(mode);

        let priority_actions = match mode {
            AppMode::MainMenu => vec![
                KeyAction::NavigateUp,
                KeyAction::NavigateDown,
                KeyAction::Select,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::Register => vec![
                KeyAction::NextField,
                KeyAction::ChangeValue,
                KeyAction::Submit,
                KeyAction::Back,
                KeyAction::Help,
            ],
            AppMode::ViewAll => vec![
                KeyAction::NavigateUp,
                KeyAction::NavigateDown,
                KeyAction::Refresh,
                KeyAction::Back,
                KeyAction::Quit,
            ],
            AppMode::Search => vec![
                KeyAction::NavigateUp,
                KeyAction::NavigateDown,
                KeyAction::Back,
                KeyAction::Help,
            ],
            AppMode::FileBrowser => vec![
                KeyAction::NavigateUp,
                KeyAction::NavigateDown,
                KeyAction::Select,
                KeyAction::Back,
                KeyAction::Dismiss,
            ],
        };

        // Combine Up/Down into single item for cleaner display
        let mut items: Vec<NavBarItem> = Vec::new();
        let mut has_nav = false;

        for action in priority_actions {
            let is_nav = action == KeyAction::NavigateUp || action == KeyAction::NavigateDown;
            if is_nav && has_nav {
                continue;
            }

            if let Some(binding) = bindings.iter().find(|b| b.action == action) {
                if is_nav {
                    items.push(NavBarItem {
                        key_display: "Up/Dn".to_string(),
                        action_label: if *mode == AppMode::Search {
                            "Scroll".to_string()
                        } else {
                            "Navigate".to_string()
                        },
                    });
                    has_nav = true;
                } else {
                    items.push(NavBarItem {
                        key_display: binding.display.clone(),
                        action_label: binding.description.clone(),
                    });
                }
            }
        }

        items
    }

    /// Get full help content for a mode (for help overlay)
    pub fn get_help_content(&self, mode: &AppMode) -> Vec<HelpSection> {
        let mut sections = Vec::new();

        let groups: [(&str, fn(&KeyAction) -> bool); 3] = [
            ("Navigation", |a| {
                matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::PageUp
                        | KeyAction::PageDown
                        | KeyAction::Home
                        | KeyAction::End
                        | KeyAction::NextField
                        | KeyAction::PreviousField
                )
            }),
            ("Actions", |a| {
                matches!(
                    a,
                    KeyAction::Select
                        | KeyAction::ChangeValue
                        | KeyAction::Submit
                        | KeyAction::Refresh
                        | KeyAction::Clear
                        | KeyAction::Dismiss
                )
            }),
            ("General", |a| {
                matches!(a, KeyAction::Back | KeyAction::Help | KeyAction::Quit)
            }),
        ];

        for (title, belongs) in groups {
            let items: Vec<(String, String)> = self
                .get_bindings(mode)
                .into_iter()
                .filter(|b| belongs(&b.action))
                .map(|b| (b.display.clone(), b.description.clone()))
                .collect();
            if !items.is_empty() {
                sections.push(HelpSection {
                    title: title.to_string(),
                    items,
                });
            }
        }

        sections
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_has_bindings_and_quit() {
        let ctx = KeybindingContext::new();
        for mode in [
            AppMode::MainMenu,
            AppMode::Register,
            AppMode::ViewAll,
            AppMode::Search,
            AppMode::FileBrowser,
        ] {
            let bindings = ctx.get_bindings(&mode);
            assert!(bindings.len() > 1, "{mode:?}");
            assert!(bindings.iter().any(|b| b.action == KeyAction::Quit));
        }
    }

    #[test]
    fn nav_items_combine_up_down() {
        let ctx = KeybindingContext::new();
        let items = ctx.get_nav_items(&AppMode::MainMenu);
        assert_eq!(items[0].key_display, "Up/Dn");
        assert_eq!(items.iter().filter(|i| i.key_display == "Up/Dn").count(), 1);
    }

    #[test]
    fn text_modes_do_not_bind_plain_letters() {
        let ctx = KeybindingContext::new();
        for mode in [AppMode::Register, AppMode::Search] {
            assert!(
                !ctx.get_bindings(&mode).iter().any(|b| matches!(b.key, KeyCode::Char(_))
                    && b.modifiers == KeyModifiers::NONE),
                "{mode:?}"
            );
        }
    }

    #[test]
    fn help_content_has_sections() {
        let ctx = KeybindingContext::new();
        let sections = ctx.get_help_content(&AppMode::ViewAll);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Navigation", "Actions", "General"]);
    }
}
