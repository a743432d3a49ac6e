//! File picker for choosing a scan file to upload.
//!
//! Lists directories and files with an accepted upload extension only, so
//! other file types can never be chosen.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use std::fs;
use std::path::{Path, PathBuf};

use super::centered_rect;
use crate::error::Result;
use crate::theme::{Colors, Styles};
use crate::types::UploadKind;

/// One listed entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Result of activating the selected entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserSelection {
    /// Moved into a directory
    Entered,
    /// A file was chosen
    File(PathBuf),
    /// Nothing selectable
    Nothing,
}

/// File picker state
#[derive(Debug, Clone)]
pub struct FileBrowserState {
    pub current_dir: PathBuf,
    pub entries: Vec<BrowserEntry>,
    pub selected: usize,
}

impl FileBrowserState {
    /// Open the picker on `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let mut state = Self {
            current_dir: dir.into(),
            entries: Vec::new(),
            selected: 0,
        };
        state.refresh()?;
        Ok(state)
    }

    /// Re-read the current directory
    pub fn refresh(&mut self) -> Result<()> {
        self.entries = list_entries(&self.current_dir)?;
        self.selected = 0;
        Ok(())
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn selected_entry(&self) -> Option<&BrowserEntry> {
        self.entries.get(self.selected)
    }

    /// Enter the selected directory or choose the selected file
    pub fn activate(&mut self) -> Result<BrowserSelection> {
        let Some(entry) = self.selected_entry().cloned() else {
            return Ok(BrowserSelection::Nothing);
        };
        if entry.is_dir {
            self.current_dir = entry.path;
            self.refresh()?;
            Ok(BrowserSelection::Entered)
        } else {
            Ok(BrowserSelection::File(entry.path))
        }
    }

    /// Go to the parent directory, if any
    pub fn go_up(&mut self) -> Result<()> {
        if let Some(parent) = self.current_dir.parent() {
            self.current_dir = parent.to_path_buf();
            self.refresh()?;
        }
        Ok(())
    }
}

/// Directories first, then accepted files, each sorted by name
fn list_entries(dir: &Path) -> Result<Vec<BrowserEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            dirs.push(BrowserEntry {
                name,
                path,
                is_dir: true,
            });
        } else if UploadKind::from_file_name(&name).is_some() {
            files.push(BrowserEntry {
                name,
                path,
                is_dir: false,
            });
        }
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let mut entries = Vec::with_capacity(dirs.len() + files.len() + 1);
    if let Some(parent) = dir.parent() {
        entries.push(BrowserEntry {
            name: "..".to_string(),
            path: parent.to_path_buf(),
            is_dir: true,
        });
    }
    entries.extend(dirs);
    entries.extend(files);
    Ok(entries)
}

/// File picker widget
pub struct FileBrowser;

impl FileBrowser {
    /// Render the picker as a centered overlay
    pub fn render(f: &mut Frame, state: &FileBrowserState) {
        let area = centered_rect(70, 70, f.area());
        f.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(area);

        let location = Paragraph::new(Line::from(vec![
            Span::styled("Directory: ", Styles::label()),
            Span::styled(state.current_dir.display().to_string(), Styles::text()),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Select Scan File ({}) ", UploadKind::accepted_list()))
                .title_style(Styles::title())
                .border_style(Styles::border_active()),
        )
        .style(Styles::panel_bg());
        f.render_widget(location, chunks[0]);

        let items: Vec<ListItem> = state
            .entries
            .iter()
            .map(|entry| {
                let (icon, color) = if entry.is_dir {
                    ("📁", Colors::PRIMARY)
                } else {
                    ("🩻", Colors::FG_PRIMARY)
                };
                ListItem::new(format!("{} {}", icon, entry.name))
                    .style(ratatui::style::Style::default().fg(color))
            })
            .collect();

        let empty = items.is_empty();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::border_active()),
            )
            .style(Styles::panel_bg())
            .highlight_style(Styles::selected())
            .highlight_symbol("▸ ");

        let mut list_state = ListState::default();
        if !empty {
            list_state.select(Some(state.selected));
        }
        f.render_stateful_widget(list, chunks[1], &mut list_state);
    }
}
