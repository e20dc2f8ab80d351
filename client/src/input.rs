// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use common::Priority;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Focus;

/// Everything a key press can ask the client to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    FocusNext,
    FocusPrevious,
    /// The "Add Task" action.
    Submit,
    InsertChar(char),
    Backspace,
    CycleCategory { forward: bool },
    CyclePriority { forward: bool },
    SetPriority(Priority),
    StepDueDate(i64),
    ClearDueDate,
    SelectPrevious,
    SelectNext,
    /// "Complete" or "Undo" on the highlighted task.
    ToggleSelected,
    DeleteSelected,
}

/// Maps a key press to a command, given which pane has focus.
pub fn map_key(focus: Focus, key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    // Keys that mean the same thing everywhere
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Command::Quit);
        }
        KeyCode::Esc => return Some(Command::Quit),
        KeyCode::Tab => return Some(Command::FocusNext),
        KeyCode::BackTab => return Some(Command::FocusPrevious),
        _ => {}
    }

    match focus {
        Focus::Category => match key.code {
            KeyCode::Left | KeyCode::Up => Some(Command::CycleCategory { forward: false }),
            KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => {
                Some(Command::CycleCategory { forward: true })
            }
            KeyCode::Enter => Some(Command::Submit),
            _ => None,
        },
        Focus::Priority => match key.code {
            KeyCode::Left | KeyCode::Up => Some(Command::CyclePriority { forward: false }),
            KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => {
                Some(Command::CyclePriority { forward: true })
            }
            KeyCode::Char(c) => c
                .to_digit(10)
                .and_then(|d| Priority::from_value(d as i32))
                .map(Command::SetPriority),
            KeyCode::Enter => Some(Command::Submit),
            _ => None,
        },
        Focus::DueDate => match key.code {
            KeyCode::Right | KeyCode::Up | KeyCode::Char('+') => Some(Command::StepDueDate(1)),
            KeyCode::Left | KeyCode::Down | KeyCode::Char('-') => Some(Command::StepDueDate(-1)),
            KeyCode::PageUp => Some(Command::StepDueDate(7)),
            KeyCode::PageDown => Some(Command::StepDueDate(-7)),
            KeyCode::Backspace | KeyCode::Delete => Some(Command::ClearDueDate),
            KeyCode::Enter => Some(Command::Submit),
            _ => None,
        },
        Focus::Description => match key.code {
            // Chords such as Ctrl-A or Alt-x are not text
            KeyCode::Char(_)
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                None
            }
            KeyCode::Char(c) => Some(Command::InsertChar(c)),
            KeyCode::Backspace => Some(Command::Backspace),
            KeyCode::Enter => Some(Command::Submit),
            _ => None,
        },
        Focus::AddButton => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Submit),
            _ => None,
        },
        Focus::TaskList => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Command::SelectPrevious),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::SelectNext),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('c') => {
                Some(Command::ToggleSelected)
            }
            KeyCode::Delete | KeyCode::Char('d') => Some(Command::DeleteSelected),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        },
    }
}
