//! Keybinding definitions for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextView,
    PrevView,
    SwitchView(usize),
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    EditField,
    AddRow,
    DeleteRow,
    Submit,
    WidenField,
    NarrowField,
    RefreshMarket,
    Cancel,
}

/// Keys while a field is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Insert(char),
    Backspace,
    Clear,
    Commit,
    Cancel,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::RefreshMarket),
            KeyCode::Char('s') => Some(Action::Submit),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('n') => Some(Action::AddRow),
        KeyCode::Char('d') => Some(Action::DeleteRow),
        KeyCode::Char('s') => Some(Action::Submit),
        KeyCode::Char('r') => Some(Action::RefreshMarket),
        KeyCode::Char(']') => Some(Action::WidenField),
        KeyCode::Char('[') => Some(Action::NarrowField),
        KeyCode::Enter | KeyCode::Char('e') => Some(Action::EditField),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab => Some(Action::NextView),
        KeyCode::BackTab => Some(Action::PrevView),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveRight),
        KeyCode::Char(c @ '1'..='4') => Some(Action::SwitchView(c as usize - '1' as usize)),
        _ => None,
    }
}

pub fn map_edit_key(event: KeyEvent) -> Option<EditAction> {
    let KeyEvent { code, modifiers, .. } = event;
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('u') => Some(EditAction::Clear),
            KeyCode::Char('c') => Some(EditAction::Cancel),
            _ => None,
        };
    }
    match code {
        KeyCode::Enter | KeyCode::Tab => Some(EditAction::Commit),
        KeyCode::Esc => Some(EditAction::Cancel),
        KeyCode::Backspace => Some(EditAction::Backspace),
        KeyCode::Char(c) => Some(EditAction::Insert(c)),
        _ => None,
    }
}
