use crossterm::event::{KeyCode, KeyEvent};

use crate::action::ListAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeymapProfile {
    #[default]
    Default,
    Vim,
    Arrows,
}

#[derive(Clone, Copy, Debug)]
pub struct ListKeyBindings {
    profile: KeymapProfile,
}

impl Default for ListKeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl ListKeyBindings {
    pub const fn new() -> Self {
        Self {
            profile: KeymapProfile::Default,
        }
    }

    pub const fn with_profile(profile: KeymapProfile) -> Self {
        Self { profile }
    }

    pub const fn profile(&self) -> KeymapProfile {
        self.profile
    }

    pub const fn set_profile(&mut self, profile: KeymapProfile) {
        self.profile = profile;
    }

    pub fn resolve<C>(&self, key: KeyEvent) -> Option<ListAction<C>> {
        let nav_action = match self.profile {
            KeymapProfile::Default => self.resolve_default_nav(key),
            KeymapProfile::Vim => self.resolve_vim_nav(key),
            KeymapProfile::Arrows => self.resolve_arrow_nav(key),
        };
        if nav_action.is_some() {
            return nav_action;
        }

        self.resolve_common(key)
    }

    pub fn resolve_with<C, F>(&self, key: KeyEvent, custom: F) -> Option<ListAction<C>>
    where
        F: Fn(KeyEvent) -> Option<C>,
    {
        if let Some(action) = custom(key) {
            return Some(ListAction::Custom(action));
        }

        self.resolve(key)
    }

    const fn resolve_default_nav<C>(&self, key: KeyEvent) -> Option<ListAction<C>> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(ListAction::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(ListAction::SelectNext),
            _ => None,
        }
    }

    const fn resolve_vim_nav<C>(&self, key: KeyEvent) -> Option<ListAction<C>> {
        match key.code {
            KeyCode::Char('k') => Some(ListAction::SelectPrev),
            KeyCode::Char('j') => Some(ListAction::SelectNext),
            KeyCode::Char('g') => Some(ListAction::SelectFirst),
            KeyCode::Char('G') => Some(ListAction::SelectLast),
            _ => None,
        }
    }

    const fn resolve_arrow_nav<C>(&self, key: KeyEvent) -> Option<ListAction<C>> {
        match key.code {
            KeyCode::Up => Some(ListAction::SelectPrev),
            KeyCode::Down => Some(ListAction::SelectNext),
            _ => None,
        }
    }

    const fn resolve_common<C>(&self, key: KeyEvent) -> Option<ListAction<C>> {
        match key.code {
            KeyCode::Home => Some(ListAction::SelectFirst),
            KeyCode::End => Some(ListAction::SelectLast),
            _ => None,
        }
    }
}
