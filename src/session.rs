//! Per-user conversation state.
//!
//! The chat front end keeps one [`Session`] per user and hands it to
//! [`StickerMaker::make_for_session`](crate::StickerMaker::make_for_session).
//! A user first picks a style, then sends a photo; a photo that arrives
//! before any style was picked is not rendered.

use crate::error::StickerError;
use crate::style::StyleId;

/// Where a user is in the pick-style / send-photo exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingPhoto,
}

/// Conversation state of one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    selected_style: Option<StyleId>,
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selected_style(&self) -> Option<StyleId> {
        self.selected_style
    }

    pub fn is_awaiting_photo(&self) -> bool {
        self.state == SessionState::AwaitingPhoto
    }

    /// Records the chosen style and waits for a photo.
    pub fn select_style(&mut self, style: StyleId) {
        self.selected_style = Some(style);
        self.state = SessionState::AwaitingPhoto;
    }

    /// Parses a keyboard label or slug and selects it.
    ///
    /// Unknown text leaves the session untouched.
    pub fn select_style_label(&mut self, text: &str) -> Result<StyleId, StickerError> {
        let style: StyleId = text.parse()?;
        self.select_style(style);
        Ok(style)
    }

    /// Consumes a pending photo request.
    ///
    /// Returns the style to render with (falling back to `default_style` if
    /// none was recorded) and returns the session to idle. Returns `None`
    /// when no photo was expected.
    pub fn take_request(&mut self, default_style: StyleId) -> Option<StyleId> {
        if !self.is_awaiting_photo() {
            return None;
        }
        let style = self.selected_style.take().unwrap_or(default_style);
        self.state = SessionState::Idle;
        Some(style)
    }

    /// Forgets the selected style and any pending request.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Style keyboard rows, two labels per row.
pub fn style_menu() -> Vec<Vec<&'static str>> {
    StyleId::ALL
        .chunks(2)
        .map(|row| row.iter().map(|style| style.label()).collect())
        .collect()
}

/// Usage instructions listing every style.
pub fn help_text() -> String {
    let mut text = String::from(
        "How to use:\n\
         1. Pick a style from the menu\n\
         2. Send a photo\n\
         3. Get your sticker!\n\
         \n\
         Styles:\n",
    );
    for style in StyleId::ALL {
        text.push_str(&format!("{} - {}\n", style.label(), style.description()));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_without_style_is_ignored() {
        let mut session = Session::new();
        assert_eq!(session.take_request(StyleId::Cartoon), None);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn selecting_then_taking_yields_one_request() {
        let mut session = Session::new();
        session.select_style(StyleId::Vintage);
        assert!(session.is_awaiting_photo());

        assert_eq!(session.take_request(StyleId::Cartoon), Some(StyleId::Vintage));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.take_request(StyleId::Cartoon), None);
    }

    #[test]
    fn labels_select_styles() {
        let mut session = Session::new();
        let style = session.select_style_label(StyleId::Outline.label()).unwrap();
        assert_eq!(style, StyleId::Outline);
        assert_eq!(session.selected_style(), Some(StyleId::Outline));
    }

    #[test]
    fn unknown_label_leaves_session_untouched() {
        let mut session = Session::new();
        session.select_style(StyleId::Geometric);
        let err = session.select_style_label("🦄 Unicorn").unwrap_err();
        assert!(matches!(err, StickerError::UnsupportedStyle(_)));
        assert_eq!(session.selected_style(), Some(StyleId::Geometric));
        assert!(session.is_awaiting_photo());
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = Session::new();
        session.select_style(StyleId::Simple);
        session.reset();
        assert_eq!(session, Session::default());
    }

    #[test]
    fn menu_has_two_labels_per_row() {
        let menu = style_menu();
        assert_eq!(menu.len(), 4);
        assert!(menu.iter().all(|row| row.len() == 2));
        assert_eq!(menu[0], vec!["🎨 Cartoon", "👾 Pixel art"]);
    }

    #[test]
    fn help_lists_every_style() {
        let help = help_text();
        for style in StyleId::ALL {
            assert!(help.contains(style.label()));
            assert!(help.contains(style.description()));
        }
    }
}
