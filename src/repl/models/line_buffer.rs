//! # Line Buffer
//!
//! Editable input line: the text as characters plus a cursor index in
//! `0..=len`. Every operation reports whether the line must be redrawn or
//! the terminal bell rung; boundary no-ops always ring the bell.

use crate::repl::events::KeyEvent;
use crate::repl::text::{next_word_end, previous_word_start};

/// Result of an edit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Text or cursor changed
    Redraw,
    /// Nothing changed; ring the bell
    Beep,
}

impl EditOutcome {
    fn from_change(changed: bool) -> Self {
        if changed {
            Self::Redraw
        } else {
            Self::Beep
        }
    }
}

/// Single-line text buffer with a cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: Vec<char>,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding `text` with the cursor at its end
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn chars(&self) -> &[char] {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole line and move the cursor to its end
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().collect();
        self.cursor = self.text.len();
    }

    pub fn insert(&mut self, ch: char) -> EditOutcome {
        self.text.insert(self.cursor, ch);
        self.cursor += 1;
        EditOutcome::Redraw
    }

    pub fn backspace(&mut self) -> EditOutcome {
        if self.cursor == 0 {
            return EditOutcome::Beep;
        }
        self.cursor -= 1;
        self.text.remove(self.cursor);
        EditOutcome::Redraw
    }

    pub fn delete_forward(&mut self) -> EditOutcome {
        if self.cursor >= self.text.len() {
            return EditOutcome::Beep;
        }
        self.text.remove(self.cursor);
        EditOutcome::Redraw
    }

    pub fn move_left(&mut self) -> EditOutcome {
        self.move_to(self.cursor.saturating_sub(1))
    }

    pub fn move_right(&mut self) -> EditOutcome {
        self.move_to((self.cursor + 1).min(self.text.len()))
    }

    pub fn move_home(&mut self) -> EditOutcome {
        self.move_to(0)
    }

    pub fn move_end(&mut self) -> EditOutcome {
        self.move_to(self.text.len())
    }

    /// Move to the start of the previous word
    pub fn word_left(&mut self) -> EditOutcome {
        self.move_to(previous_word_start(&self.text, self.cursor))
    }

    /// Move to the end of the next word
    pub fn word_right(&mut self) -> EditOutcome {
        self.move_to(next_word_end(&self.text, self.cursor))
    }

    fn move_to(&mut self, target: usize) -> EditOutcome {
        let changed = target != self.cursor;
        self.cursor = target;
        EditOutcome::from_change(changed)
    }

    /// Apply an editing key
    ///
    /// Returns `None` for keys the buffer does not handle (Enter, Tab,
    /// Interrupt), which belong to the input loop.
    pub fn apply(&mut self, key: KeyEvent) -> Option<EditOutcome> {
        let outcome = match key {
            KeyEvent::Char(ch) => self.insert(ch),
            KeyEvent::Backspace => self.backspace(),
            KeyEvent::Delete => self.delete_forward(),
            KeyEvent::Left => self.move_left(),
            KeyEvent::Right => self.move_right(),
            KeyEvent::Home => self.move_home(),
            KeyEvent::End => self.move_end(),
            KeyEvent::CtrlLeft => self.word_left(),
            KeyEvent::CtrlRight => self.word_right(),
            KeyEvent::Enter | KeyEvent::Tab | KeyEvent::Interrupt => return None,
        };
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_should_splice_at_cursor() {
        let mut buffer = LineBuffer::from_text("hp");
        buffer.move_left();

        assert_eq!(buffer.insert('o'), EditOutcome::Redraw);
        assert_eq!(buffer.text(), "hop");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn backspace_should_remove_char_before_cursor() {
        let mut buffer = LineBuffer::from_text("malt");
        buffer.move_left();

        assert_eq!(buffer.backspace(), EditOutcome::Redraw);
        assert_eq!(buffer.text(), "mat");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn backspace_should_beep_at_start() {
        let mut buffer = LineBuffer::from_text("ab");
        buffer.move_home();

        assert_eq!(buffer.backspace(), EditOutcome::Beep);
        assert_eq!(buffer.text(), "ab");
    }

    #[test]
    fn delete_forward_should_remove_char_at_cursor() {
        let mut buffer = LineBuffer::from_text("abc");
        buffer.move_home();

        assert_eq!(buffer.delete_forward(), EditOutcome::Redraw);
        assert_eq!(buffer.text(), "bc");
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn delete_forward_should_beep_at_end() {
        let mut buffer = LineBuffer::from_text("abc");

        assert_eq!(buffer.delete_forward(), EditOutcome::Beep);
        assert_eq!(buffer.text(), "abc");
    }

    #[test]
    fn moves_should_beep_at_boundaries() {
        let mut buffer = LineBuffer::new();

        assert_eq!(buffer.move_left(), EditOutcome::Beep);
        assert_eq!(buffer.move_right(), EditOutcome::Beep);
        assert_eq!(buffer.move_home(), EditOutcome::Beep);
        assert_eq!(buffer.move_end(), EditOutcome::Beep);

        buffer.set_text("x");
        assert_eq!(buffer.move_home(), EditOutcome::Redraw);
        assert_eq!(buffer.move_end(), EditOutcome::Redraw);
    }

    #[test]
    fn word_moves_should_beep_repeatedly_at_boundaries() {
        let mut buffer = LineBuffer::from_text("hop info");

        for _ in 0..3 {
            assert_eq!(buffer.word_right(), EditOutcome::Beep);
            assert_eq!(buffer.cursor(), 8);
        }

        buffer.move_home();
        for _ in 0..3 {
            assert_eq!(buffer.word_left(), EditOutcome::Beep);
            assert_eq!(buffer.cursor(), 0);
        }
    }

    #[test]
    fn word_moves_should_jump_over_words() {
        let mut buffer = LineBuffer::from_text("list --name Cascade");

        assert_eq!(buffer.word_left(), EditOutcome::Redraw);
        assert_eq!(buffer.cursor(), 12);
        buffer.word_left();
        assert_eq!(buffer.cursor(), 7);
        buffer.word_left();
        assert_eq!(buffer.cursor(), 0);

        buffer.word_right();
        assert_eq!(buffer.cursor(), 4);
        buffer.word_right();
        assert_eq!(buffer.cursor(), 11);
    }

    #[test]
    fn apply_should_leave_loop_keys_to_the_caller() {
        let mut buffer = LineBuffer::new();

        assert_eq!(buffer.apply(KeyEvent::Enter), None);
        assert_eq!(buffer.apply(KeyEvent::Tab), None);
        assert_eq!(buffer.apply(KeyEvent::Interrupt), None);
        assert_eq!(buffer.apply(KeyEvent::Char('é')), Some(EditOutcome::Redraw));
        assert_eq!(buffer.text(), "é");
    }

    #[test]
    fn cursor_should_stay_in_bounds_for_any_key_sequence() {
        let keys = [
            KeyEvent::Char('a'),
            KeyEvent::Char(' '),
            KeyEvent::Backspace,
            KeyEvent::Delete,
            KeyEvent::Left,
            KeyEvent::Right,
            KeyEvent::Home,
            KeyEvent::End,
            KeyEvent::CtrlLeft,
            KeyEvent::CtrlRight,
        ];
        let mut buffer = LineBuffer::new();

        // Deterministic walk over every key with varying strides
        for step in 0..500usize {
            let key = keys[(step * 7 + step / 3) % keys.len()];
            buffer.apply(key);
            assert!(buffer.cursor() <= buffer.len(), "step {step}: {buffer:?}");
        }
    }
}
