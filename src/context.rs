//! Cursor state and the backtracking context-frame stack.
//!
//! Every grammar production opens a frame with [`Context::start`], then either
//! commits its consumption with [`Context::accept`] or restores the cursor
//! exactly with [`Context::fallback`]. A frame may carry a terminator pattern;
//! while the frame is on the stack, content productions stop wherever that
//! pattern (or an inherited enclosing one) matches at the cursor.

use crate::terminator::{self, Terminator};

/// A saved cursor snapshot plus the terminator in effect for one production.
#[derive(Debug)]
struct Frame {
    /// Cursor position at the time the frame was opened.
    position: usize,
    /// Line number at the time the frame was opened.
    line: u32,
    /// Column at the time the frame was opened.
    column: u32,
    /// The pattern that stops content productions inside this frame.
    terminator: Option<Terminator>,
    /// Whether terminators of enclosing frames remain in effect.
    inherits: bool,
}

/// The scanner: input, cursor, line/column counters, and the frame stack.
#[derive(Debug)]
pub(crate) struct Context<'a> {
    source: &'a str,
    position: usize,
    line: u32,
    column: u32,
    frames: Vec<Frame>,
}

impl<'a> Context<'a> {
    /// Creates a fresh cursor over `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 0,
            column: 0,
            frames: Vec::new(),
        }
    }

    /// The full input.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The current cursor position, in bytes.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The current line number, counted from zero.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The current column, in characters from the start of the line.
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Whether the cursor has reached the end of the input.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// The input from the cursor onwards.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.source[self.position..]
    }

    /// Whether every frame has been closed and the input fully consumed.
    pub fn finished(&self) -> bool {
        self.frames.is_empty() && self.at_end()
    }

    /// Opens a frame, optionally installing a terminator for its duration.
    /// When `inherits` is true, terminators of enclosing frames remain in
    /// effect alongside the new one.
    pub fn start(&mut self, terminator: Option<&str>, inherits: bool) {
        self.frames.push(Frame {
            position: self.position,
            line: self.line,
            column: self.column,
            terminator: terminator.map(terminator::get),
            inherits,
        });
    }

    /// Replaces the terminator of the innermost frame.
    pub fn set_terminator(&mut self, pattern: &str) {
        let frame = self.frames.last_mut().expect("no open frame");
        frame.terminator = Some(terminator::get(pattern));
    }

    /// Closes the innermost frame, committing everything consumed since it
    /// was opened.
    pub fn accept(&mut self) {
        self.frames.pop().expect("no open frame");
    }

    /// Closes the innermost frame and restores the cursor to the state saved
    /// when it was opened.
    pub fn fallback(&mut self) {
        let frame = self.frames.pop().expect("no open frame");
        log::trace!(
            "fallback from {} to {} (line {})",
            self.position,
            frame.position,
            frame.line,
        );
        self.position = frame.position;
        self.line = frame.line;
        self.column = frame.column;
    }

    /// Closes the innermost frame with a fallback and signals failure of the
    /// production.
    #[inline]
    pub fn failed<T>(&mut self) -> Option<T> {
        self.fallback();
        None
    }

    /// Matches `pattern` exactly at the cursor. On a match the cursor
    /// advances past it and the matched text is returned; otherwise the
    /// cursor is left untouched.
    pub fn consume_token(&mut self, pattern: &str) -> Option<&'a str> {
        let len = terminator::get(pattern).match_len(self.rest())?;
        Some(self.consume_len(len))
    }

    /// Matches `pattern` exactly at the cursor without advancing.
    pub fn look_ahead(&self, pattern: &str) -> Option<&'a str> {
        let len = terminator::get(pattern).match_len(self.rest())?;
        Some(&self.rest()[..len])
    }

    /// Advances the cursor by `len` bytes and returns the text crossed.
    pub fn consume_len(&mut self, len: usize) -> &'a str {
        let consumed = &self.rest()[..len];
        self.move_position_to(self.position + len);
        consumed
    }

    /// Returns true if the input must stop producing content here: the cursor
    /// is at the end of the input, or a terminator of an active frame matches
    /// at the cursor. When `replacement` is given it stands in for the
    /// innermost frame's own terminator.
    pub fn needs_terminate(&self, replacement: Option<&str>) -> bool {
        if self.at_end() {
            return true;
        }
        let rest = self.rest();
        let mut replacement = replacement.map(terminator::get);
        for frame in self.frames.iter().rev() {
            let terminator = replacement.take().or_else(|| frame.terminator.clone());
            if let Some(terminator) = terminator {
                if terminator.is_match_at_start(rest) {
                    return true;
                }
            }
            if !frame.inherits {
                break;
            }
        }
        false
    }

    /// Returns the earliest position at or after `position + min_offset`
    /// where an active terminator matches, or the end of the input.
    pub fn find_terminator(&self, min_offset: usize) -> usize {
        let start = self.char_boundary_after(min_offset);
        let rest = &self.source[start..];
        let mut earliest = self.source.len();
        for frame in self.frames.iter().rev() {
            if let Some(terminator) = &frame.terminator {
                if let Some(offset) = terminator.find(rest) {
                    earliest = earliest.min(start + offset);
                }
            }
            if !frame.inherits {
                break;
            }
        }
        earliest
    }

    /// The first character boundary at or after `position + offset`.
    pub fn char_boundary_after(&self, offset: usize) -> usize {
        let mut index = (self.position + offset).min(self.source.len());
        while !self.source.is_char_boundary(index) {
            index += 1;
        }
        index
    }

    /// Advances the cursor to `new`, keeping the line and column counters in
    /// step with the newlines crossed.
    fn move_position_to(&mut self, new: usize) {
        debug_assert!(new >= self.position && new <= self.source.len());
        let crossed = &self.source[self.position..new];
        match crossed.rfind('\n') {
            Some(last) => {
                self.line += u32::try_from(crossed.matches('\n').count()).unwrap();
                self.column = u32::try_from(crossed[last + 1..].chars().count()).unwrap();
            }
            None => {
                self.column += u32::try_from(crossed.chars().count()).unwrap();
            }
        }
        self.position = new;
    }
}
