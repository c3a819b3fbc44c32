use image::DynamicImage;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;

use super::backend::{ClipboardBackend, ClipboardError, ClipboardPayload};

/// What a [`MemoryBackend`] hands out on the next read
#[derive(Debug, Clone)]
pub enum Staged {
    Empty,
    Image(DynamicImage),
    Files(Vec<PathBuf>),
    Unsupported(String),
    Fail(String),
}

/// Shared view of the fake clipboard so tests can inspect it after the
/// backend has been boxed into the app
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub staged: VecDeque<Staged>,
    pub text: Option<String>,
    pub writes: usize,
}

/// In-memory clipboard for tests
pub struct MemoryBackend {
    state: Rc<RefCell<MemoryClipboard>>,
}

impl MemoryBackend {
    pub fn new() -> (Self, Rc<RefCell<MemoryClipboard>>) {
        let state = Rc::new(RefCell::new(MemoryClipboard::default()));
        (
            MemoryBackend {
                state: Rc::clone(&state),
            },
            state,
        )
    }
}

impl ClipboardBackend for MemoryBackend {
    fn read(&mut self) -> Result<ClipboardPayload, ClipboardError> {
        let staged = self.state.borrow_mut().staged.pop_front();
        match staged.unwrap_or(Staged::Empty) {
            Staged::Empty => Ok(ClipboardPayload::Empty),
            Staged::Image(image) => Ok(ClipboardPayload::Image(image)),
            Staged::Files(files) => Ok(ClipboardPayload::Files(files)),
            Staged::Unsupported(kind) => Ok(ClipboardPayload::Unsupported(kind)),
            Staged::Fail(message) => Err(ClipboardError::Unavailable(message)),
        }
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut state = self.state.borrow_mut();
        state.text = Some(text.to_string());
        state.writes += 1;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
