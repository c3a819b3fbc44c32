use ratatui::Frame;
use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui_image::protocol::StatefulProtocol;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::clipboard::ClipboardBackend;
use crate::image::{BoundingBox, ImageProtocol, make_thumbnail};
use crate::models::{SavedImage, Session};
use crate::paste::{PasteError, image_from_payload};
use crate::storage::GeneralConfig;
use crate::timers::TimerQueue;
use crate::ui::{self, RowSlot, Theme};

/// Label text shown briefly after a path has been copied
pub const COPIED_LABEL: &str = "Copied!";

/// Lines scrolled per mouse wheel notch
const WHEEL_STEP: usize = 3;

/// Status line color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// Latest status message shown in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub message: String,
}

/// Work deferred to a later turn of the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
enum Deferred {
    /// Show the newest row once it has been laid out
    ScrollToNewest,
    /// Put the path back on a label after "Copied!"
    RestoreLabel { row: usize, text: String },
}

/// One entry of the preview list. Owns its thumbnail pixels.
pub struct PreviewRow {
    pub image: SavedImage,
    /// Text currently on the path label
    pub label: String,
    thumbnail: StatefulProtocol,
    /// Thumbnail size in pixels
    thumb_pixels: (u32, u32),
    /// Thumbnail size in terminal cells (columns, rows)
    thumb_cells: (u16, u16),
}

impl PreviewRow {
    pub fn thumbnail_mut(&mut self) -> &mut StatefulProtocol {
        &mut self.thumbnail
    }

    pub fn thumb_pixels(&self) -> (u32, u32) {
        self.thumb_pixels
    }

    pub fn thumb_cells(&self) -> (u16, u16) {
        self.thumb_cells
    }

    fn height(&self) -> usize {
        ui::row_height(self.thumb_cells.1)
    }
}

/// Tunables taken from the `[general]` config section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppOptions {
    pub bounds: BoundingBox,
    pub copied_feedback: Duration,
    pub scroll_delay: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        AppOptions::from(&GeneralConfig::default())
    }
}

impl From<&GeneralConfig> for AppOptions {
    fn from(general: &GeneralConfig) -> Self {
        AppOptions {
            bounds: BoundingBox::new(general.thumbnail_max_width, general.thumbnail_max_height),
            copied_feedback: Duration::from_millis(general.copied_feedback_ms),
            scroll_delay: Duration::from_millis(general.scroll_delay_ms),
        }
    }
}

/// Main application state
pub struct App {
    /// Saved images and their directory
    session: Session,

    /// Preview rows, same order as `session.saved()`
    rows: Vec<PreviewRow>,

    /// Clipboard backend for reading pastes and copying paths
    clipboard: Box<dyn ClipboardBackend>,

    /// Terminal graphics protocol used for thumbnails
    images: ImageProtocol,

    theme: Theme,
    options: AppOptions,

    /// Latest status message (None until the first paste)
    status: Option<Status>,

    /// One-shot callbacks (scroll to newest, label restore)
    timers: TimerQueue<Deferred>,

    /// Scroll offset for the preview list in lines
    scroll_offset: usize,

    /// List area height in terminal rows (updated each frame)
    list_height: u16,

    /// Where each visible row landed in the last frame, for hit-testing
    slots: Vec<RowSlot>,

    /// Last known pointer position
    last_mouse: Option<Position>,

    /// Row whose path label is under the pointer
    hovered: Option<usize>,

    /// Saved files have been deleted
    closed: bool,

    /// Flag to request application exit
    pub should_quit: bool,
}

impl App {
    pub fn new(
        session: Session,
        clipboard: Box<dyn ClipboardBackend>,
        images: ImageProtocol,
        theme: Theme,
        options: AppOptions,
    ) -> Self {
        log::debug!("Using {} clipboard backend", clipboard.name());
        App {
            session,
            rows: Vec::new(),
            clipboard,
            images,
            theme,
            options,
            status: None,
            timers: TimerQueue::new(),
            scroll_offset: 0,
            list_height: 0,
            slots: Vec::new(),
            last_mouse: None,
            hovered: None,
            closed: false,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn rows(&self) -> &[PreviewRow] {
        &self.rows
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// How long the event loop may wait before a deferred task is due
    pub fn timer_timeout(&self, now: Instant) -> Option<Duration> {
        self.timers.timeout(now)
    }

    /// Run every deferred task due at `now`
    pub fn run_due_timers(&mut self, now: Instant) {
        for task in self.timers.take_due(now) {
            match task {
                Deferred::ScrollToNewest => self.scroll_to_bottom(),
                Deferred::RestoreLabel { row, text } => {
                    if let Some(row) = self.rows.get_mut(row) {
                        row.label = text;
                    }
                }
            }
        }
    }

    /// Show a status message and log it with its severity
    fn report(&mut self, level: StatusLevel, message: String) {
        match level {
            StatusLevel::Info => log::info!("{}", message),
            StatusLevel::Error => log::error!("{}", message),
        }
        self.status = Some(Status { level, message });
    }

    /// Handle one terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            // Bracketed paste (e.g. Ctrl+Shift+V): the terminal's text is ignored,
            // the image comes from the system clipboard
            Event::Paste(_) => self.paste(),
            Event::FocusLost => {
                self.last_mouse = None;
                self.hovered = None;
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let paste_modifier = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);

        match key.code {
            KeyCode::Char('v') | KeyCode::Char('V') if paste_modifier => self.paste(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.request_close()
            }
            KeyCode::Char('q') | KeyCode::Esc => self.request_close(),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1),
            KeyCode::PageDown => self.scroll_by(self.page_size()),
            KeyCode::PageUp => self.scroll_by(-self.page_size()),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_offset = 0,
            KeyCode::End | KeyCode::Char('G') => self.scroll_to_bottom(),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);
        self.last_mouse = Some(position);

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.hovered = self.hit_label(position);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.hovered = self.hit_label(position);
                if let Some(row) = self.hovered {
                    self.copy_path(row);
                }
            }
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_STEP as isize),
            MouseEventKind::ScrollUp => self.scroll_by(-(WHEEL_STEP as isize)),
            _ => {}
        }
    }

    /// Grab the clipboard image, save it and add a preview row
    pub fn paste(&mut self) {
        match self.try_paste() {
            Ok(saved) => {
                self.report(StatusLevel::Info, format!("Saved (image #{})", saved.number));
                self.timers.schedule(
                    Instant::now(),
                    self.options.scroll_delay,
                    Deferred::ScrollToNewest,
                );
            }
            Err(e) if e.is_expected() => self.report(StatusLevel::Error, e.to_string()),
            Err(e) => self.report(StatusLevel::Error, format!("Error: {}", e)),
        }
    }

    fn try_paste(&mut self) -> Result<SavedImage, PasteError> {
        let payload = self.clipboard.read()?;
        let image = image_from_payload(payload)?;
        let saved = self.session.save(&image)?;

        let thumbnail = make_thumbnail(&image, self.options.bounds);
        let thumb_pixels = (thumbnail.width(), thumbnail.height());
        let thumb_cells = self.images.cells_for(thumb_pixels.0, thumb_pixels.1);
        log::debug!(
            "Thumbnail for image {}: {}x{} px, {}x{} cells",
            saved.number,
            thumb_pixels.0,
            thumb_pixels.1,
            thumb_cells.0,
            thumb_cells.1
        );

        self.rows.push(PreviewRow {
            image: saved.clone(),
            label: saved.path_text(),
            thumbnail: self.images.new_thumbnail(thumbnail),
            thumb_pixels,
            thumb_cells,
        });

        Ok(saved)
    }

    /// Copy a row's path to the clipboard and flash "Copied!" on its label
    pub fn copy_path(&mut self, row: usize) {
        let Some(path) = self.rows.get(row).map(|r| r.image.path_text()) else {
            return;
        };

        if let Err(e) = self.clipboard.write_text(&path) {
            self.report(StatusLevel::Error, format!("Error: {}", e));
            return;
        }
        log::debug!("Copied {} to clipboard", path);

        self.rows[row].label = COPIED_LABEL.to_string();
        // The restore carries the path itself, never whatever the label shows now
        self.timers.schedule(
            Instant::now(),
            self.options.copied_feedback,
            Deferred::RestoreLabel { row, text: path },
        );
    }

    /// Height of all rows in lines
    pub fn content_height(&self) -> usize {
        self.rows.iter().map(PreviewRow::height).sum()
    }

    fn max_scroll(&self) -> usize {
        self.content_height()
            .saturating_sub(usize::from(self.list_height))
    }

    fn page_size(&self) -> isize {
        isize::try_from(self.list_height.max(1)).unwrap_or(1)
    }

    /// Scroll by `lines`; does nothing when everything already fits
    pub fn scroll_by(&mut self, lines: isize) {
        let target = self.scroll_offset.saturating_add_signed(lines);
        self.scroll_offset = target.min(self.max_scroll());
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
    }

    /// Screen area of a row's path label in the last frame
    pub fn label_area(&self, row: usize) -> Option<Rect> {
        self.slots
            .iter()
            .find(|slot| slot.index == row)
            .and_then(|slot| slot.label)
    }

    fn hit_label(&self, position: Position) -> Option<usize> {
        self.slots
            .iter()
            .find(|slot| slot.label.is_some_and(|area| area.contains(position)))
            .map(|slot| slot.index)
    }

    /// Delete every saved file. Safe to call more than once.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let removed = self.session.cleanup();
        log::debug!(
            "Removed {} file(s) from {:?}",
            removed,
            self.session.dir()
        );
    }

    /// Window close: clean up and leave the event loop
    pub fn request_close(&mut self) {
        self.close();
        self.should_quit = true;
    }

    /// Close if a termination signal has raised `requested`
    pub fn check_shutdown(&mut self, requested: &AtomicBool) {
        if self.should_quit || !requested.load(Ordering::Relaxed) {
            return;
        }
        log::info!("Terminal closed, removing saved images");
        self.request_close();
    }

    /// Render the TUI
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(
            Block::default().style(
                Style::default()
                    .bg(self.theme.default_bg)
                    .fg(self.theme.default_fg),
            ),
            area,
        );

        let layout = ui::create_main_layout(area);
        ui::render_header(frame, layout.header, self.status.as_ref(), &self.theme);

        // Update list height first so the offset is clamped against this frame
        self.list_height = layout.list.height;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());

        let sizes: Vec<(u16, u16)> = self.rows.iter().map(PreviewRow::thumb_cells).collect();
        self.slots = ui::layout_rows(layout.list, &sizes, self.scroll_offset);

        // Content may have moved under a still pointer
        self.hovered = self.last_mouse.and_then(|pos| self.hit_label(pos));

        if self.rows.is_empty() {
            ui::render_placeholder(frame, layout.list, &self.theme);
        } else {
            ui::render_preview_list(frame, &self.slots, &mut self.rows, self.hovered, &self.theme);
            ui::render_scrollbar(
                frame,
                layout.scrollbar,
                self.content_height(),
                self.scroll_offset,
                &self.theme,
            );
        }

        ui::render_keyboard_hints(frame, layout.hints, &self.theme);

        if let Some(row) = self.hovered {
            if let Some(anchor) = self.label_area(row) {
                let text = self.rows[row].image.path_text();
                ui::render_tooltip(frame, anchor, &text, &self.theme);
            }
        }
    }
}
