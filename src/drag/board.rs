use egui::Pos2;
use uuid::Uuid;

use super::{DragController, Sticker};
use crate::config::StickerConfig;

#[derive(Debug, Clone)]
struct DragEntry {
    sticker: Sticker,
    controller: DragController,
}

/// All draggable stickers, each paired with its own controller.
///
/// Presses go to the topmost sticker under the pointer only. Moves and
/// releases are broadcast to every controller.
#[derive(Debug, Clone, Default)]
pub struct DragBoard {
    entries: Vec<DragEntry>,
}

impl DragBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(stickers: &[StickerConfig]) -> Self {
        let mut board = Self::new();
        for config in stickers {
            board.add(Sticker::from_config(config));
        }
        board
    }

    /// Adds a sticker on top of the others
    pub fn add(&mut self, sticker: Sticker) -> Uuid {
        let id = sticker.id();
        self.entries.push(DragEntry {
            sticker,
            controller: DragController::new(),
        });
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stickers bottom to top
    pub fn stickers(&self) -> impl Iterator<Item = &Sticker> {
        self.entries.iter().map(|e| &e.sticker)
    }

    pub fn sticker(&self, id: Uuid) -> Option<&Sticker> {
        self.entry(id).map(|e| &e.sticker)
    }

    pub fn controller(&self, id: Uuid) -> Option<&DragController> {
        self.entry(id).map(|e| &e.controller)
    }

    pub fn is_dragging(&self, id: Uuid) -> bool {
        self.entry(id).is_some_and(|e| e.controller.is_dragging())
    }

    pub fn any_dragging(&self) -> bool {
        self.entries.iter().any(|e| e.controller.is_dragging())
    }

    /// Topmost sticker containing `pos`
    pub fn hit_test(&self, pos: Pos2) -> Option<&Sticker> {
        self.entries
            .iter()
            .rev()
            .map(|e| &e.sticker)
            .find(|s| s.contains(pos))
    }

    /// Starts dragging the topmost sticker under `pos`, if any, and returns its id.
    pub fn pointer_down(&mut self, pos: Pos2) -> Option<Uuid> {
        let entry = self
            .entries
            .iter_mut()
            .rev()
            .find(|e| e.sticker.contains(pos))?;
        entry.controller.on_drag_start(pos, &mut entry.sticker);
        log::debug!("Started dragging sticker '{}'", entry.sticker.label());
        Some(entry.sticker.id())
    }

    /// Forwards a move to every controller. Returns true if any sticker moved.
    pub fn pointer_move(&mut self, pos: Pos2) -> bool {
        let mut consumed = false;
        for entry in &mut self.entries {
            consumed |= entry.controller.on_drag_move(pos, &mut entry.sticker);
        }
        consumed
    }

    /// Ends every drag in progress
    pub fn pointer_up(&mut self) {
        for entry in &mut self.entries {
            if entry.controller.is_dragging() {
                log::debug!(
                    "Dropped sticker '{}' at offset {:?}",
                    entry.sticker.label(),
                    entry.sticker.transform().translation
                );
            }
            entry.controller.on_drag_end(&mut entry.sticker);
        }
    }

    fn entry(&self, id: Uuid) -> Option<&DragEntry> {
        self.entries.iter().find(|e| e.sticker.id() == id)
    }
}
