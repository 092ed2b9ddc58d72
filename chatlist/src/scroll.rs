//! Scroll position and direction of the chat list.

use serde::{Deserialize, Serialize};

/// First visible item and its pixel offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub index: usize,
    pub offset: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    #[default]
    Idle,
}

#[derive(Clone, Debug, Default)]
pub struct ScrollDirectionTracker {
    direction: ScrollDirection,
    previous: ScrollPosition,
}

impl ScrollDirectionTracker {
    /// Offset changes within this many pixels keep the previous direction.
    pub const THRESHOLD: i32 = 25;

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn update(&mut self, current: ScrollPosition) -> ScrollDirection {
        let previous = self.previous;
        self.direction = if current.index > previous.index {
            ScrollDirection::Down
        } else if current.index < previous.index {
            ScrollDirection::Up
        } else if current.offset > previous.offset + Self::THRESHOLD {
            ScrollDirection::Down
        } else if current.offset < previous.offset - Self::THRESHOLD {
            ScrollDirection::Up
        } else if current.offset == previous.offset {
            ScrollDirection::Idle
        } else {
            self.direction
        };
        self.previous = current;
        self.direction
    }
}

/// List state scoped to one mount of the screen. Created from the position
/// saved by the previous mount and handed back on unmount.
#[derive(Clone, Debug, Default)]
pub struct ChatListState {
    position: ScrollPosition,
    tracker: ScrollDirectionTracker,
}

impl ChatListState {
    pub fn mount(saved: Option<ScrollPosition>) -> Self {
        Self {
            position: saved.unwrap_or_default(),
            tracker: ScrollDirectionTracker::default(),
        }
    }

    pub fn position(&self) -> ScrollPosition {
        self.position
    }

    pub fn direction(&self) -> ScrollDirection {
        self.tracker.direction()
    }

    pub fn on_scroll(&mut self, position: ScrollPosition) -> ScrollDirection {
        self.position = position;
        self.tracker.update(position)
    }

    pub fn scroll_to_top(&mut self) {
        self.position = ScrollPosition::default();
    }

    pub fn unmount(self) -> ScrollPosition {
        self.position
    }
}

// Pushes the sticky search bar fully out of view.
const HIDDEN_OFFSET: i32 = -1000;

/// Vertical offset of the sticky search bar above the list.
///
/// An active search pins the bar. Otherwise it scrolls away with the first
/// item, except in one-hand mode where scrolling up brings it back.
pub fn search_bar_offset(
    search_empty: bool,
    one_hand_ui: bool,
    direction: ScrollDirection,
    position: ScrollPosition,
) -> i32 {
    if !search_empty {
        0
    } else if one_hand_ui && direction == ScrollDirection::Up {
        0
    } else if position.index == 0 {
        -position.offset
    } else {
        HIDDEN_OFFSET
    }
}
