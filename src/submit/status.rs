//! Status indicators
//!
//! The four banners a submission can end in. Exactly one of them is
//! visible once a submission has resolved.

use std::fmt;
use std::sync::{Arc, Mutex};

/// One outcome banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Indicator {
    /// The update was stored
    Success,
    /// Anything not covered by a dedicated banner
    Error,
    /// The server rejected the text (HTTP 400)
    MalformedConfig,
    /// The caller may not edit this guild (HTTP 403)
    NotEditor,
}

impl Indicator {
    /// Every indicator, in page order
    pub const ALL: [Indicator; 4] = [
        Indicator::Success,
        Indicator::Error,
        Indicator::MalformedConfig,
        Indicator::NotEditor,
    ];

    /// Element id of the banner on the config page
    pub fn element_id(self) -> &'static str {
        match self {
            Indicator::Success => "success",
            Indicator::Error => "error",
            Indicator::MalformedConfig => "malformed-config",
            Indicator::NotEditor => "not-editor",
        }
    }

    /// Banner text
    pub fn message(self) -> &'static str {
        match self {
            Indicator::Success => "Configuration successfully updated.",
            Indicator::Error => "Failed to update the configuration.",
            Indicator::MalformedConfig => "The configuration is malformed.",
            Indicator::NotEditor => "You are not an editor of this guild.",
        }
    }

    fn index(self) -> usize {
        match self {
            Indicator::Success => 0,
            Indicator::Error => 1,
            Indicator::MalformedConfig => 2,
            Indicator::NotEditor => 3,
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Sink for indicator visibility changes
pub trait StatusDisplay: Send + Sync {
    /// Show or hide one indicator
    fn set_visible(&self, indicator: Indicator, visible: bool);

    /// Hide every indicator
    fn hide_all(&self) {
        for indicator in Indicator::ALL {
            self.set_visible(indicator, false);
        }
    }

    /// Reveal one indicator
    fn show(&self, indicator: Indicator) {
        self.set_visible(indicator, true);
    }
}

/// In-memory visibility flags. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct IndicatorBoard {
    flags: Arc<Mutex<[bool; 4]>>,
}

impl IndicatorBoard {
    /// All indicators hidden
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `indicator` is currently shown
    pub fn is_visible(&self, indicator: Indicator) -> bool {
        let flags = self.flags.lock().unwrap_or_else(|e| e.into_inner());
        flags[indicator.index()]
    }

    /// Currently shown indicators, in page order
    pub fn visible(&self) -> Vec<Indicator> {
        let flags = self.flags.lock().unwrap_or_else(|e| e.into_inner());
        Indicator::ALL
            .into_iter()
            .filter(|indicator| flags[indicator.index()])
            .collect()
    }
}

impl StatusDisplay for IndicatorBoard {
    fn set_visible(&self, indicator: Indicator, visible: bool) {
        let mut flags = self.flags.lock().unwrap_or_else(|e| e.into_inner());
        flags[indicator.index()] = visible;
    }
}

/// Terminal banners. Hides are no-ops; a shown banner is one printed line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDisplay;

impl StatusDisplay for ConsoleDisplay {
    fn set_visible(&self, indicator: Indicator, visible: bool) {
        if !visible {
            return;
        }
        match indicator {
            Indicator::Success => println!("{}", indicator.message()),
            _ => eprintln!("{}: {}", indicator.element_id(), indicator.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_ids() {
        let ids: Vec<_> = Indicator::ALL.iter().map(|i| i.element_id()).collect();
        assert_eq!(ids, ["success", "error", "malformed-config", "not-editor"]);
    }

    #[test]
    fn test_board_starts_hidden() {
        let board = IndicatorBoard::new();
        assert!(board.visible().is_empty());
    }

    #[test]
    fn test_show_then_hide_all() {
        let board = IndicatorBoard::new();
        board.show(Indicator::Error);
        board.show(Indicator::NotEditor);
        assert_eq!(board.visible(), vec![Indicator::Error, Indicator::NotEditor]);

        board.hide_all();
        assert!(board.visible().is_empty());

        // Idempotent
        board.hide_all();
        assert!(board.visible().is_empty());
    }

    #[test]
    fn test_board_clones_share_state() {
        let board = IndicatorBoard::new();
        let view = board.clone();
        board.show(Indicator::Success);
        assert!(view.is_visible(Indicator::Success));
        assert!(!view.is_visible(Indicator::Error));
    }
}
