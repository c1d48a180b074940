//! Session state and commands.
//!
//! A [`Session`] is a plain value. [`Session::apply`] maps a command to the
//! next session plus an [`Effect`] for the caller to carry out; it never
//! touches the renderer or the file system.
//!
//! | Command | State change | Effect |
//! |---------|--------------|--------|
//! | `Reseed` | new run seed | rerender (none if unchanged) |
//! | `ToggleTraces` | flip traces | rerender |
//! | `NextSheet` / `PreviousSheet` | index ± 1, wrapping | rerender |
//! | `ExportSheet` | none | export sheet |
//! | `TogglePrintMode` | flip print mode | rerender, or warning |
//! | `ExportPlates` | none | export plates, or warning |

use std::ops::Range;

/// Default run seed for a fresh session.
pub const DEFAULT_RUN_SEED: u32 = 42;

/// Everything that affects what a sheet render produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub run_seed: u32,
    pub sheet_index: usize,
    pub show_traces: bool,
    pub print_mode: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            run_seed: DEFAULT_RUN_SEED,
            sheet_index: 0,
            show_traces: true,
            print_mode: false,
        }
    }
}

/// User-facing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Reseed { seed: u32 },
    ToggleTraces,
    NextSheet,
    PreviousSheet,
    ExportSheet,
    TogglePrintMode,
    ExportPlates,
}

/// Work the caller performs after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Rerender,
    ExportSheet,
    ExportPlates,
    Warning(String),
}

/// Result of applying a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub session: Session,
    pub effect: Effect,
}

impl Session {
    /// Apply `command` given the current sheet total and whether the plate
    /// subsystem is available.
    pub fn apply(
        &self,
        command: Command,
        total_sheets: usize,
        plates_available: bool,
    ) -> Transition {
        let total = total_sheets.max(1);
        let mut next = *self;
        let effect = match command {
            Command::Reseed { seed } if seed == self.run_seed => Effect::None,
            Command::Reseed { seed } => {
                next.run_seed = seed;
                Effect::Rerender
            }
            Command::ToggleTraces => {
                next.show_traces = !self.show_traces;
                Effect::Rerender
            }
            Command::NextSheet => {
                next.sheet_index = (self.sheet_index + 1) % total;
                Effect::Rerender
            }
            Command::PreviousSheet => {
                next.sheet_index = (self.sheet_index % total + total - 1) % total;
                Effect::Rerender
            }
            Command::ExportSheet => Effect::ExportSheet,
            Command::TogglePrintMode => {
                if plates_available {
                    next.print_mode = !self.print_mode;
                    Effect::Rerender
                } else {
                    Effect::Warning("print plates are unavailable".into())
                }
            }
            Command::ExportPlates => {
                if !plates_available {
                    Effect::Warning("print plates are unavailable".into())
                } else if !self.print_mode {
                    Effect::Warning("switch to print mode before exporting plates".into())
                } else {
                    Effect::ExportPlates
                }
            }
        };
        if let Effect::Warning(ref msg) = effect {
            log::warn!("{:?} ignored: {}", command, msg);
        }
        Transition {
            session: next,
            effect,
        }
    }
}

/// Number of sheets for `records` records at `page_size` per sheet; at
/// least 1.
pub fn sheet_count(records: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    records.div_ceil(page_size).max(1)
}

/// Record indices shown on sheet `sheet`.
pub fn sheet_range(sheet: usize, page_size: usize, records: usize) -> Range<usize> {
    let start = sheet.saturating_mul(page_size).min(records);
    let end = start.saturating_add(page_size).min(records);
    start..end
}
