/// Keyboard navigation over the flattened palette list
///
/// `step` is a pure function: it never touches the recency cache or the
/// host. Side effects are returned as an `Effect` for the caller to run.

use crate::core::command::Command;

/// Column of the "forget" control on recent rows
pub const FORGET_COLUMN: usize = 1;

/// Position in the flattened list. `col` only means something on recent rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Activate,
}

/// Work the caller has to do after a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the command's action, remember it, close the palette
    Run(Command),
    /// Drop the recent entry at `row` from the cache and the list; palette stays open
    Forget { row: usize, command: Command },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub cursor: Cursor,
    pub effect: Option<Effect>,
}

impl Transition {
    fn stay(cursor: Cursor) -> Self {
        Self { cursor, effect: None }
    }
}

fn is_recent(list: &[Command], row: usize) -> bool {
    list.get(row).map(Command::is_recent).unwrap_or(false)
}

/// Advance the cursor for one event. An empty list makes every event a no-op.
pub fn step(cursor: Cursor, list: &[Command], event: NavEvent) -> Transition {
    let len = list.len();
    if len == 0 {
        return Transition::stay(cursor);
    }

    let row = cursor.row;
    match event {
        NavEvent::MoveDown | NavEvent::MoveUp => {
            let next = if event == NavEvent::MoveDown {
                (row + 1) % len
            } else {
                (row + len - 1) % len
            };
            // column survives only when moving between two recent rows
            let col = if is_recent(list, row) && is_recent(list, next) {
                cursor.col
            } else {
                0
            };
            Transition::stay(Cursor::new(next, col))
        }
        NavEvent::MoveRight | NavEvent::MoveLeft => {
            if !is_recent(list, row) {
                return Transition::stay(cursor);
            }
            // two columns, so left and right both toggle
            Transition::stay(Cursor::new(row, (cursor.col + 1) % 2))
        }
        NavEvent::Activate => {
            let Some(command) = list.get(row) else {
                return Transition::stay(cursor);
            };

            if command.is_recent() && cursor.col == FORGET_COLUMN {
                Transition {
                    cursor: Cursor::default(),
                    effect: Some(Effect::Forget {
                        row,
                        command: command.clone(),
                    }),
                }
            } else {
                Transition {
                    cursor,
                    effect: Some(Effect::Run(command.clone())),
                }
            }
        }
    }
}
