/// Keyboard navigation
///
/// The pure cursor state machine and the per-type action dispatch it feeds.

pub mod cursor;
pub mod dispatch;

pub use cursor::{step, Cursor, Effect, NavEvent, Transition};
pub use dispatch::{DispatchTable, NavigationRequest, Navigator};
