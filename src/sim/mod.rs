//! Game simulation module
//!
//! All gameplay logic lives here. Each game is a plain state value plus a
//! `tick` function that consumes one frame's control input:
//! - No rendering or platform dependencies
//! - Seeded RNG only
//! - Stable iteration order (spawn order)

pub mod catcher;
pub mod collision;
pub mod maze;
pub mod rps;
pub mod snake;
pub mod state;

pub use catcher::{CatcherConfig, CatcherInput, CatcherState, Mosquito};
pub use collision::{Rect, overlaps};
pub use maze::{MazeConfig, MazeInput, MazeState};
pub use rps::{RpsConfig, RpsInput, RpsState, RpsStatus};
pub use snake::{SnakeBody, SnakeConfig, SnakeInput, SnakeState};
pub use state::{Actor, GameEvent, PlayArea, RoundOutcome, RoundPhase};
