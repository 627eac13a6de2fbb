//! Command handlers organized by category.
//!
//! | Module | Commands | Engine API |
//! |--------|----------|------------|
//! | `player` | 4 | `PlayerTable` reducers |
//! | `query` | 3 | `PlayerTable` snapshot reads |

pub mod player;
pub mod query;
