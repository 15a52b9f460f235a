//! Simulation core for a terminal alien-invasion game.
//!
//! Everything here is free of terminal I/O: `entities` holds the data
//! model, `compute` the fixed-tick simulation, `scoreboard` the display
//! strings derived from the counters.  Input and rendering live with
//! the binary.

pub mod compute;
pub mod entities;
pub mod scoreboard;
