//! # Core War
//!
//! A simulator for the game of Core War: two or more compiled Redcode
//! programs ("champions") share a circular memory core and battle, each
//! executing one instruction per turn, until a single survivor remains.
//!
//! The [`lang`] module compiles Redcode warrior source into a champion.
//! The [`mars`] module is the Memory Array Redcode Simulator itself:
//! the core, the instruction executor, and the battle scheduler.
//!
//! ```
//! use corewar::lang;
//! use corewar::mars::{CoreRandom, MarsVm};
//!
//! let imp = lang::parse("MOV.I $0, $1").unwrap();
//! let mut vm = MarsVm::new(8000, Box::new(CoreRandom::new()));
//! vm.load_champion(imp).unwrap();
//! vm.step();
//! ```

pub mod lang;
pub mod mars;
