//! A generic engine for solving logic puzzles.
//!
//! Puzzles implement [`search::PuzzleState`] and are solved by one of the search drivers
//! ([`search::AStar`], [`search::BreadthFirst`], [`search::DepthFirst`]). Puzzles whose
//! moves assign candidates to slots can use the [`propagate`] module to collapse forced
//! slots between moves.

#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(unused_qualifications)]

#[macro_use]
extern crate log;

pub mod collections;
pub mod error;
pub mod level;
pub mod propagate;
pub mod puzzles;
pub mod report;
pub mod search;
