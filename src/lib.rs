//! This crate provides the state of a monthly calendar board.
//!
//! Tasks are short to-do items pinned to a day. They live in a [`TaskStore`](store::TaskStore), can be tagged with
//! predefined [`label`]s, moved around by drag and drop (see [`reorder`]) and searched (see [`search`]).
//!
//! The [`grid`] module projects the tasks onto the cells of a month view, and the [`holiday`] module overlays the
//! public holidays of a country, fetched from a holiday web service by the [`client`] module.
//!
//! A [`Calendar`] ties all of these together, and is what a front-end usually drives.

pub mod traits;

pub mod config;
pub mod label;
mod task;
pub use task::{Task, TaskId};
pub mod store;
pub mod reorder;
pub mod grid;
pub mod holiday;
pub mod search;
pub mod country;
pub mod calendar;
pub use calendar::Calendar;

pub mod client;
pub mod utils;
