//! Assigns judges to games so nobody judges their own team and the work is spread evenly.

pub mod config;
pub mod display;
pub mod example;
pub mod export;
pub mod parser;
pub mod schedule;
pub mod web;

pub use schedule::{schedule_judges, Assignment, AssignmentError, Game, Judge, Schedule, WorkloadEntry};
