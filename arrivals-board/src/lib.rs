//! Arrival selection for train tracker feeds.
//!
//! Answers two questions from a snapshot of an Amtraker-style feed:
//! "what is arriving at this station next?" and "where is this train
//! calling from here on?". Feed payloads are normalized into domain
//! records, filtered against a grace window, labelled with a status and
//! sorted by arrival time.

pub mod app;
pub mod board;
pub mod config;
pub mod domain;
pub mod feed;
pub mod selector;
