//! EV trip planner server.
//!
//! A web application that answers: "I'm driving this route in this car,
//! where can I charge along the way, and how far will I get?"

pub mod cache;
pub mod config;
pub mod directions;
pub mod domain;
pub mod poi;
pub mod trip;
pub mod web;
