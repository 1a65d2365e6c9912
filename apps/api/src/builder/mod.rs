// Resume builder core: draft model and reducer, step navigation, sessions.

pub mod actions;
pub mod completion;
pub mod draft;
pub mod handlers;
pub mod models;
pub mod session;
pub mod steps;
