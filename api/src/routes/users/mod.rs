//! User route handlers

pub mod me;
