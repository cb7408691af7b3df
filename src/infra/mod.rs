//! Collaborators outside the valuation core.

pub mod cadastral;
