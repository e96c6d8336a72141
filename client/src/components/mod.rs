//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome and shared form pieces while reading the
//! session from Leptos context.

pub mod alert;
pub mod form_field;
pub mod layout;
pub mod protected;
