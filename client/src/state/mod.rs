//! Shared reactive state provided through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only app-wide state is the admin session. Page-local data (record
//! lists, forms, translations) lives in signals owned by each page.

pub mod session;
