//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Pure helpers sit next to each page so they can be tested
//! without a browser.

pub mod create;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod not_found;
pub mod signup;
pub mod view_info;
