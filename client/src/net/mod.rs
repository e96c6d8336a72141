//! Browser implementations of the `medinfo` I/O seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` carries API requests over `fetch` via `gloo-net`; `storage`
//! keeps the credential pair in `localStorage`. Both compile to inert stubs
//! on the server so SSR never touches the network or browser storage.

pub mod storage;
pub mod transport;
