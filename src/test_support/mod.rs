//! Shared helpers for tests. Compiled only under `cfg(test)`.

pub mod socket_guard;
