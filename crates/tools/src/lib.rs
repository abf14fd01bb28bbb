//! Developer tooling: session inspector.
//!
//! # Invariants
//! - Tools only read the session; they never mutate it.

mod inspector;

pub use inspector::{EntityInfo, SessionInspector, SessionSummary};

pub fn crate_info() -> &'static str {
    "lander-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
