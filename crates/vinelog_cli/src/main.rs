//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `vinelog_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("vinelog_core ping={}", vinelog_core::ping());
    println!("vinelog_core version={}", vinelog_core::core_version());
}
