// src/plan/mod.rs
pub mod fixture;
pub mod observer;
pub mod template;
pub mod wall;

pub use fixture::{Fixture, FixtureKind};
pub use observer::{CameraTier, Observer, ObserverKind};
pub use template::{builtin_templates, Template};
pub use wall::Wall;
