pub mod router;

pub use router::{Action, InputEvent, InteractionRouter, NavKey};
