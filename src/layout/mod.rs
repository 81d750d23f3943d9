pub mod strip;
pub mod transition;

pub use strip::{ScrollPlan, StripMetrics, Zone};
pub use transition::{Animator, Transition, TransitionTarget};
