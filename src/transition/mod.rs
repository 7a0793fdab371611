mod animation;
mod blend;
mod state_machine;
mod time_function;
mod transition;

pub use animation::*;
pub use blend::*;
pub use state_machine::*;
pub use time_function::*;
pub use transition::*;
