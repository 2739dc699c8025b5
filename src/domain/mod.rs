mod analytics;
mod goal;
mod money;
mod movement;

pub use analytics::*;
pub use goal::*;
pub use money::*;
pub use movement::*;
