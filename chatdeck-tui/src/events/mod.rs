mod handler;
mod input;

pub use handler::{Action, ClickableRegion, EventHandler, Focus, ScrollDirection};
pub use input::InputBuffer;
