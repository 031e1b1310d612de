pub mod components;
pub mod element;
pub mod renderer;
pub mod traits;

pub use components::*;
pub use element::*;
pub use renderer::*;
pub use traits::*;
