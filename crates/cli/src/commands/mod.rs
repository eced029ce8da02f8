pub mod export;
pub mod render;
pub mod summary;

pub use export::*;
pub use render::*;
pub use summary::*;
