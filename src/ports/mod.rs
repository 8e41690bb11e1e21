pub mod clock;
pub mod key_store;
pub mod navigation;
pub mod render;
pub mod scan;

pub use clock::*;
pub use key_store::*;
pub use navigation::*;
pub use render::*;
pub use scan::*;
