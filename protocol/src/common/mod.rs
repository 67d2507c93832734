pub mod alien;
pub mod environment;
pub mod planet;

pub use alien::*;
pub use environment::*;
pub use planet::*;
