mod bellman;
mod setup;
mod shape;
mod tensor;

pub use self::bellman::*;
pub use setup::*;
pub use shape::*;
pub use tensor::*;
