mod traits;
mod tabular;
mod builder;
#[cfg(feature = "serde")]
mod description;

pub use traits::*;
pub use tabular::*;
pub use builder::*;
#[cfg(feature = "serde")]
pub use description::*;
