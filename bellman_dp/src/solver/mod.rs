mod base;
mod value_iteration;
mod policy_iteration;
mod modified_policy_iteration;
#[cfg(test)]
pub(crate) mod testing;

pub use base::*;
pub use value_iteration::*;
pub use policy_iteration::*;
pub use modified_policy_iteration::*;
