mod category;
mod expense;
mod money;
mod report;

pub use category::*;
pub use expense::*;
pub use money::*;
pub use report::*;
