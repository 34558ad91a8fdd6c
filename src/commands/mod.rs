pub mod detail;
pub mod gallery;
pub mod list;
pub mod pager;

pub use detail::*;
pub use gallery::*;
pub use list::*;
