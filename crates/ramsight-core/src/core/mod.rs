pub use self::{category::*, geometry::*, object::*, ram::*};

pub(crate) mod category;
pub(crate) mod geometry;
pub(crate) mod object;
pub(crate) mod ram;
