pub mod alloc;
pub mod fmt;
pub mod hash;
pub mod option;
pub mod panic;
pub mod result;
