pub mod output;
pub mod session;
pub mod trace;
