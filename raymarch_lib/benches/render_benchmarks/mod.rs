pub mod codec;
pub mod parallel;
pub mod serial;
