pub mod detection;
pub mod imaging;
pub mod pipeline;
pub mod redaction;
pub mod shared;
