pub mod image_encoder;
pub mod image_reader;
pub mod orientation;
