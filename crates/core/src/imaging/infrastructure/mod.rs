pub mod file_image_reader;
pub mod std_image_encoder;
