pub mod batch_pixelate_use_case;
pub mod pixelate_image_use_case;
pub mod pixelizer_logger;
pub mod policy;
