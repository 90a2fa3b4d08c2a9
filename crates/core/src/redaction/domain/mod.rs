pub mod region_pixelator;
