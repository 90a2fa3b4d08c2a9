pub mod block_pixelator;
