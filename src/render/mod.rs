pub mod compositor;
pub mod encode;
pub(crate) mod raster;
