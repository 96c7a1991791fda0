pub(crate) mod bitmap;
pub(crate) mod palette;
pub(crate) mod spriteset;
pub(crate) mod store;
pub(crate) mod tilemap;
pub(crate) mod tileset;
