pub(crate) mod collision;
pub(crate) mod frame;
pub(crate) mod layer;
pub(crate) mod sprite;
