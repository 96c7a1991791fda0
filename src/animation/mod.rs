pub(crate) mod cycle;
pub(crate) mod player;
pub(crate) mod sequence;
