// Modular tools
pub mod avatar;
pub mod compare;
pub mod normalize;
