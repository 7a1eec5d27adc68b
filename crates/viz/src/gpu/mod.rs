pub mod flow;
pub mod glow;
pub mod gridwarp;
