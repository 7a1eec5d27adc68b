pub mod camera;
pub mod context;
pub mod pipeline;
pub mod runner;
pub mod uniforms;
