pub mod background;
pub mod camera;
pub mod color;
pub mod config;
pub mod constants;
pub mod entity;
pub mod instance;
pub mod pointer;
pub mod pool;
pub mod scene_state;
pub mod sim;
pub mod trail;

pub use background::*;
pub use camera::*;
pub use color::*;
pub use config::*;
pub use constants::*;
pub use entity::*;
pub use instance::*;
pub use pointer::*;
pub use pool::*;
pub use scene_state::*;
pub use sim::{FrameInput, GridRisers, OrbitingSpheres, Simulation, TrailingRings};
pub use trail::*;
