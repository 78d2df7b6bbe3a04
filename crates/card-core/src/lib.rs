pub mod camera;
pub mod constants;
pub mod decor;
pub mod error;
pub mod ornaments;
pub mod reveal;
pub mod snow;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use camera::*;
pub use constants::*;
pub use decor::*;
pub use error::CardError;
pub use ornaments::*;
pub use reveal::*;
pub use snow::*;
