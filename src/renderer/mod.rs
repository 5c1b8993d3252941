//! Rendering module
//!
//! Turns a world snapshot into screen-space triangles plus HUD text. The
//! output is a plain vertex list, ready to upload to whatever surface the
//! host draws with.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::{Frame, Overlay, actor_visible, build_frame};
pub use vertex::Vertex;
