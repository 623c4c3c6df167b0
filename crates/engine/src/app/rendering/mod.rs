mod draw_list;
mod renderer;
mod transform;

pub use draw_list::{DrawCommand, DrawList, Rgba};
pub use renderer::Renderer;
pub use transform::{screen_to_world, world_to_screen, Viewport};
