use anyhow::Result;
use raylib::prelude::*;

pub trait Engine {
    /// Loads resources. Returns false when there is nothing to show.
    fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> Result<bool>;
    /// Updates and draws one frame into `framebuffer`. Returns false to stop.
    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread, framebuffer: &mut RenderTexture2D) -> Result<bool>;
}
