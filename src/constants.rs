pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second

pub const DEFAULT_TIMEOUT_MS: u64 = 400;      // Cross-fade duration when none is configured
pub const DEMO_TIMEOUT_MS: u64 = 2000;        // Slow fade used by the demo so it is easy to follow

pub const CONTENT_MARGIN: f32 = 0.08;         // Page inset, fraction of the render size
pub const FORM_HEIGHT: i32 = 120;             // Height of the control strip at the bottom
pub const TITLE_FONT_SIZE: i32 = 64;
pub const BODY_FONT_SIZE: i32 = 36;
