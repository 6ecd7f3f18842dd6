pub mod constants;
pub mod cross_fade;
pub mod error;

pub use cross_fade::config::{ContainerStyle, CrossFadeConfig, Timeout};
pub use cross_fade::{CrossFade, Frame};
pub use error::CrossFadeError;
