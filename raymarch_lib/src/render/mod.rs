mod frame;
mod mask;
pub mod march;
mod params;
mod render_options;
mod renderer;

pub use frame::Frame;
pub use mask::MaskLabel;
pub use march::{Fragment, RayMarcher};
pub use params::{Axis, MaskOverlayParameters, RenderParameters};
pub use render_options::{RenderOptions, RenderOptionsBuilder};
pub use renderer::Renderer;
