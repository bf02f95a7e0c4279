pub mod analysis;
pub mod autoplay;
pub mod camera;
pub mod carousel;
pub mod catalog;
pub mod clock;
pub mod color;
pub mod constants;
pub mod gesture;
pub mod playback;
pub mod render_loop;
pub mod scenes;
pub mod visuals;

pub use analysis::*;
pub use autoplay::*;
pub use camera::*;
pub use carousel::*;
pub use catalog::*;
pub use clock::*;
pub use color::Rgb;
pub use gesture::*;
pub use playback::*;
pub use render_loop::*;
pub use scenes::*;
