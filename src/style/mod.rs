mod color;
mod descriptor;
mod flex;
mod length;
mod nine_slice;

pub use color::*;
pub use descriptor::*;
pub use flex::*;
pub use length::*;
pub use nine_slice::*;
