pub mod shadow_layout;
pub mod sized_box;
pub mod widget;

pub use shadow_layout::{shadow_layout, ShadowLayout};
pub use sized_box::{sized_box, SizedBox};
pub use widget::{Color, Padding, Rect, Widget};
