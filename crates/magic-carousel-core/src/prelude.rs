pub use crate::carousel::{Carousel, NavFlags};
pub use crate::clock::{Clock, SystemClock, TestClock};
pub use crate::config::{CarouselConfig, ConfigError, NavigationMode};
pub use crate::event::{CarouselEvent, SubId};
pub use crate::geometry::{CellGeometry, Geometry, Vec2};
pub use crate::gesture::GesturePhase;
pub use crate::input::{
    PointerEvent, PointerEventKind, PointerId, PointerKind, PointerResponse, PointerSample,
};
