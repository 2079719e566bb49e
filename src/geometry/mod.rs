//! Shape geometry model.
//!
//! Shapes are placed by the top-left corner of their axis-aligned bounding
//! box on a sheet whose origin is its top-left corner.
//!
//! - [`Shape`]: closed set of cutout kinds with extent, area and overlap tests
//! - [`Sheet`]: boundary tests and position clamping
//! - [`ShapeRecord`]: tagged records used at the input/output boundary

mod record;
mod shape;
mod sheet;
mod vec2;

pub use record::{shapes_from_records, ShapeRecord, TAG_CIRCULAR, TAG_DIAMOND, TAG_RECTANGULAR};
pub use shape::{BoundingBox, Shape};
pub use sheet::Sheet;
pub use vec2::Vec2;
