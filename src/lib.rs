//! Particle Swarm Optimization for sheet cutting layouts.
//!
//! Places rectangular, diamond and circular cutouts on a fixed-size sheet,
//! minimizing wasted area while eliminating overlaps and out-of-bounds
//! placements.
//!
//! - **Geometry**: closed [`Shape`](geometry::Shape) type with bounding
//!   boxes, areas and overlap tests, plus the [`Sheet`](geometry::Sheet)
//!   boundary.
//! - **PSO**: fitness evaluation, velocity/position updates and the swarm
//!   loop, with full-layout and per-shape particle representations.
//! - **Display**: the [`LayoutSink`](display::LayoutSink) collaborator that
//!   receives the initial and optimized layouts.
//!
//! # Example
//!
//! ```
//! use u_pso_layout::display::LogSink;
//! use u_pso_layout::geometry::{ShapeRecord, Sheet};
//! use u_pso_layout::pso::{PsoConfig, PsoRunner};
//!
//! let records = vec![
//!     ShapeRecord::rectangular(8.0, 8.0),
//!     ShapeRecord::diamond(6.0, 4.0),
//!     ShapeRecord::circular(2.0),
//! ];
//! let config = PsoConfig::default()
//!     .with_num_particles(30)
//!     .with_num_iterations(100)
//!     .with_seed(42);
//!
//! let layout =
//!     PsoRunner::optimize_and_display(Sheet::new(30.0, 10.0), &records, &config, &LogSink)?;
//! assert_eq!(layout.len(), records.len());
//! # Ok::<(), u_pso_layout::Error>(())
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default): evaluate particles with rayon
//! - `serde`: serialization of configs, shapes and records

pub mod display;
pub mod error;
pub mod geometry;
pub mod pso;
pub mod random;

pub use error::{Error, Result};
