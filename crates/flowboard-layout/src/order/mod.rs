//! Node ordering / crossing minimization.
//!
//! A depth-first initial order followed by alternating barycenter sweeps. The layering with
//! the fewest crossings wins.

mod barycenter;
pub use barycenter::{BarycenterEntry, barycenter, sort_layer};

mod cross_count;
pub use cross_count::cross_count;

mod init_order;
pub use init_order::init_order;

mod ordering;
pub use ordering::{Relationship, order};
pub(crate) use ordering::build_layer_matrix;
