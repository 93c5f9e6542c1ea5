#![warn(missing_docs)]

//! Text annotations over busway drawings.
//!
//! Each annotation is anchored to a model point and keeps an independent 2D
//! placement (anchor dot and text box) for every view. Placements are never
//! re-derived from the 3D anchor after creation: dragging in one view leaves
//! every other view untouched.
//!
//! The leader line joining the anchor dot to its box is computed on demand
//! from the current placement.
//!
//! # Example
//!
//! ```
//! use busway_annotate::{AnnotationStore, ViewDirection, ViewId, ViewSpec};
//! use busway_math::Point3;
//!
//! let mut store = AnnotationStore::new(vec![
//!     ViewSpec::standard("top", ViewDirection::Top),
//!     ViewSpec::standard("front", ViewDirection::Front),
//! ])
//! .unwrap();
//!
//! let id = store
//!     .create_annotation(Point3::new(1000.0, 0.0, 0.0), "Feed point")
//!     .unwrap();
//! let top = ViewId::from("top");
//! store.set_box_2d(id, &top, 500.0, 80.0).unwrap();
//!
//! let leader = store.leader(id, &top, 120.0, 30.0).unwrap();
//! assert!(leader.length() > 0.0);
//! ```

mod leader;
mod store;
mod types;
mod view;

pub use leader::{compute_leader, Leader, ALIGNMENT_TOLERANCE};
pub use store::{
    Annotation, AnnotationId, AnnotationStore, ViewPosition, DEFAULT_BOX_OFFSET,
};
pub use types::{Point2D, Rect2D};
pub use view::{ViewDirection, ViewId, ViewProjection, ViewSpec};

use thiserror::Error;

/// Errors from the annotation store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotateError {
    /// No annotation has this id.
    #[error("unknown annotation {0}")]
    UnknownAnnotation(AnnotationId),

    /// The view is not registered with the store.
    #[error("unknown view {0:?}")]
    UnknownView(ViewId),

    /// A view id was registered twice.
    #[error("view {0:?} is already registered")]
    DuplicateView(ViewId),

    /// The store needs at least one view.
    #[error("an annotation store needs at least one view")]
    NoViews,

    /// Annotation text is empty or whitespace.
    #[error("annotation text is empty")]
    EmptyText,
}

/// Result type for annotation operations.
pub type Result<T> = std::result::Result<T, AnnotateError>;
