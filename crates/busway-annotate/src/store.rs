//! Annotation state with independent per-view placement.

use std::collections::BTreeMap;
use std::fmt;

use busway_math::Point3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{compute_leader, AnnotateError, Leader, Point2D, Rect2D, Result, ViewId, ViewSpec};

/// Offset of a new text box's top-left corner from the projected anchor.
pub const DEFAULT_BOX_OFFSET: (f64, f64) = (40.0, -60.0);

/// Stable identity of an annotation. Never reused after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(u64);

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Placement of one annotation in one view.
///
/// `(ax, ay)` is the anchor dot center, `(bx, by)` the text box's top-left
/// corner, both in that view's coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewPosition {
    /// Anchor X.
    pub ax: f64,
    /// Anchor Y.
    pub ay: f64,
    /// Box X.
    pub bx: f64,
    /// Box Y.
    pub by: f64,
}

impl ViewPosition {
    /// Anchor center.
    pub fn anchor(&self) -> Point2D {
        Point2D::new(self.ax, self.ay)
    }

    /// Box top-left corner.
    pub fn box_origin(&self) -> Point2D {
        Point2D::new(self.bx, self.by)
    }

    /// The box rectangle for a box of the given rendered size.
    pub fn box_rect(&self, width: f64, height: f64) -> Rect2D {
        Rect2D::from_origin_size(self.bx, self.by, width, height)
    }
}

/// A text annotation anchored to a model point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    /// Identity.
    pub id: AnnotationId,
    /// Label text.
    pub text: String,
    /// Model-space anchor, used to seed placement in new views.
    #[serde(serialize_with = "serialize_point")]
    pub anchor: Point3,
    positions: BTreeMap<ViewId, ViewPosition>,
}

fn serialize_point<S: serde::Serializer>(p: &Point3, s: S) -> std::result::Result<S::Ok, S::Error> {
    [p.x, p.y, p.z].serialize(s)
}

impl Annotation {
    /// Placement in a view, if the view is known.
    pub fn position(&self, view: &ViewId) -> Option<&ViewPosition> {
        self.positions.get(view)
    }

    /// All placements keyed by view.
    pub fn positions(&self) -> impl Iterator<Item = (&ViewId, &ViewPosition)> {
        self.positions.iter()
    }
}

/// All annotations of a drawing plus the set of views they are placed in.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    views: Vec<ViewSpec>,
    annotations: BTreeMap<AnnotationId, Annotation>,
    next_id: u64,
    active: ViewId,
    box_offset: (f64, f64),
}

impl AnnotationStore {
    /// Create a store over the given views. The first view starts active.
    pub fn new(views: Vec<ViewSpec>) -> Result<Self> {
        let active = views.first().ok_or(AnnotateError::NoViews)?.id.clone();
        for (i, v) in views.iter().enumerate() {
            if views[..i].iter().any(|w| w.id == v.id) {
                return Err(AnnotateError::DuplicateView(v.id.clone()));
            }
        }
        Ok(Self {
            views,
            annotations: BTreeMap::new(),
            next_id: 1,
            active,
            box_offset: DEFAULT_BOX_OFFSET,
        })
    }

    /// Use another default box offset for annotations created from now on.
    pub fn with_box_offset(mut self, dx: f64, dy: f64) -> Self {
        self.box_offset = (dx, dy);
        self
    }

    /// Registered views in registration order.
    pub fn views(&self) -> &[ViewSpec] {
        &self.views
    }

    /// Register another view and seed every existing annotation's placement in it.
    pub fn add_view(&mut self, spec: ViewSpec) -> Result<()> {
        if self.view_spec(&spec.id).is_some() {
            return Err(AnnotateError::DuplicateView(spec.id));
        }
        for ann in self.annotations.values_mut() {
            let pos = seed_position(&spec, &ann.anchor, self.box_offset);
            ann.positions.insert(spec.id.clone(), pos);
        }
        debug!(view = %spec.id, "registered view");
        self.views.push(spec);
        Ok(())
    }

    /// The view drags are applied to.
    pub fn active_view(&self) -> &ViewId {
        &self.active
    }

    /// Switch the active view.
    pub fn set_active_view(&mut self, view: &ViewId) -> Result<()> {
        self.require_view(view)?;
        self.active = view.clone();
        Ok(())
    }

    /// Create an annotation at a model point.
    ///
    /// Every known view gets a placement: the anchor at the point's
    /// projection and the box at the default offset from it.
    pub fn create_annotation(&mut self, anchor: Point3, text: &str) -> Result<AnnotationId> {
        let text = validate_text(text)?;
        let id = AnnotationId(self.next_id);
        self.next_id += 1;

        let positions = self
            .views
            .iter()
            .map(|spec| (spec.id.clone(), seed_position(spec, &anchor, self.box_offset)))
            .collect();

        self.annotations.insert(
            id,
            Annotation {
                id,
                text,
                anchor,
                positions,
            },
        );
        debug!(%id, "created annotation");
        Ok(id)
    }

    /// Replace an annotation's text.
    pub fn set_text(&mut self, id: AnnotationId, text: &str) -> Result<()> {
        let text = validate_text(text)?;
        self.annotation_mut(id)?.text = text;
        Ok(())
    }

    /// Delete an annotation.
    pub fn remove(&mut self, id: AnnotationId) -> Result<Annotation> {
        let removed = self
            .annotations
            .remove(&id)
            .ok_or(AnnotateError::UnknownAnnotation(id))?;
        debug!(%id, "removed annotation");
        Ok(removed)
    }

    /// Look up an annotation.
    pub fn annotation(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.get(&id)
    }

    /// Annotations in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.values()
    }

    /// Number of annotations.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Whether there are no annotations.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Placement of an annotation in a view.
    pub fn get(&self, id: AnnotationId, view: &ViewId) -> Result<ViewPosition> {
        self.require_view(view)?;
        let ann = self
            .annotations
            .get(&id)
            .ok_or(AnnotateError::UnknownAnnotation(id))?;
        ann.positions
            .get(view)
            .copied()
            .ok_or_else(|| AnnotateError::UnknownView(view.clone()))
    }

    /// Move the anchor dot in one view. Other views are not touched.
    pub fn set_anchor_2d(&mut self, id: AnnotationId, view: &ViewId, x: f64, y: f64) -> Result<()> {
        let pos = self.position_mut(id, view)?;
        pos.ax = x;
        pos.ay = y;
        debug!(%id, %view, x, y, "anchor moved");
        Ok(())
    }

    /// Move the text box in one view. Other views are not touched.
    pub fn set_box_2d(&mut self, id: AnnotationId, view: &ViewId, x: f64, y: f64) -> Result<()> {
        let pos = self.position_mut(id, view)?;
        pos.bx = x;
        pos.by = y;
        debug!(%id, %view, x, y, "box moved");
        Ok(())
    }

    /// Move the anchor dot in the active view.
    pub fn drag_anchor(&mut self, id: AnnotationId, x: f64, y: f64) -> Result<()> {
        let view = self.active.clone();
        self.set_anchor_2d(id, &view, x, y)
    }

    /// Move the text box in the active view.
    pub fn drag_box(&mut self, id: AnnotationId, x: f64, y: f64) -> Result<()> {
        let view = self.active.clone();
        self.set_box_2d(id, &view, x, y)
    }

    /// Leader for an annotation in a view, given the box's rendered size.
    pub fn leader(
        &self,
        id: AnnotationId,
        view: &ViewId,
        box_width: f64,
        box_height: f64,
    ) -> Result<Leader> {
        let pos = self.get(id, view)?;
        Ok(compute_leader(
            pos.anchor(),
            pos.box_rect(box_width, box_height),
        ))
    }

    fn view_spec(&self, view: &ViewId) -> Option<&ViewSpec> {
        self.views.iter().find(|v| &v.id == view)
    }

    fn require_view(&self, view: &ViewId) -> Result<()> {
        self.view_spec(view)
            .map(|_| ())
            .ok_or_else(|| AnnotateError::UnknownView(view.clone()))
    }

    fn annotation_mut(&mut self, id: AnnotationId) -> Result<&mut Annotation> {
        self.annotations
            .get_mut(&id)
            .ok_or(AnnotateError::UnknownAnnotation(id))
    }

    fn position_mut(&mut self, id: AnnotationId, view: &ViewId) -> Result<&mut ViewPosition> {
        self.require_view(view)?;
        self.annotation_mut(id)?
            .positions
            .get_mut(view)
            .ok_or_else(|| AnnotateError::UnknownView(view.clone()))
    }
}

fn validate_text(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AnnotateError::EmptyText);
    }
    Ok(trimmed.to_string())
}

fn seed_position(spec: &ViewSpec, anchor: &Point3, (dx, dy): (f64, f64)) -> ViewPosition {
    let a = spec.projection.project(anchor);
    ViewPosition {
        ax: a.x,
        ay: a.y,
        bx: a.x + dx,
        by: a.y + dy,
    }
}
