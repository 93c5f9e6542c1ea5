//! Route compilation.

use busway_math::{advance, Axis, Point3, Tolerance};
use busway_solids::{
    bounds_of, build_elbow_solid, build_segment_solid, is_collinear, Bounds3, ElbowCuts, Solid,
};
use tracing::{debug, warn};

use crate::{Move, Result, Route, RouteConfig, RouteError};

/// Output of [`compile_run`].
#[derive(Debug, Clone, Default)]
pub struct CompiledRun {
    /// Solids in travel order: segment, elbow, segment, ...
    pub solids: Vec<Solid>,
    /// Route vertices after normalization, origin first.
    pub vertices: Vec<Point3>,
}

impl CompiledRun {
    /// Number of elbow solids.
    pub fn elbow_count(&self) -> usize {
        self.solids.iter().filter(|s| s.is_elbow()).count()
    }

    /// Number of segment solids.
    pub fn segment_count(&self) -> usize {
        self.solids.len() - self.elbow_count()
    }

    /// Bounds of all solids.
    pub fn bounds(&self) -> Bounds3 {
        bounds_of(&self.solids)
    }
}

/// Compile a route into its segment and elbow solids.
///
/// The bend radius and elbow table are read from `config` on every call.
/// Interior vertices where the direction changes get an elbow; the first and
/// last vertices never do. Straights are shortened by the adjoining elbow
/// cuts. An unknown radius aborts the whole compile.
pub fn compile_run(route: &Route, config: &RouteConfig) -> Result<CompiledRun> {
    let moves = route.normalized_moves()?;
    if moves.is_empty() {
        debug!("route has no moves; nothing to compile");
        return Ok(CompiledRun {
            solids: Vec::new(),
            vertices: vec![route.origin],
        });
    }

    let mut vertices = Vec::with_capacity(moves.len() + 1);
    vertices.push(route.origin);
    for m in &moves {
        let last = vertices[vertices.len() - 1];
        vertices.push(advance(&last, m.direction, m.distance));
    }

    // Cuts at the start and end of each move, and the elbow at each vertex.
    let mut cut_start = vec![0.0; moves.len()];
    let mut cut_end = vec![0.0; moves.len()];
    let mut elbows: Vec<Option<Solid>> = vec![None; vertices.len()];

    for i in 1..moves.len() {
        let (prev, next) = (&moves[i - 1], &moves[i]);
        if is_collinear(prev.direction, next.direction) {
            continue;
        }
        let cuts: ElbowCuts = config
            .elbows
            .resolve(config.radius, prev.direction, next.direction)
            .inspect_err(|e| warn!(vertex = i, error = %e, "elbow aborted"))?;
        let section = prev.section.unwrap_or(config.section);
        let elbow = build_elbow_solid(vertices[i], prev.direction, next.direction, cuts, section)?;
        cut_end[i - 1] = cuts.a;
        cut_start[i] = cuts.b;
        elbows[i] = Some(elbow.into());
    }

    let tol = Tolerance::DEFAULT;
    let mut solids = Vec::with_capacity(moves.len() * 2);
    for (i, m) in moves.iter().enumerate() {
        if let Some(elbow) = elbows[i].take() {
            solids.push(elbow);
        }

        let required = cut_start[i] + cut_end[i];
        let length = m.distance - required;
        if tol.is_zero(length) {
            debug!(segment = i, "segment fully consumed by elbows");
            continue;
        }
        if length < 0.0 {
            return Err(RouteError::SegmentTooShort {
                index: i,
                length: m.distance,
                required,
            });
        }

        let start = advance(&vertices[i], m.direction, cut_start[i]);
        let section = m.section.unwrap_or(config.section);
        let mut segment = build_segment_solid(start, m.direction, length, section)?;
        if let Some(axis) = riser_width_axis(&moves, i) {
            segment = segment.with_width_axis(axis);
        }
        solids.push(segment.into());
    }

    debug!(
        moves = moves.len(),
        solids = solids.len(),
        radius = config.radius,
        "compiled route"
    );

    Ok(CompiledRun { solids, vertices })
}

/// Width axis for a vertical move, taken from the nearest horizontal
/// neighbour so the riser lines up with the elbow that feeds it.
///
/// The incoming run wins when both neighbours are horizontal. If they run
/// along different axes (`+X, +Z, +Y`) the riser keeps the orientation of the
/// bottom elbow and the top elbow is turned a quarter turn against it.
fn riser_width_axis(moves: &[Move], i: usize) -> Option<Axis> {
    if !moves[i].direction.has_z() {
        return None;
    }
    let neighbour = i
        .checked_sub(1)
        .map(|p| &moves[p])
        .filter(|m| !m.direction.has_z())
        .or_else(|| moves.get(i + 1).filter(|m| !m.direction.has_z()))?;
    let along = neighbour.direction.axis();
    Axis::ALL
        .into_iter()
        .find(|a| *a != Axis::Z && *a != along)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use busway_math::Direction::*;
    use busway_solids::{CrossSection, SolidsError};

    fn config() -> RouteConfig {
        RouteConfig::default()
    }

    #[test]
    fn test_single_move_has_no_elbow() {
        let route = Route::new(Point3::origin()).go(PosX, 2000.0);
        let run = compile_run(&route, &config()).unwrap();
        assert_eq!(run.elbow_count(), 0);
        assert_eq!(run.segment_count(), 1);
        match &run.solids[0] {
            Solid::Box(b) => assert_eq!(b.length, 2000.0),
            other => panic!("expected box, got {other:?}"),
        }
    }

    #[test]
    fn test_segments_shortened_by_cuts() {
        let route = Route::new(Point3::origin())
            .go(PosX, 3000.0)
            .go(PosY, 2000.0);
        let run = compile_run(&route, &config()).unwrap();
        assert_eq!(run.solids.len(), 3);

        let Solid::Box(first) = &run.solids[0] else {
            panic!("expected box first");
        };
        assert_eq!(first.length, 3000.0 - 270.0);

        assert!(run.solids[1].is_elbow());

        let Solid::Box(second) = &run.solids[2] else {
            panic!("expected box last");
        };
        assert_eq!(second.origin, Point3::new(3000.0, 270.0, 0.0));
        assert_eq!(second.length, 2000.0 - 270.0);
    }

    #[test]
    fn test_vertical_turn_uses_vertical_cut() {
        let route = Route::new(Point3::origin())
            .go(PosY, 1000.0)
            .go(PosZ, 1000.0);
        let run = compile_run(&route, &config()).unwrap();
        let Solid::Box(riser) = &run.solids[2] else {
            panic!("expected riser box");
        };
        assert_eq!(riser.length, 1000.0 - 320.0);
        // Riser width follows the elbow's extrusion axis (X for a Y/Z turn).
        assert_eq!(riser.width_axis, Axis::X);
    }

    #[test]
    fn test_riser_follows_incoming_run_when_axes_differ() {
        let route = Route::new(Point3::origin())
            .go(PosX, 2000.0)
            .go(PosZ, 2000.0)
            .go(PosY, 2000.0);
        let run = compile_run(&route, &config()).unwrap();
        let Solid::Box(riser) = &run.solids[2] else {
            panic!("expected riser box");
        };
        assert_eq!(riser.direction, PosZ);
        // Bottom elbow (+X to +Z) extrudes along Y, so the riser width does too.
        assert_eq!(riser.width_axis, Axis::Y);
        let Solid::Extruded(top) = &run.solids[3] else {
            panic!("expected top elbow");
        };
        assert_relative_eq!(top.normal.x.abs(), 1.0);
    }

    #[test]
    fn test_riser_without_incoming_run_uses_outgoing() {
        let route = Route::new(Point3::origin())
            .go(PosZ, 2000.0)
            .go(NegX, 2000.0);
        let run = compile_run(&route, &config()).unwrap();
        let Solid::Box(riser) = &run.solids[0] else {
            panic!("expected riser box");
        };
        assert_eq!(riser.width_axis, Axis::Y);
    }

    #[test]
    fn test_unknown_radius_aborts() {
        let route = Route::new(Point3::origin())
            .go(PosX, 3000.0)
            .go(PosY, 2000.0);
        let err = compile_run(&route, &config().with_radius(450)).unwrap_err();
        assert!(matches!(
            err,
            RouteError::Solids(SolidsError::UnknownRadius(450))
        ));
    }

    #[test]
    fn test_unknown_radius_irrelevant_without_horizontal_turns() {
        let route = Route::new(Point3::origin())
            .go(PosX, 3000.0)
            .go(PosZ, 2000.0);
        let run = compile_run(&route, &config().with_radius(450)).unwrap();
        assert_eq!(run.elbow_count(), 1);
    }

    #[test]
    fn test_too_short_segment() {
        let route = Route::new(Point3::origin())
            .go(PosX, 1000.0)
            .go(PosY, 400.0)
            .go(PosX, 1000.0);
        let err = compile_run(&route, &config()).unwrap_err();
        assert!(matches!(
            err,
            RouteError::SegmentTooShort {
                index: 1,
                required,
                ..
            } if required == 540.0
        ));
    }

    #[test]
    fn test_exactly_consumed_segment_skipped() {
        let route = Route::new(Point3::origin())
            .go(PosX, 1000.0)
            .go(PosY, 540.0)
            .go(PosX, 1000.0);
        let run = compile_run(&route, &config()).unwrap();
        assert_eq!(run.elbow_count(), 2);
        assert_eq!(run.segment_count(), 2);
    }

    #[test]
    fn test_empty_route() {
        let run = compile_run(&Route::new(Point3::origin()), &config()).unwrap();
        assert!(run.solids.is_empty());
        assert_eq!(run.vertices.len(), 1);
    }

    #[test]
    fn test_elbow_uses_incoming_section() {
        let wide = CrossSection::new(400.0, 150.0).unwrap();
        let route = Route::new(Point3::origin())
            .go_with(PosX, 3000.0, wide)
            .go(PosY, 2000.0);
        let run = compile_run(&route, &config()).unwrap();
        let Solid::Extruded(elbow) = &run.solids[1] else {
            panic!("expected elbow");
        };
        assert_eq!(elbow.thickness, 150.0);
    }
}
