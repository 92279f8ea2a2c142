//! Stroke recorder: the idle/drawing state machine behind a signature pad

use inspecta_config::StrokeStyle;
use tracing::debug;

use crate::raster::{draw_join, draw_segment};
use crate::surface::CpuSurface;
use crate::types::{Point, Stroke};

/// Observable recorder state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecorderState {
    #[default]
    Idle,
    Drawing,
}

/// Turns mapped points into rendered strokes.
///
/// `Idle --begin--> Drawing --stroke_to--> Drawing --finish--> Idle`.
/// The recorder is long-lived and cycles between the two states; moves
/// received while idle are ignored.
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    /// In-progress stroke (None while idle)
    current: Option<Stroke>,
    /// Strokes completed since the last reset
    log: Vec<Stroke>,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RecorderState {
        if self.current.is_some() {
            RecorderState::Drawing
        } else {
            RecorderState::Idle
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    /// Start a new stroke at `origin`.
    ///
    /// Callers must finish or abandon any in-progress stroke first; a stroke
    /// still open here is abandoned.
    pub fn begin(&mut self, origin: Point) {
        if self.current.is_some() {
            debug!("begin: abandoning unfinished stroke");
        }
        self.current = Some(Stroke::starting_at(origin));
    }

    /// Extend the current stroke to `point` and render the new segment.
    ///
    /// Returns true if the surface was modified. Does nothing while idle.
    pub fn stroke_to(&mut self, surface: &mut CpuSurface, style: &StrokeStyle, point: Point) -> bool {
        let Some(stroke) = self.current.as_mut() else {
            debug!("stroke_to: no active stroke, ignoring");
            return false;
        };
        let Some(last) = stroke.last() else {
            return false;
        };

        let mut drawn = draw_segment(surface, last, point, style).is_some();

        let len = stroke.points.len();
        if len >= 2 {
            let prev = stroke.points[len - 2];
            drawn |= draw_join(surface, prev, last, point, style).is_some();
        }

        // The rasterizer marks the surface drawn only where ink lands
        stroke.points.push(point);
        drawn
    }

    /// Close the current stroke.
    ///
    /// Returns false if the recorder was already idle. Strokes with fewer
    /// than two points rendered nothing and are not logged.
    pub fn finish(&mut self) -> bool {
        let Some(stroke) = self.current.take() else {
            return false;
        };
        if stroke.is_complete() {
            debug!("finish: stroke with {} points", stroke.points.len());
            self.log.push(stroke);
        } else {
            debug!("finish: single-point stroke discarded");
        }
        true
    }

    /// Drop the in-progress stroke without logging it.
    /// Returns true if a stroke was in progress.
    pub fn abandon(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Abandon any stroke and forget the completed ones
    pub fn reset(&mut self) {
        self.current = None;
        self.log.clear();
    }

    /// Strokes completed since the last reset
    pub fn strokes(&self) -> &[Stroke] {
        &self.log
    }

    /// The in-progress stroke, if drawing
    pub fn current(&self) -> Option<&Stroke> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let recorder = StrokeRecorder::new();
        assert_eq!(recorder.state(), RecorderState::Idle);
        assert!(recorder.strokes().is_empty());
    }

    #[test]
    fn test_full_cycle() {
        let mut surface = CpuSurface::new(100, 50);
        let style = StrokeStyle::default();
        let mut recorder = StrokeRecorder::new();

        recorder.begin(Point::new(10.0, 10.0));
        assert_eq!(recorder.state(), RecorderState::Drawing);
        assert!(surface.is_blank());

        assert!(recorder.stroke_to(&mut surface, &style, Point::new(30.0, 20.0)));
        assert!(recorder.stroke_to(&mut surface, &style, Point::new(50.0, 10.0)));
        assert!(!surface.is_blank());
        assert_eq!(recorder.current().map(|s| s.points.len()), Some(3));

        assert!(recorder.finish());
        assert_eq!(recorder.state(), RecorderState::Idle);
        assert_eq!(recorder.strokes().len(), 1);
        assert_eq!(recorder.strokes()[0].points.len(), 3);
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut surface = CpuSurface::new(100, 50);
        let mut recorder = StrokeRecorder::new();

        assert!(!recorder.stroke_to(&mut surface, &StrokeStyle::default(), Point::new(5.0, 5.0)));
        assert!(surface.is_blank());
        assert_eq!(recorder.state(), RecorderState::Idle);
    }

    #[test]
    fn test_inkless_strokes_keep_surface_blank() {
        let mut surface = CpuSurface::new(100, 50);
        let mut recorder = StrokeRecorder::new();

        let hairline = StrokeStyle {
            width: 0.0,
            ..StrokeStyle::default()
        };
        recorder.begin(Point::new(10.0, 10.0));
        assert!(!recorder.stroke_to(&mut surface, &hairline, Point::new(40.0, 30.0)));
        recorder.finish();

        // Entirely off-surface
        recorder.begin(Point::new(-50.0, -50.0));
        assert!(!recorder.stroke_to(&mut surface, &StrokeStyle::default(), Point::new(-20.0, -40.0)));
        recorder.finish();

        assert!(surface.is_blank());
        assert_eq!(recorder.strokes().len(), 2);
    }

    #[test]
    fn test_finish_while_idle() {
        let mut recorder = StrokeRecorder::new();
        assert!(!recorder.finish());
    }

    #[test]
    fn test_tap_is_not_logged() {
        let mut recorder = StrokeRecorder::new();
        recorder.begin(Point::new(1.0, 1.0));
        assert!(recorder.finish());
        assert!(recorder.strokes().is_empty());
    }

    #[test]
    fn test_abandon_and_reset() {
        let mut surface = CpuSurface::new(100, 50);
        let style = StrokeStyle::default();
        let mut recorder = StrokeRecorder::new();

        recorder.begin(Point::new(1.0, 1.0));
        recorder.stroke_to(&mut surface, &style, Point::new(9.0, 9.0));
        recorder.finish();

        recorder.begin(Point::new(20.0, 20.0));
        recorder.stroke_to(&mut surface, &style, Point::new(25.0, 25.0));
        assert!(recorder.abandon());
        assert_eq!(recorder.state(), RecorderState::Idle);
        assert_eq!(recorder.strokes().len(), 1);
        assert!(!recorder.abandon());

        recorder.reset();
        assert!(recorder.strokes().is_empty());
    }
}
