// src/editor/mod.rs

mod commands;

pub use commands::{Command, CommandType};

use std::sync::Arc;

use log::{debug, info, warn};
use parking_lot::RwLock;

use crate::config::PlannerSettings;
use crate::document::Floorplan;
use crate::error::{PlanError, Result};
use crate::plan::{CameraTier, Fixture, FixtureKind, Observer, ObserverKind, Wall};
use crate::snap::{snap_to_segment, snap_to_vertex};
use crate::utils::Point2D;

// --- Enums and Supporting Types ---

/// What a click on the canvas places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    Wall,
    Door,
    Window,
    Sensor,
    Camera(CameraTier),
    Select,
}

impl PlacementMode {
    /// Returns a user-friendly name for the mode.
    pub fn name(&self) -> &'static str {
        match self {
            PlacementMode::Wall => "Wall",
            PlacementMode::Door => "Door",
            PlacementMode::Window => "Window",
            PlacementMode::Sensor => "Snap Sensor",
            PlacementMode::Camera(CameraTier::One) => "Camera 1",
            PlacementMode::Camera(CameraTier::Two) => "Camera 2",
            PlacementMode::Camera(CameraTier::Three) => "Camera 3",
            PlacementMode::Select => "Select",
        }
    }

    /// Returns all modes, in toolbar order.
    pub fn all() -> &'static [PlacementMode] {
        &[
            PlacementMode::Wall,
            PlacementMode::Door,
            PlacementMode::Window,
            PlacementMode::Sensor,
            PlacementMode::Camera(CameraTier::One),
            PlacementMode::Camera(CameraTier::Two),
            PlacementMode::Camera(CameraTier::Three),
            PlacementMode::Select,
        ]
    }
}

/// What a single click did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// First click of a wall; the start is now pending.
    WallStarted(Point2D),
    WallPlaced { wall: usize, start: Point2D, end: Point2D },
    FixturePlaced {
        kind: FixtureKind,
        index: usize,
        position: Point2D,
        rotation: f64,
    },
    ObserverPlaced(usize),
    /// Select mode hit-test result. `None` clears the selection.
    Selected(Option<usize>),
}

// --- Main Editor Struct ---

/// Editing state over a shared floorplan.
///
/// The document sits behind an `RwLock` so a renderer can read it while the
/// editor writes between frames.
pub struct Editor {
    document: Arc<RwLock<Floorplan>>,
    settings: PlannerSettings,
    mode: PlacementMode,

    /// Start corner of a wall waiting for its second click, and whether it
    /// is a new corner still to be committed with the wall.
    pending_wall_start: Option<(Point2D, bool)>,
    /// Selected observer index.
    selection: Option<usize>,

    undo_stack: Vec<CommandType>,
    redo_stack: Vec<CommandType>,

    /// Undo depth matching what is on disk. `None` once that state can no
    /// longer be reached by undo or redo.
    saved_depth: Option<usize>,
}

impl Editor {
    pub fn new(document: Arc<RwLock<Floorplan>>, settings: PlannerSettings) -> Self {
        Self {
            document,
            settings,
            mode: PlacementMode::Wall,
            pending_wall_start: None,
            selection: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            saved_depth: Some(0),
        }
    }

    pub fn document(&self) -> Arc<RwLock<Floorplan>> {
        self.document.clone()
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    /// Switches mode. Any pending wall start and the selection are dropped.
    pub fn set_mode(&mut self, mode: PlacementMode) {
        if mode != self.mode {
            info!("Placement mode: {}", mode.name());
        }
        self.mode = mode;
        self.pending_wall_start = None;
        self.selection = None;
    }

    pub fn pending_wall_start(&self) -> Option<Point2D> {
        self.pending_wall_start.map(|(point, _)| point)
    }

    pub fn selected_observer(&self) -> Option<usize> {
        self.selection
    }

    pub fn cancel_current_operation(&mut self) {
        self.pending_wall_start = None;
        self.selection = None;
    }

    /// Applies one click at `point` according to the current mode.
    pub fn handle_click(&mut self, point: Point2D) -> Result<ClickOutcome> {
        match self.mode {
            PlacementMode::Wall => self.click_wall(point),
            PlacementMode::Door => self.click_fixture(FixtureKind::Door, point),
            PlacementMode::Window => self.click_fixture(FixtureKind::Window, point),
            PlacementMode::Sensor => self.place_observer(Observer::new(point, ObserverKind::Sensor, 0.0)),
            PlacementMode::Camera(tier) => {
                let radius = self.settings.camera_radius(tier);
                self.place_observer(Observer::new(point, ObserverKind::Camera(tier), radius))
            }
            PlacementMode::Select => {
                let hit = self
                    .document
                    .read()
                    .observer_at(point, self.settings.selection_tolerance);
                self.selection = hit;
                debug!("Selection at ({}, {}): {:?}", point.x, point.y, hit);
                Ok(ClickOutcome::Selected(hit))
            }
        }
    }

    /// Wall placement. The start corner is only held until the second click,
    /// then committed together with the end corner and the wall as one
    /// undoable step.
    fn click_wall(&mut self, point: Point2D) -> Result<ClickOutcome> {
        let threshold = self.settings.vertex_snap_threshold;
        let mut corners = self.document.read().vertices.clone();
        if let Some((start, true)) = self.pending_wall_start {
            corners.push(start);
        }
        let snapped = snap_to_vertex(point, &corners, threshold);
        let corner = snapped.unwrap_or(point);

        let Some((start, start_is_new)) = self.pending_wall_start else {
            debug!("Wall start at ({}, {})", corner.x, corner.y);
            self.pending_wall_start = Some((corner, snapped.is_none()));
            return Ok(ClickOutcome::WallStarted(corner));
        };

        let wall = Wall::new(start, corner);
        if wall.is_zero_length() {
            warn!("Rejected zero-length wall at ({}, {})", start.x, start.y);
            return Err(PlanError::ZeroLengthWall { x: start.x, y: start.y });
        }

        let mut commands = Vec::new();
        if start_is_new {
            commands.push(CommandType::add_vertex(start));
        }
        if snapped.is_none() {
            commands.push(CommandType::add_vertex(corner));
        }
        commands.push(CommandType::add_wall(wall));
        self.execute_command(CommandType::BatchCommand { commands })?;
        self.pending_wall_start = None;

        let index = self.document.read().walls.len() - 1;
        debug!(
            "Wall {} placed from ({}, {}) to ({}, {})",
            index, start.x, start.y, corner.x, corner.y
        );
        Ok(ClickOutcome::WallPlaced {
            wall: index,
            start,
            end: corner,
        })
    }

    fn click_fixture(&mut self, kind: FixtureKind, point: Point2D) -> Result<ClickOutcome> {
        let threshold = self.settings.segment_snap_threshold;
        let snap = snap_to_segment(point, &self.document.read().wall_segments(), threshold);
        let Some(snap) = snap else {
            warn!("No wall near ({}, {}) for {}", point.x, point.y, kind.name());
            return Err(PlanError::NoWallNearby {
                x: point.x,
                y: point.y,
                threshold,
            });
        };

        let fixture = Fixture::new(snap.point, snap.angle_degrees);
        self.execute_command(CommandType::add_fixture(kind, fixture))?;
        let index = self.document.read().fixtures(kind).len() - 1;
        debug!("{} {} snapped to wall {}", kind.name(), index, snap.wall);
        Ok(ClickOutcome::FixturePlaced {
            kind,
            index,
            position: snap.point,
            rotation: snap.angle_degrees,
        })
    }

    fn place_observer(&mut self, observer: Observer) -> Result<ClickOutcome> {
        self.execute_command(CommandType::add_observer(observer))?;
        let index = self.document.read().observers.len() - 1;
        debug!(
            "{} placed at ({}, {})",
            observer.kind.name(),
            observer.position.x,
            observer.position.y
        );
        Ok(ClickOutcome::ObserverPlaced(index))
    }

    /// Removes the selected observer. Returns its former index.
    pub fn delete_selected(&mut self) -> Result<Option<usize>> {
        let Some(index) = self.selection.take() else {
            return Ok(None);
        };
        self.execute_command(CommandType::delete_observer(index))?;
        info!("Deleted observer {}", index);
        Ok(Some(index))
    }

    /// Removes a wall. Its corners stay so other walls can keep using them.
    pub fn delete_wall(&mut self, index: usize) -> Result<()> {
        self.execute_command(CommandType::delete_wall(index))?;
        info!("Deleted wall {}", index);
        Ok(())
    }

    pub fn delete_fixture(&mut self, kind: FixtureKind, index: usize) -> Result<()> {
        self.execute_command(CommandType::delete_fixture(kind, index))?;
        info!("Deleted {} {}", kind.name(), index);
        Ok(())
    }

    /// Runs a command against the document and records it for undo.
    /// A failed command leaves both stacks untouched.
    pub fn execute_command(&mut self, mut command: CommandType) -> Result<()> {
        command.execute(&mut self.document.write())?;
        if self.saved_depth.is_some_and(|depth| depth > self.undo_stack.len()) {
            self.saved_depth = None;
        }
        self.undo_stack.push(command);
        self.redo_stack.clear();
        Ok(())
    }

    pub fn undo(&mut self) -> Result<()> {
        let mut command = self.undo_stack.pop().ok_or(PlanError::NothingToUndo)?;
        if let Err(err) = command.unexecute(&mut self.document.write()) {
            warn!("Undo failed: {}", err);
            self.undo_stack.push(command);
            return Err(err);
        }
        self.redo_stack.push(command);
        self.pending_wall_start = None;
        self.selection = None;
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        let mut command = self.redo_stack.pop().ok_or(PlanError::NothingToRedo)?;
        if let Err(err) = command.execute(&mut self.document.write()) {
            warn!("Redo failed: {}", err);
            self.redo_stack.push(command);
            return Err(err);
        }
        self.undo_stack.push(command);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.saved_depth != Some(self.undo_stack.len())
    }

    pub fn save_document<P: AsRef<std::path::Path>>(&mut self, path: P) -> Result<()> {
        self.document.read().save(path)?;
        self.saved_depth = Some(self.undo_stack.len());
        Ok(())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Arc::new(RwLock::new(Floorplan::new())), PlannerSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::thread;

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn draw_wall(editor: &mut Editor, a: Point2D, b: Point2D) {
        editor.set_mode(PlacementMode::Wall);
        editor.handle_click(a).unwrap();
        editor.handle_click(b).unwrap();
    }

    #[test]
    fn test_modes() {
        assert_eq!(PlacementMode::all().len(), 8);
        assert_eq!(PlacementMode::Camera(CameraTier::Two).name(), "Camera 2");
        let editor = Editor::default();
        assert_eq!(editor.mode(), PlacementMode::Wall);
        assert!(!editor.has_unsaved_changes());
    }

    #[test]
    fn test_two_click_wall() {
        let mut editor = Editor::default();
        let first = editor.handle_click(p(0.0, 0.0)).unwrap();
        assert_eq!(first, ClickOutcome::WallStarted(p(0.0, 0.0)));
        assert_eq!(editor.pending_wall_start(), Some(p(0.0, 0.0)));

        let second = editor.handle_click(p(100.0, 0.0)).unwrap();
        assert_eq!(
            second,
            ClickOutcome::WallPlaced {
                wall: 0,
                start: p(0.0, 0.0),
                end: p(100.0, 0.0)
            }
        );
        assert!(editor.pending_wall_start().is_none());

        let doc = editor.document();
        let plan = doc.read();
        assert_eq!(plan.walls.len(), 1);
        assert_eq!(plan.vertices, vec![p(0.0, 0.0), p(100.0, 0.0)]);
        assert!(editor.has_unsaved_changes());
    }

    #[test]
    fn test_wall_snaps_to_existing_corner() {
        let mut editor = Editor::default();
        draw_wall(&mut editor, p(0.0, 0.0), p(100.0, 0.0));
        // Both clicks are within the vertex threshold of existing corners.
        draw_wall(&mut editor, p(103.0, 4.0), p(100.0, 80.0));
        draw_wall(&mut editor, p(96.0, 77.0), p(2.0, -3.0));

        let doc = editor.document();
        let plan = doc.read();
        assert_eq!(plan.vertices, vec![p(0.0, 0.0), p(100.0, 0.0), p(100.0, 80.0)]);
        assert_eq!(plan.walls[1].start, p(100.0, 0.0));
        assert_eq!(plan.walls[2].start, p(100.0, 80.0));
        assert_eq!(plan.walls[2].end, p(0.0, 0.0));
    }

    #[test]
    fn test_zero_length_wall_keeps_start_pending() {
        let mut editor = Editor::default();
        editor.handle_click(p(50.0, 50.0)).unwrap();
        let err = editor.handle_click(p(52.0, 51.0)).unwrap_err();
        assert!(matches!(err, PlanError::ZeroLengthWall { .. }));
        assert_eq!(editor.pending_wall_start(), Some(p(50.0, 50.0)));
        assert!(editor.document().read().walls.is_empty());

        editor.cancel_current_operation();
        assert!(editor.pending_wall_start().is_none());
    }

    #[test]
    fn test_door_snaps_to_wall() {
        let mut editor = Editor::default();
        draw_wall(&mut editor, p(0.0, 0.0), p(0.0, 200.0));
        editor.set_mode(PlacementMode::Door);
        match editor.handle_click(p(12.0, 60.0)).unwrap() {
            ClickOutcome::FixturePlaced {
                kind,
                index,
                position,
                rotation,
            } => {
                assert_eq!(kind, FixtureKind::Door);
                assert_eq!(index, 0);
                assert_approx_eq!(position.x, 0.0);
                assert_approx_eq!(position.y, 60.0);
                assert_approx_eq!(rotation, 90.0);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(editor.document().read().doors.len(), 1);
    }

    #[test]
    fn test_window_far_from_walls_rejected() {
        let mut editor = Editor::default();
        draw_wall(&mut editor, p(0.0, 0.0), p(100.0, 0.0));
        editor.set_mode(PlacementMode::Window);
        let err = editor.handle_click(p(50.0, 40.0)).unwrap_err();
        assert!(matches!(err, PlanError::NoWallNearby { threshold, .. } if threshold == 25.0));
        assert!(editor.document().read().windows.is_empty());
    }

    #[test]
    fn test_camera_and_sensor_radius() {
        let mut editor = Editor::default();
        editor.set_mode(PlacementMode::Camera(CameraTier::Three));
        editor.handle_click(p(10.0, 10.0)).unwrap();
        editor.set_mode(PlacementMode::Sensor);
        editor.handle_click(p(30.0, 10.0)).unwrap();

        let doc = editor.document();
        let plan = doc.read();
        assert_eq!(plan.observers[0].radius, 20.0);
        assert_eq!(plan.observers[1].radius, 0.0);
        assert_eq!(plan.product_counts().total(), 2);
    }

    #[test]
    fn test_select_and_delete() {
        let mut editor = Editor::default();
        editor.set_mode(PlacementMode::Camera(CameraTier::One));
        editor.handle_click(p(100.0, 100.0)).unwrap();
        editor.handle_click(p(110.0, 100.0)).unwrap();

        editor.set_mode(PlacementMode::Select);
        assert_eq!(editor.handle_click(p(105.0, 100.0)).unwrap(), ClickOutcome::Selected(Some(1)));
        assert_eq!(editor.delete_selected().unwrap(), Some(1));
        assert_eq!(editor.document().read().observers.len(), 1);
        assert_eq!(editor.delete_selected().unwrap(), None);

        assert_eq!(editor.handle_click(p(500.0, 500.0)).unwrap(), ClickOutcome::Selected(None));
        assert!(editor.selected_observer().is_none());

        editor.undo().unwrap();
        assert_eq!(editor.document().read().observers.len(), 2);
    }

    #[test]
    fn test_undo_redo() {
        let mut editor = Editor::default();
        assert!(matches!(editor.undo(), Err(PlanError::NothingToUndo)));
        assert!(matches!(editor.redo(), Err(PlanError::NothingToRedo)));

        draw_wall(&mut editor, p(0.0, 0.0), p(100.0, 0.0));
        editor.set_mode(PlacementMode::Sensor);
        editor.handle_click(p(50.0, 50.0)).unwrap();

        editor.undo().unwrap();
        assert!(editor.document().read().observers.is_empty());

        // One undo takes the wall and both of its new corners.
        editor.undo().unwrap();
        {
            let doc = editor.document();
            let plan = doc.read();
            assert!(plan.walls.is_empty());
            assert!(plan.vertices.is_empty());
        }
        assert!(matches!(editor.undo(), Err(PlanError::NothingToUndo)));
        assert!(!editor.has_unsaved_changes());

        editor.redo().unwrap();
        {
            let doc = editor.document();
            let plan = doc.read();
            assert_eq!(plan.walls.len(), 1);
            assert_eq!(plan.vertices, vec![p(0.0, 0.0), p(100.0, 0.0)]);
        }
        assert!(editor.can_redo());

        // A fresh placement drops what was left to redo.
        editor.set_mode(PlacementMode::Camera(CameraTier::One));
        editor.handle_click(p(20.0, 20.0)).unwrap();
        assert!(!editor.can_redo());
        assert!(editor.can_undo());
    }

    #[test]
    fn test_dropped_wall_start_leaves_no_corner() {
        let mut editor = Editor::default();
        editor.handle_click(p(10.0, 10.0)).unwrap();
        editor.cancel_current_operation();
        editor.handle_click(p(40.0, 40.0)).unwrap();
        editor.set_mode(PlacementMode::Sensor);

        assert!(editor.document().read().vertices.is_empty());
        assert!(!editor.can_undo());
        assert!(!editor.has_unsaved_changes());
    }

    #[test]
    fn test_second_click_snaps_to_pending_start() {
        let mut editor = Editor::default();
        draw_wall(&mut editor, p(0.0, 0.0), p(100.0, 0.0));
        editor.set_mode(PlacementMode::Wall);
        editor.handle_click(p(0.0, 100.0)).unwrap();
        // Within the vertex threshold of the uncommitted start.
        let err = editor.handle_click(p(4.0, 103.0)).unwrap_err();
        assert!(matches!(err, PlanError::ZeroLengthWall { .. }));
        assert_eq!(editor.document().read().vertices.len(), 2);
    }

    #[test]
    fn test_delete_wall_and_fixture() {
        let mut editor = Editor::default();
        draw_wall(&mut editor, p(0.0, 0.0), p(100.0, 0.0));
        draw_wall(&mut editor, p(100.0, 0.0), p(100.0, 100.0));
        editor.set_mode(PlacementMode::Window);
        editor.handle_click(p(50.0, 5.0)).unwrap();

        editor.delete_wall(0).unwrap();
        {
            let doc = editor.document();
            let plan = doc.read();
            assert_eq!(plan.walls.len(), 1);
            assert_eq!(plan.walls[0].end, p(100.0, 100.0));
            // Corners are shared and stay.
            assert_eq!(plan.vertices.len(), 3);
        }
        editor.delete_fixture(FixtureKind::Window, 0).unwrap();
        assert!(editor.document().read().windows.is_empty());

        assert!(matches!(
            editor.delete_wall(7),
            Err(PlanError::NotFound { kind: "wall", index: 7 })
        ));
        assert!(matches!(
            editor.delete_fixture(FixtureKind::Door, 0),
            Err(PlanError::NotFound { kind: "door", index: 0 })
        ));

        editor.undo().unwrap();
        editor.undo().unwrap();
        let doc = editor.document();
        let plan = doc.read();
        assert_eq!(plan.walls[0], Wall::new(p(0.0, 0.0), p(100.0, 0.0)));
        assert_eq!(plan.walls.len(), 2);
        assert_eq!(plan.windows.len(), 1);
    }

    #[test]
    fn test_concurrent_readers() {
        let mut editor = Editor::default();
        draw_wall(&mut editor, p(0.0, 0.0), p(100.0, 0.0));
        editor.set_mode(PlacementMode::Camera(CameraTier::Two));
        editor.handle_click(p(50.0, 10.0)).unwrap();

        let doc = editor.document();
        let settings = editor.settings().clone();
        let results: Vec<usize> = thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| doc.read().camera_coverage(&settings).len()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(results, vec![1; 4]);
    }

    #[test]
    fn test_save_clears_dirty_flag() {
        let mut editor = Editor::default();
        editor.set_mode(PlacementMode::Sensor);
        editor.handle_click(p(1.0, 1.0)).unwrap();
        assert!(editor.has_unsaved_changes());

        let path = std::env::temp_dir().join(format!("home_planner_editor_{}.json", std::process::id()));
        editor.save_document(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(!editor.has_unsaved_changes());
    }

    #[test]
    fn test_dirty_flag_tracks_saved_state() {
        let mut editor = Editor::default();
        editor.set_mode(PlacementMode::Sensor);
        editor.handle_click(p(1.0, 1.0)).unwrap();
        editor.handle_click(p(2.0, 2.0)).unwrap();

        let path = std::env::temp_dir().join(format!("home_planner_dirty_{}.json", std::process::id()));
        editor.save_document(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(!editor.has_unsaved_changes());

        editor.undo().unwrap();
        assert!(editor.has_unsaved_changes());
        editor.redo().unwrap();
        assert!(!editor.has_unsaved_changes());

        editor.undo().unwrap();
        editor.undo().unwrap();
        assert!(editor.has_unsaved_changes());

        // Branching off below the saved point makes it unreachable.
        editor.handle_click(p(3.0, 3.0)).unwrap();
        editor.handle_click(p(4.0, 4.0)).unwrap();
        assert!(editor.has_unsaved_changes());
    }
}
