// src/document/floorplan.rs

use std::fs;
use std::path::Path;

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::PlannerSettings;
use crate::error::{PlanError, Result};
use crate::plan::{CameraTier, Fixture, FixtureKind, Observer, ObserverKind, Template, Wall};
use crate::sight::{cast_fan_visibility, cast_visibility_polygon, is_point_visible, FanRay};
use crate::utils::util::polygon_area;
use crate::utils::{Line2D, Point2D};

/// How many of each product a plan uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProductCounts {
    pub camera1: usize,
    pub camera2: usize,
    pub camera3: usize,
    pub sensor: usize,
}

impl ProductCounts {
    pub fn get(&self, kind: ObserverKind) -> usize {
        match kind {
            ObserverKind::Camera(CameraTier::One) => self.camera1,
            ObserverKind::Camera(CameraTier::Two) => self.camera2,
            ObserverKind::Camera(CameraTier::Three) => self.camera3,
            ObserverKind::Sensor => self.sensor,
        }
    }

    pub fn total(&self) -> usize {
        self.camera1 + self.camera2 + self.camera3 + self.sensor
    }
}

/// Field of view of one camera against the plan's walls.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraCoverage {
    /// Index into `Floorplan::observers`.
    pub observer: usize,
    pub kind: ObserverKind,
    pub position: Point2D,
    pub radius: f64,
    /// Dense visibility boundary, in sampling order.
    pub polygon: Vec<Point2D>,
    pub fan: Vec<FanRay>,
    /// Area enclosed by `polygon`.
    pub area: f64,
}

impl CameraCoverage {
    pub fn visible_fan_rays(&self) -> usize {
        self.fan.iter().filter(|ray| ray.visible).count()
    }
}

/// The whole plan: traced walls, the corners they were snapped to, fixtures
/// and observers.
///
/// Walls and observers are append-only during editing; removal goes through
/// undo or explicit deletion in the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Floorplan {
    pub template: Option<Template>,
    #[serde(with = "vertex_list")]
    pub vertices: Vec<Point2D>,
    pub walls: Vec<Wall>,
    pub doors: Vec<Fixture>,
    pub windows: Vec<Fixture>,
    #[serde(rename = "items")]
    pub observers: Vec<Observer>,
}

impl Floorplan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(template: Template) -> Self {
        Self {
            template: Some(template),
            ..Self::default()
        }
    }

    // --- Geometry mutation methods ---

    /// Adds a corner and returns its index.
    pub fn add_vertex(&mut self, point: Point2D) -> usize {
        self.vertices.push(point);
        self.vertices.len() - 1
    }

    pub fn remove_vertex(&mut self, vertex_id: usize) -> Option<Point2D> {
        (vertex_id < self.vertices.len()).then(|| self.vertices.remove(vertex_id))
    }

    /// Adds a wall and returns its index. Zero-length walls are rejected.
    pub fn add_wall(&mut self, wall: Wall) -> Result<usize> {
        if wall.is_zero_length() {
            return Err(PlanError::ZeroLengthWall {
                x: wall.start.x,
                y: wall.start.y,
            });
        }
        self.walls.push(wall);
        Ok(self.walls.len() - 1)
    }

    pub fn remove_wall(&mut self, wall_id: usize) -> Option<Wall> {
        (wall_id < self.walls.len()).then(|| self.walls.remove(wall_id))
    }

    /// Puts a wall back at `wall_id`, shifting later ones up.
    pub fn insert_wall(&mut self, wall_id: usize, wall: Wall) -> Result<()> {
        if wall_id > self.walls.len() {
            return Err(PlanError::NotFound {
                kind: "wall",
                index: wall_id,
            });
        }
        self.walls.insert(wall_id, wall);
        Ok(())
    }

    pub fn fixtures(&self, kind: FixtureKind) -> &[Fixture] {
        match kind {
            FixtureKind::Door => &self.doors,
            FixtureKind::Window => &self.windows,
        }
    }

    fn fixtures_mut(&mut self, kind: FixtureKind) -> &mut Vec<Fixture> {
        match kind {
            FixtureKind::Door => &mut self.doors,
            FixtureKind::Window => &mut self.windows,
        }
    }

    pub fn add_fixture(&mut self, kind: FixtureKind, fixture: Fixture) -> usize {
        let list = self.fixtures_mut(kind);
        list.push(fixture);
        list.len() - 1
    }

    pub fn remove_fixture(&mut self, kind: FixtureKind, fixture_id: usize) -> Option<Fixture> {
        let list = self.fixtures_mut(kind);
        (fixture_id < list.len()).then(|| list.remove(fixture_id))
    }

    pub fn insert_fixture(&mut self, kind: FixtureKind, fixture_id: usize, fixture: Fixture) -> Result<()> {
        let list = self.fixtures_mut(kind);
        if fixture_id > list.len() {
            return Err(PlanError::NotFound {
                kind: kind.name(),
                index: fixture_id,
            });
        }
        list.insert(fixture_id, fixture);
        Ok(())
    }

    pub fn add_observer(&mut self, observer: Observer) -> usize {
        self.observers.push(observer);
        self.observers.len() - 1
    }

    /// Puts an observer back at `observer_id`, shifting later ones up.
    pub fn insert_observer(&mut self, observer_id: usize, observer: Observer) -> Result<()> {
        if observer_id > self.observers.len() {
            return Err(PlanError::NotFound {
                kind: "observer",
                index: observer_id,
            });
        }
        self.observers.insert(observer_id, observer);
        Ok(())
    }

    pub fn remove_observer(&mut self, observer_id: usize) -> Option<Observer> {
        (observer_id < self.observers.len()).then(|| self.observers.remove(observer_id))
    }

    // --- Queries ---

    /// Walls as engine segments, in wall order.
    pub fn wall_segments(&self) -> Vec<Line2D> {
        self.walls.iter().map(Wall::segment).collect()
    }

    /// The most recently placed observer whose square hit box around
    /// `point` (half-width `tolerance`) contains it.
    pub fn observer_at(&self, point: Point2D, tolerance: f64) -> Option<usize> {
        self.observers.iter().rposition(|o| {
            (o.position.x - point.x).abs() < tolerance && (o.position.y - point.y).abs() < tolerance
        })
    }

    pub fn product_counts(&self) -> ProductCounts {
        let mut counts = ProductCounts::default();
        for observer in &self.observers {
            match observer.kind {
                ObserverKind::Camera(CameraTier::One) => counts.camera1 += 1,
                ObserverKind::Camera(CameraTier::Two) => counts.camera2 += 1,
                ObserverKind::Camera(CameraTier::Three) => counts.camera3 += 1,
                ObserverKind::Sensor => counts.sensor += 1,
            }
        }
        counts
    }

    /// Visibility polygon and fan for every camera, in observer order.
    /// Sensors are skipped.
    pub fn camera_coverage(&self, settings: &PlannerSettings) -> Vec<CameraCoverage> {
        let segments = self.wall_segments();
        self.observers
            .par_iter()
            .enumerate()
            .filter(|(_, observer)| observer.is_camera())
            .map(|(idx, observer)| {
                let polygon = cast_visibility_polygon(
                    observer.position,
                    observer.radius,
                    &segments,
                    settings.polygon_samples,
                );
                let fan = cast_fan_visibility(
                    observer.position,
                    observer.radius,
                    &segments,
                    settings.fan_samples,
                    settings.fov_inverted,
                );
                let outline: Vec<(f64, f64)> = polygon.iter().map(|p| (p.x, p.y)).collect();
                CameraCoverage {
                    observer: idx,
                    kind: observer.kind,
                    position: observer.position,
                    radius: observer.radius,
                    area: polygon_area(&outline),
                    polygon,
                    fan,
                }
            })
            .collect()
    }

    /// Doors and windows a camera can see: within its radius, with no wall
    /// crossing the line of sight. A fixture's own wall never hides it.
    pub fn fixtures_in_view(&self, observer_id: usize) -> Result<Vec<(FixtureKind, usize)>> {
        let observer = self.observers.get(observer_id).ok_or(PlanError::NotFound {
            kind: "observer",
            index: observer_id,
        })?;
        if !observer.is_camera() {
            return Ok(Vec::new());
        }

        let segments = self.wall_segments();
        let mut seen = Vec::new();
        for kind in [FixtureKind::Door, FixtureKind::Window] {
            for (idx, fixture) in self.fixtures(kind).iter().enumerate() {
                if is_point_visible(observer.position, observer.radius, fixture.position, &segments) {
                    seen.push((kind, idx));
                }
            }
        }
        Ok(seen)
    }

    // --- Persistence ---

    /// Parses a layout. Missing corner lists are rebuilt from wall endpoints.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut plan: Floorplan = serde_json::from_str(json)?;
        if plan.vertices.is_empty() {
            plan.rebuild_vertices();
        }
        Ok(plan)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let plan = Self::from_json(&fs::read_to_string(path)?)?;
        info!(
            "Loaded floorplan {} ({} walls, {} observers)",
            path.display(),
            plan.walls.len(),
            plan.observers.len()
        );
        Ok(plan)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!("Saved floorplan to {}", path.display());
        Ok(())
    }

    fn rebuild_vertices(&mut self) {
        for wall in &self.walls {
            for point in [wall.start, wall.end] {
                if !self.vertices.contains(&point) {
                    self.vertices.push(point);
                }
            }
        }
        debug!("Rebuilt {} vertices from walls", self.vertices.len());
    }
}

/// Corners are stored as `[[x, y], ...]`.
mod vertex_list {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::utils::Point2D;

    pub fn serialize<S: Serializer>(points: &[Point2D], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(points.iter().map(|p| [p.x, p.y]))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point2D>, D::Error> {
        let raw = Vec::<[f64; 2]>::deserialize(deserializer)?;
        Ok(raw.into_iter().map(Point2D::from).collect())
    }
}
