// src/editor/commands.rs

use crate::document::Floorplan;
use crate::error::{PlanError, Result};
use crate::plan::{Fixture, FixtureKind, Observer, Wall};
use crate::utils::Point2D;

pub trait Command {
    fn execute(&mut self, document: &mut Floorplan) -> Result<()>;
    fn unexecute(&mut self, document: &mut Floorplan) -> Result<()>;
    fn undo(&mut self, document: &mut Floorplan) -> Result<()> {
        self.unexecute(document)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CommandType {
    AddVertex {
        point: Point2D,
        vertex_id: Option<usize>,
    },

    AddWall {
        wall: Wall,
        wall_id: Option<usize>,
    },
    DeleteWall {
        wall_id: usize,
        wall: Option<Wall>,
    },

    AddFixture {
        kind: FixtureKind,
        fixture: Fixture,
        fixture_id: Option<usize>,
    },
    DeleteFixture {
        kind: FixtureKind,
        fixture_id: usize,
        fixture: Option<Fixture>,
    },

    AddObserver {
        observer: Observer,
        observer_id: Option<usize>,
    },
    DeleteObserver {
        observer_id: usize,
        observer: Option<Observer>,
    },

    BatchCommand { commands: Vec<CommandType> },
}

impl CommandType {
    pub fn add_vertex(point: Point2D) -> Self {
        CommandType::AddVertex { point, vertex_id: None }
    }

    pub fn add_wall(wall: Wall) -> Self {
        CommandType::AddWall { wall, wall_id: None }
    }

    pub fn add_fixture(kind: FixtureKind, fixture: Fixture) -> Self {
        CommandType::AddFixture {
            kind,
            fixture,
            fixture_id: None,
        }
    }

    pub fn add_observer(observer: Observer) -> Self {
        CommandType::AddObserver {
            observer,
            observer_id: None,
        }
    }

    pub fn delete_wall(wall_id: usize) -> Self {
        CommandType::DeleteWall { wall_id, wall: None }
    }

    pub fn delete_fixture(kind: FixtureKind, fixture_id: usize) -> Self {
        CommandType::DeleteFixture {
            kind,
            fixture_id,
            fixture: None,
        }
    }

    pub fn delete_observer(observer_id: usize) -> Self {
        CommandType::DeleteObserver {
            observer_id,
            observer: None,
        }
    }
}

fn missing(kind: &'static str, index: usize) -> PlanError {
    PlanError::NotFound { kind, index }
}

impl Command for CommandType {
    fn execute(&mut self, document: &mut Floorplan) -> Result<()> {
        match self {
            CommandType::BatchCommand { commands } => {
                for command in commands {
                    command.execute(document)?;
                }
                Ok(())
            }
            CommandType::AddVertex { point, vertex_id } => {
                *vertex_id = Some(document.add_vertex(*point));
                Ok(())
            }
            CommandType::AddWall { wall, wall_id } => {
                *wall_id = Some(document.add_wall(*wall)?);
                Ok(())
            }
            CommandType::DeleteWall { wall_id, wall } => {
                *wall = Some(document.remove_wall(*wall_id).ok_or_else(|| missing("wall", *wall_id))?);
                Ok(())
            }
            CommandType::AddFixture {
                kind,
                fixture,
                fixture_id,
            } => {
                *fixture_id = Some(document.add_fixture(*kind, *fixture));
                Ok(())
            }
            CommandType::DeleteFixture { kind, fixture_id, fixture } => {
                let removed = document
                    .remove_fixture(*kind, *fixture_id)
                    .ok_or_else(|| missing(kind.name(), *fixture_id))?;
                *fixture = Some(removed);
                Ok(())
            }
            CommandType::AddObserver {
                observer,
                observer_id,
            } => {
                *observer_id = Some(document.add_observer(*observer));
                Ok(())
            }
            CommandType::DeleteObserver { observer_id, observer } => {
                let removed = document
                    .remove_observer(*observer_id)
                    .ok_or_else(|| missing("observer", *observer_id))?;
                *observer = Some(removed);
                Ok(())
            }
        }
    }

    fn unexecute(&mut self, document: &mut Floorplan) -> Result<()> {
        match self {
            CommandType::BatchCommand { commands } => {
                for command in commands.iter_mut().rev() {
                    command.unexecute(document)?;
                }
                Ok(())
            }
            CommandType::AddVertex { vertex_id, .. } => {
                let id = vertex_id.ok_or_else(|| missing("vertex", 0))?;
                document.remove_vertex(id).ok_or_else(|| missing("vertex", id))?;
                Ok(())
            }
            CommandType::AddWall { wall_id, .. } => {
                let id = wall_id.ok_or_else(|| missing("wall", 0))?;
                document.remove_wall(id).ok_or_else(|| missing("wall", id))?;
                Ok(())
            }
            CommandType::DeleteWall { wall_id, wall } => {
                let w = wall.ok_or_else(|| missing("wall", *wall_id))?;
                document.insert_wall(*wall_id, w)
            }
            CommandType::AddFixture { kind, fixture_id, .. } => {
                let id = fixture_id.ok_or_else(|| missing(kind.name(), 0))?;
                document.remove_fixture(*kind, id).ok_or_else(|| missing(kind.name(), id))?;
                Ok(())
            }
            CommandType::DeleteFixture { kind, fixture_id, fixture } => {
                let f = fixture.ok_or_else(|| missing(kind.name(), *fixture_id))?;
                document.insert_fixture(*kind, *fixture_id, f)
            }
            CommandType::AddObserver { observer_id, .. } => {
                let id = observer_id.ok_or_else(|| missing("observer", 0))?;
                document.remove_observer(id).ok_or_else(|| missing("observer", id))?;
                Ok(())
            }
            CommandType::DeleteObserver { observer_id, observer } => {
                let o = observer.ok_or_else(|| missing("observer", *observer_id))?;
                document.insert_observer(*observer_id, o)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{CameraTier, ObserverKind};

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    #[test]
    fn test_add_wall_round_trip() {
        let mut plan = Floorplan::new();
        let mut cmd = CommandType::add_wall(Wall::new(p(0.0, 0.0), p(50.0, 0.0)));
        cmd.execute(&mut plan).unwrap();
        assert_eq!(plan.walls.len(), 1);
        assert!(matches!(cmd, CommandType::AddWall { wall_id: Some(0), .. }));
        cmd.unexecute(&mut plan).unwrap();
        assert!(plan.walls.is_empty());
    }

    #[test]
    fn test_delete_observer_restores_position() {
        let mut plan = Floorplan::new();
        let cam = Observer::new(p(1.0, 1.0), ObserverKind::Camera(CameraTier::One), 10.0);
        let sensor = Observer::new(p(2.0, 2.0), ObserverKind::Sensor, 0.0);
        plan.add_observer(cam);
        plan.add_observer(sensor);

        let mut cmd = CommandType::delete_observer(0);
        cmd.execute(&mut plan).unwrap();
        assert_eq!(plan.observers, vec![sensor]);
        cmd.unexecute(&mut plan).unwrap();
        assert_eq!(plan.observers, vec![cam, sensor]);
    }

    #[test]
    fn test_delete_missing_fails() {
        let mut plan = Floorplan::new();
        let mut cmd = CommandType::DeleteFixture {
            kind: FixtureKind::Window,
            fixture_id: 3,
            fixture: None,
        };
        let err = cmd.execute(&mut plan).unwrap_err();
        assert!(matches!(err, PlanError::NotFound { kind: "window", index: 3 }));
    }

    #[test]
    fn test_unexecute_before_execute_fails() {
        let mut plan = Floorplan::new();
        let mut cmd = CommandType::add_vertex(p(0.0, 0.0));
        assert!(cmd.unexecute(&mut plan).is_err());
    }

    #[test]
    fn test_batch_undoes_in_reverse() {
        let mut plan = Floorplan::new();
        plan.add_vertex(p(0.0, 0.0));
        let mut batch = CommandType::BatchCommand {
            commands: vec![
                CommandType::add_vertex(p(40.0, 0.0)),
                CommandType::add_wall(Wall::new(p(0.0, 0.0), p(40.0, 0.0))),
            ],
        };
        batch.execute(&mut plan).unwrap();
        assert_eq!(plan.vertices.len(), 2);
        assert_eq!(plan.walls.len(), 1);

        batch.unexecute(&mut plan).unwrap();
        assert_eq!(plan.vertices, vec![p(0.0, 0.0)]);
        assert!(plan.walls.is_empty());
    }

    #[test]
    fn test_undo_reverts_fixture() {
        let mut plan = Floorplan::new();
        let mut cmd = CommandType::add_fixture(FixtureKind::Door, Fixture::new(p(5.0, 0.0), 0.0));
        cmd.execute(&mut plan).unwrap();
        assert_eq!(plan.doors.len(), 1);
        cmd.undo(&mut plan).unwrap();
        assert!(plan.doors.is_empty());
    }
}
