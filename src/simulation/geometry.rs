//! Static circuit geometry: the elliptical goal and rectangular obstacles.
//!
//! Both shapes implement [`Collidable`], which is all an entity needs to
//! resolve its collision outcome on a tick.

use std::f32::consts::TAU;

use geo::{LineString, Point, Polygon, Rect, Rotate};
use serde::{Deserialize, Serialize};

use super::error::{Result, SimulationError};
use super::vector::Vector2;

/// Number of vertices used when approximating the goal ellipse as a polygon.
const GOAL_OUTLINE_VERTICES: usize = 48;

/// A region of the circuit that can contain a point.
pub trait Collidable {
    /// Center of the shape.
    fn center(&self) -> Vector2;

    /// Full horizontal extent.
    fn width(&self) -> f32;

    /// Full vertical extent.
    fn height(&self) -> f32;

    /// Returns `true` if `point` lies inside the shape or on its boundary.
    fn contains(&self, point: &Vector2) -> bool;

    /// Polygon outline for drawing.
    fn outline(&self) -> Polygon<f32>;
}

/// Construction parameters for a [`Goal`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalSpec {
    /// Center of the ellipse.
    pub center: Vector2,
    /// Horizontal diameter.
    pub width: f32,
    /// Vertical diameter.
    pub height: f32,
}

/// Construction parameters for an [`Obstacle`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    /// Center of the rectangle.
    pub center: Vector2,
    /// Width before rotation.
    pub width: f32,
    /// Height before rotation.
    pub height: f32,
    /// Counter-clockwise rotation in degrees.
    pub angle_degrees: f32,
}

/// Elliptical target region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    center: Vector2,
    width: f32,
    height: f32,
    semi_horizontal: f32,
    semi_vertical: f32,
}

impl Goal {
    /// Creates a goal, rejecting shapes without area.
    pub fn new(spec: GoalSpec) -> Result<Self> {
        check_extents("goal", spec.width, spec.height)?;
        Ok(Self {
            center: spec.center,
            width: spec.width,
            height: spec.height,
            semi_horizontal: spec.width / 2.0,
            semi_vertical: spec.height / 2.0,
        })
    }

    /// Half of the width.
    pub fn semi_horizontal(&self) -> f32 {
        self.semi_horizontal
    }

    /// Half of the height. Used as the goal radius when scoring distance.
    pub fn semi_vertical(&self) -> f32 {
        self.semi_vertical
    }
}

impl Collidable for Goal {
    fn center(&self) -> Vector2 {
        self.center
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn contains(&self, point: &Vector2) -> bool {
        let dx = (point.x - self.center.x) / self.semi_horizontal;
        let dy = (point.y - self.center.y) / self.semi_vertical;
        dx * dx + dy * dy <= 1.0
    }

    fn outline(&self) -> Polygon<f32> {
        let ring: Vec<(f32, f32)> = (0..GOAL_OUTLINE_VERTICES)
            .map(|i| {
                let angle = TAU * i as f32 / GOAL_OUTLINE_VERTICES as f32;
                (
                    self.center.x + self.semi_horizontal * angle.cos(),
                    self.center.y + self.semi_vertical * angle.sin(),
                )
            })
            .collect();
        Polygon::new(LineString::from(ring), vec![])
    }
}

/// Rectangular region that stops an entity, optionally rotated about its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    center: Vector2,
    width: f32,
    height: f32,
    /// Rotation in radians.
    angle: f32,
}

impl Obstacle {
    /// Creates an obstacle, converting its angle from degrees to radians.
    pub fn new(spec: ObstacleSpec) -> Result<Self> {
        check_extents("obstacle", spec.width, spec.height)?;
        if !spec.angle_degrees.is_finite() {
            return Err(SimulationError::InvalidConfiguration(format!(
                "obstacle angle must be finite, got {}",
                spec.angle_degrees
            )));
        }
        Ok(Self {
            center: spec.center,
            width: spec.width,
            height: spec.height,
            angle: spec.angle_degrees.to_radians(),
        })
    }

    /// Rotation in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    fn half_extents(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

impl Collidable for Obstacle {
    fn center(&self) -> Vector2 {
        self.center
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    #[allow(clippy::float_cmp)]
    fn contains(&self, point: &Vector2) -> bool {
        let (half_w, half_h) = self.half_extents();

        if self.angle == 0.0 {
            return point.x >= self.center.x - half_w
                && point.x <= self.center.x + half_w
                && point.y >= self.center.y - half_h
                && point.y <= self.center.y + half_h;
        }

        // Undo the obstacle's orientation in its local frame.
        let local = (*point - self.center).rotate(-self.angle);
        local.x >= -half_w && local.x <= half_w && local.y >= -half_h && local.y <= half_h
    }

    fn outline(&self) -> Polygon<f32> {
        let (half_w, half_h) = self.half_extents();
        let rect = Rect::new(
            (self.center.x - half_w, self.center.y - half_h),
            (self.center.x + half_w, self.center.y + half_h),
        );
        rect.to_polygon()
            .rotate_around_point(self.angle.to_degrees(), Point::from(self.center))
    }
}

/// Goal plus ordered obstacles. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    goal: Goal,
    obstacles: Vec<Obstacle>,
}

impl Circuit {
    /// Validates and assembles a circuit.
    pub fn new(goal: GoalSpec, obstacles: &[ObstacleSpec]) -> Result<Self> {
        let goal = Goal::new(goal)?;
        let obstacles = obstacles
            .iter()
            .map(|spec| Obstacle::new(*spec))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { goal, obstacles })
    }

    /// The goal region.
    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    /// Obstacles in the order collision checks visit them.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

fn check_extents(shape: &'static str, width: f32, height: f32) -> Result<()> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::DegenerateGeometry {
            shape,
            width,
            height,
        })
    }
}
