//! Geometry of the clickable body diagram.
//!
//! Regions live in a fixed 150×420 logical box that is stretched over the reference image,
//! whatever size the image ends up rendered at. Later regions are drawn on top of earlier ones
//! and therefore win when they overlap.

use egui::{Color32, Pos2, Rect, Vec2, pos2, vec2};

use crate::model::BodyPart;

/// Size of the logical coordinate space all regions are declared in.
pub const DIAGRAM_SIZE: Vec2 = vec2(150.0, 420.0);

const CIRCLE_SEGMENTS: usize = 32;

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Circle { center: Pos2, radius: f32 },
    Rect { min: Pos2, size: Vec2 },
    Polygon { points: Vec<Pos2> },
}

impl Shape {
    pub fn contains(&self, p: Pos2) -> bool {
        match self {
            Self::Circle { center, radius } => center.distance_sq(p) <= radius * radius,
            Self::Rect { min, size } => Rect::from_min_size(*min, *size).contains(p),
            Self::Polygon { points } => polygon_contains(points, p),
        }
    }

    fn center(&self) -> Pos2 {
        match self {
            Self::Circle { center, .. } => *center,
            Self::Rect { min, size } => *min + *size / 2.0,
            Self::Polygon { points } => {
                if points.is_empty() {
                    return Pos2::ZERO;
                }
                let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
                (sum / points.len() as f32).to_pos2()
            }
        }
    }

    fn outline(&self) -> Vec<Pos2> {
        match self {
            Self::Circle { center, radius } => (0..CIRCLE_SEGMENTS)
                .map(|i| {
                    let angle = std::f32::consts::TAU * i as f32 / CIRCLE_SEGMENTS as f32;
                    *center + Vec2::angled(angle) * *radius
                })
                .collect(),
            Self::Rect { min, size } => {
                let r = Rect::from_min_size(*min, *size);
                vec![r.left_top(), r.right_top(), r.right_bottom(), r.left_bottom()]
            }
            Self::Polygon { points } => points.clone(),
        }
    }
}

// Ray casting.
fn polygon_contains(points: &[Pos2], p: Pos2) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for (i, a) in points.iter().enumerate() {
        let b = points.get(j).copied().unwrap_or(*a);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// `rotate(degrees, pivot.x, pivot.y)` as understood by SVG: positive angles turn clockwise
/// on the y-down canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    pub degrees: f32,
    pub pivot: Pos2,
}

impl Rotation {
    pub fn new(degrees: f32, pivot: Pos2) -> Self {
        Self { degrees, pivot }
    }

    pub fn apply(&self, p: Pos2) -> Pos2 {
        rotate_about(p, self.pivot, self.degrees.to_radians())
    }

    pub fn invert(&self, p: Pos2) -> Pos2 {
        rotate_about(p, self.pivot, -self.degrees.to_radians())
    }
}

fn rotate_about(p: Pos2, pivot: Pos2, radians: f32) -> Pos2 {
    let (sin, cos) = radians.sin_cos();
    let v = p - pivot;
    pivot + vec2(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub label: BodyPart,
    pub shape: Shape,
    pub rotation: Option<Rotation>,
    pub color: Color32,
}

impl Region {
    fn new(label: BodyPart, shape: Shape, color: Color32) -> Self {
        Self {
            label,
            shape,
            rotation: None,
            color,
        }
    }

    fn rotated(mut self, degrees: f32, pivot: Pos2) -> Self {
        self.rotation = Some(Rotation::new(degrees, pivot));
        self
    }

    pub fn contains(&self, p: Pos2) -> bool {
        let local = self.rotation.map_or(p, |r| r.invert(p));
        self.shape.contains(local)
    }

    /// Center of the region after rotation, in logical coordinates.
    pub fn center(&self) -> Pos2 {
        let c = self.shape.center();
        self.rotation.map_or(c, |r| r.apply(c))
    }

    /// Convex outline after rotation, in logical coordinates.
    pub fn outline(&self) -> Vec<Pos2> {
        let points = self.shape.outline();
        match self.rotation {
            Some(r) => points.into_iter().map(|p| r.apply(p)).collect(),
            None => points,
        }
    }
}

/// What a pointer landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    Region(BodyPart),
    /// Inside the diagram but on none of the labeled regions.
    Background,
    Outside,
}

#[derive(Clone, Debug)]
pub struct Diagram {
    regions: Vec<Region>,
}

impl Diagram {
    /// The fixed front-facing body layout. The patient's right side is on the viewer's left.
    pub fn body() -> Self {
        let head = Color32::from_rgba_unmultiplied(220, 40, 40, 110);
        let trunk = Color32::from_rgba_unmultiplied(40, 170, 70, 110);
        let belly = Color32::from_rgba_unmultiplied(230, 200, 40, 110);
        let pelvis = Color32::from_rgba_unmultiplied(140, 140, 140, 110);
        let limb = Color32::from_rgba_unmultiplied(50, 90, 220, 110);

        let rect = |x: f32, y: f32, w: f32, h: f32| Shape::Rect {
            min: pos2(x, y),
            size: vec2(w, h),
        };
        let poly = |pts: &[(f32, f32)]| Shape::Polygon {
            points: pts.iter().map(|&(x, y)| pos2(x, y)).collect(),
        };
        let mirror = |pts: &[(f32, f32)]| -> Vec<(f32, f32)> {
            pts.iter().map(|&(x, y)| (DIAGRAM_SIZE.x - x, y)).collect()
        };

        let right_hand = [
            (24.0, 205.0),
            (40.0, 205.0),
            (42.0, 222.0),
            (36.0, 234.0),
            (26.0, 234.0),
            (22.0, 222.0),
        ];
        let right_toe = [(44.0, 395.0), (72.0, 395.0), (74.0, 412.0), (38.0, 412.0)];

        let right_shoulder = pos2(40.0, 80.0);
        let left_shoulder = pos2(DIAGRAM_SIZE.x - 40.0, 80.0);
        let right_hip = pos2(58.0, 240.0);
        let left_hip = pos2(DIAGRAM_SIZE.x - 58.0, 240.0);
        let arm_angle = 8.0;
        let leg_angle = 2.0;

        let regions = vec![
            Region::new(
                BodyPart::Head,
                Shape::Circle {
                    center: pos2(75.0, 30.0),
                    radius: 30.0,
                },
                head,
            ),
            Region::new(BodyPart::Neck, rect(61.0, 57.0, 28.0, 18.0), limb),
            Region::new(BodyPart::Chest, rect(40.0, 75.0, 70.0, 70.0), trunk),
            Region::new(BodyPart::RightArm, rect(24.0, 80.0, 16.0, 65.0), limb)
                .rotated(arm_angle, right_shoulder),
            Region::new(BodyPart::RightForearm, rect(24.0, 145.0, 16.0, 60.0), limb)
                .rotated(arm_angle, right_shoulder),
            Region::new(BodyPart::RightHand, poly(&right_hand[..]), limb)
                .rotated(arm_angle, right_shoulder),
            Region::new(BodyPart::LeftArm, rect(110.0, 80.0, 16.0, 65.0), limb)
                .rotated(-arm_angle, left_shoulder),
            Region::new(BodyPart::LeftForearm, rect(110.0, 145.0, 16.0, 60.0), limb)
                .rotated(-arm_angle, left_shoulder),
            Region::new(BodyPart::LeftHand, poly(&mirror(&right_hand[..])), limb)
                .rotated(-arm_angle, left_shoulder),
            Region::new(BodyPart::Stomach, rect(40.0, 145.0, 70.0, 60.0), belly),
            Region::new(BodyPart::Abdomen, rect(35.0, 205.0, 80.0, 35.0), pelvis),
            Region::new(BodyPart::RightThigh, rect(42.0, 240.0, 32.0, 80.0), limb)
                .rotated(leg_angle, right_hip),
            Region::new(BodyPart::RightLeg, rect(44.0, 320.0, 28.0, 75.0), limb)
                .rotated(leg_angle, right_hip),
            Region::new(BodyPart::RightToe, poly(&right_toe[..]), limb).rotated(leg_angle, right_hip),
            Region::new(BodyPart::LeftThigh, rect(76.0, 240.0, 32.0, 80.0), limb)
                .rotated(-leg_angle, left_hip),
            Region::new(BodyPart::LeftLeg, rect(78.0, 320.0, 28.0, 75.0), limb)
                .rotated(-leg_angle, left_hip),
            Region::new(BodyPart::LeftToe, poly(&mirror(&right_toe[..])), limb)
                .rotated(-leg_angle, left_hip),
        ];

        Self { regions }
    }

    /// Regions in declaration (paint) order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Topmost region under `p`, with `p` in logical coordinates.
    pub fn hit_test(&self, p: Pos2) -> Hit {
        if !Rect::from_min_size(Pos2::ZERO, DIAGRAM_SIZE).contains(p) {
            return Hit::Outside;
        }
        self.regions
            .iter()
            .rev()
            .find(|region| region.contains(p))
            .map_or(Hit::Background, |region| Hit::Region(region.label))
    }
}

/// Maps a screen position inside `rect` into the logical diagram space.
pub fn to_logical(screen: Pos2, rect: Rect) -> Pos2 {
    let rel = (screen - rect.min) / rect.size();
    (rel * DIAGRAM_SIZE).to_pos2()
}

/// Maps a logical diagram position onto `rect` on screen.
pub fn to_screen(logical: Pos2, rect: Rect) -> Pos2 {
    rect.min + logical.to_vec2() / DIAGRAM_SIZE * rect.size()
}
