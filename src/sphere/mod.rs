//! The hero section's particle sphere.
//!
//! Dots sit on a unit sphere in a Fibonacci spiral. Each frame rotates them
//! about Y (yaw) then X (pitch), projects with a fixed field of view, sorts
//! back to front, and yields faint links between nearby front-facing dots.
//! Nothing from a frame is kept; the dots themselves never change.

pub mod render_loop;
pub mod svg;

use self::render_loop::{Style, Surface};

use rand::Rng;
use std::f64::consts::PI;

pub const TOTAL: usize = 1800;
pub const RADIUS_FRACTION: f64 = 0.32;
pub const FOV: f64 = 1.6;
pub const YAW_PER_MS: f64 = 0.00018;
pub const PITCH_PER_MS: f64 = 0.00006;
pub const POINTER_GAIN: f64 = 0.4;

pub const LINK_STRIDE: usize = 4;
pub const LINK_MIN_Z: f64 = 0.2;
pub const LINK_DISTANCE: f64 = 28.0;
pub const LINK_ALPHA: f64 = 0.07;
pub const LINK_WIDTH: f64 = 0.4;
pub const LINK_COLOR: &str = "#22d3ee";
pub const DOT_ALPHA: f64 = 0.85;

// Weighted: cyan three times as likely as indigo
pub const PALETTE: &[&str] = &[
    "#22d3ee", "#22d3ee", "#22d3ee", "#a855f7", "#a855f7", "#818cf8",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.width / 2.0,
            y: self.height / 2.0,
        }
    }
}

/// Pointer offset from the viewport center, already scaled to radians
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    pub fn from_client(client_x: f64, client_y: f64, window: Viewport) -> Self {
        Self {
            x: (client_x / window.width - 0.5) * POINTER_GAIN,
            y: (client_y / window.height - 0.5) * POINTER_GAIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub origin: Vec3,
    pub color: &'static str,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    /// Depth after rotation, -1 (far) to 1 (near)
    pub z: f64,
    pub size: f64,
    pub color: &'static str,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub from: Point,
    pub to: Point,
    pub alpha: f64,
}

/// Evenly spread points on the unit sphere, from y = 1 down to y = -1
pub fn fibonacci_sphere(count: usize) -> Vec<Vec3> {
    let golden_angle = PI * (3.0 - 5f64.sqrt());
    let steps = count.saturating_sub(1).max(1) as f64;
    (0..count)
        .map(|i| {
            let y = 1.0 - (i as f64 / steps) * 2.0;
            let r = (1.0 - y * y).max(0.0).sqrt();
            let theta = golden_angle * i as f64;
            Vec3::new(theta.cos() * r, y, theta.sin() * r)
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Field {
    dots: Vec<Dot>,
    viewport: Viewport,
    radius: f64,
}

impl Field {
    pub fn new<R: Rng>(viewport: Viewport, rng: &mut R) -> Self {
        Self::with_count(TOTAL, viewport, rng)
    }

    pub fn with_count<R: Rng>(count: usize, viewport: Viewport, rng: &mut R) -> Self {
        let dots = fibonacci_sphere(count)
            .into_iter()
            .map(|origin| Dot {
                origin,
                color: PALETTE[rng.gen_range(0..PALETTE.len())],
                size: rng.gen::<f64>() * 1.6 + 0.5,
            })
            .collect();
        Self::from_dots(dots, viewport)
    }

    pub fn from_dots(dots: Vec<Dot>, viewport: Viewport) -> Self {
        Self {
            dots,
            viewport,
            radius: viewport.width.min(viewport.height) * RADIUS_FRACTION,
        }
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Moves the center with the canvas. The radius keeps its size from construction.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Rotation is derived from the timestamp each frame, not accumulated
    pub fn angles(ts: f64, pointer: Pointer) -> (f64, f64) {
        (ts * YAW_PER_MS + pointer.x, ts * PITCH_PER_MS + pointer.y)
    }

    /// Every dot projected for timestamp `ts` (ms), farthest first
    pub fn project(&self, ts: f64, pointer: Pointer) -> Vec<Projected> {
        let (yaw, pitch) = Self::angles(ts, pointer);
        let (sin_y, cos_y) = yaw.sin_cos();
        let (sin_x, cos_x) = pitch.sin_cos();
        let center = self.viewport.center();

        let mut projected: Vec<Projected> = self
            .dots
            .iter()
            .map(|d| {
                let Vec3 { x, y, z } = d.origin;
                let x1 = x * cos_y - z * sin_y;
                let z1 = x * sin_y + z * cos_y;
                let y1 = y * cos_x - z1 * sin_x;
                let z2 = y * sin_x + z1 * cos_x;

                let scale = FOV / (FOV + z2);
                Projected {
                    x: center.x + x1 * self.radius * scale,
                    y: center.y + y1 * self.radius * scale,
                    z: z2,
                    size: d.size * scale,
                    color: d.color,
                    alpha: 0.15 + ((z2 + 1.0) / 2.0) * 0.75,
                }
            })
            .collect();

        projected.sort_by(|a, b| a.z.total_cmp(&b.z));
        projected
    }

    pub fn frame(&self, ts: f64, pointer: Pointer) -> Frame {
        let dots = self.project(ts, pointer);
        let links = links(&dots);
        Frame {
            viewport: self.viewport,
            dots,
            links,
        }
    }
}

/// Sparse links between near-side dots closer than `LINK_DISTANCE` on screen
pub fn links(projected: &[Projected]) -> Vec<Link> {
    let mut links = Vec::new();
    for i in (0..projected.len()).step_by(LINK_STRIDE) {
        let a = &projected[i];
        if a.z < LINK_MIN_Z {
            continue;
        }
        for b in projected.iter().skip(i + 1).step_by(LINK_STRIDE) {
            if b.z < LINK_MIN_Z {
                continue;
            }
            let dist = (a.x - b.x).hypot(a.y - b.y);
            if dist < LINK_DISTANCE {
                links.push(Link {
                    from: Point { x: a.x, y: a.y },
                    to: Point { x: b.x, y: b.y },
                    alpha: (1.0 - dist / LINK_DISTANCE) * LINK_ALPHA * a.alpha,
                });
            }
        }
    }
    links
}

/// One frame's worth of draw data
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub viewport: Viewport,
    pub dots: Vec<Projected>,
    pub links: Vec<Link>,
}

impl Frame {
    pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.viewport);
        for link in &self.links {
            surface.line(
                link.from,
                link.to,
                Style {
                    color: LINK_COLOR,
                    alpha: link.alpha,
                    width: LINK_WIDTH,
                },
            );
        }
        for dot in &self.dots {
            surface.disc(
                Point { x: dot.x, y: dot.y },
                dot.size,
                Style {
                    color: dot.color,
                    alpha: dot.alpha * DOT_ALPHA,
                    width: 0.0,
                },
            );
        }
    }
}
