//! Stylized continent outlines drawn under the map markers
//!
//! Outlines use a tiny subset of SVG path data: `M x,y`, any number of
//! quadratic segments `Q cx,cy x,y`, and a closing `Z`. They are parsed once
//! and sampled into closed polylines in content space.

use thiserror::Error;

use super::geometry::Point;

/// Samples per quadratic segment when flattening
pub const SAMPLES_PER_SEGMENT: usize = 12;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("path must start with M")]
    MissingMove,
    #[error("unsupported command {0:?}")]
    UnsupportedCommand(String),
    #[error("expected a coordinate pair after {command}, got {found:?}")]
    BadCoordinate { command: char, found: String },
    #[error("path is not closed with Z")]
    NotClosed,
    #[error("path has no segments")]
    Empty,
}

/// One quadratic Bézier segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadSegment {
    pub control: Point,
    pub to: Point,
}

/// A closed outline: start point plus quadratic segments
#[derive(Clone, Debug, PartialEq)]
pub struct QuadPath {
    pub start: Point,
    pub segments: Vec<QuadSegment>,
}

impl QuadPath {
    /// Parse `M x,y Q cx,cy x,y ... Z`. Commas and whitespace both separate.
    pub fn parse(data: &str) -> Result<Self, PathError> {
        let normalized = data.replace(',', " ");
        let mut tokens = split_commands(&normalized).into_iter();

        let start = match tokens.next() {
            Some(token) if token.starts_with('M') => {
                coordinate(&token[1..], 'M')?
            }
            _ => return Err(PathError::MissingMove),
        };

        let mut segments = Vec::new();
        let mut closed = false;
        for token in tokens {
            if closed {
                return Err(PathError::UnsupportedCommand(token));
            }
            match token.chars().next() {
                Some('Q') => {
                    let numbers = numbers(&token[1..], 'Q')?;
                    if numbers.len() != 4 {
                        return Err(PathError::BadCoordinate {
                            command: 'Q',
                            found: token[1..].trim().to_string(),
                        });
                    }
                    segments.push(QuadSegment {
                        control: Point::new(numbers[0], numbers[1]),
                        to: Point::new(numbers[2], numbers[3]),
                    });
                }
                Some('Z') if token[1..].trim().is_empty() => closed = true,
                _ => return Err(PathError::UnsupportedCommand(token)),
            }
        }

        if !closed {
            return Err(PathError::NotClosed);
        }
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self { start, segments })
    }

    /// Flatten into a polyline (closing edge implied).
    pub fn sample(&self, samples_per_segment: usize) -> Vec<Point> {
        let n = samples_per_segment.max(1);
        let mut points = Vec::with_capacity(1 + self.segments.len() * n);
        points.push(self.start);
        let mut from = self.start;
        for segment in &self.segments {
            for i in 1..=n {
                let t = i as f32 / n as f32;
                points.push(quad_point(from, segment.control, segment.to, t));
            }
            from = segment.to;
        }
        // a trailing segment back to the start duplicates the first point
        if points.len() > 1 && points.last() == points.first() {
            points.pop();
        }
        points
    }
}

/// Point at `t` on the quadratic curve from `p0` via `c` to `p1`
#[inline]
pub fn quad_point(p0: Point, c: Point, p1: Point, t: f32) -> Point {
    let omt = 1.0 - t;
    p0 * (omt * omt) + c * (2.0 * omt * t) + p1 * (t * t)
}

fn split_commands(data: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for ch in data.chars() {
        if ch.is_ascii_alphabetic() {
            tokens.push(ch.to_string());
        } else if let Some(last) = tokens.last_mut() {
            last.push(ch);
        } else if !ch.is_whitespace() {
            // numbers before the first command
            tokens.push(ch.to_string());
        }
    }
    tokens.into_iter().map(|t| t.trim().to_string()).collect()
}

fn numbers(body: &str, command: char) -> Result<Vec<f32>, PathError> {
    body.split_whitespace()
        .map(|n| {
            n.parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| PathError::BadCoordinate {
                    command,
                    found: n.to_string(),
                })
        })
        .collect()
}

fn coordinate(body: &str, command: char) -> Result<Point, PathError> {
    match numbers(body, command)?.as_slice() {
        [x, y] => Ok(Point::new(*x, *y)),
        _ => Err(PathError::BadCoordinate {
            command,
            found: body.trim().to_string(),
        }),
    }
}

/// A named landmass made of one or more closed outlines
#[derive(Clone, Debug)]
pub struct Continent {
    pub name: &'static str,
    pub paths: Vec<QuadPath>,
}

const CONTINENT_PATHS: &[(&str, &[&str])] = &[
    (
        "North America",
        &[
            "M150,120 Q200,100 250,140 Q280,180 220,220 Q180,200 150,180 Z",
            "M100,80 Q130,60 160,90 Q140,120 100,100 Z",
        ],
    ),
    (
        "South America",
        &["M220,250 Q260,220 300,280 Q270,320 230,300 Q200,280 220,250 Z"],
    ),
    (
        "Europe",
        &[
            "M400,120 Q450,100 480,140 Q460,180 420,160 Q400,140 400,120 Z",
            "M420,100 Q440,90 460,110 Q450,130 420,120 Z",
        ],
    ),
    (
        "Africa",
        &["M420,180 Q480,150 520,200 Q500,260 430,240 Q400,220 420,180 Z"],
    ),
    (
        "Asia",
        &[
            "M480,120 Q580,100 650,160 Q620,220 550,200 Q500,180 480,120 Z",
            "M520,80 Q560,70 590,90 Q580,110 540,100 Z",
        ],
    ),
    (
        "Australia",
        &["M620,280 Q660,260 680,300 Q650,320 620,310 Q600,290 620,280 Z"],
    ),
];

/// Built-in continent outlines
pub fn world_outlines() -> Result<Vec<Continent>, PathError> {
    CONTINENT_PATHS
        .iter()
        .map(|&(name, paths)| -> Result<Continent, PathError> {
            Ok(Continent {
                name,
                paths: paths
                    .iter()
                    .map(|d| QuadPath::parse(d))
                    .collect::<Result<_, _>>()?,
            })
        })
        .collect()
}
