use std::error::Error;
use std::fmt;

use nalgebra::{Point2, Vector2};

use crate::consts::AU;
use crate::render::Color;

static SOLAR_SYSTEM: &str = include_str!("../solar-system.txt");

// All the immutable info about a body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyInfo {
    pub name: String,
    pub mass: f64,
    // In screen pixels, not meters
    pub radius: f32,
    pub color: Color,
    pub is_anchor: bool,
}

/// A body together with its initial conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDef {
    pub info: BodyInfo,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
}

/// Ordered list of validated body definitions. Order matters only for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    bodies: Vec<BodyDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    MissingField {
        line: usize,
        field: &'static str,
    },
    BadNumber {
        line: usize,
        field: &'static str,
        text: String,
    },
    BadColor {
        line: usize,
        text: String,
    },
    BadAnchorFlag {
        line: usize,
        text: String,
    },
    Empty,
    NonPositiveMass {
        name: String,
    },
    NonPositiveRadius {
        name: String,
    },
    NonFiniteState {
        name: String,
    },
    AnchorCount(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingField { line, field } => {
                write!(f, "line {}: missing field `{}`", line, field)
            }
            ConfigError::BadNumber { line, field, text } => {
                write!(f, "line {}: field `{}` is not a number: {:?}", line, field, text)
            }
            ConfigError::BadColor { line, text } => {
                write!(f, "line {}: expected six hex digits for color, got {:?}", line, text)
            }
            ConfigError::BadAnchorFlag { line, text } => {
                write!(f, "line {}: anchor flag must be `*` or `-`, got {:?}", line, text)
            }
            ConfigError::Empty => write!(f, "no bodies defined"),
            ConfigError::NonPositiveMass { name } => {
                write!(f, "body {} must have a positive mass", name)
            }
            ConfigError::NonPositiveRadius { name } => {
                write!(f, "body {} must have a positive radius", name)
            }
            ConfigError::NonFiniteState { name } => {
                write!(f, "body {} has a non-finite position or velocity", name)
            }
            ConfigError::AnchorCount(n) => {
                write!(f, "expected exactly one anchor body, found {}", n)
            }
        }
    }
}

impl Error for ConfigError {}

impl SystemConfig {
    pub fn new(bodies: Vec<BodyDef>) -> Result<Self, ConfigError> {
        if bodies.is_empty() {
            return Err(ConfigError::Empty);
        }

        for def in bodies.iter() {
            let info = &def.info;
            // written this way so that NaN is rejected too
            if !(info.mass > 0.0 && info.mass.is_finite()) {
                return Err(ConfigError::NonPositiveMass {
                    name: info.name.clone(),
                });
            }
            if !(info.radius > 0.0) {
                return Err(ConfigError::NonPositiveRadius {
                    name: info.name.clone(),
                });
            }
            let finite = def.position.coords.iter().all(|c| c.is_finite())
                && def.velocity.iter().all(|c| c.is_finite());
            if !finite {
                return Err(ConfigError::NonFiniteState {
                    name: info.name.clone(),
                });
            }
        }

        let num_anchors = bodies.iter().filter(|def| def.info.is_anchor).count();
        if num_anchors != 1 {
            return Err(ConfigError::AnchorCount(num_anchors));
        }

        Ok(SystemConfig { bodies })
    }

    /// The sun and the eight planets, starting on the x-axis.
    pub fn solar_system() -> Result<Self, ConfigError> {
        parse_bodies(SOLAR_SYSTEM)
    }

    pub fn bodies(&self) -> &[BodyDef] {
        &self.bodies
    }
}

/// Parses a whitespace-separated body table. The first line is a header.
///
/// Columns are: name, mass (kg), radius (px), color (hex RRGGBB), anchor flag
/// (`*` or `-`), x and y (AU), vx and vy (km/s).
pub fn parse_bodies(text: &str) -> Result<SystemConfig, ConfigError> {
    let mut bodies = vec![];

    for (idx, line) in text.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split_ascii_whitespace();

        macro_rules! next_string {
            ($field:expr) => {
                fields.next().ok_or(ConfigError::MissingField {
                    line: line_no,
                    field: $field,
                })?
            };
        }

        macro_rules! next_f64 {
            ($field:expr) => {{
                let s = next_string!($field);
                s.parse::<f64>().map_err(|_| ConfigError::BadNumber {
                    line: line_no,
                    field: $field,
                    text: s.to_owned(),
                })?
            }};
        }

        let name = next_string!("name").to_owned();
        let mass = next_f64!("mass");
        let radius = next_f64!("radius") as f32;
        let color = parse_color(next_string!("color"), line_no)?;
        let is_anchor = match next_string!("anchor") {
            "*" => true,
            "-" => false,
            other => {
                return Err(ConfigError::BadAnchorFlag {
                    line: line_no,
                    text: other.to_owned(),
                })
            }
        };
        let (x, y) = (next_f64!("x_au"), next_f64!("y_au"));
        let (vx, vy) = (next_f64!("vx_kms"), next_f64!("vy_kms"));

        bodies.push(BodyDef {
            info: BodyInfo {
                name,
                mass,
                radius,
                color,
                is_anchor,
            },
            position: Point2::new(x, y) * AU,
            velocity: Vector2::new(vx, vy) * 1000.0,
        });
    }

    SystemConfig::new(bodies)
}

fn parse_color(s: &str, line: usize) -> Result<Color, ConfigError> {
    let bad_color = || ConfigError::BadColor {
        line,
        text: s.to_owned(),
    };
    if s.len() != 6 || !s.is_ascii() {
        return Err(bad_color());
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&s[range], 16).map_err(|_| bad_color())
    };
    let r = channel(0..2)?;
    let g = channel(2..4)?;
    let b = channel(4..6)?;

    Ok(Color::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const HEADER: &str = "name mass radius color anchor x y vx vy\n";

    fn def(name: &str, mass: f64, is_anchor: bool) -> BodyDef {
        BodyDef {
            info: BodyInfo {
                name: name.to_owned(),
                mass,
                radius: 5.0,
                color: Color::new(1.0, 1.0, 1.0),
                is_anchor,
            },
            position: Point2::origin(),
            velocity: Vector2::zeros(),
        }
    }

    #[test]
    fn test_solar_system() {
        let config = SystemConfig::solar_system().unwrap();
        let bodies = config.bodies();
        let names: Vec<_> = bodies.iter().map(|d| d.info.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "SUN", "EARTH", "MARS", "MERCURY", "VENUS", "JUPITER", "SATURN", "URANUS",
                "NEPTUNE"
            ]
        );

        let sun = &bodies[0];
        assert!(sun.info.is_anchor);
        assert_relative_eq!(sun.info.mass, 1.98892e30);
        assert_eq!(sun.position, Point2::origin());

        let earth = &bodies[1];
        assert!(!earth.info.is_anchor);
        assert_relative_eq!(earth.position.x, -AU);
        assert_relative_eq!(earth.velocity.y, 29783.0);
        assert_eq!(earth.info.radius, 16.0);
        assert_relative_eq!(earth.info.color, Color::new(30.0, 144.0, 255.0) / 255.0);

        let mercury = &bodies[3];
        assert_relative_eq!(mercury.position.x, 0.387 * AU);
        assert_relative_eq!(mercury.velocity.y, -47400.0);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let text = format!(
            "{}\nA 1e30 10 ffffff * 0 0 0 0\n\n   \nB 1e24 4 000000 - 1 0 0 30\n",
            HEADER
        );
        let config = parse_bodies(&text).unwrap();
        assert_eq!(config.bodies().len(), 2);
    }

    #[test]
    fn test_parse_errors_have_line_numbers() {
        let text = format!("{}A 1e30 10 ffffff * 0 0 0\n", HEADER);
        assert_eq!(
            parse_bodies(&text),
            Err(ConfigError::MissingField {
                line: 2,
                field: "vy_kms"
            })
        );

        let text = format!("{}A 1e30 10 ffffff * 0 0 0 0\nB heavy 4 000000 - 1 0 0 30\n", HEADER);
        assert_eq!(
            parse_bodies(&text),
            Err(ConfigError::BadNumber {
                line: 3,
                field: "mass",
                text: "heavy".to_owned()
            })
        );

        let text = format!("{}A 1e30 10 fffff * 0 0 0 0\n", HEADER);
        assert_eq!(
            parse_bodies(&text),
            Err(ConfigError::BadColor {
                line: 2,
                text: "fffff".to_owned()
            })
        );

        let text = format!("{}A 1e30 10 ffffff yes 0 0 0 0\n", HEADER);
        assert_eq!(
            parse_bodies(&text),
            Err(ConfigError::BadAnchorFlag {
                line: 2,
                text: "yes".to_owned()
            })
        );
    }

    #[test]
    fn test_validation() {
        assert_eq!(SystemConfig::new(vec![]), Err(ConfigError::Empty));
        assert_eq!(
            SystemConfig::new(vec![def("A", 1.0, true), def("B", 0.0, false)]),
            Err(ConfigError::NonPositiveMass {
                name: "B".to_owned()
            })
        );
        assert_eq!(
            SystemConfig::new(vec![def("A", f64::NAN, true)]),
            Err(ConfigError::NonPositiveMass {
                name: "A".to_owned()
            })
        );
        assert_eq!(
            SystemConfig::new(vec![def("A", 1.0, false), def("B", 1.0, false)]),
            Err(ConfigError::AnchorCount(0))
        );
        assert_eq!(
            SystemConfig::new(vec![def("A", 1.0, true), def("B", 1.0, true)]),
            Err(ConfigError::AnchorCount(2))
        );

        let mut drifting = def("B", 1.0, false);
        drifting.velocity.x = f64::INFINITY;
        assert_eq!(
            SystemConfig::new(vec![def("A", 1.0, true), drifting]),
            Err(ConfigError::NonFiniteState {
                name: "B".to_owned()
            })
        );

        assert!(SystemConfig::new(vec![def("A", 1.0, true), def("B", 1.0, false)]).is_ok());
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::BadAnchorFlag {
            line: 4,
            text: "?".to_owned(),
        };
        assert_eq!(err.to_string(), "line 4: anchor flag must be `*` or `-`, got \"?\"");
        assert_eq!(
            ConfigError::AnchorCount(3).to_string(),
            "expected exactly one anchor body, found 3"
        );
    }
}
