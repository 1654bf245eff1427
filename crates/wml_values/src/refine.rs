//! Recognisers for the specialised WML value shapes.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValueError;

lazy_static! {
    static ref NUMBER: Regex = Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)$").unwrap();
    static ref PROGRESSIVE_SEGMENT: Regex = Regex::new(r"^([^~:]+)(?:~([^~:]+))?(?::([0-9]+))?$").unwrap();
    static ref PATH_BODY: Regex = Regex::new(r#"^[^\s~,(){}"]+$"#).unwrap();
    static ref FILE_EXTENSION: Regex = Regex::new(r"\.[A-Za-z][A-Za-z0-9]{1,4}$").unwrap();
    static ref FUNCTION_HEAD: Regex = Regex::new(r"^~([A-Z][A-Z0-9_]*)\(").unwrap();
}

// ============================================================================
// Directions
// ============================================================================

/// A hex map direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "n",
            Direction::NorthEast => "ne",
            Direction::SouthEast => "se",
            Direction::South => "s",
            Direction::SouthWest => "sw",
            Direction::NorthWest => "nw",
        }
    }
}

impl FromStr for Direction {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "n" => Direction::North,
            "ne" => Direction::NorthEast,
            "se" => Direction::SouthEast,
            "s" => Direction::South,
            "sw" => Direction::SouthWest,
            "nw" => Direction::NorthWest,
            _ => return Err(ValueError::InvalidDirection(s.to_string())),
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `n,ne,se`: a comma list of directions.
pub fn parse_directions(text: &str) -> Result<Vec<Direction>, ValueError> {
    let items = parse_list(text);
    if items.is_empty() {
        return Err(ValueError::Empty);
    }
    items.iter().map(|item| item.parse()).collect()
}

// ============================================================================
// Lists
// ============================================================================

/// Split a comma list, trimming items and dropping empty ones.
pub fn parse_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Progressive values
// ============================================================================

/// One `start[~end][:duration]` step of an animation progression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressiveSegment {
    pub start: String,
    pub end: Option<String>,
    pub duration: Option<u32>,
}

/// `0~100:200,100~0:200`: comma separated progressive segments.
pub fn parse_progressive(text: &str) -> Result<Vec<ProgressiveSegment>, ValueError> {
    if text.trim().is_empty() {
        return Err(ValueError::Empty);
    }
    text.split(',').map(parse_progressive_segment).collect()
}

fn parse_progressive_segment(segment: &str) -> Result<ProgressiveSegment, ValueError> {
    let invalid = || ValueError::InvalidProgressive(segment.trim().to_string());
    let captures = PROGRESSIVE_SEGMENT.captures(segment.trim()).ok_or_else(invalid)?;

    let start = captures.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
    if start.is_empty() {
        return Err(invalid());
    }
    let end = match captures.get(2).map(|m| m.as_str().trim()) {
        Some("") => return Err(invalid()),
        other => other.map(str::to_string),
    };
    let duration = match captures.get(3) {
        Some(m) => Some(m.as_str().parse::<u32>().map_err(|_| invalid())?),
        None => None,
    };
    Ok(ProgressiveSegment {
        start: start.to_string(),
        end,
        duration,
    })
}

// ============================================================================
// Image paths
// ============================================================================

/// `~NAME(args)` suffix of an image path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFunction {
    pub name: String,
    /// Raw text between the parentheses.
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePath {
    pub path: String,
    pub functions: Vec<ImageFunction>,
}

impl ImagePath {
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }

    pub fn extension(&self) -> Option<&str> {
        let file = self.path.rsplit('/').next()?;
        let (stem, ext) = file.rsplit_once('.')?;
        (!stem.is_empty() && !ext.is_empty()).then_some(ext)
    }
}

/// `units/elves/archer.png~FL()~RC(magenta>red)`: a path followed by any
/// number of image path functions. Arguments may nest parentheses.
pub fn parse_path(text: &str) -> Result<ImagePath, ValueError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValueError::Empty);
    }
    let invalid = || ValueError::InvalidPath(text.to_string());

    let split = text.find('~').unwrap_or(text.len());
    let (path, mut rest) = text.split_at(split);
    if !PATH_BODY.is_match(path) {
        return Err(invalid());
    }

    let mut functions = Vec::new();
    while !rest.is_empty() {
        let head = FUNCTION_HEAD.captures(rest).ok_or_else(invalid)?;
        let name = head.get(1).map(|m| m.as_str()).unwrap_or_default();
        let open = head.get(0).map(|m| m.end()).unwrap_or_default();
        let close = matching_paren(rest, open).ok_or_else(invalid)?;
        functions.push(ImageFunction {
            name: name.to_string(),
            arguments: rest[open..close].to_string(),
        });
        rest = &rest[close + 1..];
    }

    Ok(ImagePath {
        path: path.to_string(),
        functions,
    })
}

/// Index of the `)` closing the parenthesis opened just before `from`.
fn matching_paren(text: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (i, b) in text.bytes().enumerate().skip(from) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn looks_like_path(text: &str) -> bool {
    let path = text.split('~').next().unwrap_or_default();
    path.contains('/') || FILE_EXTENSION.is_match(path)
}

// ============================================================================
// Classification
// ============================================================================

/// The most specific shape a value text has.
#[derive(Debug, Clone, PartialEq)]
pub enum RefinedValue {
    Empty,
    Boolean(bool),
    Number(f64),
    Directions(Vec<Direction>),
    Path(ImagePath),
    Progressive(Vec<ProgressiveSegment>),
    List(Vec<String>),
    Text(String),
}

/// Pick the most specific shape for `text`. Shapes are tried from the
/// narrowest to the widest; plain text always matches.
pub fn classify(text: &str) -> RefinedValue {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return RefinedValue::Empty;
    }
    match trimmed {
        "yes" | "true" => return RefinedValue::Boolean(true),
        "no" | "false" => return RefinedValue::Boolean(false),
        _ => {}
    }
    if NUMBER.is_match(trimmed) {
        if let Ok(number) = trimmed.parse::<f64>() {
            return RefinedValue::Number(number);
        }
    }
    if let Ok(directions) = parse_directions(trimmed) {
        return RefinedValue::Directions(directions);
    }
    if looks_like_path(trimmed) {
        if let Ok(path) = parse_path(trimmed) {
            return RefinedValue::Path(path);
        }
    }
    if trimmed.contains(['~', ':']) {
        if let Ok(segments) = parse_progressive(trimmed) {
            return RefinedValue::Progressive(segments);
        }
    }
    if trimmed.contains(',') {
        return RefinedValue::List(parse_list(trimmed));
    }
    RefinedValue::Text(text.to_string())
}
