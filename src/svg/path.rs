//! Path data (`d` attribute) parsing and compaction.
//!
//! Segments are normalised to absolute coordinates on parse. Serializing
//! picks, per segment, whichever of the absolute or relative form is
//! shorter, turns axis-aligned lines into `H`/`V` and drops repeated
//! command letters.

use super::number::{format, push_number, round};

/// One absolute path segment. `cmd` is always uppercase.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub cmd: char,
    pub args: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    pub segments: Vec<Segment>,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    fn point(x: f64, y: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }
}

fn arg_count(cmd: char) -> Option<usize> {
    match cmd.to_ascii_uppercase() {
        'M' | 'L' | 'T' => Some(2),
        'H' | 'V' => Some(1),
        'C' => Some(6),
        'S' | 'Q' => Some(4),
        'A' => Some(7),
        'Z' => Some(0),
        _ => None,
    }
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn skip_separators(&mut self) {
        while self.pos < self.bytes.len()
            && (self.bytes[self.pos].is_ascii_whitespace() || self.bytes[self.pos] == b',')
        {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn number(&mut self) -> Option<f64> {
        self.skip_separators();
        let start = self.pos;
        if matches!(self.peek(), Some(b'+') | Some(b'-')) {
            self.pos += 1;
        }
        let mut seen_dot = false;
        let mut seen_digit = false;
        while let Some(c) = self.peek() {
            match c {
                b'0'..=b'9' => seen_digit = true,
                b'.' if !seen_dot => seen_dot = true,
                _ => break,
            }
            self.pos += 1;
        }
        if !seen_digit {
            self.pos = start;
            return None;
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            if matches!(self.peek(), Some(b'0'..=b'9')) {
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
            } else {
                self.pos = mark;
            }
        }
        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()?
            .parse()
            .ok()
    }

    /// Arc flags may be written without separators (`a1 1 0 00 5 5`).
    fn flag(&mut self) -> Option<f64> {
        self.skip_separators();
        match self.peek()? {
            b'0' => {
                self.pos += 1;
                Some(0.0)
            }
            b'1' => {
                self.pos += 1;
                Some(1.0)
            }
            _ => None,
        }
    }
}

impl PathData {
    /// Parse path data into absolute segments.
    pub fn parse(d: &str) -> Result<Self, String> {
        let mut scanner = Scanner {
            bytes: d.as_bytes(),
            pos: 0,
        };
        let mut segments = Vec::new();
        let (mut x, mut y) = (0.0, 0.0);
        let (mut start_x, mut start_y) = (0.0, 0.0);
        let mut cmd: Option<char> = None;

        loop {
            scanner.skip_separators();
            let Some(next) = scanner.peek() else { break };

            if next.is_ascii_alphabetic() {
                let letter = next as char;
                if arg_count(letter).is_none() {
                    return Err(format!("unknown path command `{}`", letter));
                }
                scanner.pos += 1;
                cmd = Some(letter);
            } else if cmd.is_none() {
                return Err("path data must start with a command".to_string());
            }

            let Some(letter) = cmd else { break };
            let count = arg_count(letter).unwrap_or(0);
            let mut args = Vec::with_capacity(count);
            for i in 0..count {
                let value = if letter.to_ascii_uppercase() == 'A' && (i == 3 || i == 4) {
                    scanner.flag()
                } else {
                    scanner.number()
                };
                match value {
                    Some(v) => args.push(v),
                    None => return Err(format!("missing argument for `{}`", letter)),
                }
            }

            let relative = letter.is_ascii_lowercase();
            let upper = letter.to_ascii_uppercase();
            let (dx, dy) = if relative { (x, y) } else { (0.0, 0.0) };

            let segment = match upper {
                'M' | 'L' | 'T' => {
                    x = args[0] + dx;
                    y = args[1] + dy;
                    Segment { cmd: upper, args: vec![x, y] }
                }
                'H' => {
                    x = args[0] + dx;
                    Segment { cmd: 'H', args: vec![x] }
                }
                'V' => {
                    y = args[0] + dy;
                    Segment { cmd: 'V', args: vec![y] }
                }
                'C' => {
                    let abs = vec![
                        args[0] + dx,
                        args[1] + dy,
                        args[2] + dx,
                        args[3] + dy,
                        args[4] + dx,
                        args[5] + dy,
                    ];
                    x = abs[4];
                    y = abs[5];
                    Segment { cmd: 'C', args: abs }
                }
                'S' | 'Q' => {
                    let abs = vec![args[0] + dx, args[1] + dy, args[2] + dx, args[3] + dy];
                    x = abs[2];
                    y = abs[3];
                    Segment { cmd: upper, args: abs }
                }
                'A' => {
                    x = args[5] + dx;
                    y = args[6] + dy;
                    Segment {
                        cmd: 'A',
                        args: vec![args[0], args[1], args[2], args[3], args[4], x, y],
                    }
                }
                _ => {
                    x = start_x;
                    y = start_y;
                    Segment { cmd: 'Z', args: vec![] }
                }
            };

            if upper == 'M' {
                start_x = x;
                start_y = y;
                // Extra coordinate pairs after a moveto are linetos.
                cmd = Some(if relative { 'l' } else { 'L' });
            } else if upper == 'Z' {
                cmd = None;
            }
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append another path's segments. Both are absolute, so nothing shifts.
    pub fn extend(&mut self, other: PathData) {
        self.segments.extend(other.segments);
    }

    /// Bounding box of all end and control points. Arcs are padded by their radii.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        let mut include = |x: f64, y: f64| match bounds.as_mut() {
            Some(b) => b.include(x, y),
            None => bounds = Some(Bounds::point(x, y)),
        };
        let (mut x, mut y) = (0.0, 0.0);

        for segment in &self.segments {
            let args = &segment.args;
            match segment.cmd {
                'H' => x = args[0],
                'V' => y = args[0],
                'Z' => continue,
                'A' => {
                    let (rx, ry) = (args[0].abs(), args[1].abs());
                    include(x - rx, y - ry);
                    include(x + rx, y + ry);
                    x = args[5];
                    y = args[6];
                    include(x - rx, y - ry);
                    include(x + rx, y + ry);
                }
                _ => {
                    for pair in args.chunks(2) {
                        include(pair[0], pair[1]);
                    }
                    x = args[args.len() - 2];
                    y = args[args.len() - 1];
                }
            }
            include(x, y);
        }

        bounds
    }

    /// Serialize as compactly as possible at the given precision.
    pub fn to_compact(&self, precision: u8) -> String {
        let mut out = String::new();
        // Position as a renderer would reconstruct it from the rounded output.
        let (mut x, mut y) = (0.0, 0.0);
        let (mut start_x, mut start_y) = (0.0, 0.0);
        let mut last_letter: Option<char> = None;

        for (index, segment) in self.segments.iter().enumerate() {
            let mut segment = segment.clone();

            // Axis-aligned lines become H/V.
            if segment.cmd == 'L' {
                let (tx, ty) = (round(segment.args[0], precision), round(segment.args[1], precision));
                if ty == y && index > 0 {
                    segment = Segment { cmd: 'H', args: vec![segment.args[0]] };
                } else if tx == x && index > 0 {
                    segment = Segment { cmd: 'V', args: vec![segment.args[1]] };
                }
            }

            let absolute = absolute_args(&segment, precision);
            let relative = relative_args(&segment, x, y, precision);

            let abs_text = render_args(&absolute);
            let rel_text = render_args(&relative);
            let use_relative = index > 0 && rel_text.len() <= abs_text.len();

            let (letter, args) = if segment.cmd == 'Z' {
                ('z', Vec::new())
            } else if use_relative {
                (segment.cmd.to_ascii_lowercase(), relative)
            } else {
                (segment.cmd, absolute)
            };

            let implicit = match (last_letter, letter) {
                (Some(prev), cur) if prev == cur && !matches!(cur, 'M' | 'm' | 'z') => true,
                (Some('M'), 'L') | (Some('m'), 'l') => true,
                _ => false,
            };
            if !implicit {
                out.push(letter);
            }
            for arg in &args {
                push_number(&mut out, arg);
            }

            // Advance the reconstructed position.
            let values: Vec<f64> = args.iter().filter_map(|a| a.parse().ok()).collect();
            let (ox, oy) = if letter.is_ascii_lowercase() { (x, y) } else { (0.0, 0.0) };
            match segment.cmd {
                'Z' => {
                    x = start_x;
                    y = start_y;
                }
                'H' => x = round(values[0] + ox, precision),
                'V' => y = round(values[0] + oy, precision),
                'A' => {
                    x = round(values[5] + ox, precision);
                    y = round(values[6] + oy, precision);
                }
                _ => {
                    x = round(values[values.len() - 2] + ox, precision);
                    y = round(values[values.len() - 1] + oy, precision);
                }
            }
            if segment.cmd == 'M' {
                start_x = x;
                start_y = y;
            }
            // After a lowercase moveto, implicit pairs are `l`; after `M`, `L`.
            last_letter = Some(letter);
        }

        out
    }
}

fn absolute_args(segment: &Segment, precision: u8) -> Vec<String> {
    segment
        .args
        .iter()
        .enumerate()
        .map(|(i, v)| format_arg(segment.cmd, i, *v, precision))
        .collect()
}

fn relative_args(segment: &Segment, x: f64, y: f64, precision: u8) -> Vec<String> {
    segment
        .args
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let offset = match segment.cmd {
                'H' => x,
                'V' => y,
                'A' if i < 5 => 0.0,
                'A' if i == 5 => x,
                'A' => y,
                _ if i % 2 == 0 => x,
                _ => y,
            };
            format_arg(segment.cmd, i, v - offset, precision)
        })
        .collect()
}

fn format_arg(cmd: char, index: usize, value: f64, precision: u8) -> String {
    if cmd == 'A' && (index == 3 || index == 4) {
        if value != 0.0 { "1" } else { "0" }.to_string()
    } else {
        format(value, precision)
    }
}

fn render_args(args: &[String]) -> String {
    let mut out = String::from("X");
    for arg in args {
        push_number(&mut out, arg);
    }
    out
}

/// Compact a `d` attribute value. Returns `None` if it cannot be parsed.
pub fn compact_path_data(d: &str, precision: u8) -> Option<String> {
    let path = PathData::parse(d).ok()?;
    if path.is_empty() {
        return None;
    }
    Some(path.to_compact(precision))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_relative_to_absolute() {
        let path = PathData::parse("m10 10 l5 0 v5 h-5 z").unwrap();
        let cmds: Vec<char> = path.segments.iter().map(|s| s.cmd).collect();

        assert_eq!(cmds, vec!['M', 'L', 'V', 'H', 'Z']);
        assert_eq!(path.segments[1].args, vec![15.0, 10.0]);
        assert_eq!(path.segments[2].args, vec![15.0]);
        assert_eq!(path.segments[3].args, vec![10.0]);
    }

    #[test]
    fn test_implicit_lineto_after_moveto() {
        let path = PathData::parse("M0 0 10 0 10 10").unwrap();
        let cmds: Vec<char> = path.segments.iter().map(|s| s.cmd).collect();
        assert_eq!(cmds, vec!['M', 'L', 'L']);
    }

    #[test]
    fn test_compact_square() {
        assert_eq!(
            compact_path_data("M 10,10 L 20,10 L 20,20 L 10,20 Z", 3).unwrap(),
            "M10 10h10v10H10z"
        );
    }

    #[test]
    fn test_compact_rounds_and_trims() {
        assert_eq!(
            compact_path_data("M0.50000 0.25 L 0.7501 0.25", 3).unwrap(),
            "M.5.25h.25"
        );
    }

    #[test]
    fn test_compact_curves() {
        assert_eq!(
            compact_path_data("M10 10 C 10 20 20 20 20 10", 3).unwrap(),
            "M10 10c0 10 10 10 10 0"
        );
    }

    #[test]
    fn test_arc_flags_without_separators() {
        let path = PathData::parse("M0 0a5 5 0 015 5").unwrap();
        assert_eq!(path.segments[1].args, vec![5.0, 5.0, 0.0, 0.0, 1.0, 5.0, 5.0]);
    }

    #[test]
    fn test_invalid_path() {
        assert!(PathData::parse("10 10").is_err());
        assert!(PathData::parse("M10").is_err());
        assert!(PathData::parse("M0 0 X 1").is_err());
        assert!(compact_path_data("", 3).is_none());
    }

    #[test]
    fn test_bounds() {
        let path = PathData::parse("M0 0 L10 5 L-2 8").unwrap();
        let bounds = path.bounds().unwrap();
        assert_eq!(
            bounds,
            Bounds {
                min_x: -2.0,
                min_y: 0.0,
                max_x: 10.0,
                max_y: 8.0
            }
        );
    }

    #[test]
    fn test_bounds_intersection() {
        let a = PathData::parse("M0 0h4v4H0z").unwrap().bounds().unwrap();
        let b = PathData::parse("M10 10h4v4h-4z").unwrap().bounds().unwrap();
        let c = PathData::parse("M2 2h4v4H2z").unwrap().bounds().unwrap();

        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_extend_keeps_absolute_positions() {
        let mut a = PathData::parse("M0 0h4v4H0z").unwrap();
        let b = PathData::parse("m10 10h4").unwrap();
        a.extend(b);

        assert_eq!(a.to_compact(3), "M0 0h4v4H0zm10 10h4");
    }
}
