//! Transform list parsing and shortening.

use super::number::{format, parse_list};

/// Affine matrix `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn multiply(&self, m: &Matrix) -> Matrix {
        Matrix {
            a: self.a * m.a + self.c * m.b,
            b: self.b * m.a + self.d * m.b,
            c: self.a * m.c + self.c * m.d,
            d: self.b * m.c + self.d * m.d,
            e: self.a * m.e + self.c * m.f + self.e,
            f: self.b * m.e + self.d * m.f + self.f,
        }
    }

    fn translate(tx: f64, ty: f64) -> Matrix {
        Matrix { e: tx, f: ty, ..Matrix::IDENTITY }
    }

    fn scale(sx: f64, sy: f64) -> Matrix {
        Matrix { a: sx, d: sy, ..Matrix::IDENTITY }
    }

    fn rotate(degrees: f64) -> Matrix {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Matrix {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            ..Matrix::IDENTITY
        }
    }
}

/// Parse a transform list (`translate(10 5) rotate(45)`) into one matrix.
pub fn parse_transform(text: &str) -> Option<Matrix> {
    let mut matrix = Matrix::IDENTITY;
    let mut rest = text.trim();

    while !rest.is_empty() {
        let open = rest.find('(')?;
        let close = rest.find(')')?;
        if close < open {
            return None;
        }
        let name = rest[..open].trim().trim_start_matches(',').trim();
        let args = parse_list(&rest[open + 1..close])?;

        let step = match (name, args.as_slice()) {
            ("matrix", [a, b, c, d, e, f]) => Matrix {
                a: *a,
                b: *b,
                c: *c,
                d: *d,
                e: *e,
                f: *f,
            },
            ("translate", [tx]) => Matrix::translate(*tx, 0.0),
            ("translate", [tx, ty]) => Matrix::translate(*tx, *ty),
            ("scale", [s]) => Matrix::scale(*s, *s),
            ("scale", [sx, sy]) => Matrix::scale(*sx, *sy),
            ("rotate", [angle]) => Matrix::rotate(*angle),
            ("rotate", [angle, cx, cy]) => Matrix::translate(*cx, *cy)
                .multiply(&Matrix::rotate(*angle))
                .multiply(&Matrix::translate(-cx, -cy)),
            ("skewX", [angle]) => Matrix {
                c: angle.to_radians().tan(),
                ..Matrix::IDENTITY
            },
            ("skewY", [angle]) => Matrix {
                b: angle.to_radians().tan(),
                ..Matrix::IDENTITY
            },
            _ => return None,
        };

        matrix = matrix.multiply(&step);
        rest = rest[close + 1..].trim_start();
    }

    Some(matrix)
}

/// Shortest transform string equivalent to `m`, or `None` for the identity.
///
/// Translations use `precision` decimals; the linear part gets two more.
pub fn shorten(m: &Matrix, precision: u8) -> Option<String> {
    let fine = precision + 2;
    let n = |v: f64| format(v, precision);
    let nf = |v: f64| format(v, fine);
    let is = |v: f64, target: f64| nf(v) == nf(target);

    let has_translate = n(m.e) != "0" || n(m.f) != "0";
    let translate = if n(m.f) == "0" {
        format!("translate({})", n(m.e))
    } else {
        format!("translate({} {})", n(m.e), n(m.f))
    };

    let linear = if is(m.b, 0.0) && is(m.c, 0.0) {
        if is(m.a, 1.0) && is(m.d, 1.0) {
            Some(String::new())
        } else if nf(m.a) == nf(m.d) {
            Some(format!("scale({})", nf(m.a)))
        } else {
            Some(format!("scale({} {})", nf(m.a), nf(m.d)))
        }
    } else if is(m.a, m.d) && is(m.b, -m.c) && is(m.a * m.a + m.b * m.b, 1.0) {
        let degrees = m.b.atan2(m.a).to_degrees();
        Some(format!("rotate({})", n(degrees)))
    } else {
        None
    };

    let short = match linear {
        Some(linear) if linear.is_empty() && !has_translate => return None,
        Some(linear) if linear.is_empty() => translate,
        Some(linear) if !has_translate => linear,
        Some(linear) => format!("{}{}", translate, linear),
        None => format!(
            "matrix({} {} {} {} {} {})",
            nf(m.a),
            nf(m.b),
            nf(m.c),
            nf(m.d),
            n(m.e),
            n(m.f)
        ),
    };

    Some(short)
}

/// Rewrite a transform attribute value. `Some("")` means the attribute is a no-op.
pub fn compact_transform(text: &str, precision: u8) -> Option<String> {
    let matrix = parse_transform(text)?;
    let short = shorten(&matrix, precision).unwrap_or_default();
    if short.len() <= text.len() {
        Some(short)
    } else {
        Some(text.to_string())
    }
}
