// Copyright 2026 the Flatshadow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG path data.

use core::f64::consts::FRAC_PI_2;

use crate::{BezPath, CompoundShape, PathEl, Point, SvgParseError, Vec2};

impl BezPath {
    /// Convert the path to an SVG path string representation.
    ///
    /// The current implementation doesn't take any special care to produce a
    /// short string (reducing precision, using relative movement).
    pub fn to_svg(&self) -> String {
        let mut result = String::new();
        for el in self.elements() {
            match *el {
                PathEl::MoveTo(p) => result.push_str(&format!("M{} {}", p.x, p.y)),
                PathEl::LineTo(p) => result.push_str(&format!("L{} {}", p.x, p.y)),
                PathEl::CurveTo(p1, p2, p3) => result.push_str(&format!(
                    "C{} {} {} {} {} {}",
                    p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
                )),
                PathEl::ClosePath => result.push('Z'),
            }
        }
        result
    }

    /// Try to parse a bezier path from an SVG path element.
    ///
    /// All SVG path commands are accepted, in absolute and relative form.
    /// Quadratic Béziers are converted to cubics exactly; elliptical arcs are
    /// approximated by cubics of at most a quarter turn each.
    pub fn from_svg(data: &str) -> Result<BezPath, SvgParseError> {
        let mut lexer = SvgLexer::new(data);
        let mut path = BezPath::new();
        let mut last_cmd = 0;
        let mut start = Point::ZERO;
        // Set after a close; a drawing command then restarts from `start`.
        let mut reopen = false;
        let mut cubic_ctrl: Option<Point> = None;
        let mut quad_ctrl: Option<Point> = None;
        while let Some(c) = lexer.get_cmd(last_cmd)? {
            if last_cmd == 0 && c != b'm' && c != b'M' {
                return Err(SvgParseError::Wrong);
            }
            let upper = c.to_ascii_uppercase();
            if reopen && upper != b'M' && upper != b'Z' {
                path.move_to(start);
            }
            reopen = false;
            let mut next_cubic = None;
            let mut next_quad = None;
            match upper {
                b'M' => {
                    let pt = lexer.get_maybe_relative(c)?;
                    path.move_to(pt);
                    lexer.last_pt = pt;
                    start = pt;
                    // Further coordinate pairs are implicit line commands.
                    last_cmd = c - (b'M' - b'L');
                }
                b'L' => {
                    let pt = lexer.get_maybe_relative(c)?;
                    path.line_to(pt);
                    lexer.last_pt = pt;
                    last_cmd = c;
                }
                b'H' => {
                    let mut x = lexer.get_number()?;
                    lexer.opt_comma();
                    if c == b'h' {
                        x += lexer.last_pt.x;
                    }
                    let pt = Point::new(x, lexer.last_pt.y);
                    path.line_to(pt);
                    lexer.last_pt = pt;
                    last_cmd = c;
                }
                b'V' => {
                    let mut y = lexer.get_number()?;
                    lexer.opt_comma();
                    if c == b'v' {
                        y += lexer.last_pt.y;
                    }
                    let pt = Point::new(lexer.last_pt.x, y);
                    path.line_to(pt);
                    lexer.last_pt = pt;
                    last_cmd = c;
                }
                b'C' => {
                    let p1 = lexer.get_maybe_relative(c)?;
                    let p2 = lexer.get_maybe_relative(c)?;
                    let p3 = lexer.get_maybe_relative(c)?;
                    path.curve_to(p1, p2, p3);
                    lexer.last_pt = p3;
                    next_cubic = Some(p2);
                    last_cmd = c;
                }
                b'S' => {
                    let p0 = lexer.last_pt;
                    let p1 = cubic_ctrl.map_or(p0, |ctrl| reflect(ctrl, p0));
                    let p2 = lexer.get_maybe_relative(c)?;
                    let p3 = lexer.get_maybe_relative(c)?;
                    path.curve_to(p1, p2, p3);
                    lexer.last_pt = p3;
                    next_cubic = Some(p2);
                    last_cmd = c;
                }
                b'Q' => {
                    let p0 = lexer.last_pt;
                    let q = lexer.get_maybe_relative(c)?;
                    let p2 = lexer.get_maybe_relative(c)?;
                    push_quad(&mut path, p0, q, p2);
                    lexer.last_pt = p2;
                    next_quad = Some(q);
                    last_cmd = c;
                }
                b'T' => {
                    let p0 = lexer.last_pt;
                    let q = quad_ctrl.map_or(p0, |ctrl| reflect(ctrl, p0));
                    let p2 = lexer.get_maybe_relative(c)?;
                    push_quad(&mut path, p0, q, p2);
                    lexer.last_pt = p2;
                    next_quad = Some(q);
                    last_cmd = c;
                }
                b'A' => {
                    let rx = lexer.get_number()?;
                    lexer.opt_comma();
                    let ry = lexer.get_number()?;
                    lexer.opt_comma();
                    let x_rotation = lexer.get_number()?;
                    lexer.opt_comma();
                    let large_arc = lexer.get_flag()?;
                    let sweep = lexer.get_flag()?;
                    let to = lexer.get_maybe_relative(c)?;
                    let arc = SvgArc {
                        from: lexer.last_pt,
                        to,
                        radii: Vec2::new(rx, ry),
                        x_rotation: x_rotation.to_radians(),
                        large_arc,
                        sweep,
                    };
                    arc.push_to(&mut path);
                    lexer.last_pt = to;
                    last_cmd = c;
                }
                b'Z' => {
                    path.close_path();
                    lexer.last_pt = start;
                    reopen = true;
                    // Coordinates may not follow a close.
                    last_cmd = b'Z';
                }
                _ => return Err(SvgParseError::UnknownCommand(char::from(c))),
            }
            cubic_ctrl = next_cubic;
            quad_ctrl = next_quad;
        }
        lexer.skip_ws();
        if lexer.ix < data.len() {
            return Err(SvgParseError::Wrong);
        }
        Ok(path)
    }
}

impl CompoundShape {
    /// Convert every path to SVG path data, separated by spaces.
    pub fn to_svg(&self) -> String {
        self.paths()
            .iter()
            .map(BezPath::to_svg)
            .filter(|d| !d.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Reflect a control point through the current point.
fn reflect(ctrl: Point, about: Point) -> Point {
    about + (about - ctrl)
}

/// Push a quadratic Bézier, raised to a cubic.
fn push_quad(path: &mut BezPath, p0: Point, q: Point, p2: Point) {
    let c1 = p0 + (2.0 / 3.0) * (q - p0);
    let c2 = p2 + (2.0 / 3.0) * (q - p2);
    path.curve_to(c1, c2, p2);
}

/// An elliptical arc in SVG endpoint parameterization.
struct SvgArc {
    from: Point,
    to: Point,
    radii: Vec2,
    x_rotation: f64,
    large_arc: bool,
    sweep: bool,
}

impl SvgArc {
    /// Append the arc to `path` as cubics.
    ///
    /// Follows the endpoint to center conversion of the SVG implementation
    /// notes: out-of-range radii are scaled up, zero radii make a line, and
    /// coincident endpoints draw nothing.
    fn push_to(&self, path: &mut BezPath) {
        if self.from == self.to {
            return;
        }
        let mut rx = self.radii.x.abs();
        let mut ry = self.radii.y.abs();
        if rx == 0.0 || ry == 0.0 {
            path.line_to(self.to);
            return;
        }
        let (sin_phi, cos_phi) = self.x_rotation.sin_cos();
        let half = (self.from - self.to) * 0.5;
        let x1 = cos_phi * half.x + sin_phi * half.y;
        let y1 = -sin_phi * half.x + cos_phi * half.y;

        let lambda = (x1 * x1) / (rx * rx) + (y1 * y1) / (ry * ry);
        if lambda > 1.0 {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
        }
        let num = rx * rx * ry * ry - rx * rx * y1 * y1 - ry * ry * x1 * x1;
        let den = rx * rx * y1 * y1 + ry * ry * x1 * x1;
        let mut coef = (num / den).max(0.0).sqrt();
        if self.large_arc == self.sweep {
            coef = -coef;
        }
        let cx1 = coef * rx * y1 / ry;
        let cy1 = -coef * ry * x1 / rx;
        let mid = self.from.midpoint(self.to);
        let center = Point::new(
            cos_phi * cx1 - sin_phi * cy1 + mid.x,
            sin_phi * cx1 + cos_phi * cy1 + mid.y,
        );

        let u = Vec2::new((x1 - cx1) / rx, (y1 - cy1) / ry);
        let v = Vec2::new((-x1 - cx1) / rx, (-y1 - cy1) / ry);
        let theta = u.y.atan2(u.x);
        let mut sweep_angle = u.cross(v).atan2(u.dot(v));
        if !self.sweep && sweep_angle > 0.0 {
            sweep_angle -= core::f64::consts::TAU;
        } else if self.sweep && sweep_angle < 0.0 {
            sweep_angle += core::f64::consts::TAU;
        }
        if !sweep_angle.is_finite() || !center.is_finite() {
            log::warn!("degenerate arc from {:?} to {:?}", self.from, self.to);
            path.line_to(self.to);
            return;
        }

        let n = (sweep_angle.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep_angle / n as f64;
        let k = (4.0 / 3.0) * (step * 0.25).tan();
        let map = |x: f64, y: f64| {
            Point::new(
                center.x + rx * x * cos_phi - ry * y * sin_phi,
                center.y + rx * x * sin_phi + ry * y * cos_phi,
            )
        };
        for i in 0..n {
            let a0 = theta + step * i as f64;
            let a1 = a0 + step;
            let (s0, c0) = a0.sin_cos();
            let (s1, c1) = a1.sin_cos();
            let p1 = map(c0 - k * s0, s0 + k * c0);
            let p2 = map(c1 + k * s1, s1 - k * c1);
            let p3 = if i + 1 == n { self.to } else { map(c1, s1) };
            path.curve_to(p1, p2, p3);
        }
    }
}

struct SvgLexer<'a> {
    data: &'a str,
    ix: usize,
    last_pt: Point,
}

impl SvgLexer<'_> {
    fn new(data: &str) -> SvgLexer<'_> {
        SvgLexer {
            data,
            ix: 0,
            last_pt: Point::ZERO,
        }
    }

    fn skip_ws(&mut self) {
        while let Some(&c) = self.data.as_bytes().get(self.ix) {
            if !(c == b' ' || c == 9 || c == 10 || c == 12 || c == 13) {
                break;
            }
            self.ix += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.as_bytes().get(self.ix).copied()
    }

    /// The next command letter, or `last_cmd` again when a number follows.
    fn get_cmd(&mut self, last_cmd: u8) -> Result<Option<u8>, SvgParseError> {
        self.skip_ws();
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        if c.is_ascii_alphabetic() {
            self.ix += 1;
            return match c.to_ascii_uppercase() {
                b'M' | b'L' | b'H' | b'V' | b'C' | b'S' | b'Q' | b'T' | b'A' | b'Z' => Ok(Some(c)),
                _ => Err(SvgParseError::UnknownCommand(char::from(c))),
            };
        }
        let number_start = c.is_ascii_digit() || c == b'-' || c == b'+' || c == b'.';
        if number_start && last_cmd != 0 && last_cmd != b'Z' && last_cmd != b'z' {
            return Ok(Some(last_cmd));
        }
        Err(SvgParseError::Wrong)
    }

    fn get_byte(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.ix += 1;
        Some(c)
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.ix;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.ix += 1;
        }
        self.ix - start
    }

    fn get_number(&mut self) -> Result<f64, SvgParseError> {
        self.skip_ws();
        let start = self.ix;
        match self.peek() {
            None => return Err(SvgParseError::UnexpectedEof),
            Some(b'-' | b'+') => self.ix += 1,
            Some(_) => {}
        }
        let mut digit_count = self.skip_digits();
        if self.peek() == Some(b'.') {
            self.ix += 1;
            digit_count += self.skip_digits();
        }
        if digit_count == 0 {
            return Err(SvgParseError::Wrong);
        }
        if let Some(b'e' | b'E') = self.peek() {
            let mark = self.ix;
            self.ix += 1;
            if let Some(b'-' | b'+') = self.peek() {
                self.ix += 1;
            }
            if self.skip_digits() == 0 {
                // Not an exponent after all.
                self.ix = mark;
            }
        }
        self.data[start..self.ix]
            .parse()
            .map_err(|_| SvgParseError::Wrong)
    }

    fn get_flag(&mut self) -> Result<bool, SvgParseError> {
        self.skip_ws();
        let flag = match self.get_byte() {
            Some(b'0') => false,
            Some(b'1') => true,
            Some(_) => return Err(SvgParseError::Wrong),
            None => return Err(SvgParseError::UnexpectedEof),
        };
        self.opt_comma();
        Ok(flag)
    }

    fn get_number_pair(&mut self) -> Result<Point, SvgParseError> {
        let x = self.get_number()?;
        self.opt_comma();
        let y = self.get_number()?;
        self.opt_comma();
        Ok(Point::new(x, y))
    }

    fn get_maybe_relative(&mut self, cmd: u8) -> Result<Point, SvgParseError> {
        let pt = self.get_number_pair()?;
        if cmd.is_ascii_lowercase() {
            Ok(self.last_pt + pt.to_vec2())
        } else {
            Ok(pt)
        }
    }

    fn opt_comma(&mut self) {
        self.skip_ws();
        if self.peek() == Some(b',') {
            self.ix += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{BezPath, CompoundShape, FillRule, PathEl, Point, SvgParseError};

    fn close_to(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-12
    }

    #[test]
    fn test_parse_svg() {
        let path = BezPath::from_svg("m10 10 100 0 0 100 -100 0z").unwrap();
        assert_eq!(path.segments().count(), 4);
        assert_eq!(path.area(), 10_000.0);
    }

    #[test]
    fn horizontal_and_vertical() {
        let path = BezPath::from_svg("M0 0H10V10h-10Z").unwrap();
        assert_eq!(path.area(), 100.0);
        assert_eq!(path.elements()[3], PathEl::LineTo(Point::new(0.0, 10.0)));
    }

    #[test]
    fn number_syntax() {
        let path = BezPath::from_svg("M1e1,0L-2.5E-1 .5 +3-1.5.5.5").unwrap();
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(10.0, 0.0)),
                PathEl::LineTo(Point::new(-0.25, 0.5)),
                PathEl::LineTo(Point::new(3.0, -1.5)),
                PathEl::LineTo(Point::new(0.5, 0.5)),
            ]
        );
    }

    #[test]
    fn quadratics_become_cubics() {
        let path = BezPath::from_svg("M0 0Q1 2 2 0T4 0").unwrap();
        let PathEl::CurveTo(p1, p2, p3) = path.elements()[1] else {
            panic!("expected a curve");
        };
        assert!(close_to(p1, Point::new(2.0 / 3.0, 4.0 / 3.0)));
        assert!(close_to(p2, Point::new(4.0 / 3.0, 4.0 / 3.0)));
        assert_eq!(p3, Point::new(2.0, 0.0));
        // The smooth quadratic reflects the control point to (3, -2).
        let PathEl::CurveTo(p1, _, p3) = path.elements()[2] else {
            panic!("expected a curve");
        };
        assert!(close_to(p1, Point::new(2.0 + 2.0 / 3.0, -4.0 / 3.0)));
        assert_eq!(p3, Point::new(4.0, 0.0));
    }

    #[test]
    fn smooth_cubic_reflects() {
        let path = BezPath::from_svg("M0 0C0 1 1 1 1 0s1-1 1 0").unwrap();
        assert_eq!(
            path.elements()[2],
            PathEl::CurveTo(
                Point::new(1.0, -1.0),
                Point::new(2.0, -1.0),
                Point::new(2.0, 0.0)
            )
        );
        // Without a preceding cubic the first control is the current point.
        let path = BezPath::from_svg("M0 0L1 0S2 1 3 0").unwrap();
        assert_eq!(
            path.elements()[2],
            PathEl::CurveTo(
                Point::new(1.0, 0.0),
                Point::new(2.0, 1.0),
                Point::new(3.0, 0.0)
            )
        );
    }

    #[test]
    fn arcs_become_cubics() {
        let path = BezPath::from_svg("M1 0A1 1 0 0 1 -1 0Z").unwrap();
        let curves = path
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::CurveTo(..)))
            .count();
        assert_eq!(curves, 2);
        assert!((path.area() - core::f64::consts::FRAC_PI_2).abs() < 1e-3);
        let bbox = path.bounding_box().unwrap();
        assert!((bbox.y1 - 1.0).abs() < 1e-3);
        assert_eq!(bbox.y0, 0.0);

        // Compact flags parse the same.
        let a = BezPath::from_svg("M0 0a1 1 0 1 0 2 0").unwrap();
        let b = BezPath::from_svg("M0 0a1 1 0 102 0").unwrap();
        assert_eq!(a, b);

        // Zero radius is a line; radii too small are scaled up.
        let line = BezPath::from_svg("M0 0A0 1 0 0 0 3 4").unwrap();
        assert_eq!(line.elements()[1], PathEl::LineTo(Point::new(3.0, 4.0)));
        let small = BezPath::from_svg("M0 0A0.1 0.1 0 0 1 2 0").unwrap();
        assert!(matches!(
            small.elements().last(),
            Some(PathEl::CurveTo(_, _, p3)) if *p3 == Point::new(2.0, 0.0)
        ));
        let bbox = small.bounding_box().unwrap();
        assert!((bbox.height() - 1.0).abs() < 1e-3, "{bbox:?}");
    }

    #[test]
    fn close_restarts_subpath() {
        let path = BezPath::from_svg("M1 1l1 0 0 1zl-1 0 0 -1z").unwrap();
        assert_eq!(path.subpaths().len(), 2);
        assert_eq!(path.elements()[4], PathEl::MoveTo(Point::new(1.0, 1.0)));
        assert_eq!(path.elements()[5], PathEl::LineTo(Point::new(0.0, 1.0)));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(BezPath::from_svg("L1 2"), Err(SvgParseError::Wrong));
        assert_eq!(BezPath::from_svg("M1"), Err(SvgParseError::UnexpectedEof));
        assert_eq!(
            BezPath::from_svg("M1 2X3"),
            Err(SvgParseError::UnknownCommand('X'))
        );
        assert_eq!(BezPath::from_svg("M1 2L a"), Err(SvgParseError::Wrong));
        assert_eq!(BezPath::from_svg("M0 0L1 1Z 2 2"), Err(SvgParseError::Wrong));
        assert_eq!(BezPath::from_svg("M0 0A1 1 0 2 0 1 1"), Err(SvgParseError::Wrong));
        assert_eq!(BezPath::from_svg(""), Ok(BezPath::new()));
    }

    #[test]
    fn svg_round_trip() {
        let data = "M0 0L10 0C10 5 5 10 0 10Z";
        let path = BezPath::from_svg(data).unwrap();
        assert_eq!(path.to_svg(), data);
        assert_eq!(BezPath::from_svg(&path.to_svg()).unwrap(), path);

        let shape = CompoundShape::from_paths(
            vec![path.clone(), BezPath::new(), path.translated((1.0, 1.0).into())],
            FillRule::EvenOdd,
        );
        assert_eq!(shape.to_svg(), format!("{data} M1 1L11 1C11 6 6 11 1 11Z"));
    }
}
