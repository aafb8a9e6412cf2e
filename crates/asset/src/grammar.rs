//! Line grammar for the OBJ and MTL text formats.
//!
//! Every line is one directive. A known keyword commits the line to that
//! directive's body (`cut`), so `v 1 2` is a mismatch rather than a skipped
//! line. Lines with any other leading token fall through to the skip branch.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::{char, space0, space1},
    combinator::{cut, eof, map, rest, value},
    error::{VerboseError, VerboseErrorKind, context},
    number::complete::double,
    sequence::{delimited, pair, preceded, terminated, tuple},
};

use crate::{
    error::{GrammarError, Result},
    primitives::{Color, Face, FaceVertexRef, Point, TextureCoords},
};

pub type PResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// One recognised line of a mesh file.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjDirective {
    MaterialLib(String),
    Vertex(Point),
    TextureCoords(TextureCoords),
    Face(Face),
    Skip,
}

/// One recognised line of a material library.
#[derive(Clone, Debug, PartialEq)]
pub enum MtlDirective {
    NewMaterial(String),
    Diffuse(Color),
    DiffuseMap(String),
    Skip,
}

pub fn obj_line(input: &str) -> PResult<'_, ObjDirective> {
    line(alt((
        preceded(
            keyword("mtllib"),
            cut(context(
                "material library path",
                map(token, |p: &str| ObjDirective::MaterialLib(p.to_owned())),
            )),
        ),
        preceded(
            keyword("vt"),
            cut(context(
                "texture coordinates",
                map(texture_coords, ObjDirective::TextureCoords),
            )),
        ),
        preceded(
            keyword("v"),
            cut(context("vertex", map(point, ObjDirective::Vertex))),
        ),
        preceded(
            keyword("f"),
            cut(context("face", map(face, ObjDirective::Face))),
        ),
        value(ObjDirective::Skip, rest),
    )))
    .parse(input)
}

pub fn mtl_line(input: &str) -> PResult<'_, MtlDirective> {
    line(alt((
        // The name may be empty; it is not needed to render.
        preceded(
            keyword("newmtl"),
            map(rest, |s: &str| MtlDirective::NewMaterial(s.trim_end().to_owned())),
        ),
        preceded(
            keyword("Kd"),
            cut(context("diffuse color", map(color, MtlDirective::Diffuse))),
        ),
        preceded(
            keyword("map_Kd"),
            cut(context(
                "diffuse map path",
                map(token, |p: &str| MtlDirective::DiffuseMap(p.to_owned())),
            )),
        ),
        value(MtlDirective::Skip, rest),
    )))
    .parse(input)
}

/// Feed every line of `bytes` through `parser` and hand the results to `sink`.
///
/// Stops at the first line that does not match and returns its location;
/// everything before it has already reached the sink. Errors raised by the
/// sink abort immediately.
pub fn for_each_line<T, P, S>(bytes: &[u8], mut parser: P, mut sink: S) -> Result<Option<GrammarError>>
where
    P: for<'a> FnMut(&'a str) -> PResult<'a, T>,
    S: FnMut(T) -> Result<()>,
{
    let (text, invalid) = match std::str::from_utf8(bytes) {
        Ok(text) => (text, None),
        Err(err) => {
            let valid_up_to = err.valid_up_to();
            let line_start = bytes[..valid_up_to]
                .iter()
                .rposition(|&b| b == b'\n')
                .map_or(0, |p| p + 1);
            let prefix = std::str::from_utf8(&bytes[..line_start]).unwrap_or("");
            let line_end = bytes[line_start..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(bytes.len(), |p| line_start + p);
            let bad = GrammarError {
                line: prefix.split('\n').count(),
                column: valid_up_to - line_start + 1,
                text: String::from_utf8_lossy(&bytes[line_start..line_end]).into_owned(),
                reason: "invalid UTF-8".to_owned(),
            };
            (prefix, Some(bad))
        }
    };

    for (idx, raw) in text.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        match parser(line) {
            Ok((_, item)) => sink(item)?,
            Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
                return Ok(Some(mismatch(idx + 1, line, &e)));
            }
            Err(nom::Err::Incomplete(_)) => {
                return Ok(Some(GrammarError {
                    line: idx + 1,
                    column: line.len() + 1,
                    text: line.to_owned(),
                    reason: "incomplete input".to_owned(),
                }));
            }
        }
    }

    Ok(invalid)
}

fn mismatch(line_no: usize, line: &str, err: &VerboseError<&str>) -> GrammarError {
    let remaining = err.errors.first().map_or(0, |(rest, _)| rest.len());
    let contexts: Vec<&str> = err
        .errors
        .iter()
        .filter_map(|(_, kind)| match kind {
            VerboseErrorKind::Context(ctx) => Some(*ctx),
            _ => None,
        })
        .collect();
    let reason = if contexts.is_empty() {
        "unexpected input".to_owned()
    } else {
        format!("expected {}", contexts.join(" in "))
    };
    GrammarError {
        line: line_no,
        column: line.len().saturating_sub(remaining) + 1,
        text: line.to_owned(),
        reason,
    }
}

/// Leading blanks, one directive, trailing blanks, end of line.
fn line<'a, O, F>(directive: F) -> impl Parser<&'a str, O, VerboseError<&'a str>>
where
    F: Parser<&'a str, O, VerboseError<&'a str>>,
{
    delimited(space0, directive, cut(context("end of line", pair(space0, eof))))
}

/// A keyword followed by a blank or the end of the line, so `v` never matches `vt`.
fn keyword<'a>(kw: &'static str) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    terminated(tag(kw), alt((space1, eof)))
}

fn token(input: &str) -> PResult<'_, &str> {
    take_till1(|c: char| c == ' ' || c == '\t')(input)
}

fn point(input: &str) -> PResult<'_, Point> {
    map(
        tuple((
            context("x coordinate", double),
            space1,
            context("y coordinate", double),
            space1,
            context("z coordinate", double),
        )),
        |(x, _, y, _, z)| Point::new(x, y, z),
    )(input)
}

fn texture_coords(input: &str) -> PResult<'_, TextureCoords> {
    map(
        tuple((
            context("u coordinate", double),
            space1,
            context("v coordinate", double),
        )),
        |(u, _, v)| TextureCoords::new(u, v),
    )(input)
}

fn color(input: &str) -> PResult<'_, Color> {
    map(
        tuple((
            context("red component", double),
            space1,
            context("green component", double),
            space1,
            context("blue component", double),
        )),
        |(r, _, g, _, b)| Color::new(r, g, b),
    )(input)
}

fn face(input: &str) -> PResult<'_, Face> {
    map(
        tuple((
            context("first corner", corner),
            context("second corner", preceded(space1, corner)),
            context("third corner", preceded(space1, corner)),
        )),
        |(a, b, c)| Face { corners: [a, b, c] },
    )(input)
}

fn corner(input: &str) -> PResult<'_, FaceVertexRef> {
    map(
        tuple((
            context("vertex index", index),
            char('/'),
            context("texture coordinate index", index),
            char('/'),
            context("normal index", index),
        )),
        |(v, _, vt, _, vn)| FaceVertexRef::new(v, vt, vn),
    )(input)
}

/// 1-based index in the file, 0-based once parsed.
fn index(input: &str) -> PResult<'_, u32> {
    let (rest, raw) = nom::character::complete::u32::<&str, VerboseError<&str>>(input)?;
    match raw.checked_sub(1) {
        Some(id) => Ok((rest, id)),
        None => Err(nom::Err::Failure(VerboseError {
            errors: vec![(input, VerboseErrorKind::Context("1-based index"))],
        })),
    }
}
