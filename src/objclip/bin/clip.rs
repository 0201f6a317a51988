//-- clip

use std::error;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::num;
use std::path::PathBuf;

/// Faces are kept only if their 3 vertices are strictly below this y
pub const DEFAULT_HEIGHT: f64 = 5.85;

#[derive(Debug)]
pub enum ClipError {
    Open(PathBuf, io::Error),
    Vertex(usize, usize),
    Face(usize, usize),
    Index(usize, i64, usize),
    Float(usize, num::ParseFloatError),
    Int(usize, num::ParseIntError),
    IO(io::Error),
}

impl error::Error for ClipError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Open(_, e) => Some(e),
            Self::Float(_, e) => Some(e),
            Self::Int(_, e) => Some(e),
            Self::IO(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ClipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(p, e) => write!(f, "{}: {}", p.display(), e),
            Self::Vertex(l, n) => {
                write!(f, "line {}: vertex has {} coordinates, expected 3", l, n)
            }
            Self::Face(l, n) => write!(f, "line {}: face has {} vertices, expected 3", l, n),
            Self::Index(l, i, n) => write!(
                f,
                "line {}: face refers to vertex {} but only {} vertices are declared",
                l, i, n
            ),
            Self::Float(l, e) => write!(f, "line {}: {}", l, e),
            Self::Int(l, e) => write!(f, "line {}: {}", l, e),
            Self::IO(e) => write!(f, "{}", e),
        }
    }
}

impl From<io::Error> for ClipError {
    fn from(error: io::Error) -> Self {
        ClipError::IO(error)
    }
}

pub type ClipResult<T> = Result<T, ClipError>;

#[derive(Debug, PartialEq)]
pub enum LineKind {
    Vertex,
    Face,
    Other,
}

pub fn classify(l: &str) -> LineKind {
    let t = l.trim();
    if t.starts_with("v ") {
        LineKind::Vertex
    } else if t.starts_with('f') {
        LineKind::Face
    } else {
        LineKind::Other
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Stats {
    pub vertices: usize,
    pub faces_kept: usize,
    pub faces_dropped: usize,
    pub other: usize,
}

pub struct Clipper {
    pts: Vec<(f64, f64, f64)>,
    height: f64,
    stats: Stats,
}

impl Clipper {
    pub fn new(height: f64) -> Clipper {
        Clipper {
            pts: Vec::new(),
            height,
            stats: Stats::default(),
        }
    }

    pub fn number_of_vertices(&self) -> usize {
        self.pts.len()
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Handles one line, `l` still carrying its terminator.
    /// `lineno` is 1-based and only used in errors.
    pub fn process_line<W: Write>(
        &mut self,
        lineno: usize,
        l: &str,
        out: &mut W,
    ) -> ClipResult<()> {
        match classify(l) {
            LineKind::Vertex => {
                let v = parse_3_f64(lineno, l)?;
                self.pts.push(v);
                self.stats.vertices += 1;
                out.write_all(
                    format!("v {} {} {}\n", fmt_f64(v.0), fmt_f64(v.1), fmt_f64(v.2)).as_bytes(),
                )?;
            }
            LineKind::Face => {
                let f = parse_3_i64(lineno, l)?;
                let y0 = self.get_y(lineno, f.0)?;
                let y1 = self.get_y(lineno, f.1)?;
                let y2 = self.get_y(lineno, f.2)?;
                if y0 < self.height && y1 < self.height && y2 < self.height {
                    self.stats.faces_kept += 1;
                    out.write_all(format!("f {} {} {}\n", f.0, f.1, f.2).as_bytes())?;
                } else {
                    debug!("line {}: dropping face {} {} {}", lineno, f.0, f.1, f.2);
                    self.stats.faces_dropped += 1;
                }
            }
            LineKind::Other => {
                self.stats.other += 1;
                out.write_all(l.as_bytes())?;
            }
        }
        Ok(())
    }

    fn get_y(&self, lineno: usize, i: i64) -> ClipResult<f64> {
        if i < 1 || i as usize > self.pts.len() {
            return Err(ClipError::Index(lineno, i, self.pts.len()));
        }
        Ok(self.pts[(i - 1) as usize].1)
    }
}

/// Copies `input` to `output`, dropping the faces not entirely below `height`.
pub fn clip<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    height: f64,
) -> ClipResult<Stats> {
    let mut clipper = Clipper::new(height);
    let mut l = String::new();
    let mut lineno: usize = 0;
    loop {
        l.clear();
        if input.read_line(&mut l)? == 0 {
            break;
        }
        lineno += 1;
        clipper.process_line(lineno, &l, &mut output)?;
    }
    output.flush()?;
    debug!("{} lines read, {} vertices", lineno, clipper.number_of_vertices());
    Ok(clipper.stats().clone())
}

/// 6 decimals, with `nan`/`inf` spelled in lowercase
fn fmt_f64(x: f64) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.6}", x)
    }
}

fn parse_3_f64(lineno: usize, l: &str) -> ClipResult<(f64, f64, f64)> {
    let ls: Vec<&str> = l.split_whitespace().skip(1).collect();
    if ls.len() != 3 {
        return Err(ClipError::Vertex(lineno, ls.len()));
    }
    let mut v = [0.0_f64; 3];
    for (i, s) in ls.iter().enumerate() {
        v[i] = s.parse::<f64>().map_err(|e| ClipError::Float(lineno, e))?;
    }
    Ok((v[0], v[1], v[2]))
}

fn parse_3_i64(lineno: usize, l: &str) -> ClipResult<(i64, i64, i64)> {
    let ls: Vec<&str> = l.split_whitespace().skip(1).collect();
    if ls.len() != 3 {
        return Err(ClipError::Face(lineno, ls.len()));
    }
    let mut f = [0_i64; 3];
    for (i, s) in ls.iter().enumerate() {
        f[i] = s.parse::<i64>().map_err(|e| ClipError::Int(lineno, e))?;
    }
    Ok((f[0], f[1], f[2]))
}
