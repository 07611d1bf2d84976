use crate::config::ColumnRegion;

/// Vertical distance within which glyphs or words share a visual line.
const Y_TOLERANCE: f32 = 3.0;
/// Horizontal gap beyond which two glyphs belong to separate words.
const X_TOLERANCE: f32 = 3.0;
const SIZE_EPSILON: f32 = 0.01;

/// One positioned character, in top-left-origin page points.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub x0: f32,
    pub top: f32,
    pub x1: f32,
    pub bottom: f32,
    pub size: Option<f32>,
}

impl Glyph {
    fn center(&self) -> (f32, f32) {
        ((self.x0 + self.x1) / 2.0, (self.top + self.bottom) / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub x0: f32,
    pub top: f32,
    pub x1: f32,
    pub bottom: f32,
    pub size: Option<f32>,
}

/// What the pipeline needs from a page: sized words in reading order and the
/// text inside a rectangle.
pub trait PageLayout {
    fn number(&self) -> usize;
    fn words(&self) -> Vec<Word>;
    fn region_text(&self, region: &ColumnRegion) -> String;
}

/// A page held in memory as its glyphs, in content-stream order.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub number: usize,
    pub width: f32,
    pub height: f32,
    pub glyphs: Vec<Glyph>,
}

impl Page {
    pub fn new(number: usize, width: f32, height: f32, glyphs: Vec<Glyph>) -> Self {
        Self {
            number,
            width,
            height,
            glyphs,
        }
    }

    /// Glyphs whose centre falls inside `region`.
    pub fn crop(&self, region: &ColumnRegion) -> Page {
        let glyphs = self
            .glyphs
            .iter()
            .filter(|g| {
                let (cx, cy) = g.center();
                region.contains(cx, cy)
            })
            .cloned()
            .collect();
        Page {
            number: self.number,
            width: region.x1 - region.x0,
            height: region.bottom - region.top,
            glyphs,
        }
    }

    /// Plain text: one output line per visual line, words joined by a space.
    pub fn extract_text(&self) -> String {
        cluster_lines(self.words(), |w| w.top)
            .into_iter()
            .map(|line| {
                line.iter()
                    .map(|w| w.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl PageLayout for Page {
    fn number(&self) -> usize {
        self.number
    }

    fn words(&self) -> Vec<Word> {
        let lines = cluster_lines(self.glyphs.clone(), |g| g.top);
        let mut words = Vec::new();
        for line in lines {
            words.extend(split_words(line));
        }
        words
    }

    fn region_text(&self, region: &ColumnRegion) -> String {
        self.crop(region).extract_text()
    }
}

/// Group items into lines by a vertical key, top to bottom, each line sorted by x.
fn cluster_lines<T: HasX>(mut items: Vec<T>, top: impl Fn(&T) -> f32) -> Vec<Vec<T>> {
    items.sort_by(|a, b| top(a).total_cmp(&top(b)));

    let mut lines: Vec<Vec<T>> = Vec::new();
    let mut last_top = f32::NEG_INFINITY;
    for item in items {
        let t = top(&item);
        match lines.last_mut() {
            Some(line) if t - last_top <= Y_TOLERANCE => line.push(item),
            _ => lines.push(vec![item]),
        }
        last_top = t;
    }

    for line in &mut lines {
        line.sort_by(|a, b| a.x0().total_cmp(&b.x0()));
    }
    lines
}

trait HasX {
    fn x0(&self) -> f32;
}

impl HasX for Glyph {
    fn x0(&self) -> f32 {
        self.x0
    }
}

impl HasX for Word {
    fn x0(&self) -> f32 {
        self.x0
    }
}

/// Split one x-sorted line of glyphs at whitespace, wide gaps and size changes.
fn split_words(line: Vec<Glyph>) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current: Option<Word> = None;

    for g in line {
        if g.ch.is_whitespace() {
            words.extend(current.take());
            continue;
        }
        let starts_new = match &current {
            Some(w) => {
                g.x0 - w.x1 > X_TOLERANCE
                    || (g.top - w.top).abs() > Y_TOLERANCE
                    || !same_size(w.size, g.size)
            }
            None => true,
        };
        if starts_new {
            words.extend(current.take());
            current = Some(Word {
                text: g.ch.to_string(),
                x0: g.x0,
                top: g.top,
                x1: g.x1,
                bottom: g.bottom,
                size: g.size,
            });
        } else if let Some(w) = current.as_mut() {
            w.text.push(g.ch);
            w.x1 = w.x1.max(g.x1);
            w.bottom = w.bottom.max(g.bottom);
        }
    }
    words.extend(current);
    words
}

fn same_size(a: Option<f32>, b: Option<f32>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a - b).abs() < SIZE_EPSILON,
        (None, None) => true,
        _ => false,
    }
}
