//! Glyph assignment for room legends.
//!
//! Each object placed on the room grid needs a single character. The
//! choice is driven by [`GlyphState`], which carries the characters already
//! taken, the legend built so far, and the cursor into [`FALLBACK_GLYPHS`].
//! [`assign`] consumes a state and returns the next one, so the algorithm
//! can be exercised without building a grid.

use std::fmt;

use kg_core::{ObjectKind, Paint};

use crate::error::{RenderError, RenderResult};

/// Characters tried in order once an object's initial is taken.
pub const FALLBACK_GLYPHS: &str =
    "!\"#$%&'()*+,-./:;<=>?[\\]^_`{|}~0123456789ABCDEFGHIJKLMNOPQRSTUVW";

/// Latin/Cyrillic pairs that look identical, stored lower code point first.
const LOOKALIKES: [(char, char); 24] = [
    ('A', 'А'),
    ('B', 'В'),
    ('E', 'Е'),
    ('K', 'К'),
    ('M', 'М'),
    ('H', 'Н'),
    ('O', 'О'),
    ('P', 'Р'),
    ('C', 'С'),
    ('T', 'Т'),
    ('X', 'Х'),
    ('Y', 'У'),
    ('a', 'а'),
    ('b', 'в'),
    ('e', 'е'),
    ('k', 'к'),
    ('m', 'м'),
    ('h', 'н'),
    ('o', 'о'),
    ('p', 'р'),
    ('c', 'с'),
    ('t', 'т'),
    ('x', 'х'),
    ('y', 'у'),
];

/// Equality that treats Latin/Cyrillic look-alikes as the same character.
pub fn loose_eq(a: char, b: char) -> bool {
    let pair = if a > b { (b, a) } else { (a, b) };
    pair.0 == pair.1 || LOOKALIKES.contains(&pair)
}

/// `true` if any character of `used` is loosely equal to `c`.
pub fn loose_contains(used: &[char], c: char) -> bool {
    used.iter().any(|&u| loose_eq(u, c))
}

/// A character together with its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    /// The character drawn on the grid.
    pub ch: char,
    /// Its color.
    pub paint: Paint,
}

impl Glyph {
    /// Create a glyph.
    pub fn new(ch: char, paint: Paint) -> Self {
        Self { ch, paint }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [0u8; 4];
        f.write_str(&self.paint.paint(self.ch.encode_utf8(&mut buf)))
    }
}

/// Color of an object's glyph.
pub fn paint_for(kind: ObjectKind, is_viewer: bool) -> Paint {
    if is_viewer {
        return Paint::Reverse;
    }
    match kind {
        ObjectKind::Npc => Paint::Red,
        ObjectKind::Items => Paint::Blue,
        ObjectKind::Player => Paint::White,
        ObjectKind::Corpse => Paint::Black,
        ObjectKind::Structure => Paint::Yellow,
        ObjectKind::Other => Paint::Plain,
    }
}

/// Glyphs mapped to the names they stand for, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Legend {
    entries: Vec<(Glyph, Vec<String>)>,
}

impl Legend {
    /// Number of glyphs in the legend.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in order.
    pub fn entries(&self) -> impl Iterator<Item = (&Glyph, &[String])> {
        self.entries.iter().map(|(g, names)| (g, names.as_slice()))
    }

    /// Names listed for `glyph`.
    pub fn names(&self, glyph: Glyph) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(g, _)| *g == glyph)
            .map(|(_, names)| names.as_slice())
    }

    fn insert(&mut self, glyph: Glyph, name: &str) {
        self.entries.push((glyph, vec![name.to_string()]));
    }

    fn append(&mut self, glyph: Glyph, name: &str) {
        match self.entries.iter_mut().find(|(g, _)| *g == glyph) {
            Some((_, names)) => names.push(name.to_string()),
            None => self.insert(glyph, name),
        }
    }

    /// Move the names of `from` to a new entry `to` at the end, adding `name`.
    fn rekey(&mut self, from: Glyph, to: Glyph, name: &str) {
        if from == to {
            self.append(from, name);
            return;
        }
        let mut names = match self.entries.iter().position(|(g, _)| *g == from) {
            Some(i) => self.entries.remove(i).1,
            None => Vec::new(),
        };
        names.push(name.to_string());
        self.entries.push((to, names));
    }

    /// Render as `glyph: name, name` lines.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(glyph, names)| format!("{glyph}: {}", names.join(", ")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Accumulated assignment state for one room.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphState {
    /// Characters already placed, uncolored.
    pub used: Vec<char>,
    /// Legend built so far.
    pub legend: Legend,
    /// Index of the next fallback glyph to try.
    pub next_fallback: usize,
}

impl GlyphState {
    /// A fresh state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick a free character for `name`: its initial upper-cased, then
    /// lower-cased, then the fallback alphabet.
    fn pick_char(&mut self, name: &str) -> RenderResult<char> {
        let initial = name.chars().next();
        let upper = initial.and_then(|c| c.to_uppercase().next());
        if let Some(c) = upper.filter(|&c| !loose_contains(&self.used, c)) {
            return Ok(c);
        }
        let lower = upper.and_then(|c| c.to_lowercase().next());
        if let Some(c) = lower.filter(|&c| !loose_contains(&self.used, c)) {
            return Ok(c);
        }
        loop {
            let c = FALLBACK_GLYPHS
                .chars()
                .nth(self.next_fallback)
                .ok_or_else(|| RenderError::GlyphsExhausted(name.to_string()))?;
            self.next_fallback += 1;
            if !loose_contains(&self.used, c) {
                return Ok(c);
            }
        }
    }
}

/// Assign a glyph to the object `name` of kind `kind`.
///
/// `occupant` is the glyph already drawn on the object's cell, if any. A
/// shared cell reuses that glyph; when the newcomer is the viewer the glyph
/// is recolored and its legend entry moves to the recolored key.
pub fn assign(
    mut state: GlyphState,
    occupant: Option<Glyph>,
    name: &str,
    kind: ObjectKind,
    is_viewer: bool,
) -> RenderResult<(GlyphState, Glyph)> {
    if let Some(glyph) = occupant {
        if is_viewer {
            let recolored = Glyph::new(glyph.ch, Paint::Reverse);
            state.legend.rekey(glyph, recolored, name);
            return Ok((state, recolored));
        }
        state.legend.append(glyph, name);
        return Ok((state, glyph));
    }

    let ch = state.pick_char(name)?;
    let glyph = Glyph::new(ch, paint_for(kind, is_viewer));
    state.used.push(ch);
    state.legend.insert(glyph, name);
    Ok((state, glyph))
}
