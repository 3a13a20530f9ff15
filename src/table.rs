use crate::error::MonteCarloError;
use crate::face::Face;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The two shapes a game's results can be shown in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShowForm {
    /// One row per roll, one column per die.
    Wide,
    /// One row per (roll, die) pair with a single face column.
    Narrow,
}

impl FromStr for ShowForm {
    type Err = MonteCarloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wide" => Ok(ShowForm::Wide),
            "narrow" => Ok(ShowForm::Narrow),
            _ => Err(MonteCarloError::InvalidArgument(format!(
                "form must be \"wide\" or \"narrow\", not {:?}",
                s
            ))),
        }
    }
}

impl fmt::Display for ShowForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShowForm::Wide => write!(f, "wide"),
            ShowForm::Narrow => write!(f, "narrow"),
        }
    }
}

/// Results of one play, stored row-major: `rows[roll][die]`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WideTable<F> {
    num_dice: usize,
    rows: Vec<Vec<F>>,
}

impl<F> WideTable<F> {
    /// Build from per-die roll sequences, all of the same length.
    pub(crate) fn from_columns(columns: Vec<Vec<F>>) -> Self {
        let num_dice = columns.len();
        let num_rolls = columns.first().map_or(0, |c| c.len());
        debug_assert!(columns.iter().all(|c| c.len() == num_rolls));
        let mut cols: Vec<_> = columns.into_iter().map(|c| c.into_iter()).collect();
        let rows = (0..num_rolls)
            .map(|_| cols.iter_mut().filter_map(|c| c.next()).collect())
            .collect();
        Self { num_dice, rows }
    }

    pub fn num_rolls(&self) -> usize {
        self.rows.len()
    }

    pub fn num_dice(&self) -> usize {
        self.num_dice
    }

    pub fn rows(&self) -> &[Vec<F>] {
        &self.rows
    }

    pub fn row(&self, roll: usize) -> Option<&[F]> {
        self.rows.get(roll).map(|r| r.as_slice())
    }

    pub fn get(&self, roll: usize, die: usize) -> Option<&F> {
        self.rows.get(roll).and_then(|r| r.get(die))
    }

    /// Every face one die rolled, in roll order.
    pub fn column(&self, die: usize) -> impl Iterator<Item = &F> {
        self.rows.iter().filter_map(move |r| r.get(die))
    }

    pub fn narrow(&self) -> NarrowTable<'_, F> {
        NarrowTable { wide: self }
    }
}

impl<F: Face> fmt::Display for WideTable<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "roll")?;
        for die in 0..self.num_dice {
            write!(f, "\t{}", die)?;
        }
        writeln!(f)?;
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "{}", i)?;
            for face in row {
                write!(f, "\t{}", face)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NarrowRow<'a, F> {
    pub roll: usize,
    pub die: usize,
    pub face: &'a F,
}

/// Long view of a `WideTable`, indexed by (roll, die). Rows are ordered by
/// roll, then by die.
#[derive(Debug)]
pub struct NarrowTable<'a, F> {
    wide: &'a WideTable<F>,
}

impl<'a, F> Clone for NarrowTable<'a, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, F> Copy for NarrowTable<'a, F> {}

impl<'a, F> NarrowTable<'a, F> {
    pub fn len(&self) -> usize {
        self.wide.num_rolls() * self.wide.num_dice()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize) -> Option<NarrowRow<'a, F>> {
        if self.wide.num_dice == 0 {
            return None;
        }
        let (roll, die) = (i / self.wide.num_dice, i % self.wide.num_dice);
        self.wide
            .get(roll, die)
            .map(|face| NarrowRow { roll, die, face })
    }

    pub fn iter(&self) -> impl Iterator<Item = NarrowRow<'a, F>> + 'a {
        let wide: &'a WideTable<F> = self.wide;
        wide.rows.iter().enumerate().flat_map(|(roll, row)| {
            row.iter()
                .enumerate()
                .map(move |(die, face)| NarrowRow { roll, die, face })
        })
    }
}

impl<'a, F: Serialize> Serialize for NarrowTable<'a, F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'a, F: Face> fmt::Display for NarrowTable<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "roll\tdie\tface")?;
        for r in self.iter() {
            writeln!(f, "{}\t{}\t{}", r.roll, r.die, r.face)?;
        }
        Ok(())
    }
}

/// What `Game::show` hands back.
#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum Projection<'a, F> {
    Wide(&'a WideTable<F>),
    Narrow(NarrowTable<'a, F>),
}

impl<'a, F> Projection<'a, F> {
    /// Number of rows in this shape.
    pub fn len(&self) -> usize {
        match self {
            Projection::Wide(w) => w.num_rolls(),
            Projection::Narrow(n) => n.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn form(&self) -> ShowForm {
        match self {
            Projection::Wide(_) => ShowForm::Wide,
            Projection::Narrow(_) => ShowForm::Narrow,
        }
    }

    pub fn as_wide(&self) -> Option<&'a WideTable<F>> {
        match self {
            Projection::Wide(w) => Some(*w),
            Projection::Narrow(_) => None,
        }
    }

    pub fn as_narrow(&self) -> Option<NarrowTable<'a, F>> {
        match self {
            Projection::Wide(_) => None,
            Projection::Narrow(n) => Some(*n),
        }
    }
}

impl<'a, F: Face> fmt::Display for Projection<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Projection::Wide(w) => fmt::Display::fmt(w, f),
            Projection::Narrow(n) => fmt::Display::fmt(n, f),
        }
    }
}
