use crate::error::{MonteCarloError, Result};
use crate::face::{label, Face};
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Count how many times each of `faces` shows up in `observed`.
///
/// Counts come back in the same order as `faces`. Observing a face that isn't
/// in `faces` is an error.
pub fn tally<F, I>(faces: &[F], observed: I) -> Result<Vec<u64>>
where
    F: Face,
    I: IntoIterator,
    I::Item: Borrow<F>,
{
    let index: HashMap<&F, usize> = faces.iter().enumerate().map(|(i, f)| (f, i)).collect();
    let mut counts = vec![0; faces.len()];
    for o in observed {
        let o = o.borrow();
        match index.get(o) {
            Some(&i) => counts[i] += 1,
            None => return Err(MonteCarloError::InvalidLabel(label(o))),
        }
    }
    Ok(counts)
}

/// Per-roll face counts: one row per roll, one column per possible face.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FaceCounts<F> {
    faces: Vec<F>,
    rows: Vec<Vec<u64>>,
}

impl<F: Face> FaceCounts<F> {
    pub fn new(faces: Vec<F>) -> Self {
        Self {
            faces,
            rows: vec![],
        }
    }

    /// Count the faces of one roll and append it as the next row.
    pub fn add_roll(&mut self, roll: &[F]) -> Result<()> {
        let counts = tally(&self.faces, roll)?;
        self.rows.push(counts);
        Ok(())
    }

    pub fn faces(&self) -> &[F] {
        &self.faces
    }

    pub fn rows(&self) -> &[Vec<u64>] {
        &self.rows
    }

    pub fn row(&self, roll: usize) -> Option<&[u64]> {
        self.rows.get(roll).map(|r| r.as_slice())
    }

    pub fn num_rolls(&self) -> usize {
        self.rows.len()
    }

    /// How many dice showed `face` on roll number `roll`.
    pub fn count(&self, roll: usize, face: &F) -> Option<u64> {
        let col = self.faces.iter().position(|f| f == face)?;
        self.rows.get(roll).map(|r| r[col])
    }

    /// Column sums: how many times each face was rolled over the whole game.
    pub fn totals(&self) -> Vec<u64> {
        let mut totals = vec![0; self.faces.len()];
        for row in &self.rows {
            for (t, c) in totals.iter_mut().zip(row.iter()) {
                *t += c;
            }
        }
        totals
    }
}

impl<F: Face> fmt::Display for FaceCounts<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "roll")?;
        for face in &self.faces {
            write!(f, "\t{}", face)?;
        }
        writeln!(f)?;
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "{}", i)?;
            for c in row {
                write!(f, "\t{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ComboCount<F> {
    pub combo: Vec<F>,
    pub count: u64,
}

/// How often each combination of faces was rolled.
///
/// A combo is the sorted faces of one roll, so order across dice doesn't
/// matter. Entries are ordered most frequent first; ties are ordered by combo.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ComboCounts<F> {
    entries: Vec<ComboCount<F>>,
}

impl<F: Face> ComboCounts<F> {
    pub fn from_rolls<'a, I>(rolls: I) -> Self
    where
        I: IntoIterator<Item = &'a [F]>,
        F: 'a,
    {
        let mut counts: BTreeMap<Vec<F>, u64> = BTreeMap::new();
        for roll in rolls {
            let mut combo = roll.to_vec();
            combo.sort();
            *counts.entry(combo).or_insert(0) += 1;
        }
        let mut entries: Vec<ComboCount<F>> = counts
            .into_iter()
            .map(|(combo, count)| ComboCount { combo, count })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.combo.cmp(&b.combo)));
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComboCount<F>> {
        self.entries.iter()
    }

    /// Number of distinct combos.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Occurrences of the given combo. The faces may be in any order.
    pub fn count(&self, combo: &[F]) -> u64 {
        let mut key = combo.to_vec();
        key.sort();
        self.entries
            .iter()
            .find(|e| e.combo == key)
            .map_or(0, |e| e.count)
    }

    /// Sum of all counts, which is the number of rolls.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn most_common(&self) -> Option<&ComboCount<F>> {
        self.entries.first()
    }
}

impl<F: Face> fmt::Display for ComboCounts<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "combo\tcount")?;
        for e in &self.entries {
            let faces: Vec<String> = e.combo.iter().map(|c| c.to_string()).collect();
            writeln!(f, "({})\t{}", faces.join(", "), e.count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod counts_tests {
    use super::{tally, ComboCounts, FaceCounts};
    use crate::error::MonteCarloError;

    #[test]
    fn tally_counts_in_face_order() {
        let faces = [3, 1, 2];
        assert_eq!(tally(&faces, vec![1, 1, 2]).unwrap(), vec![0, 2, 1]);
        assert_eq!(tally(&faces, &[2, 2]).unwrap(), vec![0, 0, 2]);
        assert_eq!(tally(&faces, Vec::<i32>::new()).unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn tally_unknown_face() {
        let e = tally(&["A", "B"], vec!["C"]).unwrap_err();
        assert!(matches!(e, MonteCarloError::InvalidLabel(_)));
    }

    #[test]
    fn face_counts_rows() {
        let mut fc = FaceCounts::new(vec![1, 2, 3, 4, 5, 6]);
        fc.add_roll(&[6, 6, 6, 6, 6]).unwrap();
        fc.add_roll(&[1, 2, 1, 4, 2]).unwrap();
        assert_eq!(fc.num_rolls(), 2);
        assert_eq!(fc.row(0).unwrap(), &[0, 0, 0, 0, 0, 5]);
        assert_eq!(fc.row(1).unwrap(), &[2, 2, 0, 1, 0, 0]);
        assert_eq!(fc.count(1, &4), Some(1));
        assert_eq!(fc.count(1, &7), None);
        assert_eq!(fc.count(2, &4), None);
        assert_eq!(fc.totals(), vec![2, 2, 0, 1, 0, 5]);
        assert!(fc.add_roll(&[9]).is_err());
        assert_eq!(fc.num_rolls(), 2);
    }

    #[test]
    fn combos_sorted_by_count_then_combo() {
        let rolls: Vec<Vec<&str>> = vec![
            vec!["B", "A"],
            vec!["B", "B"],
            vec!["A", "B"],
            vec!["A", "A"],
        ];
        let cc = ComboCounts::from_rolls(rolls.iter().map(|r| r.as_slice()));
        let got: Vec<(Vec<&str>, u64)> = cc.iter().map(|e| (e.combo.clone(), e.count)).collect();
        assert_eq!(
            got,
            vec![
                (vec!["A", "B"], 2),
                (vec!["A", "A"], 1),
                (vec!["B", "B"], 1),
            ]
        );
        assert_eq!(cc.len(), 3);
        assert_eq!(cc.total(), 4);
        assert_eq!(cc.count(&["B", "A"]), 2);
        assert_eq!(cc.count(&["C", "A"]), 0);
        assert_eq!(cc.most_common().unwrap().combo, vec!["A", "B"]);
    }

    #[test]
    fn display_tables() {
        let mut fc = FaceCounts::new(vec!['H', 'T']);
        fc.add_roll(&['H', 'H', 'T']).unwrap();
        assert_eq!(fc.to_string(), "roll\tH\tT\n0\t2\t1\n");
        let rolls = vec![vec!['T', 'H']];
        let cc = ComboCounts::from_rolls(rolls.iter().map(|r| r.as_slice()));
        assert_eq!(cc.to_string(), "combo\tcount\n(H, T)\t1\n");
    }
}
