use crate::counts::{ComboCounts, FaceCounts};
use crate::error::{MonteCarloError, Result};
use crate::face::Face;
use crate::game::Game;
use crate::table::WideTable;
use log::trace;
use serde::Serialize;
use serde_json::{json, Value};

/// Descriptive statistics over the most recent play of a game.
///
/// The analyzer borrows the game, so the game can't be played again while
/// the analyzer is alive. Build a new analyzer after re-playing.
#[derive(Debug)]
pub struct Analyzer<'a, F> {
    game: &'a Game<F>,
    results: &'a WideTable<F>,
    jackpot_results: Option<Vec<bool>>,
    combo_results: Option<ComboCounts<F>>,
    face_counts: Option<FaceCounts<F>>,
}

impl<'a, F: Face> Analyzer<'a, F> {
    pub fn new(game: &'a Game<F>) -> Result<Self> {
        let results = game.results().ok_or(MonteCarloError::NotPlayed)?;
        Ok(Self {
            game,
            results,
            jackpot_results: None,
            combo_results: None,
            face_counts: None,
        })
    }

    pub fn game(&self) -> &'a Game<F> {
        self.game
    }

    /// Number of rolls where every die showed the same face.
    ///
    /// The per-roll outcome is kept and available from `jackpot_results`.
    pub fn jackpot(&mut self) -> usize {
        let table: Vec<bool> = self
            .results
            .rows()
            .iter()
            .map(|row| row.windows(2).all(|w| w[0] == w[1]))
            .collect();
        let count = table.iter().filter(|j| **j).count();
        trace!("{} jackpots in {} rolls", count, table.len());
        self.jackpot_results = Some(table);
        count
    }

    /// Frequency of each distinct combination of faces, most frequent first.
    pub fn combo(&mut self) -> &ComboCounts<F> {
        let combos = ComboCounts::from_rolls(self.results.rows().iter().map(|r| r.as_slice()));
        trace!("{} distinct combos", combos.len());
        self.combo_results.insert(combos)
    }

    /// How many dice showed each face, for every roll.
    ///
    /// Columns follow the face order of the game's first die and include faces
    /// that were never rolled.
    pub fn face_counts_per_roll(&mut self) -> Result<&FaceCounts<F>> {
        let mut counts = FaceCounts::new(self.game.faces().to_vec());
        for row in self.results.rows() {
            counts.add_roll(row)?;
        }
        Ok(self.face_counts.insert(counts))
    }

    pub fn jackpot_results(&self) -> Option<&[bool]> {
        self.jackpot_results.as_deref()
    }

    pub fn combo_results(&self) -> Option<&ComboCounts<F>> {
        self.combo_results.as_ref()
    }

    pub fn face_counts(&self) -> Option<&FaceCounts<F>> {
        self.face_counts.as_ref()
    }

    /// Recompute everything and bundle it up as JSON.
    pub fn summary(&mut self) -> Result<Value>
    where
        F: Serialize,
    {
        let rolls = self.results.num_rolls();
        let dice = self.results.num_dice();
        let game: &'a Game<F> = self.game;
        let faces = game.faces();
        let jackpots = self.jackpot();
        let totals = self.face_counts_per_roll()?.totals();
        let face_totals: Vec<Value> = faces
            .iter()
            .zip(totals)
            .map(|(face, count)| json!({"face": face, "count": count}))
            .collect();
        let combos = self.combo();
        Ok(json!({
            "rolls": rolls,
            "dice": dice,
            "jackpots": jackpots,
            "face_totals": face_totals,
            "combos": combos,
        }))
    }
}

#[cfg(test)]
mod analyzer_tests {
    use super::Analyzer;
    use crate::die::Die;
    use crate::error::MonteCarloError;
    use crate::game::Game;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn loaded(faces: &[&'static str], only: &'static str) -> Die<&'static str> {
        let mut d = Die::new(faces.to_vec()).unwrap();
        for f in faces.iter().filter(|f| **f != only) {
            d.change_weight(f, 0.0).unwrap();
        }
        d
    }

    #[test]
    fn new_before_play() {
        let g = Game::new(vec![Die::new(1..=6).unwrap()]).unwrap();
        assert_eq!(Analyzer::new(&g).unwrap_err(), MonteCarloError::NotPlayed);
    }

    #[test]
    fn always_jackpot() {
        let faces = ["A", "B", "C"];
        let mut g = Game::new(vec![loaded(&faces, "B"), loaded(&faces, "B")]).unwrap();
        g.play(20).unwrap();
        let mut a = Analyzer::new(&g).unwrap();
        assert_eq!(a.jackpot_results(), None);
        assert_eq!(a.jackpot(), 20);
        assert_eq!(a.jackpot_results().unwrap(), &[true; 20][..]);
    }

    #[test]
    fn never_jackpot() {
        let faces = ["A", "B", "C"];
        let mut g = Game::new(vec![loaded(&faces, "A"), loaded(&faces, "C")]).unwrap();
        g.play(20).unwrap();
        let mut a = Analyzer::new(&g).unwrap();
        assert_eq!(a.jackpot(), 0);
        assert!(a.jackpot_results().unwrap().iter().all(|j| !j));
    }

    #[test]
    fn single_die_always_jackpot() {
        let mut g = Game::new(vec![Die::new(1..=6).unwrap()]).unwrap();
        g.play(10).unwrap();
        assert_eq!(Analyzer::new(&g).unwrap().jackpot(), 10);
    }

    #[test]
    fn fair_pair_jackpots() {
        let mut g = Game::new(vec![Die::new(1..=6).unwrap(), Die::new(1..=6).unwrap()]).unwrap();
        g.play_with(1000, &mut StdRng::seed_from_u64(2024)).unwrap();
        let mut a = Analyzer::new(&g).unwrap();
        let j = a.jackpot();
        // expect about 167, sd about 12
        assert!(j > 110 && j < 225, "{} jackpots", j);
        let flagged = a.jackpot_results().unwrap();
        assert_eq!(flagged.len(), 1000);
        for (row, flag) in g.results().unwrap().rows().iter().zip(flagged.iter()) {
            assert_eq!(*flag, row[0] == row[1]);
        }
    }

    #[test]
    fn combos_of_three_coins() {
        let coin = || Die::new(vec!["A", "B"]).unwrap();
        let mut g = Game::new(vec![coin(), coin(), coin()]).unwrap();
        g.play(10).unwrap();
        let mut a = Analyzer::new(&g).unwrap();
        let combos = a.combo();
        assert_eq!(combos.total(), 10);
        let possible = vec![
            vec!["A", "A", "A"],
            vec!["A", "A", "B"],
            vec!["A", "B", "B"],
            vec!["B", "B", "B"],
        ];
        let mut observed = vec![];
        for row in g.results().unwrap().rows() {
            let mut c = row.clone();
            c.sort();
            if !observed.contains(&c) {
                observed.push(c);
            }
        }
        assert_eq!(combos.len(), observed.len());
        for e in combos.iter() {
            assert!(possible.contains(&e.combo));
            assert!(observed.contains(&e.combo));
        }
        let counts: Vec<u64> = combos.iter().map(|e| e.count).collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
        assert!(a.combo_results().is_some());
    }

    #[test]
    fn face_counts_match_rolls() {
        let mut g = Game::new(vec![
            Die::new(1..=6).unwrap(),
            Die::new(1..=6).unwrap(),
            Die::new(1..=6).unwrap(),
            Die::new(1..=6).unwrap(),
        ])
        .unwrap();
        g.play_with(30, &mut StdRng::seed_from_u64(5)).unwrap();
        let mut a = Analyzer::new(&g).unwrap();
        let fc = a.face_counts_per_roll().unwrap();
        assert_eq!(fc.faces(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(fc.num_rolls(), 30);
        for (i, row) in g.results().unwrap().rows().iter().enumerate() {
            assert_eq!(fc.row(i).unwrap().iter().sum::<u64>(), 4);
            for face in 1..=6 {
                let n = row.iter().filter(|f| **f == face).count() as u64;
                assert_eq!(fc.count(i, &face), Some(n));
            }
        }
        assert_eq!(fc.totals().iter().sum::<u64>(), 120);
        assert!(a.face_counts().is_some());
    }

    #[test]
    fn analyze_again_after_replay() {
        let mut g = Game::new(vec![Die::new(vec!['H', 'T']).unwrap()]).unwrap();
        g.play(5).unwrap();
        assert_eq!(Analyzer::new(&g).unwrap().combo().total(), 5);
        g.play(8).unwrap();
        assert_eq!(Analyzer::new(&g).unwrap().combo().total(), 8);
    }

    #[test]
    fn summary_json() {
        let faces = ["A", "B"];
        let mut g = Game::new(vec![loaded(&faces, "A"), loaded(&faces, "A")]).unwrap();
        g.play(4).unwrap();
        let v = Analyzer::new(&g).unwrap().summary().unwrap();
        assert_eq!(v["rolls"], 4);
        assert_eq!(v["dice"], 2);
        assert_eq!(v["jackpots"], 4);
        assert_eq!(
            v["face_totals"],
            serde_json::json!([{"face": "A", "count": 8}, {"face": "B", "count": 0}])
        );
        assert_eq!(
            v["combos"],
            serde_json::json!({"entries": [{"combo": ["A", "A"], "count": 4}]})
        );
    }
}
