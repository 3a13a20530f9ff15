use crate::die::Die;
use crate::error::{MonteCarloError, Result};
use crate::face::Face;
use crate::global::conf_def;
use crate::table::{Projection, ShowForm, WideTable};
use log::debug;
use rand::{thread_rng, Rng};
use std::collections::BTreeSet;

/// Rolls a set of similar dice together some number of times and keeps the
/// results of the most recent play.
///
/// Similar means every die has the same faces. Each die keeps its own
/// weights.
#[derive(Debug, Clone)]
pub struct Game<F> {
    dice: Vec<Die<F>>,
    results: Option<WideTable<F>>,
}

impl<F: Face> Game<F> {
    pub fn new(dice: Vec<Die<F>>) -> Result<Self> {
        let first = dice.first().ok_or_else(|| {
            MonteCarloError::InvalidConfiguration("a game needs at least one die".to_string())
        })?;
        let faces: BTreeSet<&F> = first.faces().iter().collect();
        for (i, die) in dice.iter().enumerate().skip(1) {
            let other: BTreeSet<&F> = die.faces().iter().collect();
            if other != faces {
                return Err(MonteCarloError::InvalidConfiguration(format!(
                    "die {} has faces {:?} but die 0 has {:?}",
                    i,
                    die.faces(),
                    first.faces()
                )));
            }
        }
        Ok(Self {
            dice,
            results: None,
        })
    }

    /// Roll every die `n` times, replacing the results of any previous play.
    ///
    /// If any die can't be rolled, the previous results are kept.
    pub fn play_with<R>(&mut self, n: usize, rng: &mut R) -> Result<()>
    where
        R: Rng + ?Sized,
    {
        let mut columns = Vec::with_capacity(self.dice.len());
        for die in &self.dice {
            columns.push(die.roll_with(n, rng)?);
        }
        if self.results.is_some() {
            debug!("discarding results of previous play");
        }
        debug!("rolled {} dice {} times", self.dice.len(), n);
        self.results = Some(WideTable::from_columns(columns));
        Ok(())
    }

    pub fn play(&mut self, n: usize) -> Result<()> {
        self.play_with(n, &mut thread_rng())
    }

    /// Results of the most recent play in the given form, "wide" or "narrow".
    pub fn show(&self, form: &str) -> Result<Projection<'_, F>> {
        self.show_form(form.parse()?)
    }

    pub fn show_default(&self) -> Result<Projection<'_, F>> {
        self.show(conf_def::SHOW_FORM)
    }

    pub fn show_form(&self, form: ShowForm) -> Result<Projection<'_, F>> {
        let results = self.results.as_ref().ok_or(MonteCarloError::NotPlayed)?;
        Ok(match form {
            ShowForm::Wide => Projection::Wide(results),
            ShowForm::Narrow => Projection::Narrow(results.narrow()),
        })
    }

    pub fn results(&self) -> Option<&WideTable<F>> {
        self.results.as_ref()
    }

    pub fn is_played(&self) -> bool {
        self.results.is_some()
    }

    pub fn dice(&self) -> &[Die<F>] {
        &self.dice
    }

    /// Mutable access to one die, e.g. to change its weights between plays.
    pub fn die_mut(&mut self, index: usize) -> Option<&mut Die<F>> {
        self.dice.get_mut(index)
    }

    pub fn num_dice(&self) -> usize {
        self.dice.len()
    }

    /// Every possible face, in the order of the first die.
    pub fn faces(&self) -> &[F] {
        self.dice[0].faces()
    }
}
