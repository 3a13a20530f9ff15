use crate::counts::tally;
use crate::error::{MonteCarloError, Result};
use crate::face::{label, Face};
use crate::global::conf_def;
use log::{debug, trace};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{thread_rng, Rng};
use serde::Serialize;
use std::collections::HashSet;

/// One entry of a die's state snapshot.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FaceWeight<F> {
    pub face: F,
    pub weight: f64,
}

/// A die with any number of labeled faces, each with its own weight.
///
/// Weights are relative: they are normalized every time the die is rolled, so
/// they need not sum to one. A die can stand in for any discrete random
/// variable: a coin, a deck of cards, letters of an alphabet.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Die<F> {
    faces: Vec<F>,
    // weights[i] belongs to faces[i]
    weights: Vec<f64>,
}

impl<F: Face> Die<F> {
    /// New die with every face weighted equally.
    pub fn new<I>(faces: I) -> Result<Self>
    where
        I: IntoIterator<Item = F>,
    {
        let faces: Vec<F> = faces.into_iter().collect();
        if faces.is_empty() {
            return Err(MonteCarloError::InvalidConfiguration(
                "a die needs at least one face".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(faces.len());
        for f in &faces {
            if !seen.insert(f) {
                return Err(MonteCarloError::InvalidConfiguration(format!(
                    "face {} appears more than once",
                    label(f)
                )));
            }
        }
        let weights = vec![conf_def::WEIGHT; faces.len()];
        Ok(Self { faces, weights })
    }

    /// New die weighted by how often each face shows up in `observed`.
    ///
    /// Faces never observed get weight zero.
    pub fn from_observations<I, O>(faces: I, observed: O) -> Result<Self>
    where
        I: IntoIterator<Item = F>,
        O: IntoIterator<Item = F>,
    {
        let mut die = Die::new(faces)?;
        let counts = tally(&die.faces, observed)?;
        die.weights = counts.into_iter().map(|c| c as f64).collect();
        debug!("built die from observations: {:?}", die.current_state());
        Ok(die)
    }

    fn index_of(&self, face: &F) -> Option<usize> {
        self.faces.iter().position(|f| f == face)
    }

    pub fn has_face(&self, face: &F) -> bool {
        self.index_of(face).is_some()
    }

    /// Replace the weight of a single face.
    ///
    /// The weight must be a finite number that is not negative. Nothing
    /// changes on error.
    pub fn change_weight(&mut self, face: &F, new_weight: f64) -> Result<()> {
        let idx = self
            .index_of(face)
            .ok_or_else(|| MonteCarloError::InvalidLabel(label(face)))?;
        if !new_weight.is_finite() || new_weight < 0.0 {
            return Err(MonteCarloError::InvalidWeight(format!(
                "{} is not a non-negative finite number",
                new_weight
            )));
        }
        debug!(
            "weight of face {} changed {} -> {}",
            label(face),
            self.weights[idx],
            new_weight
        );
        self.weights[idx] = new_weight;
        Ok(())
    }

    /// Like `change_weight`, but the weight is given as text, e.g. user input.
    pub fn change_weight_str(&mut self, face: &F, new_weight: &str) -> Result<()> {
        if !self.has_face(face) {
            return Err(MonteCarloError::InvalidLabel(label(face)));
        }
        let w = new_weight.trim().parse::<f64>().map_err(|e| {
            MonteCarloError::InvalidWeight(format!("{:?} is not a number: {}", new_weight, e))
        })?;
        self.change_weight(face, w)
    }

    fn distribution(&self) -> Result<WeightedIndex<f64>> {
        let total = self.total_weight();
        if !total.is_finite() {
            return Err(MonteCarloError::InvalidWeight(format!(
                "total weight overflows: {:?}",
                self.weights
            )));
        }
        Ok(WeightedIndex::new(&self.weights)?)
    }

    /// Roll the die `n` times using the given source of randomness.
    ///
    /// Probabilities come from the weights as they are right now. The die
    /// itself is not changed and keeps no record of the outcomes.
    pub fn roll_with<R>(&self, n: usize, rng: &mut R) -> Result<Vec<F>>
    where
        R: Rng + ?Sized,
    {
        let dist = self.distribution()?;
        trace!("rolling {} times with weights {:?}", n, self.weights);
        Ok(dist
            .sample_iter(rng)
            .take(n)
            .map(|i| self.faces[i].clone())
            .collect())
    }

    /// Roll the die `n` times.
    pub fn roll(&self, n: usize) -> Result<Vec<F>> {
        self.roll_with(n, &mut thread_rng())
    }

    pub fn roll_once_with<R>(&self, rng: &mut R) -> Result<F>
    where
        R: Rng + ?Sized,
    {
        let mut rolls = self.roll_with(conf_def::NUM_ROLLS, rng)?;
        rolls.pop().ok_or(MonteCarloError::ZeroTotalWeight)
    }

    pub fn roll_once(&self) -> Result<F> {
        self.roll_once_with(&mut thread_rng())
    }

    /// Faces and their weights, in face order.
    pub fn current_state(&self) -> Vec<FaceWeight<F>> {
        self.faces
            .iter()
            .zip(self.weights.iter())
            .map(|(f, w)| FaceWeight {
                face: f.clone(),
                weight: *w,
            })
            .collect()
    }

    pub fn faces(&self) -> &[F] {
        &self.faces
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn weight(&self, face: &F) -> Option<f64> {
        self.index_of(face).map(|i| self.weights[i])
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Weights normalized to sum to one. All zeros if the die can't be rolled.
    pub fn probabilities(&self) -> Vec<f64> {
        let total = self.total_weight();
        if total <= 0.0 {
            return vec![0.0; self.weights.len()];
        }
        self.weights.iter().map(|w| w / total).collect()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Always false: a die can't be built without faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}
