//! Monte Carlo simulation with weighted dice.
//!
//! A [`Die`] has any number of labeled faces with adjustable weights. A
//! [`Game`] rolls several dice with the same faces together and keeps the
//! results of its latest play. An [`Analyzer`] computes jackpots, face
//! combinations and per-roll face counts over those results.
//!
//! ```
//! use montecarlo::{Analyzer, Die, Game};
//!
//! let mut die = Die::new(vec!["A", "B", "C", "D"])?;
//! die.change_weight(&"B", 2.0)?;
//! let mut game = Game::new(vec![die.clone(), die])?;
//! game.play(3)?;
//! println!("{}", game.show("narrow")?);
//!
//! let mut analyzer = Analyzer::new(&game)?;
//! let jackpots = analyzer.jackpot();
//! assert!(jackpots <= 3);
//! assert_eq!(analyzer.combo().total(), 3);
//! # Ok::<(), montecarlo::MonteCarloError>(())
//! ```

pub mod analyzer;
pub mod counts;
pub mod die;
pub mod error;
pub mod face;
pub mod game;
pub mod global;
pub mod table;

pub use analyzer::Analyzer;
pub use counts::{ComboCount, ComboCounts, FaceCounts};
pub use die::{Die, FaceWeight};
pub use error::{MonteCarloError, Result};
pub use face::Face;
pub use game::Game;
pub use table::{NarrowRow, NarrowTable, Projection, ShowForm, WideTable};
