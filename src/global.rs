pub mod conf_def {
    /// Weight every face starts with.
    pub const WEIGHT: f64 = 1.0;
    /// Form used by `Game::show_default`.
    pub const SHOW_FORM: &str = "wide";
    /// Rolls made by `Die::roll_once`.
    pub const NUM_ROLLS: usize = 1;
}
