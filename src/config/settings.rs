/// Which revision of the rating formula to apply. Older revisions are kept
/// so a historical recalculation can be reproduced exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaVersion {
    /// Fixed K regardless of match length or margin (launch formula)
    Classic,
    /// K scaled by the number of sets played
    SetsWeighted,
    /// K scaled by sets played and average point margin (current)
    MarginWeighted,
}

#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub initial_rating: f64,
    pub base_k: f64,
    pub reference_sets: f64,
    pub reference_margin: f64,
    pub margin_cap: f64,
    pub formula: FormulaVersion,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            initial_rating: 1500.0,
            base_k: 32.0,
            reference_sets: 3.0,
            reference_margin: 5.0,
            margin_cap: 1.5,
            formula: FormulaVersion::MarginWeighted,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rating: RatingSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
        }
    }

    pub fn database_path() -> String {
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "pingpong_ladder.db".to_string())
    }

    pub fn admin_token() -> String {
        std::env::var("ADMIN_TOKEN").unwrap_or_else(|_| "secret".to_string())
    }
}
