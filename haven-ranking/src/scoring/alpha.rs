use haven_core::config::ScoringConfig;
use haven_core::models::SearchIntent;

/// Structured criteria per `density_scale` words, capped after normalizing.
pub fn information_density(intent: &SearchIntent, config: &ScoringConfig) -> f64 {
    let words = intent.word_count();
    if words == 0 {
        return 0.0;
    }
    let criteria = intent.structured_criteria_count() as f64;
    (criteria * config.density_scale / words as f64).min(config.density_cap)
}

/// Blend weight for match percent: `clamp(base + slope × density, base, max)`.
pub fn adaptive_alpha(density: f64, config: &ScoringConfig) -> f64 {
    let raw = config.alpha_base + config.alpha_slope * density.max(0.0);
    raw.clamp(config.alpha_base, config.alpha_max)
}
