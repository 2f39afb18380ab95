/// Knobs for a single analysis run. `main` always uses the defaults.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub input_path: String,
    pub daily_chart_path: String,
    pub city_chart_path: String,
    /// Width of the trailing moving average, in days.
    pub rolling_window: usize,
    pub top_busiest_days: usize,
    pub top_categories: usize,
    pub currency: String,
    pub chart: ChartSettings,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: "talabat_uae_orders_dataset.csv".to_string(),
            daily_chart_path: "daily_orders_trend.png".to_string(),
            city_chart_path: "city_trends.png".to_string(),
            rolling_window: 7,
            top_busiest_days: 5,
            top_categories: 5,
            currency: "AED".to_string(),
            chart: ChartSettings::default(),
        }
    }
}

/// Canvas size in pixels plus a multiplier applied to fonts, margins and strokes.
#[derive(Debug, Clone, Copy)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
    pub scale: u32,
}

impl ChartSettings {
    pub fn px(&self, base: u32) -> u32 {
        base * self.scale
    }
}

impl Default for ChartSettings {
    // 14x6 inches at 300 dpi.
    fn default() -> Self {
        Self {
            width: 4200,
            height: 1800,
            scale: 3,
        }
    }
}
