//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Page title shown in the browser tab and sidebar
pub const APP_TITLE: &str = "Customer Churn Intelligence Dashboard";

/// Sidebar heading
pub const SIDEBAR_TITLE: &str = "Churn Intelligence Dashboard";

/// Default tabular artifact (one row per customer)
pub const DEFAULT_REPORT_DATA_PATH: &str = "churn_dashboard_data.csv";

/// Default attribution bundle (explainer, attribution values, held-out features)
pub const DEFAULT_ATTRIBUTION_PATH: &str = "shap_objects.json";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8501;

/// Smallest selectable high-risk list size
pub const DEFAULT_TOP_N_MIN: u32 = 5;

/// Largest selectable high-risk list size
pub const DEFAULT_TOP_N_MAX: u32 = 50;

/// Slider position on first visit
pub const DEFAULT_TOP_N: u32 = 10;

/// Number of features shown in the attribution chart
pub const MAX_DISPLAY_FEATURES: usize = 10;
