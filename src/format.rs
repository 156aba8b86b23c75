// Display formatting — platform labels, icons and risk-score bands.
//
// Pure lookups with no I/O. Dashboards key their color coding off the
// risk class names, so those strings and the 40/70 thresholds are fixed.

use serde::Serialize;

/// Score at or above which a profile is High risk.
pub const HIGH_RISK_THRESHOLD: f64 = 70.0;
/// Score at or above which a profile is Medium risk.
pub const MEDIUM_RISK_THRESHOLD: f64 = 40.0;

/// Generic icon used for platforms we don't have a brand icon for.
pub const GENERIC_PLATFORM_ICON: &str = "fas fa-globe";

/// Risk band derived from a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    /// Determine the band from a score. No clamping; NaN lands in Low.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= HIGH_RISK_THRESHOLD => RiskBand::High,
            s if s >= MEDIUM_RISK_THRESHOLD => RiskBand::Medium,
            _ => RiskBand::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low Risk",
            RiskBand::Medium => "Medium Risk",
            RiskBand::High => "High Risk",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            RiskBand::Low => "score-low",
            RiskBand::Medium => "score-medium",
            RiskBand::High => "score-high",
        }
    }
}

/// Display text and CSS class for a risk score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskLabel {
    pub text: &'static str,
    pub class: &'static str,
}

/// Map a score to its `{text, class}` pair.
pub fn format_risk_score(score: f64) -> RiskLabel {
    let band = RiskBand::from_score(score);
    RiskLabel {
        text: band.label(),
        class: band.css_class(),
    }
}

/// Human-readable platform name. Unknown identifiers come back unchanged.
pub fn format_platform(platform: &str) -> String {
    match platform {
        "instagram" => "Instagram".to_string(),
        "facebook" => "Facebook".to_string(),
        "twitter" => "Twitter".to_string(),
        "tiktok" => "TikTok".to_string(),
        other => other.to_string(),
    }
}

/// Icon class for a platform, falling back to a globe.
pub fn platform_icon(platform: &str) -> &'static str {
    match platform {
        "instagram" => "fab fa-instagram",
        "facebook" => "fab fa-facebook-f",
        "twitter" => "fab fa-twitter",
        "tiktok" => "fab fa-tiktok",
        _ => GENERIC_PLATFORM_ICON,
    }
}

/// Example profile URL shown in the URL input once a platform is picked.
pub fn url_placeholder(platform: &str) -> Option<&'static str> {
    match platform {
        "facebook" => Some("https://www.facebook.com/username"),
        "twitter" => Some("https://www.twitter.com/username"),
        "instagram" => Some("https://www.instagram.com/username"),
        "tiktok" => Some("https://www.tiktok.com/@username"),
        _ => None,
    }
}
