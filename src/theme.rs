//! Centralized theme and styling for the TUI
//!
//! Single source of truth for the colors and styles used by every screen.
//!
//! # Usage
//! ```rust
//! use dealfinder::theme::{Colors, Styles, Theme};
//! use dealfinder::types::QualityTier;
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! let badge = Theme::quality_style(QualityTier::Excellent);
//! ```

use ratatui::style::{Color, Modifier, Style};

use crate::types::{NotificationLevel, QualityTier};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    /// Primary dark background - used for panels and overlays
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Brand color - borders, titles, highlights
    pub const PRIMARY: Color = Color::LightBlue;

    /// Selected items, emphasis
    pub const SECONDARY: Color = Color::Yellow;

    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;

    pub const BORDER_ACTIVE: Color = Color::LightBlue;
    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    /// Selected item highlight
    pub const SELECTED_BG: Color = Color::LightBlue;

    /// Selected item text (for contrast on the highlight)
    pub const SELECTED_FG: Color = Color::Black;

    /// Sale price
    pub const PRICE: Color = Color::LightGreen;

    /// Discount badge
    pub const DISCOUNT: Color = Color::LightRed;

    /// Saved-deal marker
    pub const SAVED: Color = Color::LightMagenta;

    /// Progress bar fill
    pub const PROGRESS: Color = Color::LightBlue;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Main title style (bold brand color)
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Section header style
    pub fn header() -> Style {
        Style::default()
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    /// Selected/highlighted item
    pub fn selected() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn unselected() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Focused field label
    pub fn focused() -> Style {
        Style::default()
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Colors::WARNING)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Colors::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    /// Active button
    pub fn button_active() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_inactive() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    pub fn price() -> Style {
        Style::default()
            .fg(Colors::PRICE)
            .add_modifier(Modifier::BOLD)
    }

    /// Struck-through original price
    pub fn original_price() -> Style {
        Style::default()
            .fg(Colors::FG_MUTED)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    pub fn discount() -> Style {
        Style::default()
            .fg(Colors::DISCOUNT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn saved() -> Style {
        Style::default().fg(Colors::SAVED)
    }

    /// Key hint in the navigation bar
    pub fn nav_key() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    pub fn progress() -> Style {
        Style::default().fg(Colors::PROGRESS).bg(Colors::BG_PRIMARY)
    }
}

// =============================================================================
// SEMANTIC STYLES
// =============================================================================

/// Styles derived from domain values
pub struct Theme;

impl Theme {
    /// Badge color for a deal's quality tier
    pub fn quality_style(tier: QualityTier) -> Style {
        let color = match tier {
            QualityTier::Excellent => Colors::SUCCESS,
            QualityTier::Good => Colors::PRIMARY,
            QualityTier::Fair => Colors::WARNING,
            QualityTier::Poor => Colors::FG_MUTED,
        };
        Style::default().fg(color)
    }

    /// Color of the notification slider label
    pub fn notification_style(level: NotificationLevel) -> Style {
        match level {
            NotificationLevel::Disabled => Styles::text_muted(),
            NotificationLevel::Critical => Styles::error(),
            NotificationLevel::Moderate => Styles::warning(),
            NotificationLevel::All => Styles::success(),
        }
    }
}

// =============================================================================
// UI CONSTANTS
// =============================================================================

/// UI dimension and layout constants
pub struct UiConstants;

impl UiConstants {
    /// Nav bar height
    pub const NAV_BAR_HEIGHT: u16 = 1;

    /// Header height (banner plus tagline)
    pub const HEADER_HEIGHT: u16 = 7;

    /// Status bar height
    pub const STATUS_BAR_HEIGHT: u16 = 1;

    /// Help overlay size, percent of the screen
    pub const OVERLAY_WIDTH_PCT: u16 = 60;
    pub const OVERLAY_HEIGHT_PCT: u16 = 70;
}

/// Common UI text strings
pub struct UiText;

impl UiText {
    pub const LOADING: &'static str = "Loading...";
    pub const PROCESSING: &'static str = "Processing...";
    pub const NO_DEALS: &'static str = "No deals found. Try a different category or search.";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_styles_differ() {
        assert_ne!(
            Theme::quality_style(QualityTier::Excellent),
            Theme::quality_style(QualityTier::Poor)
        );
    }

    #[test]
    fn test_notification_styles() {
        assert_eq!(
            Theme::notification_style(NotificationLevel::Disabled),
            Styles::text_muted()
        );
        assert_eq!(
            Theme::notification_style(NotificationLevel::All),
            Styles::success()
        );
    }
}
