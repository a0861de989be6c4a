// ABOUTME: Design token identifiers produced or consulted by theme generation
// ABOUTME: Names follow the dotted `color.*` / `elevation.*` design-token convention

pub const TEXT_BRAND: &str = "color.text.brand";
pub const ICON_BRAND: &str = "color.icon.brand";
pub const LINK: &str = "color.link";
pub const LINK_PRESSED: &str = "color.link.pressed";
pub const BORDER_BRAND: &str = "color.border.brand";

pub const BACKGROUND_BRAND_SUBTLEST: &str = "color.background.brand.subtlest";
pub const BACKGROUND_BRAND_SUBTLEST_HOVERED: &str = "color.background.brand.subtlest.hovered";
pub const BACKGROUND_BRAND_SUBTLEST_PRESSED: &str = "color.background.brand.subtlest.pressed";
pub const BACKGROUND_BRAND_BOLD: &str = "color.background.brand.bold";
pub const BACKGROUND_BRAND_BOLD_HOVERED: &str = "color.background.brand.bold.hovered";
pub const BACKGROUND_BRAND_BOLD_PRESSED: &str = "color.background.brand.bold.pressed";
pub const BACKGROUND_BRAND_BOLDEST: &str = "color.background.brand.boldest";
pub const BACKGROUND_BRAND_BOLDEST_HOVERED: &str = "color.background.brand.boldest.hovered";
pub const BACKGROUND_BRAND_BOLDEST_PRESSED: &str = "color.background.brand.boldest.pressed";

pub const TEXT_SELECTED: &str = "color.text.selected";
pub const ICON_SELECTED: &str = "color.icon.selected";
pub const BORDER_SELECTED: &str = "color.border.selected";
pub const BACKGROUND_SELECTED: &str = "color.background.selected";
pub const BACKGROUND_SELECTED_HOVERED: &str = "color.background.selected.hovered";
pub const BACKGROUND_SELECTED_PRESSED: &str = "color.background.selected.pressed";
pub const BACKGROUND_SELECTED_BOLD: &str = "color.background.selected.bold";
pub const BACKGROUND_SELECTED_BOLD_HOVERED: &str = "color.background.selected.bold.hovered";
pub const BACKGROUND_SELECTED_BOLD_PRESSED: &str = "color.background.selected.bold.pressed";

pub const CHART_BRAND: &str = "color.chart.brand";
pub const CHART_BRAND_HOVERED: &str = "color.chart.brand.hovered";

pub const SURFACE: &str = "elevation.surface";
pub const SURFACE_SUNKEN: &str = "elevation.surface.sunken";
pub const SURFACE_OVERLAY: &str = "elevation.surface.overlay";
