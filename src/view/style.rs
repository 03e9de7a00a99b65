use serde::{Deserialize, Serialize};

use crate::checker::{CheckResultStats, CheckResultType};

/// Icon set used for result type badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultIconStyle {
    Style1,
    #[default]
    Style2,
    Style3,
}

impl ResultIconStyle {
    pub const ALL: [Self; 3] = [Self::Style1, Self::Style2, Self::Style3];

    /// Host icon name for `result_type` in this style.
    #[must_use]
    pub const fn icon_name(self, result_type: CheckResultType) -> &'static str {
        match (result_type, self) {
            (CheckResultType::AllPass, Self::Style1) => "sv_icon_dot3_pix16_gizmo",
            (CheckResultType::AllPass, Self::Style2) => "d_winbtn_mac_max@2x",
            (CheckResultType::AllPass, Self::Style3) => "d_greenLight",
            (CheckResultType::NotImportant, _) => "sv_icon_dot0_pix16_gizmo",
            (CheckResultType::Warning, Self::Style1) => "sv_icon_dot5_pix16_gizmo",
            (CheckResultType::Warning, Self::Style2) => "d_winbtn_mac_min@2x",
            (CheckResultType::Warning, Self::Style3) => "d_orangeLight",
            (CheckResultType::Error, Self::Style1) => "sv_icon_dot6_pix16_gizmo",
            (CheckResultType::Error, Self::Style2) => "d_winbtn_mac_close@2x",
            (CheckResultType::Error, Self::Style3) => "d_redLight",
            (CheckResultType::Exception, Self::Style1) => "sv_icon_dot7_pix16_gizmo",
            (CheckResultType::Exception, Self::Style2) => "d_winbtn_mac_close_a@2x",
            (CheckResultType::Exception, Self::Style3) => "Error@2x",
        }
    }
}

/// One-line summary shown above the result list.
#[must_use]
pub fn status_line(stats: &CheckResultStats, filtered: usize) -> String {
    format!(
        "Total: {}  Filtered: {filtered}  Error: {}  Warning: {}  Not Important: {}  All Pass: {}  Exception: {}",
        stats.total(),
        stats.error,
        stats.warning,
        stats.not_important,
        stats.all_pass,
        stats.exception,
    )
}
