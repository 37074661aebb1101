//! 界面配色，全局统一使用

use ratatui::style::Color;

/// 官方仓库条目
pub const REPO: Color = Color::Rgb(91, 206, 250);
/// AUR 条目
pub const AUR: Color = Color::Rgb(245, 169, 184);
/// 选中行背景色
pub const SEL_BG: Color = Color::Rgb(45, 35, 55);
pub const BRIGHT_WHITE: Color = Color::Rgb(255, 255, 255);
/// 次要信息
pub const DIM: Color = Color::Rgb(130, 130, 140);
/// 选中行内的描述文字
pub const DESC_DIM: Color = Color::Rgb(180, 180, 190);
