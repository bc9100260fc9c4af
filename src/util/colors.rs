use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x0000d1b2);
pub const SECONDARY: Color = Color::from_u32(0x003e8ed0);
pub const NEUTRAL: Color = Color::from_u32(0x00505050);
pub const BACKGROUND: Color = Color::from_u32(0x00101214);
pub const HEADER: Color = Color::from_u32(0x00f5f5f5);
pub const ERROR: Color = Color::from_u32(0x00f14668);
