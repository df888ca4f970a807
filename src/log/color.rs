//! 终端颜色模型
//!
//! `Color` 由可选的前景色和背景色组成，颜色可以是调色板中的具名颜色，
//! 也可以是 RGB 三元组。渲染时只负责产出 SGR 转义序列。

use crate::log::level::LogLevel;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

pub use colored::Color as NamedColor;

/// 重置序列，同时也是默认颜色的转义序列
pub const RESET: &str = "\x1b[0m";

const PALETTE: [(&str, NamedColor); 16] = [
    ("black", NamedColor::Black),
    ("red", NamedColor::Red),
    ("green", NamedColor::Green),
    ("yellow", NamedColor::Yellow),
    ("blue", NamedColor::Blue),
    ("magenta", NamedColor::Magenta),
    ("cyan", NamedColor::Cyan),
    ("white", NamedColor::White),
    ("bright black", NamedColor::BrightBlack),
    ("bright red", NamedColor::BrightRed),
    ("bright green", NamedColor::BrightGreen),
    ("bright yellow", NamedColor::BrightYellow),
    ("bright blue", NamedColor::BrightBlue),
    ("bright magenta", NamedColor::BrightMagenta),
    ("bright cyan", NamedColor::BrightCyan),
    ("bright white", NamedColor::BrightWhite),
];

/// 终端颜色（前景 + 可选背景）
///
/// # 示例
///
/// ```
/// use jsonlog::log::{Color, NamedColor};
///
/// let color = Color::new(NamedColor::Red).background(NamedColor::Cyan);
/// assert_eq!(color.escape_code(), "\x1b[31;46m");
///
/// let orange = Color::rgb(255, 136, 0);
/// assert_eq!(orange.escape_code(), "\x1b[38;2;255;136;0m");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, SerializeDisplay, DeserializeFromStr)]
pub struct Color {
    foreground: Option<NamedColor>,
    background: Option<NamedColor>,
}

impl Color {
    /// 具名前景色
    pub fn new(foreground: NamedColor) -> Self {
        Self {
            foreground: Some(foreground),
            background: None,
        }
    }

    /// RGB 前景色
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(NamedColor::TrueColor { r, g, b })
    }

    /// 终端默认颜色
    pub fn default_color() -> Self {
        Self::default()
    }

    /// 附加具名背景色
    pub fn background(mut self, background: NamedColor) -> Self {
        self.background = Some(background);
        self
    }

    /// 附加 RGB 背景色
    pub fn background_rgb(self, r: u8, g: u8, b: u8) -> Self {
        self.background(NamedColor::TrueColor { r, g, b })
    }

    pub fn foreground_color(&self) -> Option<NamedColor> {
        self.foreground
    }

    pub fn background_color(&self) -> Option<NamedColor> {
        self.background
    }

    pub fn is_default(&self) -> bool {
        self.foreground.is_none() && self.background.is_none()
    }

    /// 生成 SGR 转义序列，默认颜色输出重置序列
    pub fn escape_code(&self) -> String {
        let codes: Vec<_> = self
            .foreground
            .iter()
            .map(|c| fg_code(*c))
            .chain(self.background.iter().map(|c| bg_code(*c)))
            .collect();

        if codes.is_empty() {
            return RESET.to_string();
        }
        format!("\x1b[{}m", codes.join(";"))
    }

    /// 用该颜色包裹文本，并以重置序列结尾
    pub fn paint(&self, text: &str) -> String {
        let code = self.escape_code();
        let mut painted = String::with_capacity(code.len() + text.len() + RESET.len());
        painted.push_str(&code);
        painted.push_str(text);
        painted.push_str(RESET);
        painted
    }
}

impl From<NamedColor> for Color {
    fn from(color: NamedColor) -> Self {
        Color::new(color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.foreground, self.background) {
            (None, None) => f.write_str("default"),
            (Some(fg), None) => f.write_str(&named_to_string(fg)),
            (None, Some(bg)) => write!(f, "default on {}", named_to_string(bg)),
            (Some(fg), Some(bg)) => {
                write!(f, "{} on {}", named_to_string(fg), named_to_string(bg))
            }
        }
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    /// 支持 `red`、`bright blue`、`#ff8800`、`red on blue`、`default`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (fg, bg) = match s.split_once(" on ") {
            Some((fg, bg)) => (fg.trim(), Some(bg.trim())),
            None => (s, None),
        };

        let mut color = Color {
            foreground: parse_named(fg)?,
            background: None,
        };
        if let Some(bg) = bg {
            color.background = parse_named(bg)?;
        }
        Ok(color)
    }
}

/// 解析单个颜色，`default` 返回 None
fn parse_named(s: &str) -> Result<Option<NamedColor>> {
    let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
    if normalized.is_empty() || normalized == "default" {
        return Ok(None);
    }

    if let Some(hex) = normalized.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(anyhow!("invalid rgb color: {}", s));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| anyhow!("invalid rgb color: {}", s))
        };
        return Ok(Some(NamedColor::TrueColor {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        }));
    }

    PALETTE
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, color)| Some(*color))
        .ok_or_else(|| anyhow!("unknown color: {}", s))
}

fn fg_code(color: NamedColor) -> Cow<'static, str> {
    match color {
        NamedColor::TrueColor { r, g, b } => format!("38;2;{};{};{}", r, g, b).into(),
        _ => color.to_fg_str(),
    }
}

fn bg_code(color: NamedColor) -> Cow<'static, str> {
    match color {
        NamedColor::TrueColor { r, g, b } => format!("48;2;{};{};{}", r, g, b).into(),
        _ => color.to_bg_str(),
    }
}

fn named_to_string(color: NamedColor) -> String {
    if let NamedColor::TrueColor { r, g, b } = color {
        return format!("#{:02x}{:02x}{:02x}", r, g, b);
    }
    PALETTE
        .iter()
        .find(|(_, c)| *c == color)
        .map(|(name, _)| name.to_string())
        .unwrap_or_else(|| color.to_fg_str().into_owned())
}

/// 按级别覆盖颜色，未设置的级别保持原值
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CustomColors {
    #[serde(alias = "Trace")]
    pub trace: Option<Color>,
    #[serde(alias = "Debug")]
    pub debug: Option<Color>,
    #[serde(alias = "Info")]
    pub info: Option<Color>,
    #[serde(alias = "Warn")]
    pub warn: Option<Color>,
    #[serde(alias = "Error")]
    pub error: Option<Color>,
}

impl CustomColors {
    /// 叠加另一组覆盖，`newer` 中设置的级别优先
    pub fn merge(self, newer: &CustomColors) -> Self {
        CustomColors {
            trace: newer.trace.or(self.trace),
            debug: newer.debug.or(self.debug),
            info: newer.info.or(self.info),
            warn: newer.warn.or(self.warn),
            error: newer.error.or(self.error),
        }
    }
}

/// 每个级别使用的颜色表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelColors {
    trace: Color,
    debug: Color,
    info: Color,
    warn: Color,
    error: Color,
    panic: Color,
    fatal: Color,
}

impl Default for LevelColors {
    fn default() -> Self {
        Self {
            trace: Color::default_color(),
            debug: Color::new(NamedColor::Green),
            info: Color::default_color(),
            warn: Color::new(NamedColor::Yellow),
            error: Color::new(NamedColor::Red),
            panic: Color::default_color(),
            fatal: Color::default_color(),
        }
    }
}

impl LevelColors {
    pub fn get(&self, level: LogLevel) -> &Color {
        match level {
            LogLevel::Trace => &self.trace,
            LogLevel::Debug => &self.debug,
            LogLevel::Info => &self.info,
            LogLevel::Warn => &self.warn,
            LogLevel::Error => &self.error,
            LogLevel::Panic => &self.panic,
            LogLevel::Fatal => &self.fatal,
        }
    }

    /// 应用自定义颜色，返回新的颜色表
    pub fn with_custom(mut self, custom: &CustomColors) -> Self {
        let overrides = [
            (&mut self.trace, custom.trace),
            (&mut self.debug, custom.debug),
            (&mut self.info, custom.info),
            (&mut self.warn, custom.warn),
            (&mut self.error, custom.error),
        ];
        for (slot, color) in overrides {
            if let Some(color) = color {
                *slot = color;
            }
        }
        self
    }
}
