use std::{
    fs, io,
    path::{Path, PathBuf},
};

use cgrid::paint::CellView;
use crossterm::style::Color;
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

pub const DEFAULT_WIDTH: i32 = 41;
pub const DEFAULT_HEIGHT: i32 = 31;
pub const DEFAULT_FRAME_DELAY_MS: u64 = 16;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read or write settings file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse settings file: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const ORDERED: [LogLevel; 5] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// More verbose level, saturating at [`LogLevel::Trace`].
    pub fn raised(self, by: u8) -> Self {
        let idx = (self as usize + by as usize).min(Self::ORDERED.len() - 1);
        Self::ORDERED[idx]
    }

    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyph {
    pub symbol: char,
    #[serde(default)]
    pub color: Option<Color>,
}

impl Glyph {
    pub const fn new(symbol: char, color: Option<Color>) -> Self {
        Self { symbol, color }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub wall: Glyph,
    pub path: Glyph,
    pub frontier: Glyph,
    pub visited: Glyph,
    pub current: Glyph,
    pub solution: Glyph,
    pub start: Glyph,
    pub end: Glyph,
}

impl Palette {
    pub fn glyph(&self, view: CellView) -> Glyph {
        match view {
            CellView::Wall => self.wall,
            CellView::Path => self.path,
            CellView::Frontier => self.frontier,
            CellView::Visited => self.visited,
            CellView::Current => self.current,
            CellView::Solution => self.solution,
            CellView::Start => self.start,
            CellView::End => self.end,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            wall: Glyph::new('#', Some(Color::Grey)),
            path: Glyph::new(' ', None),
            frontier: Glyph::new('+', Some(Color::Blue)),
            visited: Glyph::new(':', Some(Color::DarkMagenta)),
            current: Glyph::new('@', Some(Color::Yellow)),
            solution: Glyph::new('.', Some(Color::Yellow)),
            start: Glyph::new('S', Some(Color::Green)),
            end: Glyph::new('E', Some(Color::Red)),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub width: Option<i32>,
    #[serde(default)]
    pub height: Option<i32>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub color: Option<bool>,
    #[serde(default)]
    pub frame_delay_ms: Option<u64>,
    #[serde(default)]
    pub steps_per_frame: Option<usize>,
    #[serde(default)]
    pub log_level: Option<LogLevel>,
    #[serde(default)]
    pub palette: Option<Palette>,
}

impl Settings {
    pub fn get_width(&self) -> i32 {
        self.width.unwrap_or(DEFAULT_WIDTH)
    }

    pub fn get_height(&self) -> i32 {
        self.height.unwrap_or(DEFAULT_HEIGHT)
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_color(&self) -> bool {
        self.color.unwrap_or(true)
    }

    pub fn get_frame_delay_ms(&self) -> u64 {
        self.frame_delay_ms.unwrap_or(DEFAULT_FRAME_DELAY_MS)
    }

    pub fn get_steps_per_frame(&self) -> usize {
        self.steps_per_frame.unwrap_or(1).max(1)
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }

    pub fn get_palette(&self) -> Palette {
        self.palette.clone().unwrap_or_default()
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tgrid")
            .join("settings.ron")
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        Ok(Self::options().from_str(content)?)
    }

    pub fn parse_default() -> Self {
        Self::parse(DEFAULT_SETTINGS).expect("default settings should be always valid")
    }

    /// Loads settings from `path`, writing the default settings there first if it doesn't exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        log::debug!("Loading settings from {:?}", path);

        if !path.exists() {
            Self::reset_config(path)?;
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn reset_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_parse() {
        let settings = Settings::parse_default();

        assert_eq!(settings.get_width(), DEFAULT_WIDTH);
        assert_eq!(settings.get_height(), DEFAULT_HEIGHT);
        assert_eq!(settings.get_seed(), None);
        assert!(settings.get_color());
        assert_eq!(settings.get_frame_delay_ms(), DEFAULT_FRAME_DELAY_MS);
        assert_eq!(settings.get_log_level(), LogLevel::Warn);
        assert_eq!(settings.get_palette(), Palette::default());
    }

    #[test]
    fn missing_fields_fall_back() {
        let settings = Settings::parse("(width: 9, seed: 5)").unwrap();

        assert_eq!(settings.get_width(), 9);
        assert_eq!(settings.get_height(), DEFAULT_HEIGHT);
        assert_eq!(settings.get_seed(), Some(5));
        assert_eq!(settings.get_steps_per_frame(), 1);
        assert_eq!(settings.get_palette(), Palette::default());
    }

    #[test]
    fn invalid_settings() {
        assert!(matches!(
            Settings::parse("(width: \"wide\")"),
            Err(SettingsError::Ron(_))
        ));
    }

    #[test]
    fn raised_log_level() {
        assert_eq!(LogLevel::Warn.raised(0), LogLevel::Warn);
        assert_eq!(LogLevel::Warn.raised(2), LogLevel::Debug);
        assert_eq!(LogLevel::Info.raised(10), LogLevel::Trace);
        assert_eq!(LogLevel::Debug.to_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn load_writes_default() {
        let dir = std::env::temp_dir().join(format!("tgrid-settings-{}", std::process::id()));
        let path = dir.join("settings.ron");
        let _ = fs::remove_dir_all(&dir);

        let settings = Settings::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(settings.get_width(), DEFAULT_WIDTH);

        fs::write(&path, "(height: 7)").unwrap();
        assert_eq!(Settings::load(&path).unwrap().get_height(), 7);

        fs::remove_dir_all(&dir).unwrap();
    }
}
