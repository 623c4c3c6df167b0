use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use engine::{KeyValueStore, Rgba, StorageError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub(crate) const COLORS_STORAGE_KEY: &str = "caviaColors";

pub(crate) type SharedStore = Rc<RefCell<dyn KeyValueStore>>;

pub(crate) const PALETTE: [&str; 8] = [
    "white", "#8B4513", "#2c2c2c", "#D2B48C", "#FFB6C1", "#FF69B4", "#FFA500", "#90EE90",
];

pub(crate) fn palette_color_name(color: &str) -> &str {
    match color {
        "white" => "Wit",
        "#8B4513" => "Bruin",
        "#2c2c2c" => "Zwart",
        "#D2B48C" => "Beige",
        "#FFB6C1" => "Licht Roze",
        "#FF69B4" => "Roze",
        "#FFA500" => "Oranje",
        "#90EE90" => "Licht Groen",
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported color '{0}'; expected white, black, #rgb or #rrggbb")]
pub(crate) struct ColorParseError(String);

pub(crate) fn parse_css_color(raw: &str) -> Result<Rgba, ColorParseError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("white") {
        return Ok([255, 255, 255, 255]);
    }
    if trimmed.eq_ignore_ascii_case("black") {
        return Ok([0, 0, 0, 255]);
    }
    let invalid = || ColorParseError(raw.to_string());
    let hex = trimmed.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
    match hex.len() {
        3 => {
            let mut rgba = [255; 4];
            for (index, digit) in hex.char_indices() {
                let value = channel(&hex[index..index + digit.len_utf8()])?;
                rgba[index] = value * 17;
            }
            Ok(rgba)
        }
        6 => Ok([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            255,
        ]),
        _ => Err(invalid()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub(crate) struct CssColor {
    text: String,
    rgba: Rgba,
}

impl CssColor {
    pub(crate) fn parse(raw: &str) -> Result<Self, ColorParseError> {
        Ok(Self {
            rgba: parse_css_color(raw)?,
            text: raw.to_string(),
        })
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.text
    }

    pub(crate) fn rgba(&self) -> Rgba {
        self.rgba
    }

    fn builtin(raw: &'static str) -> Self {
        Self::parse(raw).unwrap_or_else(|error| panic!("builtin color: {error}"))
    }
}

impl TryFrom<String> for CssColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let rgba = parse_css_color(&value)?;
        Ok(Self { text: value, rgba })
    }
}

impl From<CssColor> for String {
    fn from(color: CssColor) -> Self {
        color.text
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColorPart {
    Body,
    Ears,
    Belly,
    Feet,
    Nose,
}

impl ColorPart {
    pub(crate) const ALL: [ColorPart; 5] = [
        ColorPart::Body,
        ColorPart::Ears,
        ColorPart::Belly,
        ColorPart::Feet,
        ColorPart::Nose,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            ColorPart::Body => "Lichaam",
            ColorPart::Ears => "Oren",
            ColorPart::Belly => "Buik",
            ColorPart::Feet => "Voeten",
            ColorPart::Nose => "Neus",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CaviaColors {
    pub(crate) body: CssColor,
    pub(crate) ears: CssColor,
    pub(crate) belly: CssColor,
    pub(crate) feet: CssColor,
    pub(crate) nose: CssColor,
}

impl Default for CaviaColors {
    fn default() -> Self {
        Self {
            body: CssColor::builtin("white"),
            ears: CssColor::builtin("#FFB6C1"),
            belly: CssColor::builtin("#FFF5EE"),
            feet: CssColor::builtin("#FFB6C1"),
            nose: CssColor::builtin("#FF69B4"),
        }
    }
}

impl CaviaColors {
    pub(crate) fn get(&self, part: ColorPart) -> &CssColor {
        match part {
            ColorPart::Body => &self.body,
            ColorPart::Ears => &self.ears,
            ColorPart::Belly => &self.belly,
            ColorPart::Feet => &self.feet,
            ColorPart::Nose => &self.nose,
        }
    }

    pub(crate) fn set(&mut self, part: ColorPart, color: CssColor) {
        let slot = match part {
            ColorPart::Body => &mut self.body,
            ColorPart::Ears => &mut self.ears,
            ColorPart::Belly => &mut self.belly,
            ColorPart::Feet => &mut self.feet,
            ColorPart::Nose => &mut self.nose,
        };
        *slot = color;
    }

    pub(crate) fn set_palette(&mut self, part: ColorPart, index: usize) {
        let raw = PALETTE[index % PALETTE.len()];
        self.set(part, CssColor::builtin(raw));
    }

    pub(crate) fn palette_index(&self, part: ColorPart) -> Option<usize> {
        let current = self.get(part).as_str();
        PALETTE
            .iter()
            .position(|entry| entry.eq_ignore_ascii_case(current))
    }
}

#[derive(Debug, Error)]
pub(crate) enum ColorLoadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("parse stored colors: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub(crate) enum ColorSaveError {
    #[error("encode colors: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub(crate) fn decode_colors(raw: &str) -> Result<CaviaColors, ColorLoadError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, CaviaColors>(&mut deserializer) {
        Ok(colors) => Ok(colors),
        Err(error) => {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() || path == "." {
                Err(ColorLoadError::Parse(source.to_string()))
            } else {
                Err(ColorLoadError::Parse(format!("at {path}: {source}")))
            }
        }
    }
}

pub(crate) fn try_load_colors(
    store: &dyn KeyValueStore,
) -> Result<Option<CaviaColors>, ColorLoadError> {
    let Some(raw) = store.get(COLORS_STORAGE_KEY)? else {
        return Ok(None);
    };
    decode_colors(&raw).map(Some)
}

pub(crate) fn load_colors(store: &dyn KeyValueStore) -> CaviaColors {
    match try_load_colors(store) {
        Ok(Some(colors)) => colors,
        Ok(None) => {
            debug!(key = COLORS_STORAGE_KEY, "colors_not_saved_using_defaults");
            CaviaColors::default()
        }
        Err(error) => {
            warn!(key = COLORS_STORAGE_KEY, error = %error, "colors_load_failed_using_defaults");
            CaviaColors::default()
        }
    }
}

pub(crate) fn save_colors(
    store: &mut dyn KeyValueStore,
    colors: &CaviaColors,
) -> Result<(), ColorSaveError> {
    let raw = serde_json::to_string(colors)?;
    store.set(COLORS_STORAGE_KEY, &raw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use engine::{FileStore, MemoryStore};
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn parses_named_and_hex_colors() {
        assert_eq!(parse_css_color("white"), Ok([255, 255, 255, 255]));
        assert_eq!(parse_css_color("#8B4513"), Ok([0x8B, 0x45, 0x13, 255]));
        assert_eq!(parse_css_color("#2c2c2c"), Ok([0x2c, 0x2c, 0x2c, 255]));
        assert_eq!(parse_css_color("#fa0"), Ok([255, 170, 0, 255]));
        assert!(parse_css_color("#12345").is_err());
        assert!(parse_css_color("chartreuse").is_err());
        assert!(parse_css_color("#ggg").is_err());
    }

    #[test]
    fn every_palette_entry_parses() {
        for raw in PALETTE {
            assert!(parse_css_color(raw).is_ok(), "{raw}");
            assert_ne!(palette_color_name(raw), raw);
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = MemoryStore::default();
        let mut colors = CaviaColors::default();
        colors.set_palette(ColorPart::Body, 1);
        colors.set_palette(ColorPart::Nose, 6);

        save_colors(&mut store, &colors).expect("save");
        assert_eq!(load_colors(&store), colors);
    }

    #[test]
    fn save_then_load_round_trips_through_files() {
        let dir = TempDir::new().expect("temp dir");
        let mut store = FileStore::new(dir.path());
        let mut colors = CaviaColors::default();
        colors.set_palette(ColorPart::Feet, 2);

        save_colors(&mut store, &colors).expect("save");
        assert_eq!(load_colors(&FileStore::new(dir.path())), colors);
    }

    #[test]
    fn saved_blob_is_a_flat_object_of_color_strings() {
        let mut store = MemoryStore::default();
        save_colors(&mut store, &CaviaColors::default()).expect("save");
        let raw = store.get(COLORS_STORAGE_KEY).expect("get").expect("value");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(
            value,
            json!({
                "body": "white",
                "ears": "#FFB6C1",
                "belly": "#FFF5EE",
                "feet": "#FFB6C1",
                "nose": "#FF69B4"
            })
        );
    }

    #[test]
    fn missing_data_loads_defaults() {
        let store = MemoryStore::default();
        assert_eq!(load_colors(&store), CaviaColors::default());
        assert!(try_load_colors(&store).expect("load").is_none());
    }

    #[test]
    fn corrupted_data_loads_defaults() {
        let mut store = MemoryStore::default();
        store.set(COLORS_STORAGE_KEY, "{not json").expect("set");
        assert_eq!(load_colors(&store), CaviaColors::default());
    }

    #[test]
    fn missing_part_is_rejected_and_loads_defaults() {
        let mut store = MemoryStore::default();
        store
            .set(COLORS_STORAGE_KEY, r##"{"body":"white","ears":"#FFB6C1"}"##)
            .expect("set");
        assert!(try_load_colors(&store).is_err());
        assert_eq!(load_colors(&store), CaviaColors::default());
    }

    #[test]
    fn invalid_color_error_names_the_part() {
        let raw = json!({
            "body": "white",
            "ears": "not-a-color",
            "belly": "#FFF5EE",
            "feet": "#FFB6C1",
            "nose": "#FF69B4"
        })
        .to_string();
        let error = decode_colors(&raw).expect_err("must fail");
        let message = error.to_string();
        assert!(message.contains("ears"), "{message}");
        assert!(message.contains("not-a-color"), "{message}");
    }

    #[test]
    fn palette_index_tracks_current_color() {
        let mut colors = CaviaColors::default();
        assert_eq!(colors.palette_index(ColorPart::Body), Some(0));
        assert_eq!(colors.palette_index(ColorPart::Belly), None);
        colors.set_palette(ColorPart::Belly, 9);
        assert_eq!(colors.palette_index(ColorPart::Belly), Some(1));
    }
}
