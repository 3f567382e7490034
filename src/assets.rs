//! Asset references supplied by the presentation layer
//!
//! The simulation never reads these. They ride along with the game so a
//! renderer has one place to look up image URLs.

use serde::{Deserialize, Serialize};

/// Image used when nothing else was supplied
pub const PLACEHOLDER: &str = "/placeholder.svg";

/// Replaceable image slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetSlot {
    Background,
    Character,
    Basket,
    Drop,
    WinScreen,
}

impl AssetSlot {
    pub const ALL: [AssetSlot; 5] = [
        AssetSlot::Background,
        AssetSlot::Character,
        AssetSlot::Basket,
        AssetSlot::Drop,
        AssetSlot::WinScreen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetSlot::Background => "background",
            AssetSlot::Character => "character",
            AssetSlot::Basket => "basket",
            AssetSlot::Drop => "drop",
            AssetSlot::WinScreen => "winScreen",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "background" => Some(AssetSlot::Background),
            "character" => Some(AssetSlot::Character),
            "basket" => Some(AssetSlot::Basket),
            "drop" | "raindrop" => Some(AssetSlot::Drop),
            "winscreen" | "win_screen" => Some(AssetSlot::WinScreen),
            _ => None,
        }
    }
}

/// Image URLs (or data URLs) for every slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameAssets {
    pub background: String,
    pub character: String,
    pub basket: String,
    pub drop: String,
    pub win_screen: String,
}

impl Default for GameAssets {
    fn default() -> Self {
        Self {
            background: PLACEHOLDER.to_string(),
            character: PLACEHOLDER.to_string(),
            basket: PLACEHOLDER.to_string(),
            drop: PLACEHOLDER.to_string(),
            win_screen: PLACEHOLDER.to_string(),
        }
    }
}

/// Partial asset customisation; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetOverrides {
    pub background: Option<String>,
    pub character: Option<String>,
    pub basket: Option<String>,
    pub drop: Option<String>,
    pub win_screen: Option<String>,
}

impl GameAssets {
    /// Apply overrides on top of these assets
    pub fn with_overrides(mut self, overrides: AssetOverrides) -> Self {
        let AssetOverrides {
            background,
            character,
            basket,
            drop,
            win_screen,
        } = overrides;

        if let Some(url) = background {
            self.background = url;
        }
        if let Some(url) = character {
            self.character = url;
        }
        if let Some(url) = basket {
            self.basket = url;
        }
        if let Some(url) = drop {
            self.drop = url;
        }
        if let Some(url) = win_screen {
            self.win_screen = url;
        }
        self
    }

    pub fn get(&self, slot: AssetSlot) -> &str {
        match slot {
            AssetSlot::Background => &self.background,
            AssetSlot::Character => &self.character,
            AssetSlot::Basket => &self.basket,
            AssetSlot::Drop => &self.drop,
            AssetSlot::WinScreen => &self.win_screen,
        }
    }

    /// Replace a single slot (e.g. after an upload)
    pub fn set(&mut self, slot: AssetSlot, url: impl Into<String>) {
        let url = url.into();
        match slot {
            AssetSlot::Background => self.background = url,
            AssetSlot::Character => self.character = url,
            AssetSlot::Basket => self.basket = url,
            AssetSlot::Drop => self.drop = url,
            AssetSlot::WinScreen => self.win_screen = url,
        }
    }
}

/// CSS `url("...")` value safe inside a single- or double-quoted attribute
pub fn css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len() + 7);
    out.push_str("url(\"");
    for c in url.chars() {
        match c {
            '"' => out.push_str("%22"),
            '\'' => out.push_str("%27"),
            '\\' => out.push_str("%5C"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            '\n' | '\r' => {}
            c => out.push(c),
        }
    }
    out.push_str("\")");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_placeholders() {
        let assets = GameAssets::default();
        for slot in AssetSlot::ALL {
            assert_eq!(assets.get(slot), PLACEHOLDER);
        }
    }

    #[test]
    fn test_partial_overrides() {
        let assets = GameAssets::default().with_overrides(AssetOverrides {
            basket: Some("/Basket.png".into()),
            ..Default::default()
        });
        assert_eq!(assets.basket, "/Basket.png");
        assert_eq!(assets.character, PLACEHOLDER);
    }

    #[test]
    fn test_overrides_from_json() {
        let overrides: AssetOverrides =
            serde_json::from_str(r#"{"winScreen": "/Message.png"}"#).unwrap();
        let assets = GameAssets::default().with_overrides(overrides);
        assert_eq!(assets.get(AssetSlot::WinScreen), "/Message.png");
    }

    #[test]
    fn test_slot_names_round_trip() {
        for slot in AssetSlot::ALL {
            assert_eq!(AssetSlot::from_str(slot.as_str()), Some(slot));
        }
        assert_eq!(AssetSlot::from_str("raindrop"), Some(AssetSlot::Drop));
        assert_eq!(AssetSlot::from_str("sky"), None);
    }

    #[test]
    fn test_set_single_slot() {
        let mut assets = GameAssets::default();
        assets.set(AssetSlot::Background, "data:image/png;base64,AAAA");
        assert!(assets.background.starts_with("data:"));
    }

    #[test]
    fn test_css_url_escapes_quotes() {
        assert_eq!(css_url("/Basket.png"), r#"url("/Basket.png")"#);
        assert_eq!(
            css_url("a\"b'c<d>\n"),
            r#"url("a%22b%27c%3Cd%3E")"#
        );
    }
}
