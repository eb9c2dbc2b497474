use serde::{Deserialize, Serialize};

/// Image generation models offered in the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageModel {
    #[default]
    #[serde(rename = "sd-xl-base")]
    SdXlBase,
    #[serde(rename = "sd-v1-5")]
    SdV15,
    #[serde(rename = "sd-3-5-large")]
    Sd35Large,
    #[serde(rename = "flux-1-dev")]
    Flux1Dev,
}

impl ImageModel {
    pub const ALL: [ImageModel; 4] = [
        ImageModel::SdXlBase,
        ImageModel::SdV15,
        ImageModel::Sd35Large,
        ImageModel::Flux1Dev,
    ];

    /// Premium models need the Pro entitlement.
    pub fn is_premium(self) -> bool {
        matches!(self, ImageModel::Sd35Large | ImageModel::Flux1Dev)
    }

    pub fn key(self) -> &'static str {
        match self {
            ImageModel::SdXlBase => "sd-xl-base",
            ImageModel::SdV15 => "sd-v1-5",
            ImageModel::Sd35Large => "sd-3-5-large",
            ImageModel::Flux1Dev => "flux-1-dev",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ImageModel::SdXlBase => "Stable Diffusion XL",
            ImageModel::SdV15 => "Stable Diffusion v1.5",
            ImageModel::Sd35Large => "Stable Diffusion 3.5",
            ImageModel::Flux1Dev => "FLUX.1",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ImageModel::SdXlBase => "High quality, balanced performance",
            ImageModel::SdV15 => "Faster generation, classic style",
            ImageModel::Sd35Large => "Premium model with exceptional quality (Pro only)",
            ImageModel::Flux1Dev => "High-fidelity premium model (Pro only)",
        }
    }
}

impl std::fmt::Display for ImageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for ImageModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageModel::ALL
            .into_iter()
            .find(|model| model.key() == s)
            .ok_or_else(|| format!("Unknown image model: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    Light,
    Dark,
    #[default]
    System,
}

impl ColorTheme {
    pub fn key(self) -> &'static str {
        match self {
            ColorTheme::Light => "light",
            ColorTheme::Dark => "dark",
            ColorTheme::System => "system",
        }
    }
}

impl std::fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for ColorTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ColorTheme::Light),
            "dark" => Ok(ColorTheme::Dark),
            "system" => Ok(ColorTheme::System),
            other => Err(format!("Unknown color theme: {}", other)),
        }
    }
}

/// User preferences, persisted as one JSON document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub image_model: ImageModel,
    pub color_theme: ColorTheme,
    pub is_pro: bool,
}

/// Partial settings change; `None` keeps the current value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub image_model: Option<ImageModel>,
    pub color_theme: Option<ColorTheme>,
    pub is_pro: Option<bool>,
}

impl AppSettings {
    pub fn merged(self, update: SettingsUpdate) -> Self {
        Self {
            image_model: update.image_model.unwrap_or(self.image_model),
            color_theme: update.color_theme.unwrap_or(self.color_theme),
            is_pro: update.is_pro.unwrap_or(self.is_pro),
        }
    }
}
