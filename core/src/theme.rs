#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

// Body shown beside the planet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Companion {
    Sun,
    Moon,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    // Cloud layer is fainter against a dark sky
    pub fn cloud_opacity(self) -> f32 {
        match self {
            Theme::Light => 0.25,
            Theme::Dark => 0.15,
        }
    }

    pub fn companion(self) -> Companion {
        match self {
            Theme::Light => Companion::Sun,
            Theme::Dark => Companion::Moon,
        }
    }

    pub fn shows_stars(self) -> bool {
        self == Theme::Dark
    }
}
