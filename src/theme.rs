use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub background: String,
    pub text_color: String,
    pub border_color: String,
    pub border_width: f32,
    pub line_color: String,
    pub line_width: f32,
    pub frontend: String,
    pub api: String,
    pub streaming: String,
    pub storage: String,
    pub external: String,
}

impl Theme {
    pub fn onboarding() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            text_color: "#000000".to_string(),
            border_color: "#333333".to_string(),
            border_width: 2.0,
            line_color: "#333333".to_string(),
            line_width: 3.0,
            frontend: "#E3F2FD".to_string(),
            api: "#FFF3E0".to_string(),
            streaming: "#F3E5F5".to_string(),
            storage: "#E8F5E9".to_string(),
            external: "#FCE4EC".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::onboarding()
    }
}
