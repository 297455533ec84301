// src/plan/template.rs
use serde::{Deserialize, Serialize};

/// The background floorplan image walls are traced over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    /// Path or URL of the image.
    pub image: String,
}

impl Template {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Template {
            name: name.into(),
            image: image.into(),
        }
    }
}

/// The stock flat layouts offered when starting a new plan.
pub fn builtin_templates() -> Vec<Template> {
    vec![
        Template::new("3-Room HDB", "assets/3HDB.jpeg"),
        Template::new("4-Room HDB", "assets/4HDB.jpeg"),
        Template::new("5-Room HDB", "assets/5HDB.jpeg"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates() {
        let templates = builtin_templates();
        assert_eq!(templates.len(), 3);
        assert_eq!(templates[1].name, "4-Room HDB");
    }
}
