use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::{WindError, LIFTING_SURFACE_MODULE, WING_AREA_PER_PART};

/// Host-side view of one attached part.
pub trait PartDescriptor {
    /// Display title, if the part has one
    fn title(&self) -> Option<&str>;

    /// Names of the modules on the part
    fn modules(&self) -> Result<&[String], WindError>;

    /// Wings and fins by name, or anything carrying a lifting-surface module
    fn is_lifting_surface(&self) -> Result<bool, WindError> {
        let title = self.title().unwrap_or_default().to_lowercase();
        if title.contains("wing") || title.contains("fin") {
            return Ok(true);
        }
        Ok(self
            .modules()?
            .iter()
            .any(|module| module == LIFTING_SURFACE_MODULE))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartInfo {
    pub title: Option<String>,
    /// `None` when the host could not read the part's modules
    pub modules: Option<Vec<String>>,
}

impl PartInfo {
    pub fn new(title: &str, modules: &[&str]) -> Self {
        Self {
            title: Some(title.to_string()),
            modules: Some(modules.iter().map(|m| m.to_string()).collect()),
        }
    }
}

impl PartDescriptor for PartInfo {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn modules(&self) -> Result<&[String], WindError> {
        self.modules.as_deref().ok_or_else(|| {
            WindError::MissingPartMetadata(self.title.clone().unwrap_or_else(|| "untitled".into()))
        })
    }
}

/// Total lifting area of the given parts (m^2).
pub fn classify_lifting_surfaces<P: PartDescriptor>(parts: &[P]) -> Result<f64, WindError> {
    let mut area = 0.0;
    for part in parts {
        if part.is_lifting_surface()? {
            area += WING_AREA_PER_PART;
        }
    }
    Ok(area)
}

/// Lifting area, falling back to `fallback` when classification fails or finds nothing.
pub fn lifting_area<P: PartDescriptor>(parts: Option<&[P]>, fallback: f64) -> f64 {
    let Some(parts) = parts else {
        return fallback;
    };
    match classify_lifting_surfaces(parts) {
        Ok(area) if area > 0.0 => area,
        Ok(_) => fallback,
        Err(err) => {
            debug!("Lifting surface classification failed: {}", err);
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_classification_by_title_and_module() {
        let parts = vec![
            PartInfo::new("Delta-Deluxe Winglet", &[]),
            PartInfo::new("Tail Fin", &[]),
            PartInfo::new("Elevon 1", &["ModuleControlSurface", "ModuleLiftingSurface"]),
            PartInfo::new("Mk1 Command Pod", &["ModuleCommand"]),
            PartInfo::new("FL-T400 Fuel Tank", &[]),
        ];
        assert_relative_eq!(classify_lifting_surfaces(&parts).unwrap(), 6.0);
    }

    #[test]
    fn test_missing_modules_fail_classification() {
        let parts = vec![
            PartInfo::new("Swept Wings", &[]),
            PartInfo {
                title: Some("Mystery Part".to_string()),
                modules: None,
            },
        ];
        assert!(matches!(
            classify_lifting_surfaces(&parts),
            Err(WindError::MissingPartMetadata(title)) if title == "Mystery Part"
        ));
        assert_relative_eq!(lifting_area(Some(parts.as_slice()), 4.8), 4.8);
    }

    #[test]
    fn test_untitled_part_checks_modules() {
        let part = PartInfo {
            title: None,
            modules: Some(vec![LIFTING_SURFACE_MODULE.to_string()]),
        };
        assert!(part.is_lifting_surface().unwrap());
    }

    #[test]
    fn test_fallback_when_nothing_lifts() {
        let parts = vec![PartInfo::new("Mk1 Command Pod", &["ModuleCommand"])];
        assert_relative_eq!(lifting_area(Some(parts.as_slice()), 4.8), 4.8);
        assert_relative_eq!(lifting_area::<PartInfo>(None, 3.0), 3.0);
    }

    #[test]
    fn test_counted_area_wins_over_fallback() {
        let parts = vec![PartInfo::new("Wing Connector Type A", &[])];
        assert_relative_eq!(lifting_area(Some(parts.as_slice()), 100.0), 2.0);
    }
}
