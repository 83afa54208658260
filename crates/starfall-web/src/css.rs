use starfall::ConfigSource;
use web_sys::{CssStyleDeclaration, Window};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Reads tunables from CSS custom properties on `<html>` and the
/// reduced-motion media query. Lookups are best-effort: anything the page
/// does not provide simply resolves to the engine defaults.
pub struct CssConfigSource {
    style: Option<CssStyleDeclaration>,
    reduced_motion: bool,
}

impl CssConfigSource {
    pub fn from_window(window: &Window) -> Self {
        let style = window
            .document()
            .and_then(|d| d.document_element())
            .and_then(|root| match window.get_computed_style(&root) {
                Ok(style) => style,
                Err(e) => {
                    log::warn!("css: computed style unavailable: {:?}", e);
                    None
                }
            });

        let reduced_motion = match window.match_media(REDUCED_MOTION_QUERY) {
            Ok(Some(query)) => query.matches(),
            Ok(None) => false,
            Err(e) => {
                log::warn!("css: matchMedia failed: {:?}", e);
                false
            }
        };

        Self {
            style,
            reduced_motion,
        }
    }
}

impl ConfigSource for CssConfigSource {
    fn property(&self, name: &str) -> Option<String> {
        let value = self.style.as_ref()?.get_property_value(name).ok()?;
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}
