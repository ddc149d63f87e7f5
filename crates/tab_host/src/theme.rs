//! Best-effort browser theme-color query contract.

use std::{future::Future, pin::Pin};

/// Object-safe boxed future used by [`ThemeColorService`].
pub type ThemeColorFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service exposing the browser chrome frame color, when one exists.
///
/// The query is optional by contract: every failure mode collapses to `None`
/// and the caller falls back to a neutral color.
pub trait ThemeColorService {
    /// Returns the browser frame color as a CSS color string, if available.
    fn frame_color<'a>(&'a self) -> ThemeColorFuture<'a, Option<String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op theme color service for unsupported targets and baseline tests.
pub struct NoopThemeColorService;

impl ThemeColorService for NoopThemeColorService {
    fn frame_color<'a>(&'a self) -> ThemeColorFuture<'a, Option<String>> {
        Box::pin(async { None })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn noop_theme_color_service_reports_no_color() {
        let service: &dyn ThemeColorService = &NoopThemeColorService;
        assert_eq!(block_on(service.frame_color()), None);
    }
}
